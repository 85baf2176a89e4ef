use std::path::PathBuf;

use clap::Parser;

use country_catalog::config::{self, CatalogConfig};
use country_catalog::lifecycle::{signals, Application, Shutdown};
use country_catalog::observability::logging;

#[derive(Parser)]
#[command(name = "country-catalog")]
#[command(about = "HTTP catalog of countries and their neighbors", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults plus environment are used when absent.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn load(args: &Args) -> Result<CatalogConfig, config::ConfigError> {
    match &args.config {
        Some(path) => config::load_config(path),
        None => config::load_from_env(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load(&args)?;

    logging::init_logging(&config.observability)?;
    tracing::info!("country-catalog v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        store = %config.store.url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let app = Application::build(config).await?;
    tracing::info!(address = %app.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    app.run(shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
