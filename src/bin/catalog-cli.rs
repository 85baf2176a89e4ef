use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Command-line client for the country catalog service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of countries
    List {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = 10)]
        limit: u64,
        /// a_to_z, z_to_a, population_high_to_low, population_low_to_high,
        /// area_high_to_low or area_low_to_high
        #[arg(long)]
        sort_by: Option<String>,
        /// Case-insensitive match on name, region or subregion
        #[arg(long)]
        search: Option<String>,
    },
    /// List every country in one sort order
    Sorted {
        #[arg(long)]
        sort_by: Option<String>,
    },
    /// Show one country
    Get { id: String },
    /// Add countries from a JSON file (an object or an array of objects)
    Add { file: PathBuf },
    /// List a country's neighbors
    Neighbors { id: String },
    /// Add neighbor edges from a country to each given country
    AddNeighbors {
        id: String,
        #[arg(required = true)]
        neighbor_ids: Vec<String>,
    },
    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::List {
            page,
            limit,
            sort_by,
            search,
        } => {
            let mut query = vec![("page", page.to_string()), ("limit", limit.to_string())];
            if let Some(sort_by) = sort_by {
                query.push(("sort_by", sort_by));
            }
            if let Some(search) = search {
                query.push(("search", search));
            }
            client.get(format!("{}/country", base)).query(&query).send().await?
        }
        Commands::Sorted { sort_by } => {
            let mut request = client.get(format!("{}/country/sorted", base));
            if let Some(sort_by) = sort_by {
                request = request.query(&[("sort_by", sort_by)]);
            }
            request.send().await?
        }
        Commands::Get { id } => client.get(format!("{}/country/{}", base, id)).send().await?,
        Commands::Add { file } => {
            let body: Value = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
            client.post(format!("{}/country", base)).json(&body).send().await?
        }
        Commands::Neighbors { id } => {
            client
                .get(format!("{}/country/{}/neighbour", base, id))
                .send()
                .await?
        }
        Commands::AddNeighbors { id, neighbor_ids } => {
            client
                .post(format!("{}/country/{}/neighbors", base, id))
                .json(&neighbor_ids)
                .send()
                .await?
        }
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: catalog returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
