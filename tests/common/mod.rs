//! Shared utilities for integration tests.

use std::net::SocketAddr;

use country_catalog::config::CatalogConfig;
use country_catalog::lifecycle::{Application, Shutdown};
use serde_json::Value;

/// A catalog server running on an ephemeral port for the duration of a test.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    /// Start with default config and an in-memory store.
    pub async fn start() -> Self {
        Self::start_with(CatalogConfig::default()).await
    }

    pub async fn start_with(mut config: CatalogConfig) -> Self {
        config.listener.bind_address = "127.0.0.1:0".to_string();

        let app = Application::build(config).await.expect("server should build");
        let addr = app.local_addr().unwrap();
        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();

        tokio::spawn(async move {
            let _ = app.run(rx).await;
        });

        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .unwrap();

        Self {
            addr,
            client,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> (u16, Value) {
        let res = self.client.get(self.url(path)).send().await.expect("server unreachable");
        let status = res.status().as_u16();
        (status, res.json().await.unwrap_or(Value::Null))
    }

    pub async fn post(&self, path: &str, body: &Value) -> (u16, Value) {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("server unreachable");
        let status = res.status().as_u16();
        (status, res.json().await.unwrap_or(Value::Null))
    }

    /// Insert `countries` (a JSON array) and return their ids in order.
    pub async fn seed(&self, countries: Value) -> Vec<String> {
        let (status, body) = self.post("/country", &countries).await;
        assert_eq!(status, 201, "seeding failed: {}", body);
        body["data"]["countries"]
            .as_array()
            .expect("countries array")
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Names of the countries in a `data.list` array.
#[allow(dead_code)]
pub fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|c| c["name"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
