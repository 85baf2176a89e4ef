//! File-backed store behavior through the HTTP surface.

use country_catalog::config::CatalogConfig;
use serde_json::json;

mod common;
use common::{names, TestServer};

fn file_config(path: &std::path::Path) -> CatalogConfig {
    let mut config = CatalogConfig::default();
    config.store.url = format!("file://{}", path.display());
    config
}

#[tokio::test]
async fn test_data_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(&dir.path().join("catalog.json"));

    let ids = {
        let server = TestServer::start_with(config.clone()).await;
        let ids = server.seed(json!([{ "name": "Laos" }, { "name": "Vietnam" }])).await;
        let (status, _) = server
            .post(&format!("/country/{}/neighbors", ids[0]), &json!([ids[1]]))
            .await;
        assert_eq!(status, 200);
        ids
    };

    let server = TestServer::start_with(config).await;
    let (_, body) = server.get("/country").await;
    assert_eq!(names(&body["data"]["list"]), vec!["Laos", "Vietnam"]);

    let (_, body) = server.get(&format!("/country/{}/neighbour", ids[0])).await;
    assert_eq!(names(&body["data"]["list"]), vec!["Vietnam"]);
}

#[tokio::test]
async fn test_store_failure_persists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(&dir.path().join("missing-dir").join("catalog.json"));
    let server = TestServer::start_with(config).await;

    let (status, body) = server
        .post("/country", &json!([{ "name": "A" }, { "name": "B" }, { "name": "C" }]))
        .await;
    assert_eq!(status, 500);
    assert!(body.get("error").is_none());

    let (status, body) = server.get("/country").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["total"], 0);
}
