// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

use std::net::SocketAddr;
use std::path::PathBuf;

use blockflow::config::ServerConfig;
use blockflow::server::{ErrorBody, GenerateResponse, Server};
use blockflow::{ConvertOptions, DuplicateIdPolicy};
use serde_json::json;
use tempfile::TempDir;

async fn start(options: ConvertOptions, static_dir: Option<PathBuf>) -> SocketAddr {
    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        static_dir,
    };
    let server = Server::bind(&config, options).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run_until(std::future::pending()));
    addr
}

#[tokio::test]
async fn test_generate_yaml() {
    let addr = start(ConvertOptions::default(), None).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/generate-yaml", addr))
        .json(&json!({
            "blocks": [
                {"id": "a", "type": "build", "data": {}, "position": {"x": 1, "y": 2}},
                {"id": "b", "type": "test", "data": {}, "position": {"x": 1, "y": 80}}
            ],
            "edges": [{"source": "a", "target": "b"}]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: GenerateResponse = response.json().await.unwrap();
    assert_eq!(
        body.yaml,
        "stages:\n- build\n- test\njobs:\n  a:\n    stage: build\n    script: echo build\n  b:\n    stage: test\n    script: echo test\n    needs:\n    - a\n"
    );
}

#[tokio::test]
async fn test_empty_graph() {
    let addr = start(ConvertOptions::default(), None).await;

    let body: GenerateResponse = reqwest::Client::new()
        .post(format!("http://{}/generate-yaml", addr))
        .json(&json!({"blocks": [], "edges": []}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body.yaml, "stages: []\njobs: {}\n");
}

#[tokio::test]
async fn test_dangling_edge_is_unprocessable() {
    let addr = start(ConvertOptions::default(), None).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/generate-yaml", addr))
        .json(&json!({
            "blocks": [{"id": "a", "type": "build", "data": {}, "position": {}}],
            "edges": [{"source": "a", "target": "ghost"}]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "dangling_edge");
    assert!(body.detail.contains("'ghost'"));
}

#[tokio::test]
async fn test_duplicate_ids_rejected_when_configured() {
    let addr = start(
        ConvertOptions {
            duplicate_ids: DuplicateIdPolicy::Reject,
        },
        None,
    )
    .await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/generate-yaml", addr))
        .json(&json!({
            "blocks": [
                {"id": "x", "type": "build", "data": {}, "position": {}},
                {"id": "x", "type": "deploy", "data": {}, "position": {}}
            ],
            "edges": []
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "duplicate_block_id");
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let addr = start(ConvertOptions::default(), None).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/generate-yaml", addr))
        .json(&json!({"blocks": [{"id": "a"}], "edges": []}))
        .send()
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_request_fields_are_required() {
    let addr = start(ConvertOptions::default(), None).await;
    let client = reqwest::Client::new();

    for body in [
        json!({"blocks": [{"id": "a", "type": "build", "data": {}}], "edges": []}),
        json!({"blocks": [{"id": "a", "type": "build", "position": {}}], "edges": []}),
        json!({"blocks": []}),
        json!({"edges": []}),
    ] {
        let response = client
            .post(format!("http://{}/generate-yaml", addr))
            .json(&body)
            .send()
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            reqwest::StatusCode::UNPROCESSABLE_ENTITY,
            "body: {}",
            body
        );
    }
}

#[tokio::test]
async fn test_health() {
    let addr = start(ConvertOptions::default(), None).await;

    let body: serde_json::Value = reqwest::get(format!("http://{}/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], blockflow::VERSION);
}

#[tokio::test]
async fn test_static_frontend() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>editor</h1>").unwrap();
    std::fs::write(dir.path().join("script.js"), "console.log(1);").unwrap();
    let addr = start(ConvertOptions::default(), Some(dir.path().to_path_buf())).await;

    let index = reqwest::get(format!("http://{}/", addr)).await.unwrap();
    assert_eq!(index.status(), reqwest::StatusCode::OK);
    assert!(index.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(index.text().await.unwrap(), "<h1>editor</h1>");

    let script = reqwest::get(format!("http://{}/script.js", addr)).await.unwrap();
    assert_eq!(script.status(), reqwest::StatusCode::OK);
    assert_eq!(script.text().await.unwrap(), "console.log(1);");

    let missing = reqwest::get(format!("http://{}/nope.css", addr)).await.unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_frontend_decodes_file_names() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("my file.js"), "let spaced = true;").unwrap();
    let addr = start(ConvertOptions::default(), Some(dir.path().to_path_buf())).await;

    let response = reqwest::get(format!("http://{}/my%20file.js", addr)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .contains("javascript"));
    assert_eq!(response.text().await.unwrap(), "let spaced = true;");
}

#[tokio::test]
async fn test_no_frontend_by_default() {
    let addr = start(ConvertOptions::default(), None).await;

    let response = reqwest::get(format!("http://{}/", addr)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}
