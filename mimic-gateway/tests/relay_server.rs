#![cfg(feature = "server")]

use mimic_gateway::prelude::*;
use mimic_gateway::{GatewayServer, GatewayState};
use mimic_model::{Catalog, RequestItem, RequestSpec};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn start_relay() -> GatewayServer {
    let gateway: Arc<dyn Gateway> = Arc::new(HttpGateway::new().unwrap());
    let state = GatewayState::new(gateway, Catalog::builtin());
    GatewayServer::start("127.0.0.1:0".parse().unwrap(), state)
        .await
        .expect("relay binds")
}

#[tokio::test]
async fn test_relay_round_trip() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/text"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("plain", "text/plain"))
        .mount(&upstream)
        .await;

    let relay = start_relay().await;
    let client = RelayClient::new(relay.url()).unwrap();

    let json_payload = client
        .execute(&ProxyRequest::from(&RequestSpec::get(format!("{}/json", upstream.uri()))))
        .await
        .unwrap();
    assert_eq!(json_payload, ProxyPayload::Json(json!({"id": 1})));

    let text_payload = client
        .execute(&ProxyRequest::from(&RequestSpec::get(format!("{}/text", upstream.uri()))))
        .await
        .unwrap();
    assert_eq!(text_payload, ProxyPayload::Text("plain".to_string()));

    relay.shutdown().await;
}

#[tokio::test]
async fn test_relay_mirrors_upstream_status() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"msg": "not found"})))
        .mount(&upstream)
        .await;

    let relay = start_relay().await;
    let response = reqwest::Client::new()
        .post(format!("{}/api/proxy", relay.url()))
        .json(&json!({"url": format!("{}/missing", upstream.uri()), "method": "GET"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"], json!({"msg": "not found"}));
    assert!(body["error"].as_str().unwrap().contains("404"));

    let client = RelayClient::new(relay.url()).unwrap();
    let err = client
        .execute(&ProxyRequest::from(&RequestSpec::get(format!("{}/missing", upstream.uri()))))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert!(err.to_string().contains("404"));
    assert_eq!(err.data(), Some(&json!({"msg": "not found"})));

    relay.shutdown().await;
}

#[tokio::test]
async fn test_relay_rejects_missing_fields() {
    let relay = start_relay().await;
    let response = reqwest::Client::new()
        .post(format!("{}/api/proxy", relay.url()))
        .json(&json!({"method": "GET"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Missing url or method"}));

    relay.shutdown().await;
}

#[tokio::test]
async fn test_relay_reports_transport_failure() {
    let relay = start_relay().await;
    let response = reqwest::Client::new()
        .post(format!("{}/api/proxy", relay.url()))
        .json(&json!({"url": "http://127.0.0.1:1/", "method": "GET"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());

    relay.shutdown().await;
}

#[tokio::test]
async fn test_relay_serves_catalog() {
    let relay = start_relay().await;
    let items: Vec<RequestItem> = reqwest::get(format!("{}/api/items", relay.url()))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(items.len(), Catalog::builtin().len());
    assert_eq!(items[0].id, "ui-1");

    relay.shutdown().await;
}
