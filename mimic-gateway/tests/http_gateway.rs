use mimic_gateway::prelude::*;
use mimic_model::RequestSpec;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway() -> HttpGateway {
    HttpGateway::new().expect("client builds")
}

#[tokio::test]
async fn test_json_response_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;

    let spec = RequestSpec::get(format!("{}/users/1", server.uri()));
    let payload = gateway()
        .execute(&ProxyRequest::from(&spec))
        .await
        .unwrap();

    assert_eq!(payload, ProxyPayload::Json(json!({"id": 1})));
}

#[tokio::test]
async fn test_text_response_is_wrapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("ok", "text/plain; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let spec = RequestSpec::get(format!("{}/health", server.uri()));
    let payload = gateway()
        .execute(&ProxyRequest::from(&spec))
        .await
        .unwrap();

    assert_eq!(payload.clone(), ProxyPayload::Text("ok".to_string()));
    assert_eq!(payload.into_wire(), json!({"_rawText": "ok"}));
}

#[tokio::test]
async fn test_upstream_failure_keeps_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"msg": "not found"})),
        )
        .mount(&server)
        .await;

    let spec = RequestSpec::get(format!("{}/missing", server.uri()));
    let err = gateway()
        .execute(&ProxyRequest::from(&spec))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("404"));
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.data(), Some(&json!({"msg": "not found"})));
}

#[tokio::test]
async fn test_object_body_defaults_to_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"title": "New Post", "userId": 1})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 101})))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RequestSpec::post(
        format!("{}/posts", server.uri()),
        json!({"title": "New Post", "userId": 1}),
    );
    let payload = gateway()
        .execute(&ProxyRequest::from(&spec))
        .await
        .unwrap();

    assert_eq!(payload, ProxyPayload::Json(json!({"id": 101})));
}

#[tokio::test]
async fn test_text_body_sent_unmodified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .and(header("content-type", "text/plain"))
        .and(body_string("hello world"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("saved", "text/plain"))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RequestSpec::post(format!("{}/notes", server.uri()), json!("hello world"))
        .with_content_type("text/plain");
    let payload = gateway()
        .execute(&ProxyRequest::from(&spec))
        .await
        .unwrap();

    assert_eq!(payload, ProxyPayload::Text("saved".to_string()));
}

#[tokio::test]
async fn test_content_type_field_beats_header() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/doc"))
        .and(header("content-type", "application/xml"))
        .and(header("x-trace", "abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RequestSpec::new(mimic_model::RequestMethod::Put, format!("{}/doc", server.uri()))
        .with_header("Content-Type", "text/plain")
        .with_header("X-Trace", "abc")
        .with_body(json!("<doc/>"))
        .with_content_type("application/xml");
    let payload = gateway()
        .execute(&ProxyRequest::from(&spec))
        .await
        .unwrap();

    assert_eq!(payload, ProxyPayload::Text(String::new()));

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].body, b"<doc/>".to_vec());
}

#[tokio::test]
async fn test_get_never_sends_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let spec = RequestSpec::get(format!("{}/users", server.uri()))
        .with_body(json!({"ignored": true}));
    gateway()
        .execute(&ProxyRequest::from(&spec))
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert!(received[0].body.is_empty());
}

#[tokio::test]
async fn test_missing_url_makes_no_call() {
    let request = ProxyRequest {
        method: Some("GET".to_string()),
        ..Default::default()
    };
    let err = gateway().execute(&request).await.unwrap_err();
    assert_eq!(err, GatewayError::InvalidRequest("Missing url or method".to_string()));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_unreachable_target_is_transport_error() {
    let spec = RequestSpec::get("http://127.0.0.1:1/unreachable");
    let err = gateway()
        .execute(&ProxyRequest::from(&spec))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_malformed_url_is_transport_error() {
    let spec = RequestSpec::get("not a url");
    let err = gateway()
        .execute(&ProxyRequest::from(&spec))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let gateway = HttpGateway::with_config(
        GatewayConfig::default().with_timeout(Duration::from_millis(50)),
    )
    .unwrap();
    let spec = RequestSpec::get(format!("{}/slow", server.uri()));
    let err = gateway
        .execute(&ProxyRequest::from(&spec))
        .await
        .unwrap_err();

    assert_eq!(err, GatewayError::Timeout(Duration::from_millis(50)));
}
