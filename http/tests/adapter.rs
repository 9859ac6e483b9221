//! The reqwest adapter against a local mock server

#![allow(clippy::unwrap_used)]

use serde_json::json;
use slicekit_http::{HttpApiClient, HttpConfig};
use slicekit_resource::{ApiClient, ApiRequest, Method, QueryParams};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> HttpApiClient {
    HttpApiClient::new(&HttpConfig::new(format!("{}/api/", server.uri())).with_token("secret").with_no_proxy()).unwrap()
}

#[tokio::test]
async fn sends_query_token_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payments"))
        .and(query_param("PageNumber", "1"))
        .and(query_param("MinAmount", "0"))
        .and(header("authorization", "Bearer secret"))
        .and(body_json(json!({"amount": 12.5})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"isSuccess": true, "data": {"id": 4}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = ApiRequest::new(Method::Post, "/payments")
        .with_query(QueryParams::new().with("PageNumber", 1).with("MinAmount", 0))
        .with_body(json!({"amount": 12.5}));
    let response = client.execute(request).await.unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.body.unwrap()["data"]["id"], json!(4));
}

#[tokio::test]
async fn error_statuses_are_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/meters/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"isSuccess": false, "message": "Meter not found"})))
        .mount(&server)
        .await;

    let response = client_for(&server)
        .await
        .execute(ApiRequest::new(Method::Get, "/meters/9"))
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert!(!response.is_success());
    assert_eq!(response.body.unwrap()["message"], json!("Meter not found"));
}

#[tokio::test]
async fn empty_and_non_json_bodies_have_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/roles/3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/roles"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;
    let client = client_for(&server).await;

    let deleted = client.execute(ApiRequest::new(Method::Delete, "/roles/3")).await.unwrap();
    assert_eq!(deleted.status, 204);
    assert_eq!(deleted.body, None);

    let gateway = client.execute(ApiRequest::new(Method::Get, "/roles")).await.unwrap();
    assert_eq!(gateway.status, 502);
    assert_eq!(gateway.body, None);
}

#[tokio::test]
async fn requests_without_a_token_are_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isSuccess": true, "data": []})))
        .mount(&server)
        .await;

    let client = HttpApiClient::new(&HttpConfig::new(server.uri()).with_no_proxy()).unwrap();
    client.execute(ApiRequest::new(Method::Get, "/agents")).await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(!received[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = HttpApiClient::new(&HttpConfig::new(uri).with_timeout_secs(2).with_no_proxy()).unwrap();
    let error = client
        .execute(ApiRequest::new(Method::Get, "/customers"))
        .await
        .unwrap_err();

    assert!(!error.message.is_empty());
}
