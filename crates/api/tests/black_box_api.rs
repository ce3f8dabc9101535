use std::net::SocketAddr;

use forgeweb_api::{app::services::LARGE_ACCOUNT_ID, ServerConfig};
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = forgeweb_api::build_app(&ServerConfig::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
                .await
                .unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_is_an_empty_success_envelope() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("traceid").is_some());

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({"statusCode": 200, "message": "success"}));
}

#[tokio::test]
async fn caller_trace_id_is_echoed_and_visible_to_handlers() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/time", srv.base_url))
        .header("traceId", "caller-42")
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers().get("traceid").unwrap(), "caller-42");
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["content"]["traceId"], "caller-42");
    let now_millis = body["content"]["nowMillis"].as_str().unwrap();
    assert!(now_millis.parse::<i64>().is_ok());
    assert_eq!(body["content"]["now"].as_str().unwrap().len(), "2024-01-01 00:00:00".len());
}

#[tokio::test]
async fn account_lifecycle_open_withdraw_overdraw() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Open
    let res = client
        .post(format!("{}/accounts", srv.base_url))
        .json(&json!({ "owner": "lin", "deposit": 50, "openedOn": "2024-02-29" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let opened: serde_json::Value = res.json().await.unwrap();
    assert_eq!(opened["statusCode"], 200);
    assert_eq!(opened["content"]["openedOn"], "2024-02-29");
    let id: u64 = opened["content"]["id"].as_str().unwrap().parse().unwrap();

    // Withdraw
    let res = client
        .post(format!("{}/accounts/{}/withdraw", srv.base_url, id))
        .json(&json!({ "amount": 20, "reference": "rent" }))
        .send()
        .await
        .unwrap();
    if res.status() != StatusCode::OK {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        panic!("expected 200 OK from withdraw, got {status} body={body}");
    }
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["content"]["balance"], "30");

    // Overdraw is an informational business failure
    let res = client
        .post(format!("{}/accounts/{}/withdraw", srv.base_url, id))
        .json(&json!({ "amount": 31, "reference": "rent" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::EXPECTATION_FAILED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({"statusCode": 4001, "message": "insufficient balance"}));
}

#[tokio::test]
async fn frozen_account_is_a_400_with_business_code() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/accounts/1/freeze", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/accounts/1/withdraw", srv.base_url))
        .json(&json!({ "amount": 1, "reference": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({"statusCode": 4002, "message": "account frozen"}));
}

#[tokio::test]
async fn division_by_zero_is_hidden_behind_the_generic_500() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/accounts/1/average?days=0", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let text = res.text().await.unwrap();
    assert!(!text.contains("division"));
    let body: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        body,
        json!({"statusCode": 50000, "message": "Internal Server Error or IllegalArgumentException"})
    );
}

#[tokio::test]
async fn statement_accepts_formatted_or_epoch_dates() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/accounts/1/statement?from=2024-03-01", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["content"]["from"], "2024-03-01");
    assert_eq!(body["content"]["accountId"], "1");

    let res = reqwest::get(format!("{}/accounts/1/statement?from=1709251200000", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = reqwest::get(format!("{}/accounts/1/statement", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({"statusCode": 400, "message": "param error"}));
}

#[tokio::test]
async fn integers_are_strings_on_the_wire() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/accounts/{}", srv.base_url, LARGE_ACCOUNT_ID))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["content"]["id"], LARGE_ACCOUNT_ID.to_string());
    assert_eq!(body["content"]["balance"], "5000");
    assert!(body["content"]["frozen"].is_boolean());
    assert_eq!(body["statusCode"], 200);
}

#[tokio::test]
async fn unknown_account_and_unknown_path_differ() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/accounts/777", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::EXPECTATION_FAILED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["statusCode"], 4004);

    let res = reqwest::get(format!("{}/ledger", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["statusCode"], 404);
}

#[tokio::test]
async fn wrong_method_is_a_method_error() {
    let srv = TestServer::spawn().await;

    let res = reqwest::Client::new()
        .delete(format!("{}/accounts/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({"statusCode": 401, "message": "http request method error"}));
}
