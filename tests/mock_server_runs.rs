//! End-to-end runs against a mock integration API
//!
//! These tests drive the real reqwest-backed client through the runner and
//! check what ends up on disk.

use serde_json::{json, Value};
use std::fs;
use std::io;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};
use woo_endpoint_tester::{
    client::{ApiClient, INVALID_JSON_MESSAGE},
    defaults::RAW_SNIPPET_LIMIT,
    logging::{LogLevel, Logger, RequestLogger},
    models::{Config, SubscriptionId},
    runner::{RunReport, Runner},
};

const API_KEY: &str = "ahc_live_sk_integration";
const EMAIL: &str = "jane@example.com";

fn config_for(base_url: &str, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.base_url = base_url.to_string();
    config.api_key = API_KEY.to_string();
    config.email = EMAIL.to_string();
    config.timeout_seconds = 5;
    config.output_dir = dir.path().to_path_buf();
    config.enable_color = false;
    config
}

async fn run(config: Config) -> RunReport {
    let client = ApiClient::from_config(&config).unwrap();
    let mut quiet = Logger::new("TEST");
    quiet.set_level(LogLevel::Fatal);
    let mut runner = Runner::new(config, client)
        .with_output(Box::new(io::sink()))
        .with_logger(RequestLogger::from_logger(quiet));
    runner.run().await.unwrap()
}

fn read_json(dir: &TempDir, name: &str) -> Value {
    serde_json::from_str(&fs::read_to_string(dir.path().join(name)).unwrap()).unwrap()
}

async fn mount_json(server: &MockServer, request_path: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(request_path))
        .and(query_param("email", EMAIL))
        .and(header("X-API-Key", API_KEY))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn two_subscriptions_produce_two_order_files_in_order() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_json(&server, "/api/woocommerce/subscriptions", 200,
        json!({"count": 2, "subscriptions": [{"id": 10}, {"id": 11}]})).await;
    mount_json(&server, "/api/woocommerce/orders", 200,
        json!({"success": true, "count": 4, "orders": [{"id": 1, "total": "19.99"}]})).await;
    mount_json(&server, "/api/woocommerce/subscriptions/10/orders", 200, json!({"count": 2})).await;
    mount_json(&server, "/api/woocommerce/subscriptions/11/orders", 200, json!({"count": 0})).await;

    let report = run(config_for(&server.uri(), &dir)).await;

    let ids: Vec<SubscriptionId> = report.results().subscription_orders.iter()
        .map(|r| r.subscription_id.clone())
        .collect();
    assert_eq!(ids, vec![SubscriptionId::from(10), SubscriptionId::from(11)]);

    let order_files: Vec<String> = report.files.iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("subscription_"))
        .collect();
    assert_eq!(order_files, vec![
        "subscription_10_orders_response.json",
        "subscription_11_orders_response.json",
    ]);

    assert_eq!(read_json(&dir, "orders_response.json")["orders"][0]["total"], "19.99");
    assert_eq!(report.results().orders.count(), Some(&json!(4)));

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, vec![
        "/api/woocommerce/subscriptions",
        "/api/woocommerce/orders",
        "/api/woocommerce/subscriptions/10/orders",
        "/api/woocommerce/subscriptions/11/orders",
    ]);
}

#[tokio::test]
async fn total_time_covers_every_request() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/woocommerce/subscriptions"))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(json!({"count": 1, "subscriptions": [{"id": 3}]}))
            .set_delay(Duration::from_millis(120)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/woocommerce/orders"))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(json!({"count": 0}))
            .set_delay(Duration::from_millis(80)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/woocommerce/subscriptions/3/orders"))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(json!({"count": 0}))
            .set_delay(Duration::from_millis(50)))
        .mount(&server)
        .await;

    let report = run(config_for(&server.uri(), &dir)).await;
    let results = report.results();

    assert!(results.subscriptions.time_seconds >= 0.12);
    assert!(results.orders.time_seconds >= 0.08);
    assert!(report.summary.total_time_seconds >= results.subscriptions.time_seconds + results.orders.time_seconds);
    assert!(report.summary.total_time_seconds >= results.summed_request_seconds());

    let summary = read_json(&dir, "test_summary.json");
    let saved_total = summary["total_time_seconds"].as_f64().unwrap();
    assert!((saved_total - report.summary.total_time_seconds).abs() < 1e-9);
}

#[tokio::test]
async fn non_json_body_is_saved_with_truncated_snippet() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let page = format!("<!DOCTYPE html><html><body>{}</body></html>", "Bad gateway. ".repeat(100));
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string(page.clone()))
        .mount(&server)
        .await;

    let report = run(config_for(&server.uri(), &dir)).await;

    let saved = read_json(&dir, "subscriptions_response.json");
    assert_eq!(saved["error"], INVALID_JSON_MESSAGE);
    let raw = saved["raw"].as_str().unwrap();
    assert_eq!(raw.chars().count(), RAW_SNIPPET_LIMIT);
    assert!(page.starts_with(raw));

    assert_eq!(report.results().subscriptions.status_code, 502);
    assert_eq!(report.results().subscriptions.error(), Some(INVALID_JSON_MESSAGE));
    assert!(report.results().subscription_orders.is_empty());
}

#[tokio::test]
async fn unreachable_base_url_reports_status_zero_everywhere() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
    drop(listener);
    let dir = TempDir::new().unwrap();

    let report = run(config_for(&base_url, &dir)).await;
    let results = report.results();

    for result in [&results.subscriptions, &results.orders] {
        assert_eq!(result.status_code, 0);
        assert!(!result.error().unwrap().is_empty());
        assert!(result.count().is_none());
    }
    assert!(results.subscription_orders.is_empty());
    assert_eq!(results.failed_count(), 2);

    // Error payloads are still written
    assert!(read_json(&dir, "subscriptions_response.json")["error"].is_string());
    assert!(read_json(&dir, "orders_response.json")["error"].is_string());
    assert_eq!(read_json(&dir, "test_summary.json")["results"]["subscription_orders"], json!([]));
}

#[tokio::test]
async fn non_ascii_payloads_are_written_verbatim() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/woocommerce/orders"))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(json!({"count": 1, "orders": [{"billing": {"first_name": "Zoë", "city": "München"}}]})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/woocommerce/subscriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0, "subscriptions": []})))
        .mount(&server)
        .await;

    run(config_for(&server.uri(), &dir)).await;

    let content = fs::read_to_string(dir.path().join("orders_response.json")).unwrap();
    assert!(content.contains("\"first_name\": \"Zoë\""));
    assert!(content.contains("München"));
    assert!(content.starts_with("{\n  \"count\": 1,"));
}
