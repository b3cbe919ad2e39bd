use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

use app_api::AppContext;
use bluefin_app::{AppConfig, AppState};

use http_api::{CSRF_HEADER, HttpState};

const TEST_TOKEN: &str = "testtoken";

const LOG: &str = "MONTH,DAY,HR,WAREHOUSE_SIZE,UNIQUE_WH_NAME,QUERY_COUNT,IS_READ,IS_WRITE,READ_TIME,WRITE_TIME\n\
1,1,0,Medium,BI_WH,3,1,0,10,0\n\
1,1,0,X-Large,ETL_WH,1,0,1,0,20\n";

fn build_app() -> axum::Router {
    let app_state = AppState::new(AppConfig::default()).expect("app state");
    let state = HttpState::new(AppContext { app_state }, TEST_TOKEN.to_string());
    http_api::router(state)
}

async fn send(router: &axum::Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.expect("response")
}

async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes()
        .to_vec()
}

async fn json_body(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}

fn post_json(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(CSRF_HEADER, TEST_TOKEN)
        .body(Body::from("{}"))
        .expect("request")
}

fn upload(name: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/upload?name={name}"))
        .header(header::CONTENT_TYPE, "text/csv")
        .header(CSRF_HEADER, TEST_TOKEN)
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn export(query: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/api/export{query}"))
        .header(CSRF_HEADER, TEST_TOKEN)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn serves_index_and_injects_token() {
    let router = build_app();

    let response = send(
        &router,
        Request::builder()
            .uri("/")
            .body(Body::empty())
            .expect("request"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    assert!(content_type.contains("text/html"));

    let body = body_bytes(response).await;
    let body_text = String::from_utf8_lossy(&body);
    assert!(body_text.contains("__BLUEFIN_CSRF__"));
    assert!(body_text.contains(TEST_TOKEN));
}

#[tokio::test]
async fn api_rejects_missing_csrf() {
    let router = build_app();

    let response = send(
        &router,
        Request::builder()
            .method("POST")
            .uri("/api/report")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .expect("request"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let payload = json_body(response).await;
    assert_eq!(payload["code"], "csrf_invalid");
}

#[tokio::test]
async fn api_rejects_foreign_origin() {
    let router = build_app();

    let mut request = post_json("/api/report");
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://example.com".parse().expect("origin"));
    let response = send(&router, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let payload = json_body(response).await;
    assert_eq!(payload["code"], "invalid_origin");
}

#[tokio::test]
async fn upload_then_report_and_export() {
    let router = build_app();

    let response = send(&router, post_json("/api/report")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(json_body(response).await["report"].is_null());

    let response = send(&router, upload("usage.csv", LOG)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = json_body(response).await;
    assert_eq!(report["source_name"], "usage.csv");
    assert_eq!(report["rows_read"], 2);
    let warehouses = report["warehouses"].as_array().expect("warehouses");
    assert_eq!(warehouses.len(), 2);
    // The write-only X-Large warehouse is the most expensive and least
    // efficient, so it is reviewed first.
    assert_eq!(warehouses[0]["warehouse_name"], "ETL_WH");
    assert_eq!(warehouses[0]["scrutiny_rank"], 1);

    let response = send(&router, post_json("/api/report")).await;
    let current = json_body(response).await;
    assert_eq!(current["report"]["warehouses"], report["warehouses"]);

    let response = send(&router, export("?file_name=march")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert_eq!(disposition, "attachment; filename=\"march.csv\"");
    let csv = String::from_utf8(body_bytes(response).await).expect("utf8");
    let mut lines = csv.lines();
    assert!(lines.next().expect("header").starts_with(",WAREHOUSE_SIZE,"));
    assert!(lines.next().expect("row").starts_with("0,X-Large,ETL_WH,"));
}

#[tokio::test]
async fn export_defaults_file_name() {
    let router = build_app();
    let response = send(&router, upload("usage.csv", LOG)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&router, export("")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(disposition.ends_with("filename=\"warehouse_breakdown.csv\""));
}

#[tokio::test]
async fn export_without_report_is_not_found() {
    let router = build_app();

    let response = send(&router, export("")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["code"], "not_found");
}

#[tokio::test]
async fn bad_upload_keeps_previous_report() {
    let router = build_app();
    let response = send(&router, upload("good.csv", LOG)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&router, upload("bad.csv", "MONTH,DAY\n1,1\n")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "missing_column");

    let unknown = LOG.replace("Medium", "Huge");
    let response = send(&router, upload("huge.csv", &unknown)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "unknown_warehouse_size");

    let response = send(&router, post_json("/api/report")).await;
    assert_eq!(json_body(response).await["report"]["source_name"], "good.csv");
}

#[tokio::test]
async fn reset_clears_report() {
    let router = build_app();
    send(&router, upload("usage.csv", LOG)).await;

    let response = send(&router, post_json("/api/reset")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["cleared"], true);

    let response = send(&router, post_json("/api/reset")).await;
    assert_eq!(json_body(response).await["cleared"], false);

    let response = send(&router, export("")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn settings_reports_policy() {
    let router = build_app();

    let response = send(&router, post_json("/api/settings_get")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    assert_eq!(payload["policy"]["credit_price_usd"], 3.0);
    assert_eq!(payload["default_export_name"], "warehouse_breakdown");
}
