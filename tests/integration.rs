//! Integration tests for the Payslip Extract Engine.
//!
//! This test suite drives the HTTP API end to end:
//! - Single and batch breakdowns
//! - Lenient amount parsing and placeholder formatting
//! - Text payslip rendering
//! - dBase extract upload
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use payslip_engine::api::{AppState, create_router};
use payslip_engine::config::ConfigLoader;
use payslip_engine::extract::{DbfField, FieldType, write_extract};
use payslip_engine::models::RawRow;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/st_josephs").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body_bytes.to_vec())
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = send(router, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_extract(router: Router, file_name: &str, bytes: Vec<u8>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/extract?file_name={}", file_name))
        .header("Content-Type", "application/octet-stream")
        .body(Body::from(bytes))
        .unwrap();
    let (status, bytes) = send(router, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn deduction<'a>(breakdown: &'a Value, label: &str) -> &'a str {
    breakdown["deductions"]
        .as_array()
        .unwrap()
        .iter()
        .find(|line| line["label"] == label)
        .map(|line| line["value"].as_str().unwrap())
        .unwrap_or_else(|| panic!("no deduction labelled {}", label))
}

fn sample_extract() -> Vec<u8> {
    let fields = vec![
        DbfField::new("EMPNO", FieldType::Numeric, 5, 0),
        DbfField::new("NAME", FieldType::Character, 25, 0),
        DbfField::new("GROSS", FieldType::Numeric, 10, 2),
        DbfField::new("BASIC_P", FieldType::Numeric, 10, 2),
        DbfField::new("DA_P", FieldType::Numeric, 10, 2),
        DbfField::new("SPPAY_P", FieldType::Numeric, 10, 2),
        DbfField::new("DAYS", FieldType::Numeric, 2, 0),
        DbfField::new("PF", FieldType::Numeric, 8, 0),
        DbfField::new("MESS", FieldType::Numeric, 8, 0),
    ];
    let rows = vec![
        RawRow::new()
            .with("EMPNO", 101)
            .with("NAME", "A. MARY")
            .with("GROSS", 48250)
            .with("BASIC_P", 30000)
            .with("DA_P", 15000)
            .with("SPPAY_P", 3250)
            .with("DAYS", 30)
            .with("PF", 3600)
            .with("MESS", 1500),
        RawRow::new().with("NAME", "UNNUMBERED"),
        RawRow::new()
            .with("EMPNO", 102)
            .with("NAME", "J. PAUL")
            .with("GROSS", 12000)
            .with("DAYS", 18),
    ];
    let mut bytes = Vec::new();
    write_extract(&fields, &rows, &mut bytes).unwrap();
    bytes
}

// =============================================================================
// Breakdown
// =============================================================================

#[tokio::test]
async fn test_full_row_breakdown() {
    let router = create_router_for_test();
    let body = json!({
        "row": {
            "NAME": "  S. ANTONY  ",
            "GROSS": "1,23,456",
            "BASIC_P": 70000,
            "DA_P": 40000.75,
            "SPPAY_P": "13456",
            "DAYS": 30,
            "PF": "12,000",
            "TEACH": 5000,
            "CHURCH": "2,500.90",
            "ARREAR": null
        }
    });

    let (status, result) = post_json(router, "/breakdown", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["name"], "S. ANTONY");
    assert_eq!(result["pay"], "123,456");
    assert_eq!(result["basic"], "70,000");
    assert_eq!(result["da"], "40,000");
    assert_eq!(result["oa"], "13,456");
    assert_eq!(result["days"], "30");
    assert_eq!(deduction(&result, "P.F"), "12,000");
    assert_eq!(deduction(&result, "Teacher's Loan 1"), "5,000");
    assert_eq!(deduction(&result, "Church Contri."), "2,500");
    assert_eq!(deduction(&result, "Arrear"), "-");
    assert_eq!(deduction(&result, "OD Recovered"), "-");
    assert_eq!(result["total_deductions"], "19,500");
    assert_eq!(result["net_pay"], "103,956");
}

#[tokio::test]
async fn test_empty_row_is_all_placeholders() {
    let router = create_router_for_test();

    let (status, result) = post_json(router, "/breakdown", json!({ "row": {} })).await;

    assert_eq!(status, StatusCode::OK);
    for key in ["name", "pay", "basic", "da", "oa", "days", "total_deductions", "net_pay"] {
        assert_eq!(result[key], "-", "field {}", key);
    }
    let deductions = result["deductions"].as_array().unwrap();
    assert_eq!(deductions.len(), 14);
    assert!(deductions.iter().all(|line| line["value"] == "-"));
}

#[tokio::test]
async fn test_unparseable_amounts_degrade_to_zero() {
    let router = create_router_for_test();
    let body = json!({
        "row": { "GROSS": "abc", "PF": "n/a", "MESS": true, "TEACH": "500" }
    });

    let (status, result) = post_json(router, "/breakdown", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["pay"], "-");
    assert_eq!(result["total_deductions"], "500");
    assert_eq!(result["net_pay"], "-500");
}

#[tokio::test]
async fn test_deduction_order_follows_catalog() {
    let router = create_router_for_test();

    let (_, result) = post_json(router, "/breakdown", json!({ "row": {} })).await;

    let labels: Vec<&str> = result["deductions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels.first(), Some(&"P.F"));
    assert_eq!(labels[12], "OD Recovered");
    assert_eq!(labels.last(), Some(&"Arrear"));
}

#[tokio::test]
async fn test_batch_breakdowns_keep_order() {
    let router = create_router_for_test();
    let body = json!({
        "rows": [
            { "NAME": "FIRST", "GROSS": 1000 },
            { "NAME": "SECOND", "GROSS": 2000, "PF": 2000 },
            {}
        ]
    });

    let (status, result) = post_json(router, "/breakdowns", body).await;

    assert_eq!(status, StatusCode::OK);
    let breakdowns = result["breakdowns"].as_array().unwrap();
    assert_eq!(breakdowns.len(), 3);
    assert_eq!(breakdowns[0]["name"], "FIRST");
    assert_eq!(breakdowns[1]["net_pay"], "-");
    assert_eq!(breakdowns[2]["name"], "-");
}

// =============================================================================
// Payslip rendering
// =============================================================================

#[tokio::test]
async fn test_payslip_text_layout() {
    let router = create_router_for_test();
    let body = json!({
        "row": { "NAME": "A. MARY", "GROSS": 10000, "BASIC_P": 6000, "PF": 3000 },
        "month": 11,
        "year": 2024
    });
    let request = Request::builder()
        .method("POST")
        .uri("/payslip")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let (status, bytes) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0].trim(),
        "ST.JOSEPH'S HIGHER SECONDARY SCHOOL, CUDDALORE-1"
    );
    assert_eq!(lines[1].trim(), "Payslip for the month of November 2024");
    assert!(lines[3].starts_with("Name: A. MARY"));
    assert!(!text.contains("days salary"));
    assert!(text.contains("P.F             : 3,000"));
    assert!(text.contains("Net Pay: 7,000"));
}

#[tokio::test]
async fn test_payslip_rejects_month_zero() {
    let router = create_router_for_test();
    let body = json!({ "row": {}, "month": 0, "year": 2025 });

    let (status, error) = post_json(router, "/payslip", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Extract upload
// =============================================================================

#[tokio::test]
async fn test_extract_upload() {
    let router = create_router_for_test();

    let (status, result) = post_extract(router, "SAL_0525.dbf", sample_extract()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["month"], 5);
    assert_eq!(result["month_name"], "May");
    assert_eq!(result["year"], 2025);
    assert_eq!(result["skipped"], 1);

    let payslips = result["payslips"].as_array().unwrap();
    assert_eq!(payslips.len(), 2);

    let mary = &payslips[0];
    assert_eq!(mary["empno"], 101);
    assert_eq!(mary["breakdown"]["name"], "A. MARY");
    assert_eq!(mary["breakdown"]["pay"], "48,250");
    assert_eq!(mary["breakdown"]["oa"], "3,250");
    assert_eq!(mary["breakdown"]["total_deductions"], "5,100");
    assert_eq!(mary["breakdown"]["net_pay"], "43,150");

    let paul = &payslips[1];
    assert_eq!(paul["empno"], 102);
    assert_eq!(paul["breakdown"]["days"], "18");
    assert_eq!(paul["breakdown"]["basic"], "-");
}

#[tokio::test]
async fn test_extract_name_without_period_returns_400() {
    let router = create_router_for_test();

    let (status, error) = post_extract(router, "payroll.dbf", sample_extract()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_EXTRACT_NAME");
}

#[tokio::test]
async fn test_truncated_extract_returns_422() {
    let router = create_router_for_test();
    let mut bytes = sample_extract();
    bytes.truncate(bytes.len() / 2);

    let (status, error) = post_extract(router, "SAL_0525.dbf", bytes).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "INVALID_EXTRACT");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_rows_must_be_an_array() {
    let router = create_router_for_test();

    let (status, error) = post_json(router, "/breakdowns", json!({ "rows": "nope" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let router = create_router_for_test();
    let request = Request::builder()
        .method("POST")
        .uri("/calculate")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(router, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
