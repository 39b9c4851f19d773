//! Comprehensive integration tests for the Benefit Engine.
//!
//! This test suite covers the end-to-end calculation flow including:
//! - Full-month valuation and the 80/20 split
//! - Cascade tier precedence (overrides, repository, raw index, spreadsheet)
//! - Holiday scoping (national, regional)
//! - Admission/termination clamping and the day-15 termination rule
//! - Exclusions and degraded rows with validation notes
//! - Determinism of rows and notes
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use benefit_engine::api::{AppState, create_router};
use benefit_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/benefit").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn create_employee(matricula: &str, union_name: &str, region: &str) -> Value {
    json!({
        "matricula": matricula,
        "name": "Ana Souza",
        "union_name": union_name,
        "region": region
    })
}

fn create_rate_record(region: &str, union_name: &str, voucher: &str) -> Value {
    json!({
        "region": region,
        "union_name": union_name,
        "voucher_rate": voucher
    })
}

/// June 2025 request with an empty inline holiday calendar, so weekday
/// counts are stable regardless of the configured calendar.
fn create_request(employees: Vec<Value>, rate_index: Vec<Value>) -> Value {
    json!({
        "competence": {"year": 2025, "month": 6},
        "employees": employees,
        "holidays": [],
        "rate_index": rate_index
    })
}

fn row_field<'a>(result: &'a Value, row: usize, field: &str) -> &'a Value {
    &result["rows"][row][field]
}

fn assert_money(result: &Value, row: usize, field: &str, expected: &str) {
    let actual = row_field(result, row, field).as_str().unwrap();
    assert_eq!(
        decimal(actual),
        decimal(expected),
        "Expected {} {}, got {}",
        field,
        expected,
        actual
    );
}

// =============================================================================
// SECTION 1: Full-month valuation and the 80/20 split
// =============================================================================

#[tokio::test]
async fn test_full_month_valuation() {
    // June 2025 has 21 weekdays; 21 * R$ 25,00 = R$ 525,00.
    let router = create_router_for_test();
    let request = create_request(
        vec![create_employee("34941", "UNION X", "SP")],
        vec![create_rate_record("SP", "UNION X", "R$ 25,00")],
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["competence"], "2025-06");
    assert_eq!(row_field(&result, 0, "eligible_days"), 21);
    assert_money(&result, 0, "daily_rate", "25.00");
    assert_money(&result, 0, "total", "525.00");
    assert_money(&result, 0, "employer_share", "420.00");
    assert_money(&result, 0, "employee_share", "105.00");
    assert_eq!(row_field(&result, 0, "rate_origin"), "raw_index");
}

#[tokio::test]
async fn test_ten_day_split_is_exact() {
    // Admission 2025-06-17 leaves 10 weekdays; 10 * 25.00 = 250.00,
    // split 200.00 / 50.00.
    let router = create_router_for_test();
    let mut employee = create_employee("1", "UNION X", "SP");
    employee["admission_date"] = json!("2025-06-17");
    let request = create_request(
        vec![employee],
        vec![create_rate_record("SP", "UNION X", "R$ 25,00")],
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_field(&result, 0, "eligible_days"), 10);
    assert_money(&result, 0, "total", "250.00");
    assert_money(&result, 0, "employer_share", "200.00");
    assert_money(&result, 0, "employee_share", "50.00");
}

#[tokio::test]
async fn test_shares_rounded_independently_from_total() {
    // Admission 2025-06-26 leaves 3 weekdays; 3 * 33.33 = 99.99.
    // 80% = 79.992 rounds to 79.99; 20% = 19.998 rounds to 20.00.
    let router = create_router_for_test();
    let mut employee = create_employee("1", "UNION X", "SP");
    employee["admission_date"] = json!("2025-06-26");
    let request = create_request(
        vec![employee],
        vec![create_rate_record("SP", "UNION X", "33,33")],
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_field(&result, 0, "eligible_days"), 3);
    assert_money(&result, 0, "total", "99.99");
    assert_money(&result, 0, "employer_share", "79.99");
    assert_money(&result, 0, "employee_share", "20.00");
}

#[tokio::test]
async fn test_monthly_rate_converted_to_daily() {
    // R$ 660,00 monthly over 22 required days is R$ 30,00 per day.
    let router = create_router_for_test();
    let request = json!({
        "competence": {"year": 2025, "month": 6},
        "employees": [create_employee("1", "UNION X", "SP")],
        "holidays": [],
        "rate_index": [{
            "region": "SP",
            "union_name": "UNION X",
            "voucher_rate": "R$ 660,00",
            "periodicity": "monthly",
            "required_days": 22
        }]
    });

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_money(&result, 0, "daily_rate", "30.00");
    assert_money(&result, 0, "total", "630.00");
}

// =============================================================================
// SECTION 2: Cascade tier precedence
// =============================================================================

#[tokio::test]
async fn test_inline_override_beats_raw_index() {
    let router = create_router_for_test();
    let request = json!({
        "competence": {"year": 2025, "month": 6},
        "employees": [create_employee("1", "UNION X", "SP")],
        "holidays": [],
        "overrides": {
            "SP::UNION X": {"voucher_rate": "R$ 30,00"}
        },
        "rate_index": [create_rate_record("SP", "UNION X", "R$ 25,00")]
    });

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_money(&result, 0, "daily_rate", "30.00");
    assert_eq!(row_field(&result, 0, "rate_origin"), "override");
}

#[tokio::test]
async fn test_resolved_repository_beats_raw_index() {
    let router = create_router_for_test();
    let request = json!({
        "competence": {"year": 2025, "month": 6},
        "employees": [create_employee("1", "UNION X", "SP")],
        "holidays": [],
        "resolved_rates": [{
            "region": "SP",
            "union_name": "UNION X",
            "voucher_rate": "27.50",
            "periodicity": "daily",
            "origin": "resolved_table",
            "confidence": "0.95"
        }],
        "rate_index": [create_rate_record("SP", "UNION X", "R$ 25,00")]
    });

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_money(&result, 0, "daily_rate", "27.50");
    assert_eq!(row_field(&result, 0, "rate_origin"), "resolved_table");
}

#[tokio::test]
async fn test_spreadsheet_used_when_earlier_tiers_miss() {
    let router = create_router_for_test();
    let request = json!({
        "competence": {"year": 2025, "month": 6},
        "employees": [create_employee("1", "UNION X", "SP")],
        "holidays": [],
        "spreadsheet": {
            "headers": ["UF", "Sindicato", "Valor VR"],
            "rows": [["SP", "UNION X", "R$ 28,00"]]
        }
    });

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_money(&result, 0, "daily_rate", "28.00");
    assert_eq!(row_field(&result, 0, "rate_origin"), "spreadsheet");
}

#[tokio::test]
async fn test_best_scored_raw_record_wins() {
    // Two raw records for the same key; the one with both values, clauses
    // and required days outranks the value-only record.
    let router = create_router_for_test();
    let request = json!({
        "competence": {"year": 2025, "month": 6},
        "employees": [create_employee("1", "UNION X", "SP")],
        "holidays": [],
        "rate_index": [
            create_rate_record("SP", "UNION X", "R$ 10,00"),
            {
                "region": "SP",
                "union_name": "UNION X",
                "voucher_rate": "R$ 25,00",
                "meal_rate": "R$ 18,00",
                "has_voucher_clause": true,
                "has_meal_clause": true,
                "required_days": 22,
                "periodicity": "daily"
            }
        ]
    });

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_money(&result, 0, "daily_rate", "25.00");
}

#[tokio::test]
async fn test_configured_override_applies_when_no_inline_sources() {
    // No inline holidays/overrides: the configured store supplies the rate
    // and the configured calendar removes 2025-06-19 (national holiday).
    let router = create_router_for_test();
    let request = json!({
        "competence": {"year": 2025, "month": 6},
        "employees": [create_employee(
            "1",
            "SINDICATO DOS COMERCIARIOS DE SAO PAULO",
            "SP"
        )]
    });

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_field(&result, 0, "eligible_days"), 20);
    assert_money(&result, 0, "daily_rate", "30.00");
    assert_eq!(row_field(&result, 0, "rate_origin"), "override");
}

// =============================================================================
// SECTION 3: Holiday scoping
// =============================================================================

#[tokio::test]
async fn test_inline_national_holiday_reduces_days() {
    // 2025-06-02 is a Monday; a national holiday there drops one day.
    let router = create_router_for_test();
    let request = json!({
        "competence": {"year": 2025, "month": 6},
        "employees": [create_employee("1", "UNION X", "SP")],
        "holidays": [{"date": "2025-06-02"}],
        "rate_index": [create_rate_record("SP", "UNION X", "R$ 25,00")]
    });

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_field(&result, 0, "eligible_days"), 20);
}

#[tokio::test]
async fn test_regional_holiday_only_affects_matching_region() {
    let router = create_router_for_test();
    let request = json!({
        "competence": {"year": 2025, "month": 6},
        "employees": [
            create_employee("sp-emp", "UNION X", "SP"),
            create_employee("rj-emp", "UNION Y", "RJ")
        ],
        "holidays": [{"date": "2025-06-02", "region": "SP"}],
        "rate_index": [
            create_rate_record("SP", "UNION X", "R$ 25,00"),
            create_rate_record("RJ", "UNION Y", "R$ 22,00")
        ]
    });

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_field(&result, 0, "eligible_days"), 20);
    assert_eq!(row_field(&result, 1, "eligible_days"), 21);
}

#[tokio::test]
async fn test_weekend_holiday_changes_nothing() {
    // 2025-06-01 is a Sunday.
    let router = create_router_for_test();
    let request = json!({
        "competence": {"year": 2025, "month": 6},
        "employees": [create_employee("1", "UNION X", "SP")],
        "holidays": [{"date": "2025-06-01"}],
        "rate_index": [create_rate_record("SP", "UNION X", "R$ 25,00")]
    });

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_field(&result, 0, "eligible_days"), 21);
}

// =============================================================================
// SECTION 4: Lifecycle clamping and the day-15 rule
// =============================================================================

#[tokio::test]
async fn test_acknowledged_termination_on_day_15_zeroes() {
    let router = create_router_for_test();
    let mut employee = create_employee("1", "UNION X", "SP");
    employee["termination_date"] = json!("2025-06-15");
    employee["termination_notice"] = json!("acknowledged");
    let request = create_request(
        vec![employee],
        vec![create_rate_record("SP", "UNION X", "R$ 25,00")],
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_field(&result, 0, "eligible_days"), 0);
    assert_money(&result, 0, "total", "0");
    assert!(
        row_field(&result, 0, "observation")
            .as_str()
            .unwrap()
            .contains("day 15")
    );
}

#[tokio::test]
async fn test_acknowledged_termination_after_day_15_prorates() {
    // Terminated 2025-06-20 (Friday): 15 weekdays from June 1.
    let router = create_router_for_test();
    let mut employee = create_employee("1", "UNION X", "SP");
    employee["termination_date"] = json!("2025-06-20");
    employee["termination_notice"] = json!("acknowledged");
    let request = create_request(
        vec![employee],
        vec![create_rate_record("SP", "UNION X", "R$ 25,00")],
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_field(&result, 0, "eligible_days"), 15);
    assert_money(&result, 0, "total", "375.00");
    assert_eq!(
        row_field(&result, 0, "observation"),
        "Prorated to termination date"
    );
}

#[tokio::test]
async fn test_unacknowledged_termination_clamps_without_zeroing() {
    // Pending notice on 2025-06-10: the day-15 rule does not apply, the
    // window simply ends on the termination date (7 weekdays).
    let router = create_router_for_test();
    let mut employee = create_employee("1", "UNION X", "SP");
    employee["termination_date"] = json!("2025-06-10");
    employee["termination_notice"] = json!("pending");
    let request = create_request(
        vec![employee],
        vec![create_rate_record("SP", "UNION X", "R$ 25,00")],
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_field(&result, 0, "eligible_days"), 7);
    assert_money(&result, 0, "total", "175.00");
}

#[tokio::test]
async fn test_leave_interval_subtracted_from_window() {
    // A one-week leave (June 9-13, all weekdays) leaves 16 days.
    let router = create_router_for_test();
    let mut employee = create_employee("1", "UNION X", "SP");
    employee["leave_intervals"] = json!([
        {"start": "2025-06-09", "end": "2025-06-13"}
    ]);
    let request = create_request(
        vec![employee],
        vec![create_rate_record("SP", "UNION X", "R$ 25,00")],
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_field(&result, 0, "eligible_days"), 16);
}

// =============================================================================
// SECTION 5: Exclusions and degraded rows
// =============================================================================

#[tokio::test]
async fn test_excluded_employee_row_is_zeroed() {
    let router = create_router_for_test();
    let mut employee = create_employee("1", "UNION X", "SP");
    employee["exclusion"] = json!("director");
    let request = create_request(
        vec![employee],
        vec![create_rate_record("SP", "UNION X", "R$ 25,00")],
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_field(&result, 0, "eligible_days"), 0);
    assert_money(&result, 0, "total", "0");
    assert_eq!(row_field(&result, 0, "observation"), "Excluded: director");
    assert!(row_field(&result, 0, "rate_origin").is_null());
}

#[tokio::test]
async fn test_unresolved_rate_produces_note_not_error() {
    let router = create_router_for_test();
    let request = create_request(vec![create_employee("77", "UNKNOWN UNION", "SP")], vec![]);

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_field(&result, 0, "eligible_days"), 21);
    assert_money(&result, 0, "total", "0");
    assert_eq!(row_field(&result, 0, "observation"), "Rate not resolved");

    let notes = result["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["employee_id"], "77");
    assert!(
        notes[0]["message"]
            .as_str()
            .unwrap()
            .contains("UNKNOWN UNION")
    );
}

#[tokio::test]
async fn test_missing_region_produces_note() {
    let router = create_router_for_test();
    let request = json!({
        "competence": {"year": 2025, "month": 6},
        "employees": [{
            "matricula": "9",
            "name": "Sem Regiao",
            "union_name": "SINDICATO NACIONAL"
        }],
        "holidays": []
    });

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_money(&result, 0, "total", "0");
    assert_eq!(row_field(&result, 0, "observation"), "Region unknown");
    assert_eq!(result["notes"].as_array().unwrap().len(), 1);
}

// =============================================================================
// SECTION 6: Determinism and row ordering
// =============================================================================

#[tokio::test]
async fn test_rows_and_notes_deterministic_across_runs() {
    let request = json!({
        "competence": {"year": 2025, "month": 6},
        "employees": [
            create_employee("30", "UNION X", "SP"),
            create_employee("10", "MISSING UNION", "SP"),
            create_employee("20", "UNION X", "SP")
        ],
        "holidays": [],
        "rate_index": [create_rate_record("SP", "UNION X", "R$ 25,00")]
    });

    let (status_a, result_a) = post_calculate(create_router_for_test(), request.clone()).await;
    let (status_b, result_b) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
    // run_id and generated_at differ per run; rows and notes must not.
    assert_eq!(result_a["rows"], result_b["rows"]);
    assert_eq!(result_a["notes"], result_b["notes"]);
    assert_ne!(result_a["run_id"], result_b["run_id"]);

    let ids: Vec<&str> = result_a["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["employee_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["30", "10", "20"]);
}

// =============================================================================
// SECTION 7: Error cases
// =============================================================================

#[tokio::test]
async fn test_error_malformed_json() {
    let router = create_router_for_test();

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from("{invalid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_error_missing_competence() {
    let router = create_router_for_test();
    let body = json!({
        "employees": [create_employee("1", "UNION X", "SP")]
    });

    let (status, error) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_error_empty_employee_dataset() {
    let router = create_router_for_test();
    let body = json!({
        "competence": {"year": 2025, "month": 6},
        "employees": []
    });

    let (status, error) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "EMPTY_EMPLOYEE_DATASET");
}

#[tokio::test]
async fn test_error_month_out_of_range() {
    let router = create_router_for_test();
    let body = json!({
        "competence": {"year": 2025, "month": 0},
        "employees": [create_employee("1", "UNION X", "SP")]
    });

    let (status, error) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_COMPETENCE");
}

#[tokio::test]
async fn test_error_malformed_inline_override_key() {
    let router = create_router_for_test();
    let body = json!({
        "competence": {"year": 2025, "month": 6},
        "employees": [create_employee("1", "UNION X", "SP")],
        "overrides": {
            "SP/UNION X": {"voucher_rate": "R$ 25,00"}
        }
    });

    let (status, error) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "CONFIG_ERROR");
}

// =============================================================================
// SECTION 8: Health and response shape
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let router = create_router_for_test();
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_report_contains_all_required_fields() {
    let router = create_router_for_test();
    let request = create_request(
        vec![create_employee("1", "UNION X", "SP")],
        vec![create_rate_record("SP", "UNION X", "R$ 25,00")],
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["run_id"].is_string());
    assert!(result["generated_at"].is_string());
    assert!(result["competence"].is_string());
    assert!(result["rows"].is_array());
    assert!(result["notes"].is_array());

    let row = &result["rows"][0];
    assert!(row["employee_id"].is_string());
    assert!(row["union_name"].is_string());
    assert!(row["competence"].is_string());
    assert!(row["eligible_days"].is_number());
    assert!(row["daily_rate"].is_string());
    assert!(row["total"].is_string());
    assert!(row["employer_share"].is_string());
    assert!(row["employee_share"].is_string());
}
