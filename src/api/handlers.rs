//! HTTP request handlers for the Benefit Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{CalculationInput, run_calculation};
use crate::cascade::{InMemoryRateRepository, RateCascade};
use crate::config::override_store_from_entries;
use crate::models::HolidayCalendar;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for GET /health endpoint.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Handler for POST /calculate endpoint.
///
/// Accepts an employee snapshot plus optional inline rate sources and
/// returns the calculation report.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    // Inline sources replace the configured ones for this request only.
    let holidays = match request.holidays {
        Some(entries) => HolidayCalendar::new(entries),
        None => state.config().holidays().clone(),
    };
    let overrides = match &request.overrides {
        Some(entries) => match override_store_from_entries(entries) {
            Ok(store) => store,
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    error = %err,
                    "Inline overrides rejected"
                );
                let api_error: ApiErrorResponse = err.into();
                return api_error.into_response();
            }
        },
        None => state.config().overrides().clone(),
    };
    let repository = InMemoryRateRepository::from_rates(request.resolved_rates.clone());

    let mut cascade = RateCascade::new(&overrides, &repository, &request.rate_index);
    if let Some(table) = &request.spreadsheet {
        cascade = cascade.with_spreadsheet(table);
    }

    // Perform the calculation
    let start_time = Instant::now();
    let input = CalculationInput {
        employees: &request.employees,
        competence: &request.competence,
        holidays: &holidays,
    };
    match run_calculation(input, &cascade) {
        Ok(report) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                run_id = %report.run_id,
                competence = %report.competence,
                rows = report.rows.len(),
                notes = report.notes.len(),
                duration_us = duration.as_micros(),
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(report),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}
