//! HTTP request handlers for the Payslip Extract Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{breakdown_from_figures, build_breakdown, compute_pay_figures};
use crate::error::EngineError;
use crate::extract::{AnyEmployee, process_extract};
use crate::models::PayPeriod;
use crate::render::render_payslip;

use super::request::{BatchBreakdownRequest, BreakdownRequest, ExtractQuery, PayslipRequest};
use super::response::{ApiError, ApiErrorResponse, BatchBreakdownResponse, ExtractResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/breakdown", post(breakdown_handler))
        .route("/breakdowns", post(batch_breakdown_handler))
        .route("/payslip", post(payslip_handler))
        .route("/extract", post(extract_handler))
        .with_state(state)
}

/// Handler for POST /breakdown.
///
/// Derives the display breakdown for one raw payroll row.
async fn breakdown_handler(
    State(state): State<AppState>,
    payload: Result<Json<BreakdownRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing breakdown request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let catalog = state.config().catalog();
    let figures = compute_pay_figures(&request.row, catalog);
    let breakdown = breakdown_from_figures(&request.row, catalog, &figures);
    info!(
        correlation_id = %correlation_id,
        fields = request.row.len(),
        gross_pay = figures.gross_pay,
        total_deductions = figures.total_deductions,
        net_pay = figures.net_pay,
        duration_us = start_time.elapsed().as_micros() as u64,
        "Breakdown completed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(breakdown),
    )
        .into_response()
}

/// Handler for POST /breakdowns.
///
/// Derives one breakdown per row, preserving request order.
async fn batch_breakdown_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchBreakdownRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch breakdown request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let catalog = state.config().catalog();
    let breakdowns = request
        .rows
        .iter()
        .map(|row| build_breakdown(row, catalog))
        .collect::<Vec<_>>();
    info!(
        correlation_id = %correlation_id,
        rows = breakdowns.len(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Batch breakdown completed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(BatchBreakdownResponse { breakdowns }),
    )
        .into_response()
}

/// Handler for POST /payslip.
///
/// Renders the text payslip for one row and the given month.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let period = match PayPeriod::new(request.month, request.year) {
        Ok(period) => period,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                month = request.month,
                "Invalid pay period"
            );
            return engine_error_response(err);
        }
    };

    let config = state.config();
    let figures = compute_pay_figures(&request.row, config.catalog());
    let breakdown = breakdown_from_figures(&request.row, config.catalog(), &figures);
    let text = render_payslip(&breakdown, &period, config.institution());
    info!(
        correlation_id = %correlation_id,
        pay_period = %period,
        net_pay = figures.net_pay,
        "Payslip rendered"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
        .into_response()
}

/// Handler for POST /extract?file_name=...
///
/// Decodes an uploaded dBase extract and returns a payslip per employee row.
async fn extract_handler(
    State(state): State<AppState>,
    query: Result<Query<ExtractQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Extract query rejected"
            );
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ApiError::missing_query(rejection.body_text())),
            )
                .into_response();
        }
    };

    info!(
        correlation_id = %correlation_id,
        file_name = %query.file_name,
        bytes = body.len(),
        "Processing extract upload"
    );

    // Decoding and the rayon fan-out block, so they run off the async workers.
    let file_name = query.file_name;
    let result = tokio::task::spawn_blocking(move || {
        process_extract(
            &file_name,
            body.as_ref(),
            state.config().catalog(),
            &AnyEmployee,
        )
    })
    .await;

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Extract task did not complete"
            );
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ApiError::new(
                    "INTERNAL_ERROR",
                    "Extract processing was interrupted",
                )),
            )
                .into_response();
        }
    };

    match outcome {
        Ok(summary) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(ExtractResponse::from(summary)),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Extract processing failed"
            );
            engine_error_response(err)
        }
    }
}

fn engine_error_response(err: EngineError) -> Response {
    ApiErrorResponse::from(err).into_response()
}

fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
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
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
