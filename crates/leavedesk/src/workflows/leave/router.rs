use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{Datelike, Local};
use serde::Deserialize;
use serde_json::json;

use super::document::ConfirmationRenderer;
use super::domain::LeaveRequestForm;
use super::service::{LeaveRequestService, LeaveServiceError};
use super::store::{EmployeeRoster, LeaveRecordStore};

/// Router builder exposing HTTP endpoints for submission and reporting.
pub fn leave_router<S, R, D>(service: Arc<LeaveRequestService<S, R, D>>) -> Router
where
    S: LeaveRecordStore + 'static,
    R: EmployeeRoster + 'static,
    D: ConfirmationRenderer + 'static,
{
    Router::new()
        .route("/api/v1/leave/requests", post(submit_handler::<S, R, D>))
        .route(
            "/api/v1/leave/employees",
            get(employees_handler::<S, R, D>),
        )
        .route(
            "/api/v1/leave/balances/:employee",
            get(balances_handler::<S, R, D>),
        )
        .route(
            "/api/v1/leave/latest/:employee",
            get(latest_handler::<S, R, D>),
        )
        .route(
            "/api/v1/leave/history/:employee",
            get(history_handler::<S, R, D>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<S, R, D>(
    State(service): State<Arc<LeaveRequestService<S, R, D>>>,
    axum::Json(form): axum::Json<LeaveRequestForm>,
) -> Response
where
    S: LeaveRecordStore + 'static,
    R: EmployeeRoster + 'static,
    D: ConfirmationRenderer + 'static,
{
    match service.submit(form) {
        Ok(receipt) => {
            let payload = json!({
                "record": receipt.record,
                "document_filename": receipt.document_filename(),
                "document_base64": BASE64.encode(&receipt.document),
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn employees_handler<S, R, D>(
    State(service): State<Arc<LeaveRequestService<S, R, D>>>,
) -> Response
where
    S: LeaveRecordStore + 'static,
    R: EmployeeRoster + 'static,
    D: ConfirmationRenderer + 'static,
{
    match service.employees() {
        Ok(employees) => {
            let payload = json!({ "employees": employees });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn balances_handler<S, R, D>(
    State(service): State<Arc<LeaveRequestService<S, R, D>>>,
    Path(employee): Path<String>,
) -> Response
where
    S: LeaveRecordStore + 'static,
    R: EmployeeRoster + 'static,
    D: ConfirmationRenderer + 'static,
{
    match service.balances(&employee) {
        Ok(balances) => {
            let payload = json!({
                "employee": employee,
                "balances": balances,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn latest_handler<S, R, D>(
    State(service): State<Arc<LeaveRequestService<S, R, D>>>,
    Path(employee): Path<String>,
) -> Response
where
    S: LeaveRecordStore + 'static,
    R: EmployeeRoster + 'static,
    D: ConfirmationRenderer + 'static,
{
    match service.latest(&employee) {
        Ok(latest) => {
            // `latest: null` is the explicit no-history indicator.
            let payload = json!({
                "employee": employee,
                "latest": latest,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryParams {
    pub(crate) year: Option<i32>,
    pub(crate) month: Option<u32>,
}

pub(crate) async fn history_handler<S, R, D>(
    State(service): State<Arc<LeaveRequestService<S, R, D>>>,
    Path(employee): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Response
where
    S: LeaveRecordStore + 'static,
    R: EmployeeRoster + 'static,
    D: ConfirmationRenderer + 'static,
{
    let year = params.year.unwrap_or_else(|| Local::now().year());
    match service.history(&employee, year, params.month) {
        Ok(records) => {
            let payload = json!({
                "employee": employee,
                "year": year,
                "month": params.month,
                "records": records,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: LeaveServiceError) -> Response {
    match error {
        LeaveServiceError::Rejected(reasons) => {
            let rejections: Vec<String> =
                reasons.iter().map(|reason| reason.to_string()).collect();
            let payload = json!({ "rejections": rejections });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        LeaveServiceError::Duration(error) => {
            let payload = json!({ "rejections": [error.to_string()] });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        LeaveServiceError::Store(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        LeaveServiceError::Roster(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
