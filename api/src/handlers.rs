use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use shared::{
    CreateBookingRequest, CreatePackageRequest, CreateTourRequest, UpdateBookingRequest,
    UpdateBookingStatusRequest, UpdatePackageRequest, UpdateTourRequest,
};

use crate::{
    error::{ApiError, ApiResult},
    metrics,
    state::AppState,
    validation::{extractors::map_json_rejection, rule_set_by_name, run_rule_set, ValidatedJson},
};

/// Reject path ids that are blank once trimmed
fn require_id(id: &str) -> ApiResult<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::bad_request("InvalidId", "id must not be empty"));
    }
    Ok(id.to_string())
}

fn accepted(data: impl serde::Serialize) -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({ "status": "accepted", "data": data })),
    )
}

fn updated(id: String, data: impl serde::Serialize) -> Json<Value> {
    Json(json!({ "id": id, "data": data }))
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let uptime = state.started_at.elapsed().as_secs();
    let now = chrono::Utc::now().to_rfc3339();

    tracing::info!(uptime_secs = uptime, "health check passed");
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": now,
            "uptime_secs": uptime
        })),
    )
}

pub async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let body = metrics::gather_metrics(&state.registry);
    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Packages
// ─────────────────────────────────────────────────────────────────────────────

pub async fn create_package(
    ValidatedJson(req): ValidatedJson<CreatePackageRequest>,
) -> (StatusCode, Json<Value>) {
    tracing::info!(name = %req.name, destination = %req.destination, "package accepted");
    accepted(req)
}

pub async fn update_package(
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePackageRequest>,
) -> ApiResult<Json<Value>> {
    let id = require_id(&id)?;
    tracing::info!(package_id = %id, "package update accepted");
    Ok(updated(id, req))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tour listings
// ─────────────────────────────────────────────────────────────────────────────

pub async fn create_tour(
    ValidatedJson(req): ValidatedJson<CreateTourRequest>,
) -> (StatusCode, Json<Value>) {
    tracing::info!(
        title = %req.title,
        category = %req.category,
        difficulty = %req.difficulty,
        "tour accepted"
    );
    accepted(req)
}

pub async fn update_tour(
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateTourRequest>,
) -> ApiResult<Json<Value>> {
    let id = require_id(&id)?;
    tracing::info!(tour_id = %id, "tour update accepted");
    Ok(updated(id, req))
}

// ─────────────────────────────────────────────────────────────────────────────
// Bookings
// ─────────────────────────────────────────────────────────────────────────────

pub async fn create_booking(
    ValidatedJson(req): ValidatedJson<CreateBookingRequest>,
) -> (StatusCode, Json<Value>) {
    tracing::info!(
        package_id = %req.package_id,
        people = req.number_of_people,
        "booking accepted"
    );
    accepted(req)
}

pub async fn update_booking(
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateBookingRequest>,
) -> ApiResult<Json<Value>> {
    let id = require_id(&id)?;
    tracing::info!(booking_id = %id, "booking update accepted");
    Ok(updated(id, req))
}

pub async fn update_booking_status(
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateBookingStatusRequest>,
) -> ApiResult<Json<Value>> {
    let id = require_id(&id)?;
    tracing::info!(booking_id = %id, status = %req.status, "booking status change accepted");
    Ok(updated(id, req))
}

// ─────────────────────────────────────────────────────────────────────────────
// Diagnostics
// ─────────────────────────────────────────────────────────────────────────────

/// Run any named rule set against a body and return the normalized payload
pub async fn validate_with_rule_set(
    Path(name): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let Some(rule_set) = rule_set_by_name(&name) else {
        return ApiError::not_found(
            "RuleSetNotFound",
            format!("No rule set named '{}'", name),
        )
        .into_response();
    };

    let Json(payload) = match payload {
        Ok(body) => body,
        Err(err) => return map_json_rejection(err).into_response(),
    };

    match run_rule_set(rule_set, &payload) {
        Ok(normalized) => Json(json!({
            "rule_set": rule_set.name(),
            "data": normalized,
        }))
        .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn route_not_found() -> ApiError {
    ApiError::not_found("RouteNotFound", "The requested route does not exist")
}
