//! Custom Axum extractors for validated input
//!
//! This module provides `ValidatedJson<T>` - a drop-in replacement for `Json<T>`
//! that runs the request type's rule set over the raw JSON body and hands the
//! handler a typed value built from the normalized payload.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header, HeaderValue, StatusCode},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use super::rules::RuleSet;
use crate::metrics;

/// Validation failure raised by the first rule that rejects a payload
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub status: StatusCode,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn bad_request(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation error response body
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub message: String,
    pub field: String,
    pub code: u16,
    pub timestamp: String,
    pub correlation_id: String,
}

impl ValidationErrorResponse {
    pub fn new(err: &ValidationError) -> Self {
        Self {
            error: "ValidationError".to_string(),
            message: err.message.clone(),
            field: err.field.clone(),
            code: err.status.as_u16(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            correlation_id: Uuid::new_v4().to_string(),
        }
    }
}

impl axum::response::IntoResponse for ValidationError {
    fn into_response(self) -> axum::response::Response {
        let body = ValidationErrorResponse::new(&self);
        let correlation_id = body.correlation_id.clone();

        let mut response = (self.status, Json(body)).into_response();
        if let Ok(value) = HeaderValue::from_str(&correlation_id) {
            response
                .headers_mut()
                .insert(header::HeaderName::from_static("x-correlation-id"), value);
        }
        response
    }
}

/// Request types that are validated by a rule set before deserialization
///
/// The rule set sees the raw JSON object; the type is then built from the
/// normalized copy it returns.
pub trait Validatable: DeserializeOwned {
    fn rule_set() -> &'static RuleSet;
}

/// Run a rule set, recording the outcome in logs and metrics
pub fn run_rule_set(rule_set: &RuleSet, payload: &Value) -> Result<Value, ValidationError> {
    match rule_set.apply(payload) {
        Ok(normalized) => {
            metrics::VALIDATION_RUNS
                .with_label_values(&[rule_set.name(), "passed"])
                .inc();
            tracing::trace!(rule_set = rule_set.name(), "payload passed validation");
            Ok(normalized)
        }
        Err(err) => {
            metrics::VALIDATION_RUNS
                .with_label_values(&[rule_set.name(), "failed"])
                .inc();
            metrics::VALIDATION_FAILURES
                .with_label_values(&[rule_set.name(), err.field.as_str()])
                .inc();
            tracing::debug!(
                rule_set = rule_set.name(),
                field = %err.field,
                message = %err.message,
                "payload rejected"
            );
            Err(err)
        }
    }
}

/// Map a JSON extraction failure to a validation error on the `body` field
pub fn map_json_rejection(err: JsonRejection) -> ValidationError {
    let message = match err {
        JsonRejection::JsonDataError(e) => format!("Invalid JSON data: {}", e.body_text()),
        JsonRejection::JsonSyntaxError(e) => format!("JSON syntax error: {}", e.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Content-Type must be application/json".to_string()
        }
        JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
        _ => "Invalid JSON payload".to_string(),
    };
    ValidationError::bad_request("body", message)
}

/// Custom JSON extractor that validates and normalizes input
///
/// Use this instead of `Json<T>` to automatically:
/// 1. Parse JSON from the request body
/// 2. Run `T::rule_set()` in order, stopping at the first failure
/// 3. Deserialize `T` from the normalized (trimmed) payload
/// 4. Return a 400 error naming the offending field otherwise
///
/// # Example
///
/// ```ignore
/// use crate::validation::ValidatedJson;
///
/// pub async fn create_package(
///     ValidatedJson(req): ValidatedJson<CreatePackageRequest>,
/// ) -> impl IntoResponse {
///     // req is already validated and trimmed
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: Validatable + Send,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Value>::from_request(req, state)
            .await
            .map_err(map_json_rejection)?;

        let normalized = run_rule_set(T::rule_set(), &payload)?;

        let data = serde_json::from_value(normalized).map_err(|e| {
            ValidationError::bad_request("body", format!("Invalid request data: {}", e))
        })?;

        Ok(ValidatedJson(data))
    }
}

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> std::ops::DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
