use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
};

use crate::{handlers, logging_middleware::request_logger, state::AppState};

pub fn observability_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(handlers::metrics_endpoint))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health_check))
}

pub fn package_routes() -> Router<AppState> {
    Router::new()
        .route("/api/packages", post(handlers::create_package))
        .route("/api/packages/:id", patch(handlers::update_package))
}

pub fn tour_routes() -> Router<AppState> {
    Router::new()
        .route("/api/tours", post(handlers::create_tour))
        .route("/api/tours/:id", patch(handlers::update_tour))
}

pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(handlers::create_booking))
        .route("/api/bookings/:id", patch(handlers::update_booking))
        .route(
            "/api/bookings/:id/status",
            patch(handlers::update_booking_status),
        )
}

pub fn validation_routes() -> Router<AppState> {
    Router::new().route(
        "/api/validate/:rule_set",
        post(handlers::validate_with_rule_set),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PATCH,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

/// Assemble the full application router
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .merge(package_routes())
        .merge(tour_routes())
        .merge(booking_routes())
        .merge(validation_routes())
        .merge(health_routes())
        .merge(observability_routes())
        .fallback(handlers::route_not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state)
}
