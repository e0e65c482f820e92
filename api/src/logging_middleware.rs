use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::metrics;

/// Holds one slot of the in-flight gauge; released on drop, including when
/// the request future is cancelled mid-flight
struct InFlightGuard;

impl InFlightGuard {
    fn acquire() -> Self {
        metrics::HTTP_IN_FLIGHT.inc();
        Self
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        metrics::HTTP_IN_FLIGHT.dec();
    }
}

/// Log every request and record it in the HTTP metrics
///
/// The matched route template (e.g. `/api/bookings/:id`) is used as the
/// metrics path label so ids do not explode label cardinality.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = std::time::Instant::now();

    let in_flight = InFlightGuard::acquire();
    let response = next.run(req).await;
    drop(in_flight);

    let elapsed = start.elapsed();
    let status = response.status().as_u16();

    metrics::observe_http(method.as_str(), &path, status, elapsed.as_secs_f64());
    tracing::info!("{method} {uri} {status} {}ms", elapsed.as_millis());

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use std::time::Duration;
    use tower::ServiceExt;

    // Single test: the gauge is process-global
    #[tokio::test]
    async fn test_in_flight_slot_released_on_completion_and_cancellation() {
        let app = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/stalled", get(|| std::future::pending::<&'static str>()))
            .layer(middleware::from_fn(request_logger));
        let before = metrics::HTTP_IN_FLIGHT.get();

        let request = Request::builder().uri("/ok").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert_eq!(metrics::HTTP_IN_FLIGHT.get(), before);

        let request = Request::builder().uri("/stalled").body(Body::empty()).unwrap();
        let outcome = tokio::time::timeout(Duration::from_millis(50), app.oneshot(request)).await;
        assert!(outcome.is_err());
        assert_eq!(metrics::HTTP_IN_FLIGHT.get(), before);
    }
}
