//! Request tracing layer

use axum::{body::Body, Router};
use http::{Request, Response};
use std::time::Duration;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::trace::TraceLayer;
use tracing::{info_span, Span};

/// Wraps every route in an `http_request` span and logs each response by
/// status class.
pub fn with_request_tracing(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<Body>| {
                info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    query = ?request.uri().query(),
                )
            })
            .on_request(|request: &Request<Body>, _span: &Span| {
                tracing::debug!("started {} {}", request.method(), request.uri().path());
            })
            .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
                let status = response.status().as_u16();
                let latency_ms = latency.as_millis() as u64;

                if response.status().is_server_error() {
                    tracing::error!(status, latency_ms, "server error response");
                } else if response.status().is_client_error() {
                    tracing::warn!(status, latency_ms, "client error response");
                } else {
                    tracing::info!(status, latency_ms, "request completed");
                }
            })
            .on_failure(|error: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                tracing::error!(
                    latency_ms = latency.as_millis() as u64,
                    error = %error,
                    "request failed"
                );
            }),
    )
}
