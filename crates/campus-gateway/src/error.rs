//! Gateway error types and their response mapping
//!
//! The mapping is fixed and documented: no matching prefix → 404,
//! resolver failure → 503, downstream connect/IO failure → 502,
//! downstream timeout → 504.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::resolver::ResolveError;

/// Errors produced while routing or forwarding a request
#[derive(Debug, Error)]
pub enum GatewayError {
    /// 404 - no registered prefix matches the request path
    #[error("no route matches path '{0}'")]
    NoRouteMatch(String),

    /// 503 - the resolver has no live endpoint for the target service
    #[error("no endpoint available for service '{0}'")]
    NoEndpointAvailable(String),

    /// 502 - the downstream endpoint refused or broke the connection
    #[error("downstream request failed: {0}")]
    DownstreamUnavailable(String),

    /// 504 - the downstream endpoint did not answer in time
    #[error("downstream request timed out: {0}")]
    DownstreamTimeout(String),

    /// 400 - the inbound request could not be read
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            GatewayError::NoRouteMatch(_) => (StatusCode::NOT_FOUND, "no_route_match"),
            GatewayError::NoEndpointAvailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "no_endpoint_available")
            }
            GatewayError::DownstreamUnavailable(_) => {
                (StatusCode::BAD_GATEWAY, "downstream_unavailable")
            }
            GatewayError::DownstreamTimeout(_) => {
                (StatusCode::GATEWAY_TIMEOUT, "downstream_timeout")
            }
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
        };

        let message = self.to_string();
        if status.is_server_error() {
            tracing::warn!(error = error_type, %message, "gateway error");
        } else {
            tracing::debug!(error = error_type, %message, "gateway client error");
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<ResolveError> for GatewayError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NoEndpointAvailable(service) => {
                GatewayError::NoEndpointAvailable(service)
            }
        }
    }
}
