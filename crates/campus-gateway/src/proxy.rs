//! Request forwarding: the gateway's fallback handler
//!
//! Every request that is not a gateway-local route (health) lands here:
//! longest-prefix match, endpoint resolution, forward, header dedupe.
//! The CORS layer sits outside this handler, so preflights never reach it.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::GatewayError;
use crate::resolver::EndpointResolver;
use crate::routes::{dedupe_headers, RouteTable};

/// Largest request body the gateway will buffer for forwarding
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Hop-by-hop headers, never forwarded in either direction
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Shared gateway state: the frozen route table, the resolver, and one
/// pooled HTTP client.
#[derive(Clone)]
pub struct GatewayState {
    routes: Arc<RouteTable>,
    resolver: Arc<dyn EndpointResolver>,
    client: reqwest::Client,
}

impl GatewayState {
    pub fn new(
        routes: RouteTable,
        resolver: Arc<dyn EndpointResolver>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        // Downstream 3xx responses pass through to the caller untouched
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            routes: Arc::new(routes),
            resolver,
            client,
        })
    }
}

/// Create the gateway router. `cors` is the configured policy filter; it
/// wraps everything, so preflight requests are answered before routing.
pub fn gateway_router(state: GatewayState, cors: CorsLayer) -> Router {
    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Everything else is forwarded
        .fallback(forward)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Forward one request to the service owning the longest matching prefix.
async fn forward(
    State(state): State<GatewayState>,
    request: Request,
) -> Result<Response, GatewayError> {
    let path = request.uri().path().to_string();
    let rule = state
        .routes
        .longest_match(&path)
        .ok_or_else(|| GatewayError::NoRouteMatch(path.clone()))?;

    let endpoint = state.resolver.resolve(&rule.service).await?;

    // Forward the full original path (the services mount their own
    // prefixes) including the query string.
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.clone());
    let url = format!("http://{}{}", endpoint, path_and_query);

    debug!(
        prefix = %rule.prefix,
        service = %rule.service,
        %endpoint,
        method = %request.method(),
        path = %path,
        "forwarding request"
    );

    let dedupe_list = rule.dedupe_response_headers.clone();
    let (parts, body) = request.into_parts();
    let body_bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;

    let upstream = state
        .client
        .request(parts.method, &url)
        .headers(forwardable_request_headers(&parts.headers))
        .body(body_bytes)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                GatewayError::DownstreamTimeout(e.to_string())
            } else {
                GatewayError::DownstreamUnavailable(e.to_string())
            }
        })?;

    let status = upstream.status();
    let mut headers = forwardable_response_headers(upstream.headers());
    dedupe_headers(&mut headers, &dedupe_list);

    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| GatewayError::DownstreamUnavailable(e.to_string()))?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Request headers minus hop-by-hop ones. Host and content-length are
/// dropped too; the client sets both for the new connection.
fn forwardable_request_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for (name, value) in headers {
        if is_hop_by_hop(name) || name == "host" || name == "content-length" {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Response headers minus hop-by-hop ones. Content-length is recomputed
/// from the buffered body.
fn forwardable_response_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for (name, value) in headers {
        if is_hop_by_hop(name) || name == "content-length" {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_headers_drop_host_and_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("gateway:9999"));
        headers.insert("connection", HeaderValue::from_static("keep-alive"));
        headers.insert("content-length", HeaderValue::from_static("12"));
        headers.insert("origin", HeaderValue::from_static("http://localhost:3000"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let out = forwardable_request_headers(&headers);
        assert!(out.get("host").is_none());
        assert!(out.get("connection").is_none());
        assert!(out.get("content-length").is_none());
        assert_eq!(out.get("origin").unwrap(), "http://localhost:3000");
        assert_eq!(out.get("content-type").unwrap(), "application/json");
    }

    #[test]
    fn response_headers_keep_duplicates_for_dedupe_stage() {
        let mut headers = HeaderMap::new();
        headers.append(
            "access-control-allow-origin",
            HeaderValue::from_static("http://localhost:3000"),
        );
        headers.append("access-control-allow-origin", HeaderValue::from_static("*"));
        headers.insert("transfer-encoding", HeaderValue::from_static("chunked"));

        let out = forwardable_response_headers(&headers);
        assert_eq!(
            out.get_all("access-control-allow-origin").iter().count(),
            2
        );
        assert!(out.get("transfer-encoding").is_none());
    }
}
