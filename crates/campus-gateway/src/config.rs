//! Gateway configuration
//!
//! Deserialized from the `[gateway]` section of the daemon config file.
//! Everything has a default, so an empty section yields a working gateway
//! fronting the two resource services.

use axum::http::{HeaderName, HeaderValue, Method};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer, ExposeHeaders};

use crate::routes::{RouteRule, RouteTable, RouteTableError};

/// Configuration errors surfaced at startup
#[derive(Debug, Error)]
pub enum GatewayConfigError {
    #[error("invalid CORS origin '{0}'")]
    InvalidOrigin(String),

    #[error("invalid CORS method '{0}'")]
    InvalidMethod(String),

    #[error("invalid header name '{0}'")]
    InvalidHeader(String),

    #[error(transparent)]
    RouteTable(#[from] RouteTableError),
}

/// Top-level gateway settings.
///
/// Embedded via `#[serde(flatten)]` in the daemon config, so unknown
/// fields are tolerated here.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request downstream timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub cors: CorsConfig,

    /// Routing rules; defaults to one rule per resource service
    #[serde(default = "default_routes", rename = "route")]
    pub routes: Vec<RouteConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            timeout_ms: default_timeout_ms(),
            cors: CorsConfig::default(),
            routes: default_routes(),
        }
    }
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Build the validated route table from the configured rules.
    pub fn route_table(&self) -> Result<RouteTable, GatewayConfigError> {
        let mut rules = Vec::with_capacity(self.routes.len());
        for route in &self.routes {
            let mut dedupe = Vec::with_capacity(route.dedupe_response_headers.len());
            for name in &route.dedupe_response_headers {
                let parsed = name
                    .parse::<HeaderName>()
                    .map_err(|_| GatewayConfigError::InvalidHeader(name.clone()))?;
                dedupe.push(parsed);
            }
            rules.push(RouteRule {
                prefix: route.prefix.clone(),
                service: route.service.clone(),
                dedupe_response_headers: dedupe,
            });
        }
        Ok(RouteTable::new(rules)?)
    }
}

/// One configured routing rule
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    pub prefix: String,
    pub service: String,
    #[serde(default)]
    pub dedupe_response_headers: Vec<String>,
}

fn default_port() -> u16 {
    9999
}

fn default_timeout_ms() -> u64 {
    5_000
}

/// Both resource services sit behind `/api` prefixes; each also sets its
/// own CORS headers, so the gateway collapses the duplicates.
fn default_routes() -> Vec<RouteConfig> {
    let dedupe = vec![
        "access-control-allow-origin".to_string(),
        "access-control-allow-credentials".to_string(),
    ];
    vec![
        RouteConfig {
            prefix: "/api/university".to_string(),
            service: "university-management".to_string(),
            dedupe_response_headers: dedupe.clone(),
        },
        RouteConfig {
            prefix: "/api/courses".to_string(),
            service: "course-management".to_string(),
            dedupe_response_headers: dedupe,
        },
    ]
}

/// CORS policy applied at the gateway edge
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    #[serde(default = "default_true")]
    pub allow_credentials: bool,

    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,

    /// `["*"]` mirrors whatever the preflight asks for, which is the only
    /// wildcard form compatible with credentialed requests
    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: Vec<String>,

    #[serde(default = "default_exposed_headers")]
    pub exposed_headers: Vec<String>,

    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allow_credentials: default_true(),
            allowed_methods: default_allowed_methods(),
            allowed_headers: default_allowed_headers(),
            exposed_headers: default_exposed_headers(),
            max_age_secs: default_max_age_secs(),
        }
    }
}

impl CorsConfig {
    /// Build the tower-http layer for this policy.
    pub fn layer(&self) -> Result<CorsLayer, GatewayConfigError> {
        let origins = if self.allowed_origins.iter().any(|o| o == "*") {
            if self.allow_credentials {
                // A literal "*" is forbidden on credentialed responses
                AllowOrigin::mirror_request()
            } else {
                AllowOrigin::any()
            }
        } else {
            let mut values = Vec::with_capacity(self.allowed_origins.len());
            for origin in &self.allowed_origins {
                let value = origin
                    .parse::<HeaderValue>()
                    .map_err(|_| GatewayConfigError::InvalidOrigin(origin.clone()))?;
                values.push(value);
            }
            AllowOrigin::list(values)
        };

        let mut methods = Vec::with_capacity(self.allowed_methods.len());
        for method in &self.allowed_methods {
            let parsed = method
                .parse::<Method>()
                .map_err(|_| GatewayConfigError::InvalidMethod(method.clone()))?;
            methods.push(parsed);
        }

        let headers = if self.allowed_headers.iter().any(|h| h == "*") {
            AllowHeaders::mirror_request()
        } else {
            let mut names = Vec::with_capacity(self.allowed_headers.len());
            for header in &self.allowed_headers {
                let parsed = header
                    .parse::<HeaderName>()
                    .map_err(|_| GatewayConfigError::InvalidHeader(header.clone()))?;
                names.push(parsed);
            }
            AllowHeaders::list(names)
        };

        let mut exposed = Vec::with_capacity(self.exposed_headers.len());
        for header in &self.exposed_headers {
            let parsed = header
                .parse::<HeaderName>()
                .map_err(|_| GatewayConfigError::InvalidHeader(header.clone()))?;
            exposed.push(parsed);
        }

        Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_credentials(self.allow_credentials)
            .allow_methods(AllowMethods::list(methods))
            .allow_headers(headers)
            .expose_headers(ExposeHeaders::list(exposed))
            .max_age(Duration::from_secs(self.max_age_secs)))
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_allowed_methods() -> Vec<String> {
    ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn default_allowed_headers() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_exposed_headers() -> Vec<String> {
    vec![
        "access-control-allow-origin".to_string(),
        "access-control-allow-credentials".to_string(),
    ]
}

fn default_max_age_secs() -> u64 {
    3_600
}
