//! campus-gateway - API gateway for the campus services
//!
//! A single forwarding surface in front of the resource services:
//!
//! 1. CORS policy filter (origin allow-list, preflight short-circuit)
//! 2. Longest-prefix route selection over a static, validated table
//! 3. Logical service name → endpoint resolution via `EndpointResolver`
//! 4. Request forwarding with response-header dedupe (RETAIN_UNIQUE)
//!
//! The route table is loaded once at startup and immutable afterwards;
//! ambiguous tables are rejected at load time, never at request time.

pub mod config;
pub mod error;
pub mod proxy;
pub mod resolver;
pub mod routes;

pub use config::{CorsConfig, GatewayConfig, GatewayConfigError, RouteConfig};
pub use error::GatewayError;
pub use proxy::{gateway_router, GatewayState};
pub use resolver::{EndpointResolver, ResolveError, StaticResolver};
pub use routes::{dedupe_headers, RouteRule, RouteTable, RouteTableError};
