//! Static route table with longest-prefix matching

use std::collections::HashSet;

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;

/// Errors detected while loading the route table
#[derive(Debug, Error)]
pub enum RouteTableError {
    /// Prefixes are absolute paths
    #[error("route prefix must start with '/': '{0}'")]
    InvalidPrefix(String),

    /// Two rules that cover the same paths would tie on longest-prefix
    /// selection; rejected at load time, never resolved per request
    #[error("ambiguous route table: prefix '{0}' registered more than once")]
    AmbiguousPrefix(String),
}

/// One routing rule: requests under `prefix` go to the service registered
/// under `service` with the external resolver.
#[derive(Debug, Clone)]
pub struct RouteRule {
    /// Path prefix, matched at segment boundaries
    pub prefix: String,
    /// Logical service name handed to the endpoint resolver
    pub service: String,
    /// Response headers collapsed to their first occurrence after
    /// forwarding (both the gateway and the downstream service may set
    /// CORS headers)
    pub dedupe_response_headers: Vec<HeaderName>,
}

/// Ordered set of route rules, validated once at startup.
#[derive(Debug)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// Validate and freeze a set of rules.
    ///
    /// Trailing slashes are ignored for duplicate detection: `/api/x` and
    /// `/api/x/` select the same sub-tree, so registering both is a
    /// configuration error.
    pub fn new(rules: Vec<RouteRule>) -> Result<Self, RouteTableError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !rule.prefix.starts_with('/') {
                return Err(RouteTableError::InvalidPrefix(rule.prefix.clone()));
            }
            let normalized = rule.prefix.trim_end_matches('/').to_string();
            if !seen.insert(normalized) {
                return Err(RouteTableError::AmbiguousPrefix(rule.prefix.clone()));
            }
        }
        Ok(Self { rules })
    }

    /// Rule with the longest prefix matching `path`, if any.
    ///
    /// Validation guarantees at most one rule per prefix length can match,
    /// so the winner is deterministic.
    pub fn longest_match(&self, path: &str) -> Option<&RouteRule> {
        self.rules
            .iter()
            .filter(|rule| prefix_matches(&rule.prefix, path))
            .max_by_key(|rule| rule.prefix.trim_end_matches('/').len())
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }
}

/// Segment-boundary prefix match: `/api/university` matches
/// `/api/university` and `/api/university/5`, but not `/api/universityX`.
fn prefix_matches(prefix: &str, path: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        // A bare "/" catches everything
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Collapse repeated occurrences of each named header to a single one,
/// retaining the first value (RETAIN_UNIQUE).
pub fn dedupe_headers(headers: &mut HeaderMap, names: &[HeaderName]) {
    for name in names {
        let values: Vec<HeaderValue> = headers.get_all(name).iter().cloned().collect();
        if values.len() > 1 {
            // insert() drops every previously associated value
            headers.insert(name.clone(), values[0].clone());
        }
    }
}
