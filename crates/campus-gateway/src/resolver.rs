//! Logical service name → endpoint resolution
//!
//! The gateway never holds concrete addresses in its route table; it asks
//! an `EndpointResolver` for one live endpoint per request. Balancing
//! policy is the resolver's business, not the gateway's.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use thiserror::Error;

/// Resolution failures
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The logical name is unknown or has no live endpoint right now
    #[error("no endpoint available for service '{0}'")]
    NoEndpointAvailable(String),
}

/// External collaborator resolving a logical service name to one live
/// endpoint authority (`host:port`).
#[async_trait]
pub trait EndpointResolver: Send + Sync {
    async fn resolve(&self, service: &str) -> Result<String, ResolveError>;
}

/// Resolver over a fixed endpoint map loaded from configuration.
///
/// When a service has several endpoints they are handed out round-robin;
/// the cursor is shared across services, which is fine for rotation.
pub struct StaticResolver {
    endpoints: HashMap<String, Vec<String>>,
    cursor: AtomicUsize,
}

impl StaticResolver {
    pub fn new(endpoints: HashMap<String, Vec<String>>) -> Self {
        Self {
            endpoints,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Convenience constructor for a single-endpoint service
    pub fn single(service: impl Into<String>, authority: impl Into<String>) -> Self {
        let mut endpoints = HashMap::new();
        endpoints.insert(service.into(), vec![authority.into()]);
        Self::new(endpoints)
    }
}

#[async_trait]
impl EndpointResolver for StaticResolver {
    async fn resolve(&self, service: &str) -> Result<String, ResolveError> {
        let list = self
            .endpoints
            .get(service)
            .filter(|list| !list.is_empty())
            .ok_or_else(|| ResolveError::NoEndpointAvailable(service.to_string()))?;

        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % list.len();
        Ok(list[idx].clone())
    }
}
