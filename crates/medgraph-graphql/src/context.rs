//! GraphQL execution context.
//!
//! [`GraphQLContext`] holds the shared dependencies every resolver needs. It
//! is attached to the schema itself, so operations arriving over WebSocket
//! see it as well as HTTP requests. Per-request details travel separately in
//! [`RequestMeta`].

use std::sync::Arc;

use medgraph_storage::DynStore;

use crate::subscriptions::ChangeNotifier;

/// Shared GraphQL execution context.
#[derive(Clone)]
pub struct GraphQLContext {
    /// Entity store. Mutations must go through the evented store so commit
    /// hooks fire.
    pub store: DynStore,

    /// Change notifier backing the subscription fields.
    pub notifier: Arc<ChangeNotifier>,
}

impl GraphQLContext {
    pub fn new(store: DynStore, notifier: Arc<ChangeNotifier>) -> Self {
        Self { store, notifier }
    }
}

impl std::fmt::Debug for GraphQLContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQLContext")
            .field("backend", &self.store.backend_name())
            .finish_non_exhaustive()
    }
}

/// Request-scoped metadata attached by the HTTP handlers.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    /// Request ID for tracing and correlation.
    pub request_id: String,
}

impl RequestMeta {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}
