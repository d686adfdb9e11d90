//! GraphQL request context carrying the store handle.

use std::sync::Arc;

use scribe_store::DocumentStore;

/// Context injected into every GraphQL resolver via `Context::data()`.
pub struct GqlContext {
    /// The one shared resource. Constructed at startup and closed on
    /// shutdown by the owner, never by a resolver.
    pub store: Arc<dyn DocumentStore>,
}

impl GqlContext {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}
