//! The document store contract used by the GraphQL resolvers.

use async_trait::async_trait;

use crate::{Collection, Document, Filter, Result};

/// A collection-oriented document database.
///
/// Implementations decide whether `_id` is unique; the resolvers never check.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in `collection` matching `filter`, in the store's
    /// natural order.
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>>;

    /// The first document matching `filter`, if any.
    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>>;

    async fn insert(&self, collection: Collection, document: Document) -> Result<()>;

    /// Release connections. Called once on shutdown.
    async fn close(&self) {}
}
