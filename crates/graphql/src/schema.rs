//! Schema construction and type alias.

use std::sync::Arc;

use {
    async_graphql::{EmptySubscription, Schema},
    scribe_store::DocumentStore,
};

use crate::{context::GqlContext, mutations::MutationRoot, queries::QueryRoot};

/// The full blog GraphQL schema type.
pub type ScribeSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema around a store handle.
///
/// The store is shared by every request; the caller keeps its own `Arc` to
/// close it on shutdown.
pub fn build_schema(store: Arc<dyn DocumentStore>) -> ScribeSchema {
    let ctx = Arc::new(GqlContext::new(store));

    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(ctx)
        .finish()
}
