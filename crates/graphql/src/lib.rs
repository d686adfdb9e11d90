//! GraphQL API for the blog sandbox.
//!
//! Defines the `Author`, `Post` and `Comment` types, the `BlogSchema` query
//! root and the `Mutations` root. Every resolver passes straight through to a
//! [`scribe_store::DocumentStore`] carried in the request context.
//!
//! The gateway crate is responsible for the HTTP handlers. This crate only
//! defines the schema, types, and resolvers.

pub mod context;
pub mod error;
pub mod mutations;
pub mod queries;
pub mod schema;
pub mod types;

pub use schema::{ScribeSchema, build_schema};

// ── Shared resolver macros ──────────────────────────────────────────────────

/// Fetch every document matching a filter and decode them into the
/// resolver's return type.
#[macro_export]
macro_rules! store_find {
    ($ctx:expr, $collection:expr) => {
        $crate::store_find!($ctx, $collection, scribe_store::Filter::all())
    };
    ($ctx:expr, $collection:expr, $filter:expr) => {{
        let c = $ctx.data::<std::sync::Arc<$crate::context::GqlContext>>()?;
        let docs = c
            .store
            .find($collection, &$filter)
            .await
            .map_err($crate::error::store_err)?;
        $crate::error::from_documents($ctx, docs)
    }};
}

/// Fetch the first document matching a filter, decoded, or `None`.
#[macro_export]
macro_rules! store_find_one {
    ($ctx:expr, $collection:expr, $filter:expr) => {{
        let c = $ctx.data::<std::sync::Arc<$crate::context::GqlContext>>()?;
        let doc = c
            .store
            .find_one($collection, &$filter)
            .await
            .map_err($crate::error::store_err)?;
        doc.map($crate::error::from_document).transpose()
    }};
}
