//! Document store client for the blog collections.
//!
//! [`DocumentStore`] is the only contract the GraphQL layer depends on:
//! find, find-one, and insert over schema-less JSON documents. Two backends
//! ship with the crate: [`InMemoryStore`] and [`SqliteStore`].

use std::sync::Arc;

use {
    scribe_config::{StoreBackend, StoreConfig},
    tracing::info,
};

pub mod collection;
pub mod error;
pub mod filter;
pub mod store;
pub mod store_memory;
pub mod store_sqlite;

pub use {
    collection::Collection,
    error::{Error, Result},
    filter::Filter,
    store::DocumentStore,
    store_memory::InMemoryStore,
    store_sqlite::SqliteStore,
};

/// A stored document: a JSON object with no enforced shape.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Run database migrations for the sqlite backend.
///
/// Creates the `documents` table and its `(collection, _id)` index.
pub async fn run_migrations(pool: &sqlx::SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Open the backend selected by `config`.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>> {
    info!(backend = %config.backend, "opening document store");
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryStore::new())),
        StoreBackend::Sqlite => Ok(Arc::new(
            SqliteStore::connect(&config.database_url, config.max_connections).await?,
        )),
    }
}
