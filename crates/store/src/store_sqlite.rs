//! SQLite-backed document store using sqlx.
//!
//! All collections share one `documents` table. Documents are stored as JSON
//! text and filtered with SQLite's JSON functions.

use std::str::FromStr;

use {
    async_trait::async_trait,
    serde_json::Value,
    sqlx::{
        QueryBuilder, Row, Sqlite, SqlitePool,
        sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    },
    tracing::debug,
};

use crate::{Collection, Document, Error, Filter, Result, store::DocumentStore};

/// SQLite-backed persistence for documents.
///
/// A unique index on `(collection, _id)` rejects duplicate identifiers, the
/// way a document database's primary key index does.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect (creating the database file if needed) and run migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to `:memory:` opens a separate database, so keep
        // exactly one alive for the lifetime of the pool.
        let pool_options = if is_memory_url(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };
        let pool = pool_options.connect_with(options).await?;

        crate::run_migrations(&pool).await?;
        debug!(url = database_url, "sqlite document store ready");

        Ok(Self { pool })
    }

    /// Create a store using an existing pool (migrations must already be run).
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn select(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: Option<i64>,
    ) -> Result<Vec<Document>> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT data FROM documents WHERE collection = ");
        qb.push_bind(collection.as_str().to_string());
        push_filter(&mut qb, filter)?;
        qb.push(" ORDER BY seq");
        if let Some(limit) = limit {
            qb.push(" LIMIT ").push_bind(limit);
        }

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| -> Result<Document> {
                let data: String = row.try_get("data")?;
                Ok(serde_json::from_str(&data)?)
            })
            .collect()
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>> {
        self.select(collection, filter, None).await
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        Ok(self.select(collection, filter, Some(1)).await?.into_iter().next())
    }

    async fn insert(&self, collection: Collection, document: Document) -> Result<()> {
        let doc_id = document.get("_id").map(id_key).transpose()?.flatten();
        let data = serde_json::to_string(&document)?;

        let result = sqlx::query("INSERT INTO documents (collection, doc_id, data) VALUES (?, ?, ?)")
            .bind(collection.as_str())
            .bind(&doc_id)
            .bind(&data)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                debug!(%collection, id = ?doc_id, "insert");
                Ok(())
            },
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                let id = document
                    .get("_id")
                    .and_then(Value::as_str)
                    .map_or_else(|| doc_id.unwrap_or_default(), str::to_string);
                Err(Error::duplicate_id(collection, id))
            },
            Err(e) => Err(e.into()),
        }
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// The indexed form of an `_id`: its JSON encoding, so `"1"` and `1` stay
/// distinct. A null `_id` is not indexed.
fn id_key(id: &Value) -> Result<Option<String>> {
    if id.is_null() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(id)?))
}

fn json_path(field: &str) -> String {
    format!("$.\"{field}\"")
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &Filter) -> Result<()> {
    for (field, value) in filter.predicates() {
        let path = json_path(field);
        if value.is_null() {
            qb.push(" AND json_extract(data, ")
                .push_bind(path)
                .push(") IS NULL");
            continue;
        }

        let encoded = serde_json::to_string(value)?;
        qb.push(" AND json_type(data, ")
            .push_bind(path.clone())
            .push(") = json_type(")
            .push_bind(encoded.clone())
            .push(") AND json_extract(data, ")
            .push_bind(path)
            .push(") = json_extract(")
            .push_bind(encoded)
            .push(", '$')");
    }
    Ok(())
}
