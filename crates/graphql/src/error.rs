//! Error mapping from store errors to GraphQL errors, and document decoding.

use {
    async_graphql::{Context, PathSegment},
    scribe_store::Document,
    serde::{Serialize, de::DeserializeOwned},
    tracing::warn,
};

/// Convert a store error into an `async_graphql::Error`.
pub fn store_err(e: scribe_store::Error) -> async_graphql::Error {
    warn!(error = %e, "store operation failed");
    async_graphql::Error::new(e.to_string())
}

/// Convert a serde_json error into an `async_graphql::Error`.
pub fn parse_err(e: serde_json::Error) -> async_graphql::Error {
    async_graphql::Error::new(format!("failed to decode document: {e}"))
}

/// Decode a stored document into a typed entity.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> async_graphql::Result<T> {
    serde_json::from_value(serde_json::Value::Object(doc)).map_err(parse_err)
}

/// Decode a list of documents for a nullable list of nullable items.
///
/// A document that does not decode becomes a `null` item, and its error is
/// reported at that item's index. The other items are unaffected.
pub fn from_documents<T: DeserializeOwned>(
    ctx: &Context<'_>,
    docs: Vec<Document>,
) -> async_graphql::Result<Option<Vec<Option<T>>>> {
    let items = docs
        .into_iter()
        .enumerate()
        .map(|(index, doc)| match from_document(doc) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(index, error = %e.message, "skipping undecodable document");
                let mut err = ctx.set_error_path(e.into_server_error(ctx.item.pos));
                err.path.push(PathSegment::Index(index));
                ctx.add_error(err);
                None
            },
        })
        .collect();
    Ok(Some(items))
}

/// Encode an entity into the document that gets inserted.
pub fn to_document<T: Serialize>(value: &T) -> async_graphql::Result<Document> {
    match serde_json::to_value(value).map_err(parse_err)? {
        serde_json::Value::Object(doc) => Ok(doc),
        other => Err(async_graphql::Error::new(format!(
            "expected an object, got {other}"
        ))),
    }
}
