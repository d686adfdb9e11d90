use crate::collection::Collection;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("duplicate _id {id:?} in collection {collection}")]
    DuplicateId { collection: Collection, id: String },

    #[error("unknown collection: {name}")]
    UnknownCollection { name: String },

    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn duplicate_id(collection: Collection, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            collection,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
