//! Typed error enum for the storage layer.
//!
//! Every backend call reports failure through [`StorageError`], so callers can
//! tell a transient outage from a rejected request without downcasting.

use thiserror::Error;

/// Backend failure with the underlying cause attached.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend could not be reached or timed out.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unique constraint violation (folder name collision).
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// Backend refused the request (permissions, constraint, policy).
    #[error("rejected: {0}")]
    Rejected(String),

    /// Stored data could not be decoded into domain types.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying by the user).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// Whether this error is a unique-constraint violation.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    pub(crate) fn prompt_not_found(id: &str) -> Self {
        Self::NotFound { entity: "prompt", id: id.to_owned() }
    }

    pub(crate) fn folder_not_found(id: &str) -> Self {
        Self::NotFound { entity: "folder", id: id.to_owned() }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption { context: "JSON deserialization".to_owned(), source: Box::new(err) }
    }
}
