//! Typed error enum for the service layer.
//!
//! Separates input problems (caught before any state changes), backend
//! failures (reported after the optimistic change was rolled back) and
//! references to entities the working set does not hold.

use promptdeck_core::ValidationError;
use promptdeck_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input to a mutation. Nothing was applied.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Backend rejected or failed the call. Local state was reverted.
    #[error("backend: {0}")]
    Backend(#[from] StorageError),

    /// The working set holds no such entity. Nothing was applied.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// The prompt is still waiting for its creation to be confirmed.
    /// Nothing was applied.
    #[error("prompt {0} is not saved yet")]
    Unconfirmed(String),
}

impl ServiceError {
    pub(crate) fn prompt_not_found(id: &str) -> Self {
        Self::NotFound { entity: "prompt", id: id.to_owned() }
    }

    pub(crate) fn folder_not_found(id: &str) -> Self {
        Self::NotFound { entity: "folder", id: id.to_owned() }
    }

    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Backend(StorageError::NotFound { .. }))
    }

    /// Whether the backend failed (as opposed to the input being rejected locally).
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend(_))
    }

    /// Whether this error is likely transient (worth re-triggering).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Backend(e) if e.is_transient())
    }
}
