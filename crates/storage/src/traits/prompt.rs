use async_trait::async_trait;
use promptdeck_core::{NewPrompt, Prompt, PromptPatch, PromptRecord};

use crate::error::StorageError;

/// System of record for prompts.
#[async_trait]
pub trait PromptBackend: Send + Sync {
    /// Every stored prompt row, newest first. Rows may use legacy encodings.
    async fn fetch_all(&self) -> Result<Vec<PromptRecord>, StorageError>;

    /// Store a new prompt, assigning `id` and `created_at`.
    async fn create(&self, prompt: &NewPrompt) -> Result<Prompt, StorageError>;

    /// Merge `patch` into the stored prompt and return the result.
    async fn patch(&self, id: &str, patch: &PromptPatch) -> Result<Prompt, StorageError>;

    /// Delete a prompt. Deleting an absent id succeeds.
    async fn delete(&self, id: &str) -> Result<(), StorageError>;
}
