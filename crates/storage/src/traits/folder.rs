use async_trait::async_trait;
use promptdeck_core::{Folder, NewFolder};

use crate::error::StorageError;

/// System of record for custom folders. Built-in folders are never stored.
#[async_trait]
pub trait FolderBackend: Send + Sync {
    /// Every custom folder.
    async fn fetch_folders(&self) -> Result<Vec<Folder>, StorageError>;

    /// Store a new folder, assigning `id` and `created_at`.
    async fn create_folder(&self, folder: &NewFolder) -> Result<Folder, StorageError>;

    /// Rename a folder and return the result.
    async fn rename_folder(&self, id: &str, name: &str) -> Result<Folder, StorageError>;

    /// Move every prompt filed under `id` into `reassign_to`, then delete the folder.
    async fn delete_folder(&self, id: &str, reassign_to: &str) -> Result<(), StorageError>;

    /// Persist `order = position` for the listed folders.
    async fn set_folder_order(&self, ids: &[String]) -> Result<(), StorageError>;
}
