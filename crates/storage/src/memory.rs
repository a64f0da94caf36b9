//! In-process backend.
//!
//! Keeps rows in memory behind a tokio `RwLock`. Rows are stored as
//! [`PromptRecord`]s so seeded legacy data is served back exactly as given
//! until it is patched.

use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use promptdeck_core::constants::DEFAULT_FOLDER;
use promptdeck_core::{
    is_builtin_folder, Folder, FolderCatalog, NewFolder, NewPrompt, Prompt, PromptPatch,
    PromptRecord,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StorageError;
use crate::traits::{FolderBackend, PromptBackend};
use crate::types::ExportDocument;

#[derive(Debug, Default)]
struct MemoryState {
    prompts: Vec<PromptRecord>,
    folders: Vec<Folder>,
}

impl MemoryState {
    fn position(&self, id: &str) -> Option<usize> {
        self.prompts.iter().position(|r| r.id.as_deref() == Some(id))
    }

    fn catalog(&self) -> FolderCatalog {
        FolderCatalog::with_custom(self.folders.iter().cloned())
    }
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: RwLock<MemoryState>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with existing rows.
    #[must_use]
    pub fn with_data(prompts: Vec<PromptRecord>, folders: Vec<Folder>) -> Self {
        Self { state: RwLock::new(MemoryState { prompts, folders }) }
    }

    #[must_use]
    pub fn from_export(doc: ExportDocument) -> Self {
        Self::with_data(doc.prompts, doc.folders)
    }

    /// Current contents as an export document.
    pub async fn export(&self) -> ExportDocument {
        let state = self.state.read().await;
        ExportDocument { prompts: state.prompts.clone(), folders: state.folders.clone() }
    }
}

#[async_trait]
impl PromptBackend for MemoryBackend {
    async fn fetch_all(&self) -> Result<Vec<PromptRecord>, StorageError> {
        let mut rows = self.state.read().await.prompts.clone();
        rows.sort_by_key(|r| Reverse(r.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)));
        Ok(rows)
    }

    async fn create(&self, prompt: &NewPrompt) -> Result<Prompt, StorageError> {
        let mut state = self.state.write().await;
        let folder = match prompt.folder.as_deref() {
            None => DEFAULT_FOLDER.to_owned(),
            Some(id) if state.catalog().contains(id) => id.to_owned(),
            Some(id) => return Err(StorageError::folder_not_found(id)),
        };
        let created =
            prompt.clone().into_prompt(Uuid::new_v4().to_string(), folder, Utc::now());
        state.prompts.push(PromptRecord::from(&created));
        tracing::debug!(id = %created.id, "prompt created");
        Ok(created)
    }

    async fn patch(&self, id: &str, patch: &PromptPatch) -> Result<Prompt, StorageError> {
        let mut state = self.state.write().await;
        let catalog = state.catalog();
        if let Some(folder) = patch.folder.as_deref() {
            if !catalog.contains(folder) {
                return Err(StorageError::folder_not_found(folder));
            }
        }
        let pos = state.position(id).ok_or_else(|| StorageError::prompt_not_found(id))?;
        let mut prompt = state.prompts[pos]
            .normalize(&catalog, DEFAULT_FOLDER)
            .ok_or_else(|| StorageError::prompt_not_found(id))?;
        prompt.apply(patch);
        state.prompts[pos] = PromptRecord::from(&prompt);
        Ok(prompt)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        state.prompts.retain(|r| r.id.as_deref() != Some(id));
        Ok(())
    }
}

#[async_trait]
impl FolderBackend for MemoryBackend {
    async fn fetch_folders(&self) -> Result<Vec<Folder>, StorageError> {
        Ok(self.state.read().await.folders.clone())
    }

    async fn create_folder(&self, folder: &NewFolder) -> Result<Folder, StorageError> {
        let mut state = self.state.write().await;
        if state.catalog().find_by_name(&folder.name).is_some() {
            return Err(StorageError::Duplicate(folder.name.clone()));
        }
        let created = Folder {
            id: Uuid::new_v4().to_string(),
            name: folder.name.clone(),
            order: None,
            icon: folder.icon.clone(),
            color: folder.color.clone(),
            created_at: Utc::now(),
        };
        state.folders.push(created.clone());
        Ok(created)
    }

    async fn rename_folder(&self, id: &str, name: &str) -> Result<Folder, StorageError> {
        let mut state = self.state.write().await;
        if state.catalog().find_by_name(name).is_some_and(|f| f.id != id) {
            return Err(StorageError::Duplicate(name.to_owned()));
        }
        let folder = state
            .folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| StorageError::folder_not_found(id))?;
        name.clone_into(&mut folder.name);
        Ok(folder.clone())
    }

    async fn delete_folder(&self, id: &str, reassign_to: &str) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        if is_builtin_folder(id) {
            return Err(StorageError::Rejected(format!("built-in folder {id} cannot be deleted")));
        }
        if !state.catalog().contains(reassign_to) || reassign_to == id {
            return Err(StorageError::folder_not_found(reassign_to));
        }
        let pos = state
            .folders
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| StorageError::folder_not_found(id))?;
        let removed = state.folders.remove(pos);
        let mut moved = 0_usize;
        for row in &mut state.prompts {
            let legacy_member = row.folder_id.is_none()
                && row.folder.as_deref().is_some_and(|l| l.trim().eq_ignore_ascii_case(&removed.name));
            if row.folder_id.as_deref() == Some(id) || legacy_member {
                row.folder_id = Some(reassign_to.to_owned());
                moved += 1;
            }
        }
        tracing::debug!(id, reassign_to, moved, "folder deleted");
        Ok(())
    }

    async fn set_folder_order(&self, ids: &[String]) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        for (position, id) in ids.iter().enumerate() {
            if let Some(folder) = state.folders.iter_mut().find(|f| f.id == *id) {
                folder.order = i64::try_from(position).ok();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
