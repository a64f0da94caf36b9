use promptdeck_core::{is_builtin_folder, validate_folder_name, Folder, NewFolder, ValidationError};
use promptdeck_storage::FolderBackend;

use super::PromptIndex;
use crate::ServiceError;

// Folder changes wait for the backend before touching the catalog.
impl<B: FolderBackend> PromptIndex<B> {
    pub async fn create_folder(&self, new: NewFolder) -> Result<Folder, ServiceError> {
        let name = validate_folder_name(&new.name)?;
        self.read().folders.ensure_name_available(&name, None)?;

        let created = self.backend.create_folder(&NewFolder { name, ..new }).await.map_err(|e| {
            tracing::warn!(error = %e, "create folder failed");
            e
        })?;
        tracing::debug!(id = %created.id, name = %created.name, "folder created");
        self.write().folders.insert(created.clone());
        Ok(created)
    }

    pub async fn rename_folder(&self, id: &str, name: &str) -> Result<Folder, ServiceError> {
        let name = validate_folder_name(name)?;
        self.ensure_custom(id)?;
        self.read().folders.ensure_name_available(&name, Some(id))?;

        let renamed = self.backend.rename_folder(id, &name).await.map_err(|e| {
            tracing::warn!(id, error = %e, "rename folder failed");
            e
        })?;
        let mut state = self.write();
        if !state.folders.replace(renamed.clone()) {
            state.folders.insert(renamed.clone());
        }
        tracing::debug!(id, name = %renamed.name, "folder renamed");
        Ok(renamed)
    }

    /// Delete a custom folder, moving its prompts to the default folder.
    /// Returns how many prompts were moved locally.
    pub async fn delete_folder(&self, id: &str) -> Result<usize, ServiceError> {
        self.ensure_custom(id)?;
        let reassign_to = self.config.default_folder.clone();

        self.backend.delete_folder(id, &reassign_to).await.map_err(|e| {
            tracing::warn!(id, error = %e, "delete folder failed");
            e
        })?;
        let mut state = self.write();
        state.folders.remove(id);
        let mut moved = 0;
        for prompt in state.prompts.iter_mut().filter(|p| p.folder == id) {
            prompt.folder.clone_from(&reassign_to);
            moved += 1;
        }
        tracing::debug!(id, moved, reassign_to = %reassign_to, "folder deleted");
        Ok(moved)
    }

    /// Give the listed custom folders `order = position`.
    pub async fn reorder_folders(&self, ids: &[String]) -> Result<(), ServiceError> {
        self.backend.set_folder_order(ids).await.map_err(|e| {
            tracing::warn!(error = %e, "reorder folders failed");
            e
        })?;
        self.write().folders.apply_order(ids);
        Ok(())
    }

    fn ensure_custom(&self, id: &str) -> Result<(), ServiceError> {
        if is_builtin_folder(id) {
            return Err(ValidationError::BuiltinFolder(id.to_owned()).into());
        }
        if !self.read().folders.contains(id) {
            return Err(ServiceError::folder_not_found(id));
        }
        Ok(())
    }
}
