//! Folders and the folder catalog.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ALL_FOLDERS_KEY, BUILTIN_FOLDERS, FOLDER_NAME_MAX_CHARS};
use crate::error::{require_text, ValidationError, ValidationResult};

/// A named bucket prompts are filed into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    /// Manual sort position; folders without one sort after those with one.
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// A built-in folder: id and name are the same fixed label.
    #[must_use]
    pub fn builtin(name: &str) -> Self {
        Self {
            id: name.to_owned(),
            name: name.to_owned(),
            order: None,
            icon: None,
            color: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[must_use]
    pub fn is_builtin(&self) -> bool {
        is_builtin_folder(&self.id)
    }
}

#[must_use]
pub fn is_builtin_folder(id: &str) -> bool {
    BUILTIN_FOLDERS.contains(&id)
}

/// Input for creating a folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFolder {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewFolder {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }
}

/// Validate a folder name and return its trimmed form.
pub fn validate_folder_name(name: &str) -> ValidationResult<String> {
    let trimmed = name.trim();
    require_text("name", trimmed, FOLDER_NAME_MAX_CHARS)?;
    if trimmed.eq_ignore_ascii_case(ALL_FOLDERS_KEY) {
        return Err(ValidationError::ReservedFolderName(trimmed.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn catalog_order(a: &Folder, b: &Folder) -> Ordering {
    match (a.order, b.order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.created_at.cmp(&b.created_at))
    .then_with(|| a.name.cmp(&b.name))
}

/// Built-in folders followed by the user's custom folders in display order.
#[derive(Debug, Clone)]
pub struct FolderCatalog {
    builtin: Vec<Folder>,
    custom: Vec<Folder>,
}

impl Default for FolderCatalog {
    fn default() -> Self {
        Self { builtin: BUILTIN_FOLDERS.into_iter().map(Folder::builtin).collect(), custom: Vec::new() }
    }
}

impl FolderCatalog {
    /// Catalog holding the built-ins plus `custom`.
    ///
    /// Entries that collide with a built-in or an earlier entry (by id or by
    /// case-insensitive name) are skipped with a warning.
    #[must_use]
    pub fn with_custom(custom: impl IntoIterator<Item = Folder>) -> Self {
        let mut catalog = Self::default();
        for folder in custom {
            if catalog.get(&folder.id).is_some() || catalog.find_by_name(&folder.name).is_some() {
                tracing::warn!(id = %folder.id, name = %folder.name, "skipping conflicting folder");
                continue;
            }
            catalog.custom.push(folder);
        }
        catalog.custom.sort_by(catalog_order);
        catalog
    }

    /// Every folder in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Folder> {
        self.builtin.iter().chain(self.custom.iter())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Folder> {
        self.iter().find(|f| f.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Case-insensitive lookup by name; used to migrate free-text folder labels.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Folder> {
        let needle = name.trim().to_lowercase();
        self.iter().find(|f| f.name.to_lowercase() == needle)
    }

    /// Reject `name` if another folder (other than `except_id`) already uses it.
    pub fn ensure_name_available(&self, name: &str, except_id: Option<&str>) -> ValidationResult<()> {
        match self.find_by_name(name) {
            Some(existing) if Some(existing.id.as_str()) != except_id => {
                Err(ValidationError::DuplicateFolderName(name.to_owned()))
            },
            _ => Ok(()),
        }
    }

    pub fn insert(&mut self, folder: Folder) {
        self.custom.retain(|f| f.id != folder.id);
        self.custom.push(folder);
        self.custom.sort_by(catalog_order);
    }

    /// Replace a custom folder in place. Returns `false` if it is unknown.
    pub fn replace(&mut self, folder: Folder) -> bool {
        let Some(slot) = self.custom.iter_mut().find(|f| f.id == folder.id) else {
            return false;
        };
        *slot = folder;
        self.custom.sort_by(catalog_order);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<Folder> {
        let pos = self.custom.iter().position(|f| f.id == id)?;
        Some(self.custom.remove(pos))
    }

    /// Assign `order = position` to the listed custom folders.
    ///
    /// Unknown ids are ignored; unlisted folders keep their previous order.
    pub fn apply_order(&mut self, ids: &[String]) {
        for (position, id) in ids.iter().enumerate() {
            if let Some(folder) = self.custom.iter_mut().find(|f| f.id == *id) {
                folder.order = i64::try_from(position).ok();
            }
        }
        self.custom.sort_by(catalog_order);
    }
}
