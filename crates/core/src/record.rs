//! Loose prompt records as they come out of storage, and their normalization.
//!
//! Older rows store tags as a JSON-encoded string instead of an array, may
//! hold non-string tag items or `null`, and file prompts under a free-text
//! `folder` label instead of a `folder_id` reference. Normalization folds all
//! of that into a well-formed [`Prompt`] without ever failing the whole load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::ALL_FOLDERS_KEY;
use crate::folder::FolderCatalog;
use crate::prompt::Prompt;
use crate::tags::TagSet;

/// A prompt row in any of the historical schemas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub best_for: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Array of strings, JSON-encoded array, or null.
    #[serde(default)]
    pub tags: Value,
    /// Legacy free-text folder label.
    #[serde(default)]
    pub folder: Option<String>,
    /// Folder reference.
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

impl From<&Prompt> for PromptRecord {
    fn from(prompt: &Prompt) -> Self {
        Self {
            id: Some(prompt.id.clone()),
            created_at: Some(prompt.created_at),
            title: Some(prompt.title.clone()),
            content: Some(prompt.content.clone()),
            user_id: prompt.user_id.clone(),
            best_for: prompt.best_for.clone(),
            notes: prompt.notes.clone(),
            tags: Value::from(prompt.tags.as_slice().to_vec()),
            folder: None,
            folder_id: Some(prompt.folder.clone()),
            is_favorite: Some(prompt.is_favorite),
        }
    }
}

impl PromptRecord {
    /// Normalize into a [`Prompt`].
    ///
    /// Only a missing id makes a record unusable (`None`); every other defect
    /// is repaired and logged.
    #[must_use]
    pub fn normalize(&self, folders: &FolderCatalog, default_folder: &str) -> Option<Prompt> {
        let Some(id) = self.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) else {
            tracing::warn!(title = ?self.title, "skipping prompt record without id");
            return None;
        };
        let created_at = self.created_at.unwrap_or_else(|| {
            tracing::warn!(id, "prompt record without created_at, sorting it last");
            DateTime::<Utc>::UNIX_EPOCH
        });
        Some(Prompt {
            id: id.to_owned(),
            title: required_text(id, "title", self.title.as_deref()),
            content: required_text(id, "content", self.content.as_deref()),
            tags: parse_tags(id, &self.tags),
            folder: self.resolve_folder(id, folders, default_folder),
            best_for: non_blank(self.best_for.as_deref()),
            notes: non_blank(self.notes.as_deref()),
            is_favorite: self.is_favorite.unwrap_or(false),
            user_id: self.user_id.clone(),
            created_at,
        })
    }

    fn resolve_folder(&self, id: &str, folders: &FolderCatalog, default_folder: &str) -> String {
        if let Some(folder_id) = non_blank(self.folder_id.as_deref()) {
            if folders.contains(&folder_id) {
                return folder_id;
            }
            tracing::warn!(id, folder_id = %folder_id, "prompt references unknown folder, using default");
            return default_folder.to_owned();
        }
        match non_blank(self.folder.as_deref()) {
            Some(label) if label.eq_ignore_ascii_case(ALL_FOLDERS_KEY) => default_folder.to_owned(),
            Some(label) => folders.find_by_name(&label).map_or_else(
                || {
                    tracing::debug!(id, label = %label, "unknown legacy folder label, using default");
                    default_folder.to_owned()
                },
                |folder| folder.id.clone(),
            ),
            None => default_folder.to_owned(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(ToOwned::to_owned)
}

fn required_text(id: &str, field: &'static str, value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_owned(),
        other => {
            tracing::warn!(id, field, "prompt record missing required field");
            other.unwrap_or_default().to_owned()
        },
    }
}

/// Parse any historical tag encoding into a [`TagSet`].
///
/// Non-string items are dropped; an undecodable string yields no tags.
#[must_use]
pub fn parse_tags(id: &str, raw: &Value) -> TagSet {
    match raw {
        Value::Null => TagSet::new(),
        Value::Array(items) => {
            let strings: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if strings.len() != items.len() {
                tracing::warn!(id, dropped = items.len() - strings.len(), "dropping non-string tags");
            }
            strings.into_iter().collect()
        },
        Value::String(encoded) if encoded.trim().is_empty() => TagSet::new(),
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(decoded @ Value::Array(_)) => parse_tags(id, &decoded),
            Ok(_) | Err(_) => {
                tracing::warn!(id, tags = %encoded, "failed to decode tags, ignoring them");
                TagSet::new()
            },
        },
        other => {
            tracing::warn!(id, tags = %other, "unexpected tags value, ignoring it");
            TagSet::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::Folder;

    fn record(value: Value) -> PromptRecord {
        serde_json::from_value(value).expect("record json")
    }

    fn catalog() -> FolderCatalog {
        FolderCatalog::with_custom([Folder {
            id: "f-ideas".to_owned(),
            name: "Ideas".to_owned(),
            order: None,
            icon: None,
            color: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }])
    }

    #[test]
    fn tags_accept_every_encoding() {
        assert!(parse_tags("1", &Value::Null).is_empty());
        assert_eq!(parse_tags("1", &json!(["A", 3, null, "b"])).as_slice(), ["a", "b"]);
        assert_eq!(parse_tags("1", &json!("[\"x\",\"X\",\"y\"]")).as_slice(), ["x", "y"]);
        assert!(parse_tags("1", &json!("not json")).is_empty());
        assert!(parse_tags("1", &json!({"a": 1})).is_empty());
        assert!(parse_tags("1", &json!("\"quoted\"")).is_empty());
    }

    #[test]
    fn record_without_id_is_skipped() {
        let r = record(json!({"title": "orphan", "content": "c"}));
        assert!(r.normalize(&catalog(), "Life").is_none());
    }

    #[test]
    fn folder_id_takes_precedence_over_label() {
        let r = record(json!({"id": "1", "folder_id": "f-ideas", "folder": "Work"}));
        assert_eq!(r.normalize(&catalog(), "Life").map(|p| p.folder), Some("f-ideas".to_owned()));
    }

    #[test]
    fn legacy_labels_are_migrated() {
        let cat = catalog();
        let folder = |v: Value| record(v).normalize(&cat, "Life").map(|p| p.folder);
        assert_eq!(folder(json!({"id": "1", "folder": "work"})), Some("Work".to_owned()));
        assert_eq!(folder(json!({"id": "1", "folder": "IDEAS"})), Some("f-ideas".to_owned()));
        assert_eq!(folder(json!({"id": "1", "folder": "Somewhere"})), Some("Life".to_owned()));
        assert_eq!(folder(json!({"id": "1", "folder": "All"})), Some("Life".to_owned()));
        assert_eq!(folder(json!({"id": "1", "folder": ""})), Some("Life".to_owned()));
        assert_eq!(folder(json!({"id": "1", "folder_id": "gone"})), Some("Life".to_owned()));
        assert_eq!(folder(json!({"id": "1"})), Some("Life".to_owned()));
    }

    #[test]
    fn defects_are_repaired_not_fatal() {
        let r = record(json!({"id": " 7 ", "tags": 12, "best_for": "  "}));
        let prompt = r.normalize(&catalog(), "Work").expect("normalized");
        assert_eq!(prompt.id, "7");
        assert_eq!(prompt.title, "");
        assert!(prompt.tags.is_empty());
        assert_eq!(prompt.best_for, None);
        assert_eq!(prompt.folder, "Work");
        assert_eq!(prompt.created_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn prompt_round_trips_through_record() {
        let cat = catalog();
        let original = record(json!({
            "id": "9", "title": "T", "content": "C", "tags": ["a"], "folder_id": "f-ideas",
            "created_at": "2024-05-01T10:00:00Z", "is_favorite": true
        }))
        .normalize(&cat, "Life")
        .expect("normalized");
        let again = PromptRecord::from(&original).normalize(&cat, "Life");
        assert_eq!(again, Some(original));
    }
}
