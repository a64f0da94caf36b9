//! Storage types shared across modules

use promptdeck_core::{Folder, PromptRecord};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Generic paginated result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Total number of matching items across all pages.
    pub total: u64,
    /// Offset from the start.
    pub offset: u64,
    /// Maximum items per page.
    pub limit: u64,
}

/// Exported prompt library: prompt rows plus custom folders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(default)]
    pub prompts: Vec<PromptRecord>,
    #[serde(default)]
    pub folders: Vec<Folder>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExportShape {
    Document(ExportDocument),
    Records(Vec<PromptRecord>),
}

impl ExportDocument {
    /// Parse an export: either a `{ "prompts": [...], "folders": [...] }`
    /// document or a bare array of prompt rows.
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(match serde_json::from_str::<ExportShape>(json)? {
            ExportShape::Document(doc) => doc,
            ExportShape::Records(prompts) => Self { prompts, folders: Vec::new() },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_document_shape() {
        let doc = ExportDocument::from_json(
            r#"{"prompts": [{"id": "1", "title": "T"}],
                "folders": [{"id": "f", "name": "Ideas", "created_at": "2024-01-01T00:00:00Z"}]}"#,
        )
        .expect("document");
        assert_eq!(doc.prompts.len(), 1);
        assert_eq!(doc.folders[0].name, "Ideas");
    }

    #[test]
    fn parses_bare_array() {
        let doc = ExportDocument::from_json(r#"[{"id": "1"}, {"id": "2", "tags": "[\"a\"]"}]"#)
            .expect("array");
        assert_eq!(doc.prompts.len(), 2);
        assert!(doc.folders.is_empty());
    }

    #[test]
    fn rejects_garbage() {
        let err = ExportDocument::from_json("42").expect_err("not an export");
        assert!(matches!(err, StorageError::DataCorruption { .. }));
    }
}
