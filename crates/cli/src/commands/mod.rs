pub(crate) mod color;
pub(crate) mod folders;
pub(crate) mod search;

use anyhow::{Context, Result};
use promptdeck_core::IndexConfig;
use promptdeck_service::PromptIndex;
use promptdeck_storage::{ExportDocument, MemoryBackend};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Read the library at `path` into a freshly loaded index.
pub(crate) async fn open_index(path: &Path) -> Result<PromptIndex<MemoryBackend>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read library {}", path.display()))?;
    let doc = ExportDocument::from_json(&raw)
        .with_context(|| format!("failed to parse library {}", path.display()))?;

    let index = PromptIndex::new(Arc::new(MemoryBackend::from_export(doc)), IndexConfig::from_env());
    let summary = index.refresh().await?;
    tracing::debug!(
        path = %path.display(),
        loaded = summary.loaded,
        skipped = summary.skipped,
        "library loaded"
    );
    Ok(index)
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
