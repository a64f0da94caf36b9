use anyhow::Result;
use promptdeck_core::Folder;
use serde::Serialize;
use std::path::Path;

use super::{open_index, print_json};

#[derive(Serialize)]
struct FolderRow {
    #[serde(flatten)]
    folder: Folder,
    prompts: usize,
}

pub(crate) async fn run_folders(path: &Path) -> Result<()> {
    let index = open_index(path).await?;
    let counts = index.counts_by_folder();
    let rows: Vec<FolderRow> = index
        .folders()
        .into_iter()
        .map(|folder| {
            let prompts = counts.get(&folder.id).copied().unwrap_or(0);
            FolderRow { folder, prompts }
        })
        .collect();
    print_json(&rows)
}
