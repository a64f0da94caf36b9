use anyhow::Result;
use promptdeck_service::{ListQuery, PromptQuery};
use std::path::Path;

use super::{open_index, print_json};

pub(crate) async fn run_list(
    path: &Path,
    limit: Option<usize>,
    offset: usize,
    folder: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    let index = open_index(path).await?;
    let page = index.list(&ListQuery { limit, offset, folder, tags });
    print_json(&page)
}

pub(crate) async fn run_search(
    path: &Path,
    query: String,
    tag: Option<String>,
    folder: Option<String>,
) -> Result<()> {
    let index = open_index(path).await?;
    let results = index.filter(&PromptQuery { search: Some(query), tag, folder });
    print_json(&results)
}

pub(crate) async fn run_tags(path: &Path, limit: Option<usize>) -> Result<()> {
    let index = open_index(path).await?;
    print_json(&index.unique_tags(limit))
}

pub(crate) async fn run_counts(path: &Path) -> Result<()> {
    let index = open_index(path).await?;
    print_json(&index.counts_by_folder())
}
