//! Pure queries over a slice of prompts.
//!
//! Nothing here mutates its input; the prompt index runs these under its read
//! lock and hands out owned results.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};

use promptdeck_core::constants::{ALL_FOLDERS_KEY, DEFAULT_PAGE_LIMIT, MAX_QUERY_LIMIT};
use promptdeck_core::{normalize_tag, Prompt};
use promptdeck_storage::PaginatedResult;

/// Filter criteria, combined with AND. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptQuery {
    /// Case-insensitive substring over title, content, best-for, notes and tags.
    pub search: Option<String>,
    /// Exact tag (normalized before comparison).
    pub tag: Option<String>,
    /// Folder id; the synthetic `All` key disables the constraint.
    pub folder: Option<String>,
}

impl PromptQuery {
    #[must_use]
    pub fn search(text: impl Into<String>) -> Self {
        Self { search: Some(text.into()), ..Self::default() }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn in_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }
}

/// Parameters of the paged listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Page size; defaults to 10 and is capped at 1000.
    pub limit: Option<usize>,
    pub offset: usize,
    /// Folder id; the synthetic `All` key disables the constraint.
    pub folder: Option<String>,
    /// The prompt must carry every one of these tags.
    pub tags: Vec<String>,
}

fn folder_constraint(folder: Option<&str>) -> Option<&str> {
    folder.filter(|f| !f.is_empty() && *f != ALL_FOLDERS_KEY)
}

/// Prompts matching `query`, in their original relative order.
#[must_use]
pub fn filter_prompts(prompts: &[Prompt], query: &PromptQuery) -> Vec<Prompt> {
    let needle = query.search.as_deref().map(str::to_lowercase);
    let tag = query.tag.as_deref().and_then(normalize_tag);
    let folder = folder_constraint(query.folder.as_deref());
    prompts
        .iter()
        .filter(|p| folder.is_none_or(|f| p.folder == f))
        .filter(|p| tag.as_deref().is_none_or(|t| p.tags.contains(t)))
        .filter(|p| needle.as_deref().is_none_or(|n| p.matches_lowercase(n)))
        .cloned()
        .collect()
}

/// Every tag in first-seen order, optionally truncated to `limit`.
#[must_use]
pub fn unique_tags(prompts: &[Prompt], limit: Option<usize>) -> Vec<String> {
    let mut seen = HashSet::new();
    let tags = prompts.iter().flat_map(|p| p.tags.iter()).filter(|t| seen.insert(*t));
    match limit {
        Some(n) => tags.take(n).map(ToOwned::to_owned).collect(),
        None => tags.map(ToOwned::to_owned).collect(),
    }
}

/// Known tags containing `input` (case-insensitive) that are not in `current`.
#[must_use]
pub fn tag_suggestions(
    prompts: &[Prompt],
    input: &str,
    current: &[String],
    limit: Option<usize>,
) -> Vec<String> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let taken: HashSet<String> = current.iter().filter_map(|t| normalize_tag(t)).collect();
    let matches = unique_tags(prompts, None)
        .into_iter()
        .filter(|t| t.contains(&needle) && !taken.contains(t));
    match limit {
        Some(n) => matches.take(n).collect(),
        None => matches.collect(),
    }
}

/// Member count per folder id, plus `All` holding the total.
///
/// Only folders with at least one member appear. A prompt with a blank folder
/// is counted under `default_folder`.
#[must_use]
pub fn counts_by_folder(prompts: &[Prompt], default_folder: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for prompt in prompts {
        let folder =
            if prompt.folder.trim().is_empty() { default_folder } else { prompt.folder.as_str() };
        *counts.entry(folder.to_owned()).or_insert(0) += 1;
    }
    counts.insert(ALL_FOLDERS_KEY.to_owned(), prompts.len());
    counts
}

/// One page of prompts, newest first.
#[must_use]
pub fn list_prompts(prompts: &[Prompt], query: &ListQuery) -> PaginatedResult<Prompt> {
    let folder = folder_constraint(query.folder.as_deref());
    let tags: Vec<String> = query.tags.iter().filter_map(|t| normalize_tag(t)).collect();
    let mut matching: Vec<&Prompt> = prompts
        .iter()
        .filter(|p| folder.is_none_or(|f| p.folder == f))
        .filter(|p| tags.iter().all(|t| p.tags.contains(t)))
        .collect();
    matching.sort_by_key(|p| Reverse(p.created_at));

    let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_QUERY_LIMIT);
    let items = matching.iter().skip(query.offset).take(limit).map(|p| (*p).clone()).collect();
    PaginatedResult {
        items,
        total: matching.len() as u64,
        offset: query.offset as u64,
        limit: limit as u64,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use promptdeck_core::NewPrompt;

    use super::*;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).single().expect("valid date")
    }

    fn prompt(id: &str, title: &str, tags: &[&str], folder: &str, day: u32) -> Prompt {
        NewPrompt::new(title, format!("content of {title}"))
            .tags(tags.iter().copied())
            .into_prompt(id.to_owned(), folder.to_owned(), at(day))
    }

    fn working_set() -> Vec<Prompt> {
        vec![
            prompt("1", "Foo", &["x"], "Work", 2),
            prompt("2", "Bar", &["y"], "Life", 1),
        ]
    }

    fn ids(prompts: &[Prompt]) -> Vec<&str> {
        prompts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive() {
        let set = working_set();
        assert_eq!(ids(&filter_prompts(&set, &PromptQuery::search("foo"))), ["1"]);
        assert_eq!(ids(&filter_prompts(&set, &PromptQuery::search("CONTENT OF"))), ["1", "2"]);
    }

    #[test]
    fn search_matches_tags_and_optional_fields() {
        let mut set = working_set();
        set[1].notes = Some("Use for Standups".to_owned());
        assert_eq!(ids(&filter_prompts(&set, &PromptQuery::search("standup"))), ["2"]);
        assert_eq!(ids(&filter_prompts(&set, &PromptQuery::search("x"))), ["1"]);
    }

    #[test]
    fn filters_combine_with_and() {
        let set = working_set();
        let q = PromptQuery::search("o").in_folder("Work").with_tag("X");
        assert_eq!(ids(&filter_prompts(&set, &q)), ["1"]);
        let q = PromptQuery::search("foo").in_folder("Life");
        assert!(filter_prompts(&set, &q).is_empty());
    }

    #[test]
    fn all_folder_key_and_empty_query_match_everything() {
        let set = working_set();
        assert_eq!(filter_prompts(&set, &PromptQuery::default()), set);
        assert_eq!(filter_prompts(&set, &PromptQuery::default().in_folder("All")), set);
        assert_eq!(filter_prompts(&set, &PromptQuery::search("")), set);
    }

    #[test]
    fn filter_is_pure() {
        let set = working_set();
        let before = set.clone();
        let q = PromptQuery::search("bar");
        assert_eq!(filter_prompts(&set, &q), filter_prompts(&set, &q));
        assert_eq!(set, before);
    }

    #[test]
    fn unique_tags_dedupes_in_first_seen_order() {
        let set = vec![
            prompt("1", "a", &["rust", "cli"], "Work", 3),
            prompt("2", "b", &["web", "rust"], "Work", 2),
            prompt("3", "c", &["cli", "ai"], "Life", 1),
        ];
        assert_eq!(unique_tags(&set, None), ["rust", "cli", "web", "ai"]);
        assert_eq!(unique_tags(&set, Some(2)), ["rust", "cli"]);
        assert!(unique_tags(&[], None).is_empty());
    }

    #[test]
    fn suggestions_skip_current_tags() {
        let set = vec![prompt("1", "a", &["rust", "rusty", "trust"], "Work", 1)];
        let current = vec!["Rusty".to_owned()];
        assert_eq!(tag_suggestions(&set, "RUS", &current, None), ["rust", "trust"]);
        assert_eq!(tag_suggestions(&set, "rus", &current, Some(1)), ["rust"]);
        assert!(tag_suggestions(&set, "  ", &[], None).is_empty());
    }

    #[test]
    fn counts_include_all_total() {
        let counts = counts_by_folder(&working_set(), "Life");
        let expected: BTreeMap<String, usize> =
            [("Work", 1), ("Life", 1), ("All", 2)].map(|(k, v)| (k.to_owned(), v)).into();
        assert_eq!(counts, expected);
    }

    #[test]
    fn blank_folder_counts_under_default() {
        let mut set = working_set();
        set[0].folder = String::new();
        let counts = counts_by_folder(&set, "Life");
        assert_eq!(counts.get("Life"), Some(&2));
        assert_eq!(counts.get("All"), Some(&2));
        assert_eq!(counts.get(""), None);
    }

    #[test]
    fn listing_pages_newest_first() {
        let set = vec![
            prompt("old", "a", &["x"], "Work", 1),
            prompt("new", "b", &["x", "y"], "Work", 9),
            prompt("mid", "c", &["x"], "Life", 5),
        ];
        let page = list_prompts(&set, &ListQuery { limit: Some(2), ..ListQuery::default() });
        assert_eq!(ids(&page.items), ["new", "mid"]);
        assert_eq!(page.total, 3);

        let page = list_prompts(&set, &ListQuery { offset: 2, ..ListQuery::default() });
        assert_eq!(ids(&page.items), ["old"]);
        assert_eq!(page.limit, 10);
    }

    #[test]
    fn listing_requires_every_tag() {
        let set = vec![
            prompt("1", "a", &["x"], "Work", 1),
            prompt("2", "b", &["x", "y"], "Work", 2),
        ];
        let q = ListQuery { tags: vec!["X".to_owned(), "y".to_owned()], ..ListQuery::default() };
        assert_eq!(ids(&list_prompts(&set, &q).items), ["2"]);
        let q = ListQuery { folder: Some("Life".to_owned()), ..ListQuery::default() };
        assert_eq!(list_prompts(&set, &q).total, 0);
    }

    #[test]
    fn listing_limit_is_capped() {
        let q = ListQuery { limit: Some(50_000), ..ListQuery::default() };
        assert_eq!(list_prompts(&[], &q).limit, 1000);
    }
}
