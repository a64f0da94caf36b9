//! In-memory working set of prompts with optimistic mutations.
//!
//! Every mutation is applied locally first and confirmed or reverted once the
//! backend answers. Each applied mutation takes a fresh sequence number for
//! its record; a confirmation or rollback only touches the record while its
//! sequence number is still the latest one, so a slow response can never
//! clobber a newer edit.

mod folders;
mod mutations;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use promptdeck_core::{Folder, FolderCatalog, IndexConfig, Prompt, PromptRecord};
use promptdeck_storage::{FolderBackend, PaginatedResult, PromptBackend};

use crate::query::{self, ListQuery, PromptQuery};
use crate::ServiceError;

/// Outcome of [`PromptIndex::load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    /// Records dropped for lacking an id or repeating an earlier one.
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub(crate) struct IndexState {
    pub(crate) prompts: Vec<Prompt>,
    pub(crate) folders: FolderCatalog,
    seqs: HashMap<String, u64>,
    next_seq: u64,
}

impl IndexState {
    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.prompts.iter().position(|p| p.id == id)
    }

    /// Claim the next sequence number for `id`.
    pub(crate) fn begin(&mut self, id: &str) -> u64 {
        self.next_seq += 1;
        self.seqs.insert(id.to_owned(), self.next_seq);
        self.next_seq
    }

    pub(crate) fn is_current(&self, id: &str, seq: u64) -> bool {
        self.seqs.get(id) == Some(&seq)
    }

    /// Forget `id`'s sequence number if `seq` still owns it.
    pub(crate) fn settle(&mut self, id: &str, seq: u64) {
        if self.is_current(id, seq) {
            self.seqs.remove(id);
        }
    }

    pub(crate) fn forget(&mut self, id: &str) {
        self.seqs.remove(id);
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.seqs.len()
    }
}

pub struct PromptIndex<B> {
    pub(crate) backend: Arc<B>,
    pub(crate) config: IndexConfig,
    state: RwLock<IndexState>,
}

impl<B> PromptIndex<B> {
    #[must_use]
    pub fn new(backend: Arc<B>, config: IndexConfig) -> Self {
        Self { backend, config, state: RwLock::new(IndexState::default()) }
    }

    #[must_use]
    pub fn with_defaults(backend: Arc<B>) -> Self {
        Self::new(backend, IndexConfig::default())
    }

    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, IndexState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, IndexState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the working set with normalized copies of `records`.
    ///
    /// Records without an id are skipped, later duplicates of an id are
    /// skipped, and the result is ordered newest first (stable for equal
    /// timestamps). Mutations still in flight lose their claim: their
    /// confirmations and rollbacks are discarded.
    pub fn load(&self, records: &[PromptRecord]) -> LoadSummary {
        let mut state = self.write();
        let mut seen = HashSet::new();
        let mut prompts = Vec::with_capacity(records.len());
        for record in records {
            let Some(prompt) = record.normalize(&state.folders, &self.config.default_folder) else {
                continue;
            };
            if !seen.insert(prompt.id.clone()) {
                tracing::warn!(id = %prompt.id, "duplicate prompt id, keeping first occurrence");
                continue;
            }
            prompts.push(prompt);
        }
        prompts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let summary = LoadSummary { loaded: prompts.len(), skipped: records.len() - prompts.len() };
        if state.in_flight() > 0 {
            tracing::debug!(in_flight = state.in_flight(), "load supersedes pending mutations");
        }
        state.prompts = prompts;
        state.seqs.clear();
        tracing::debug!(loaded = summary.loaded, skipped = summary.skipped, "prompt index loaded");
        summary
    }

    /// Replace the custom folders. Prompts filed under a folder that no
    /// longer exists move to the default folder.
    pub fn load_folders(&self, folders: Vec<Folder>) {
        let mut state = self.write();
        state.folders = FolderCatalog::with_custom(folders);
        let IndexState { prompts, folders, .. } = &mut *state;
        for prompt in prompts.iter_mut().filter(|p| !folders.contains(&p.folder)) {
            tracing::warn!(
                id = %prompt.id,
                folder = %prompt.folder,
                default = %self.config.default_folder,
                "prompt folder no longer exists, moving to default"
            );
            prompt.folder.clone_from(&self.config.default_folder);
        }
    }

    /// Prompts matching `query`, in working-set order.
    #[must_use]
    pub fn filter(&self, query: &PromptQuery) -> Vec<Prompt> {
        query::filter_prompts(&self.read().prompts, query)
    }

    #[must_use]
    pub fn list(&self, query: &ListQuery) -> PaginatedResult<Prompt> {
        query::list_prompts(&self.read().prompts, query)
    }

    #[must_use]
    pub fn unique_tags(&self, limit: Option<usize>) -> Vec<String> {
        query::unique_tags(&self.read().prompts, limit)
    }

    #[must_use]
    pub fn recent_tags(&self) -> Vec<String> {
        self.unique_tags(Some(self.config.recent_tags_limit))
    }

    #[must_use]
    pub fn tag_suggestions(&self, input: &str, current: &[String], limit: Option<usize>) -> Vec<String> {
        query::tag_suggestions(&self.read().prompts, input, current, limit)
    }

    #[must_use]
    pub fn counts_by_folder(&self) -> BTreeMap<String, usize> {
        query::counts_by_folder(&self.read().prompts, &self.config.default_folder)
    }

    /// Every folder in display order, built-ins first.
    #[must_use]
    pub fn folders(&self) -> Vec<Folder> {
        self.read().folders.iter().cloned().collect()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Prompt> {
        self.read().prompts.iter().find(|p| p.id == id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().prompts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().prompts.is_empty()
    }

    /// Owned copy of the working set.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Prompt> {
        self.read().prompts.clone()
    }
}

impl<B: PromptBackend + FolderBackend> PromptIndex<B> {
    /// Fetch folders and prompts from the backend and load them.
    pub async fn refresh(&self) -> Result<LoadSummary, ServiceError> {
        let folders = self.backend.fetch_folders().await?;
        let records = self.backend.fetch_all().await?;
        self.load_folders(folders);
        Ok(self.load(&records))
    }
}
