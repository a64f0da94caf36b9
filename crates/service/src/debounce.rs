//! Quiet-period gate for search-as-you-type.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use promptdeck_core::IndexConfig;

/// Lets only the last query of a burst through.
///
/// Each call to [`settle`](Self::settle) supersedes every earlier one still
/// waiting. Superseded queries are dropped, never queued.
#[derive(Debug)]
pub struct SearchDebouncer {
    quiet: Duration,
    generation: AtomicU64,
}

impl SearchDebouncer {
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, generation: AtomicU64::new(0) }
    }

    #[must_use]
    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new(config.search_debounce)
    }

    #[must_use]
    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Wait out the quiet period. Returns the query if nothing newer was
    /// submitted meanwhile, `None` otherwise.
    pub async fn settle(&self, query: impl Into<String>) -> Option<String> {
        let query = query.into();
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.quiet).await;
        if self.generation.load(Ordering::SeqCst) == ticket {
            Some(query)
        } else {
            tracing::debug!(query = %query, "search superseded");
            None
        }
    }

    /// Drop whatever query is currently waiting.
    pub fn cancel_pending(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
