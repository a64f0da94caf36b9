use chrono::Utc;
use promptdeck_core::constants::PENDING_ID_PREFIX;
use promptdeck_core::{NewPrompt, Prompt, PromptPatch};
use promptdeck_storage::PromptBackend;
use uuid::Uuid;

use super::{IndexState, PromptIndex};
use crate::ServiceError;

impl<B: PromptBackend> PromptIndex<B> {
    /// Insert `new` at the front under a provisional id, then persist it.
    ///
    /// On success the provisional record is swapped for the stored one. On
    /// failure it is removed again and the working set is left as it was.
    pub async fn add(&self, mut new: NewPrompt) -> Result<Prompt, ServiceError> {
        new.validate()?;
        let provisional_id = format!("{PENDING_ID_PREFIX}{}", Uuid::new_v4());
        let seq = {
            let mut state = self.write();
            let folder = match new.folder.take() {
                Some(folder) if !state.folders.contains(&folder) => {
                    return Err(ServiceError::folder_not_found(&folder));
                },
                Some(folder) => folder,
                None => self.config.default_folder.clone(),
            };
            new.folder = Some(folder.clone());
            let provisional = new.clone().into_prompt(provisional_id.clone(), folder, Utc::now());
            state.prompts.insert(0, provisional);
            state.begin(&provisional_id)
        };
        tracing::debug!(id = %provisional_id, seq, "optimistic add applied");

        let result = self.backend.create(&new).await;

        let mut state = self.write();
        let position = state.position(&provisional_id);
        state.forget(&provisional_id);
        match result {
            Ok(created) => {
                match position {
                    Some(pos) => state.prompts[pos] = created.clone(),
                    None => tracing::debug!(id = %created.id, "provisional prompt gone, confirmation discarded"),
                }
                Ok(created)
            },
            Err(e) => {
                if let Some(pos) = position {
                    state.prompts.remove(pos);
                }
                tracing::warn!(id = %provisional_id, seq, error = %e, "add failed, reverted");
                Err(e.into())
            },
        }
    }

    /// Merge `patch` into prompt `id`, then persist it.
    ///
    /// The patched fields are validated before anything changes. A confirmation
    /// replaces the record with the stored version; a failure restores the
    /// previous value. Either is skipped if a newer mutation of the same
    /// prompt was applied meanwhile.
    pub async fn update(&self, id: &str, patch: PromptPatch) -> Result<Prompt, ServiceError> {
        ensure_confirmed(id)?;
        let (previous, seq) = {
            let mut state = self.write();
            let pos = state.position(id).ok_or_else(|| ServiceError::prompt_not_found(id))?;
            if let Some(folder) = patch.folder.as_deref() {
                if !state.folders.contains(folder) {
                    return Err(ServiceError::folder_not_found(folder));
                }
            }
            patch.validate()?;
            let previous = state.prompts[pos].clone();
            let mut merged = previous.clone();
            merged.apply(&patch);
            state.prompts[pos] = merged;
            (previous, state.begin(id))
        };
        tracing::debug!(id, seq, "optimistic update applied");

        let result = self.backend.patch(id, &patch).await;

        let mut state = self.write();
        let current = state.is_current(id, seq);
        state.settle(id, seq);
        let pos = state.position(id);
        match result {
            Ok(updated) => {
                match pos.filter(|_| current) {
                    Some(pos) => state.prompts[pos] = updated.clone(),
                    None => tracing::debug!(id, seq, "superseded confirmation discarded"),
                }
                Ok(updated)
            },
            Err(e) => {
                match pos.filter(|_| current) {
                    Some(pos) => state.prompts[pos] = previous,
                    None => tracing::warn!(id, seq, "superseded rollback discarded"),
                }
                tracing::warn!(id, seq, error = %e, "update failed");
                Err(e.into())
            },
        }
    }

    /// Remove prompt `id`, then delete it from the backend.
    ///
    /// The backend is asked to delete even when the working set does not hold
    /// the id; `Ok(false)` reports that case. On failure the prompt is put
    /// back next to the neighbours it had.
    pub async fn remove(&self, id: &str) -> Result<bool, ServiceError> {
        ensure_confirmed(id)?;
        let removed = {
            let mut state = self.write();
            match state.position(id) {
                Some(pos) => {
                    let prompt = state.prompts.remove(pos);
                    let seq = state.begin(id);
                    let slot = Slot {
                        index: pos,
                        before: pos.checked_sub(1).map(|i| state.prompts[i].id.clone()),
                        after: state.prompts.get(pos).map(|p| p.id.clone()),
                    };
                    Some((slot, prompt, seq))
                },
                None => None,
            }
        };
        if let Some((_, _, seq)) = &removed {
            tracing::debug!(id, seq, "optimistic remove applied");
        }

        let result = self.backend.delete(id).await;

        let Some((slot, prompt, seq)) = removed else {
            return result.map(|()| false).map_err(|e| {
                tracing::warn!(id, error = %e, "remove failed");
                e.into()
            });
        };
        let mut state = self.write();
        let current = state.is_current(id, seq);
        state.settle(id, seq);
        match result {
            Ok(()) => Ok(true),
            Err(e) => {
                if current && state.position(id).is_none() {
                    let pos = slot.resolve(&state);
                    state.prompts.insert(pos, prompt);
                } else {
                    tracing::warn!(id, seq, "superseded rollback discarded");
                }
                tracing::warn!(id, seq, error = %e, "remove failed, reverted");
                Err(e.into())
            },
        }
    }

    /// Flip the favorite flag of prompt `id`.
    pub async fn toggle_favorite(&self, id: &str) -> Result<Prompt, ServiceError> {
        let is_favorite = self
            .read()
            .prompts
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.is_favorite)
            .ok_or_else(|| ServiceError::prompt_not_found(id))?;
        self.update(id, PromptPatch::default().favorite(!is_favorite)).await
    }

    /// File prompt `id` under `folder_id`.
    pub async fn move_to_folder(&self, id: &str, folder_id: &str) -> Result<Prompt, ServiceError> {
        self.update(id, PromptPatch::default().folder(folder_id)).await
    }
}

/// Where a removed prompt sat, by index and by the ids around it.
struct Slot {
    index: usize,
    before: Option<String>,
    after: Option<String>,
}

impl Slot {
    /// Index to reinsert at: in front of the old successor if it is still
    /// there, else behind the old predecessor, else the old index.
    fn resolve(&self, state: &IndexState) -> usize {
        self.after
            .as_deref()
            .and_then(|id| state.position(id))
            .or_else(|| self.before.as_deref().and_then(|id| state.position(id)).map(|i| i + 1))
            .unwrap_or_else(|| self.index.min(state.prompts.len()))
    }
}

/// Provisional records belong to their in-flight `add` until it settles.
fn ensure_confirmed(id: &str) -> Result<(), ServiceError> {
    if id.starts_with(PENDING_ID_PREFIX) {
        return Err(ServiceError::Unconfirmed(id.to_owned()));
    }
    Ok(())
}
