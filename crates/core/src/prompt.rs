use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{BEST_FOR_MAX_CHARS, CONTENT_MAX_CHARS, NOTES_MAX_CHARS, TITLE_MAX_CHARS};
use crate::error::{optional_text, require_text, ValidationResult};
use crate::tags::TagSet;

/// A stored prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Unique identifier
    pub id: String,
    /// Concise title (max 100 chars)
    pub title: String,
    /// Prompt body (max 10,000 chars)
    pub content: String,
    /// Normalized tags in display order
    #[serde(default)]
    pub tags: TagSet,
    /// Id of the folder this prompt is filed under
    pub folder: String,
    /// What the prompt works best for
    #[serde(default)]
    pub best_for: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub user_id: Option<String>,
    /// When this prompt was created; newest prompts sort first
    pub created_at: DateTime<Utc>,
}

impl Prompt {
    /// Check field limits.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_fields(&self.title, &self.content, self.best_for.as_deref(), self.notes.as_deref())
    }

    /// Merge `patch` into this prompt. Fields absent from the patch are kept.
    pub fn apply(&mut self, patch: &PromptPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(content) = &patch.content {
            self.content.clone_from(content);
        }
        if let Some(best_for) = &patch.best_for {
            self.best_for.clone_from(best_for);
        }
        if let Some(notes) = &patch.notes {
            self.notes.clone_from(notes);
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.iter().collect();
        }
        if let Some(folder) = &patch.folder {
            self.folder.clone_from(folder);
        }
        if let Some(is_favorite) = patch.is_favorite {
            self.is_favorite = is_favorite;
        }
    }

    /// Case-insensitive substring match against title, content, best-for,
    /// notes and tags. `needle` must already be lowercased.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        let hit = |s: &str| s.to_lowercase().contains(needle);
        hit(&self.title)
            || hit(&self.content)
            || self.best_for.as_deref().is_some_and(hit)
            || self.notes.as_deref().is_some_and(hit)
            || self.tags.iter().any(hit)
    }
}

/// Input for creating a prompt. The backend assigns `id` and `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPrompt {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Folder id; `None` files the prompt under the default folder
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub best_for: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewPrompt {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { title: title.into(), content: content.into(), ..Self::default() }
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    #[must_use]
    pub fn best_for(mut self, best_for: impl Into<String>) -> Self {
        self.best_for = Some(best_for.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_fields(&self.title, &self.content, self.best_for.as_deref(), self.notes.as_deref())
    }

    /// Build the prompt a backend stores for this input.
    #[must_use]
    pub fn into_prompt(self, id: String, folder: String, created_at: DateTime<Utc>) -> Prompt {
        Prompt {
            id,
            title: self.title,
            content: self.content,
            tags: self.tags.into(),
            folder,
            best_for: self.best_for,
            notes: self.notes,
            is_favorite: false,
            user_id: None,
            created_at,
        }
    }
}

/// Partial update. `None` leaves a field untouched; for the optional text
/// fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_for: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl PromptPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check the fields this patch sets. Untouched fields are not revisited.
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(title) = &self.title {
            require_text("title", title, TITLE_MAX_CHARS)?;
        }
        if let Some(content) = &self.content {
            require_text("content", content, CONTENT_MAX_CHARS)?;
        }
        optional_text("best_for", self.best_for.as_ref().and_then(Option::as_deref), BEST_FOR_MAX_CHARS)?;
        optional_text("notes", self.notes.as_ref().and_then(Option::as_deref), NOTES_MAX_CHARS)
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    #[must_use]
    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = Some(is_favorite);
        self
    }
}

fn validate_fields(
    title: &str,
    content: &str,
    best_for: Option<&str>,
    notes: Option<&str>,
) -> ValidationResult<()> {
    require_text("title", title, TITLE_MAX_CHARS)?;
    require_text("content", content, CONTENT_MAX_CHARS)?;
    optional_text("best_for", best_for, BEST_FOR_MAX_CHARS)?;
    optional_text("notes", notes, NOTES_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    fn sample() -> Prompt {
        NewPrompt::new("Code review", "Review this diff")
            .tags(["Rust", "review"])
            .best_for("pull requests")
            .into_prompt("p1".to_owned(), "Work".to_owned(), DateTime::<Utc>::UNIX_EPOCH)
    }

    #[test]
    fn new_prompt_tags_are_normalized() {
        assert_eq!(sample().tags.as_slice(), ["rust", "review"]);
    }

    #[test]
    fn validation_rejects_missing_and_oversized_fields() {
        assert_eq!(NewPrompt::new("", "body").validate(), Err(ValidationError::Empty { field: "title" }));
        assert_eq!(NewPrompt::new("t", " ").validate(), Err(ValidationError::Empty { field: "content" }));
        let long = NewPrompt::new("t".repeat(101), "body");
        assert!(matches!(long.validate(), Err(ValidationError::TooLong { field: "title", .. })));
        let notes = NewPrompt::new("t", "body").notes("n".repeat(1001));
        assert!(matches!(notes.validate(), Err(ValidationError::TooLong { field: "notes", .. })));
        assert!(NewPrompt::new("t", "c".repeat(10_000)).validate().is_ok());
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let mut prompt = sample();
        prompt.apply(&PromptPatch::default().title("Renamed").tags(["A", "a", "b"]));
        assert_eq!(prompt.title, "Renamed");
        assert_eq!(prompt.content, "Review this diff");
        assert_eq!(prompt.tags.as_slice(), ["a", "b"]);
        assert_eq!(prompt.best_for.as_deref(), Some("pull requests"));
    }

    #[test]
    fn apply_can_clear_optional_fields() {
        let mut prompt = sample();
        prompt.apply(&PromptPatch { best_for: Some(None), ..PromptPatch::default() });
        assert_eq!(prompt.best_for, None);
    }

    #[test]
    fn search_covers_every_text_field() {
        let prompt = sample();
        assert!(prompt.matches_lowercase("code"));
        assert!(prompt.matches_lowercase("diff"));
        assert!(prompt.matches_lowercase("pull"));
        assert!(prompt.matches_lowercase("rus"));
        assert!(prompt.matches_lowercase(""));
        assert!(!prompt.matches_lowercase("python"));
    }

    #[test]
    fn patch_validation_checks_only_present_fields() {
        assert!(PromptPatch::default().favorite(true).validate().is_ok());
        assert_eq!(
            PromptPatch::default().title("  ").validate(),
            Err(ValidationError::Empty { field: "title" })
        );
        let notes = PromptPatch { notes: Some(Some("n".repeat(1001))), ..PromptPatch::default() };
        assert!(matches!(notes.validate(), Err(ValidationError::TooLong { field: "notes", .. })));
        let cleared = PromptPatch { best_for: Some(None), ..PromptPatch::default() };
        assert!(cleared.validate().is_ok());
    }

    #[test]
    fn empty_patch() {
        assert!(PromptPatch::default().is_empty());
        assert!(!PromptPatch::default().favorite(true).is_empty());
    }
}
