//! Shared constants for promptdeck.
//!
//! Field limits match the form validation of the prompt editor.

/// Maximum prompt title length, in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum prompt body length, in characters.
pub const CONTENT_MAX_CHARS: usize = 10_000;

/// Maximum length of the "best for" blurb, in characters.
pub const BEST_FOR_MAX_CHARS: usize = 100;

/// Maximum length of free-form notes, in characters.
pub const NOTES_MAX_CHARS: usize = 1_000;

/// Maximum folder name length, in characters.
pub const FOLDER_NAME_MAX_CHARS: usize = 50;

/// Folders that always exist. Their ids equal their names.
pub const BUILTIN_FOLDERS: [&str; 2] = ["Work", "Life"];

/// Folder that receives prompts with a missing or unknown folder.
pub const DEFAULT_FOLDER: &str = "Life";

/// Synthetic folder key meaning "every prompt". Never a real folder.
pub const ALL_FOLDERS_KEY: &str = "All";

/// Quiet period before a typed search query is dispatched.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Number of tags shown in the "recent tags" list.
pub const RECENT_TAGS_LIMIT: usize = 10;

/// Page size when the caller does not specify one.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Upper bound on the page size of any listing.
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Prefix of ids handed out to prompts that the backend has not confirmed yet.
pub const PENDING_ID_PREFIX: &str = "pending-";
