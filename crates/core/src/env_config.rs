//! Environment-driven configuration with warn-level logging for invalid values.

use std::time::Duration;

use crate::constants::{BUILTIN_FOLDERS, DEFAULT_FOLDER, RECENT_TAGS_LIMIT, SEARCH_DEBOUNCE_MS};

const DEFAULT_FOLDER_ENV: &str = "PROMPTDECK_DEFAULT_FOLDER";
const SEARCH_DEBOUNCE_ENV: &str = "PROMPTDECK_SEARCH_DEBOUNCE_MS";
const RECENT_TAGS_ENV: &str = "PROMPTDECK_RECENT_TAGS_LIMIT";

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    parse_with_default(var, std::env::var(var).ok().as_deref(), default)
}

fn parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    raw: Option<&str>,
    default: T,
) -> T {
    let Some(v) = raw else {
        return default;
    };
    match v.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            tracing::warn!(var, value = %v, default = %default, "invalid env var value, using default");
            default
        },
    }
}

/// Tunables of a prompt index session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Folder id that receives prompts with a missing or unknown folder.
    /// Always one of [`BUILTIN_FOLDERS`].
    pub default_folder: String,
    /// Quiet period of the search debouncer.
    pub search_debounce: Duration,
    /// Length of the "recent tags" list.
    pub recent_tags_limit: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            default_folder: DEFAULT_FOLDER.to_owned(),
            search_debounce: Duration::from_millis(SEARCH_DEBOUNCE_MS),
            recent_tags_limit: RECENT_TAGS_LIMIT,
        }
    }
}

impl IndexConfig {
    /// Read `PROMPTDECK_*` variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(DEFAULT_FOLDER_ENV).ok().as_deref(),
            std::env::var(SEARCH_DEBOUNCE_ENV).ok().as_deref(),
            std::env::var(RECENT_TAGS_ENV).ok().as_deref(),
        )
    }

    fn from_values(folder: Option<&str>, debounce_ms: Option<&str>, recent: Option<&str>) -> Self {
        let default_folder = match folder.map(str::trim) {
            None | Some("") => DEFAULT_FOLDER.to_owned(),
            Some(name) => match BUILTIN_FOLDERS.iter().find(|b| b.eq_ignore_ascii_case(name)) {
                Some(builtin) => (*builtin).to_owned(),
                None => {
                    tracing::warn!(
                        var = DEFAULT_FOLDER_ENV,
                        value = name,
                        default = DEFAULT_FOLDER,
                        "default folder must be a built-in folder, using default"
                    );
                    DEFAULT_FOLDER.to_owned()
                },
            },
        };
        let debounce_ms = parse_with_default(SEARCH_DEBOUNCE_ENV, debounce_ms, SEARCH_DEBOUNCE_MS);
        let recent_tags_limit = parse_with_default(RECENT_TAGS_ENV, recent, RECENT_TAGS_LIMIT);
        Self {
            default_folder,
            search_debounce: Duration::from_millis(debounce_ms),
            recent_tags_limit,
        }
    }
}
