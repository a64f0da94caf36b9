//! Core types for promptdeck
//!
//! Domain types, validation and record normalization shared by the storage,
//! service and CLI crates.

pub mod constants;
mod env_config;
mod error;
mod folder;
mod prompt;
mod record;
mod tags;

pub use env_config::{env_parse_with_default, IndexConfig};
pub use error::{ValidationError, ValidationResult};
pub use folder::{is_builtin_folder, validate_folder_name, Folder, FolderCatalog, NewFolder};
pub use prompt::{NewPrompt, Prompt, PromptPatch};
pub use record::{parse_tags, PromptRecord};
pub use tags::{normalize_tag, tag_color, TagColor, TagSet};
