//! Storage layer for promptdeck
//!
//! Backend contracts the prompt index is written against, plus an in-process
//! implementation used by the CLI and by tests.

mod error;
mod memory;
pub mod traits;
mod types;

pub use error::StorageError;
pub use memory::MemoryBackend;
pub use traits::{FolderBackend, PromptBackend};
pub use types::{ExportDocument, PaginatedResult};
