//! Backend trait abstraction
//!
//! Async contracts the prompt index talks to. Implementations are injected,
//! so tests can substitute failing or slow doubles.

pub mod folder;
pub mod prompt;

pub use folder::FolderBackend;
pub use prompt::PromptBackend;
