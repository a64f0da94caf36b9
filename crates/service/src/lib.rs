//! Service layer for promptdeck
//!
//! The prompt index: a working set loaded from a backend, pure queries over
//! it, and optimistic mutations confirmed or reverted by the backend.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]
#![allow(clippy::indexing_slicing, reason = "Positions come from a lookup under the same lock")]

mod debounce;
mod error;
mod prompt_index;
pub mod query;

pub use debounce::SearchDebouncer;
pub use error::ServiceError;
pub use prompt_index::{LoadSummary, PromptIndex};
pub use query::{ListQuery, PromptQuery};
