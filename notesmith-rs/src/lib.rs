//! Notesmith - surgical reading and editing of markdown note folders.
//!
//! # Overview
//!
//! Notesmith parses the structural skeleton of a markdown note (frontmatter,
//! heading hierarchy, `^block` anchors) and edits notes in place:
//! - Append, prepend or replace under a heading path, at a block anchor or
//!   on a frontmatter field, leaving every other byte untouched
//! - Case-insensitive full-text search with character-safe snippets
//! - Daily, weekly, monthly, quarterly and yearly notes
//!
//! # Example
//!
//! ```
//! use notesmith::patch::{patch, PatchOperation, PatchTarget};
//!
//! let raw = "# A\nfoo\n## B\nbar\n";
//! let target = PatchTarget::heading("A::B", "::").unwrap();
//! let updated = patch(raw, &target, PatchOperation::Append, "baz").unwrap();
//! assert_eq!(updated, "# A\nfoo\n## B\nbar\nbaz\n");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod lock;
pub mod note;
pub mod parser;
pub mod patch;
pub mod periodic;
pub mod search;
pub mod storage;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use config::Config;
pub use error::{NoteError, Result};
pub use note::Note;
pub use patch::{PatchOperation, PatchTarget};
pub use periodic::Period;
pub use search::{SearchOptions, SearchResult};
pub use storage::{FsStorage, Storage};
pub use types::*;
pub use vault::Vault;
