//! Result and option types for note search.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of results returned by a search.
pub const DEFAULT_MAX_RESULTS: usize = 10;
/// Default snippet width in characters.
pub const DEFAULT_CONTEXT_LENGTH: usize = 100;
/// Default number of context strings kept per result.
pub const DEFAULT_MAX_SNIPPETS: usize = 3;

/// Knobs for a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Maximum number of results.
    pub max_results: usize,
    /// Maximum snippet width, in characters.
    pub context_length: usize,
    /// Maximum number of context strings per result.
    pub max_snippets: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            context_length: DEFAULT_CONTEXT_LENGTH,
            max_snippets: DEFAULT_MAX_SNIPPETS,
        }
    }
}

/// A search result for a single note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Path to the matching note (relative to vault root).
    pub path: PathBuf,
    /// Number of non-overlapping, case-insensitive occurrences.
    pub score: usize,
    /// Context around the first occurrence.
    pub snippet: String,
    /// Context around successive occurrences, the first one included.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<String>,
}
