//! Full-text search across notes.
//!
//! Notes are scored by counting case-insensitive, non-overlapping occurrences
//! of the query. Ranking is deterministic: score descending, then shorter
//! path, then lexical path order.

mod snippet;
pub mod types;

pub use types::*;

use crate::note::Note;
use rayon::prelude::*;
use snippet::{FoldedText, fold_query};
use std::cmp::Ordering;

/// Search `corpus` for `query`, keeping at most `max_results` results.
pub fn search(
    query: &str,
    corpus: &[Note],
    max_results: usize,
    context_length: usize,
) -> Vec<SearchResult> {
    search_with_options(
        query,
        corpus,
        &SearchOptions {
            max_results,
            context_length,
            ..SearchOptions::default()
        },
    )
}

/// Search `corpus` for `query` with explicit options.
pub fn search_with_options(query: &str, corpus: &[Note], options: &SearchOptions) -> Vec<SearchResult> {
    let needle = fold_query(query);
    if needle.is_empty() || options.max_results == 0 {
        return Vec::new();
    }

    let mut results: Vec<SearchResult> = corpus
        .par_iter()
        .filter_map(|note| score_note(note, &needle, options))
        .collect();

    results.sort_by(rank);
    results.truncate(options.max_results);

    tracing::debug!(query, hits = results.len(), scanned = corpus.len(), "search finished");
    results
}

fn score_note(note: &Note, needle: &[char], options: &SearchOptions) -> Option<SearchResult> {
    let text = note.content.as_str();
    let folded = FoldedText::new(text);
    let hits = folded.find_all(needle);
    let first = hits.first()?.clone();

    let contexts = hits
        .iter()
        .take(options.max_snippets)
        .map(|hit| snippet::snippet(text, &folded, hit.clone(), options.context_length))
        .collect();

    Some(SearchResult {
        path: note.path.clone(),
        score: hits.len(),
        snippet: snippet::snippet(text, &folded, first, options.context_length),
        contexts,
    })
}

fn rank(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.path.as_os_str().len().cmp(&b.path.as_os_str().len()))
        .then_with(|| a.path.as_os_str().cmp(b.path.as_os_str()))
}
