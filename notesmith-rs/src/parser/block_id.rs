//! Block anchor parsing (^block-id).

use crate::parser::code_block::FenceTracker;
use crate::types::{BlockAnchor, source_lines};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// Block ID pattern: ^id at the end of a line, either after whitespace or
// alone on the line. IDs can contain letters, numbers, underscores, and hyphens.
static BLOCK_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)\^([a-zA-Z0-9_-]+)\s*$").unwrap()
});

/// Parse all block anchors from the body of a document.
///
/// Only the first occurrence of an id is kept.
pub fn parse_block_ids(content: &str, body_start: usize) -> Vec<BlockAnchor> {
    let mut fences = FenceTracker::new();
    let mut seen = HashSet::new();
    let mut anchors = Vec::new();

    for line in source_lines(content) {
        if line.start < body_start {
            continue;
        }
        if fences.observe(line.text) {
            continue;
        }

        if let Some(cap) = BLOCK_ID.captures(line.text) {
            let id = cap[1].to_string();
            if !seen.insert(id.clone()) {
                tracing::debug!(id = %id, line = line.number, "duplicate block id ignored");
                continue;
            }
            anchors.push(BlockAnchor {
                id,
                line: line.number,
                range: line.start..line.end,
            });
        }
    }

    anchors
}

/// Find a block by its ID.
pub fn find_block_by_id<'a>(anchors: &'a [BlockAnchor], block_id: &str) -> Option<&'a BlockAnchor> {
    let block_id = block_id.strip_prefix('^').unwrap_or(block_id);
    anchors.iter().find(|a| a.id == block_id)
}

/// Byte range of the `^id` marker (with its leading whitespace) inside `line`.
pub fn marker_range(line: &str) -> Option<std::ops::Range<usize>> {
    BLOCK_ID.find(line).map(|m| m.range())
}
