//! Shared types for notesmith.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A `^block-id` marker attached to the end of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockAnchor {
    /// The block ID (without the ^ prefix).
    pub id: String,

    /// Line number of the anchoring line (1-indexed).
    pub line: usize,

    /// Byte range of the anchoring line, including its line terminator.
    #[serde(skip)]
    pub range: Range<usize>,
}

impl BlockAnchor {
    /// Byte offset where the anchoring line starts.
    pub fn offset(&self) -> usize {
        self.range.start
    }
}

/// File metadata reported by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    /// Size in bytes.
    pub size: u64,

    /// Creation time, when the filesystem records one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last modification time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

/// One line of a document together with its byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// Line number (1-indexed).
    pub number: usize,
    /// Line text without the line terminator.
    pub text: &'a str,
    /// Byte offset of the first character of the line.
    pub start: usize,
    /// Byte offset just past the line terminator (or end of input).
    pub end: usize,
}

impl SourceLine<'_> {
    /// Whether the line is followed by a newline character.
    pub fn has_terminator(&self) -> bool {
        self.end > self.start + self.text.len()
    }
}

/// Iterate over the lines of `content`, keeping byte offsets.
///
/// Accepts `\n` and `\r\n` terminators; the `\r` is excluded from `text`.
pub fn source_lines(content: &str) -> impl Iterator<Item = SourceLine<'_>> {
    let mut start = 0;
    content
        .split_inclusive('\n')
        .enumerate()
        .map(move |(idx, raw)| {
            let line_start = start;
            start += raw.len();
            let text = raw.strip_suffix('\n').unwrap_or(raw);
            let text = text.strip_suffix('\r').unwrap_or(text);
            SourceLine {
                number: idx + 1,
                text,
                start: line_start,
                end: line_start + raw.len(),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_lines_offsets() {
        let lines: Vec<_> = source_lines("a\r\nbc\nd").collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "a");
        assert_eq!((lines[0].start, lines[0].end), (0, 3));
        assert_eq!(lines[1].text, "bc");
        assert_eq!((lines[1].start, lines[1].end), (3, 6));
        assert_eq!(lines[2].text, "d");
        assert!(!lines[2].has_terminator());
        assert!(lines[1].has_terminator());
    }

    #[test]
    fn test_source_lines_empty() {
        assert_eq!(source_lines("").count(), 0);
    }
}
