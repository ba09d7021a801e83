//! Frontmatter fence detection.
//!
//! Only locates the `---` fenced block; field-level parsing lives in
//! [`crate::frontmatter`].

use crate::types::source_lines;
use std::ops::Range;

/// Byte layout of a frontmatter block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSpan {
    /// The whole block, from the opening fence to the end of the closing fence line.
    pub range: Range<usize>,
    /// The YAML text between the fences (starts after the opening fence line,
    /// ends at the start of the closing fence line).
    pub inner: Range<usize>,
    /// Line number of the first line inside the block (1-indexed).
    pub first_line: usize,
}

/// Frontmatter extraction result.
#[derive(Debug, Clone)]
pub struct FrontmatterSplit<'a> {
    /// The fenced block, if the document has a terminated one.
    pub span: Option<FrontmatterSpan>,
    /// The raw YAML string (without delimiters).
    pub yaml: Option<&'a str>,
    /// The content after the frontmatter.
    pub body: &'a str,
    /// Byte offset where the body starts.
    pub body_start: usize,
    /// Line number where the body starts (1-indexed).
    pub body_start_line: usize,
    /// The document opens a fence that is never closed.
    pub unterminated: bool,
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == "---"
}

/// Split content into frontmatter and body.
///
/// A document without a closing fence has no frontmatter: the whole input is
/// body and `unterminated` is set.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let no_frontmatter = |unterminated| FrontmatterSplit {
        span: None,
        yaml: None,
        body: content,
        body_start: 0,
        body_start_line: 1,
        unterminated,
    };

    let mut lines = source_lines(content);
    let opening = match lines.next() {
        Some(line) if is_fence(line.text) && line.has_terminator() => line,
        _ => return no_frontmatter(false),
    };

    for line in lines {
        if is_fence(line.text) {
            let inner = opening.end..line.start;
            return FrontmatterSplit {
                yaml: Some(&content[inner.clone()]),
                span: Some(FrontmatterSpan {
                    range: 0..line.end,
                    inner,
                    first_line: 2,
                }),
                body: &content[line.end..],
                body_start: line.end,
                body_start_line: line.number + 1,
                unterminated: false,
            };
        }
    }

    no_frontmatter(true)
}

/// Extract frontmatter as a raw YAML string.
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    split_frontmatter(content).yaml
}
