//! Targeted edits of a note's text.
//!
//! [`patch`] resolves a [`PatchTarget`] against a freshly parsed document and
//! splices the payload into the raw text. Bytes outside the target's range are
//! copied through untouched. On failure nothing is returned but the error, so
//! the caller's text is never half-edited.

use crate::error::{NoteError, Result};
use crate::parser::block_id::marker_range;
use crate::parser::{Document, parse_document};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Default separator between heading names in a heading path.
pub const DEFAULT_HEADING_DELIMITER: &str = "::";

/// Kind of structural element a patch addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Heading,
    Block,
    Frontmatter,
}

/// What a patch addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PatchTarget {
    /// Heading names from the top-level section down.
    Heading(Vec<String>),
    /// A `^block-id` (stored without the caret).
    Block(String),
    /// A frontmatter key.
    Frontmatter(String),
}

impl PatchTarget {
    /// Build a target from its kind and the string form used on the command line.
    pub fn parse(kind: TargetKind, raw: &str, delimiter: &str) -> Result<Self> {
        match kind {
            TargetKind::Heading => Self::heading(raw, delimiter),
            TargetKind::Block => Self::block(raw),
            TargetKind::Frontmatter => Self::frontmatter(raw),
        }
    }

    /// `"A::B"` → `Heading(["A", "B"])`.
    pub fn heading(path: &str, delimiter: &str) -> Result<Self> {
        if path.trim().is_empty() {
            return Err(NoteError::InvalidTarget("empty heading path".to_string()));
        }
        if delimiter.is_empty() {
            return Err(NoteError::InvalidTarget("empty heading delimiter".to_string()));
        }
        let segments: Vec<String> = path.split(delimiter).map(|s| s.trim().to_string()).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(NoteError::InvalidTarget(format!(
                "heading path '{}' has an empty segment",
                path
            )));
        }
        Ok(PatchTarget::Heading(segments))
    }

    pub fn block(id: &str) -> Result<Self> {
        let id = id.trim();
        let id = id.strip_prefix('^').unwrap_or(id);
        if id.is_empty() {
            return Err(NoteError::InvalidTarget("empty block id".to_string()));
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(NoteError::InvalidTarget(format!("invalid block id '{}'", id)));
        }
        Ok(PatchTarget::Block(id.to_string()))
    }

    pub fn frontmatter(key: &str) -> Result<Self> {
        let key = key.trim();
        if key.is_empty() {
            return Err(NoteError::InvalidTarget("empty frontmatter key".to_string()));
        }
        Ok(PatchTarget::Frontmatter(key.to_string()))
    }
}

impl fmt::Display for PatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchTarget::Heading(segments) => {
                write!(f, "heading '{}'", segments.join(DEFAULT_HEADING_DELIMITER))
            }
            PatchTarget::Block(id) => write!(f, "block '^{}'", id),
            PatchTarget::Frontmatter(key) => write!(f, "frontmatter field '{}'", key),
        }
    }
}

/// How the payload is combined with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PatchOperation {
    Append,
    Prepend,
    Replace,
}

impl fmt::Display for PatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatchOperation::Append => "append",
            PatchOperation::Prepend => "prepend",
            PatchOperation::Replace => "replace",
        };
        f.write_str(name)
    }
}

/// Apply `operation` with `content` at `target`, returning the new document text.
pub fn patch(
    raw: &str,
    target: &PatchTarget,
    operation: PatchOperation,
    content: &str,
) -> Result<String> {
    let doc = parse_document(raw);
    let eol = document_eol(raw);

    match target {
        PatchTarget::Heading(segments) => patch_heading(raw, &doc, segments, operation, content, eol),
        PatchTarget::Block(id) => patch_block(raw, &doc, id, operation, content, eol),
        PatchTarget::Frontmatter(key) => patch_frontmatter(raw, &doc, key, operation, content),
    }
}

/// Append `content` as the last line(s) of the whole document.
pub fn append_to_document(raw: &str, content: &str) -> String {
    let eol = document_eol(raw);
    splice_lines(raw, raw.len()..raw.len(), content, eol)
}

fn patch_heading(
    raw: &str,
    doc: &Document,
    segments: &[String],
    operation: PatchOperation,
    content: &str,
    eol: &str,
) -> Result<String> {
    let index = doc
        .headings
        .resolve(segments)
        .ok_or_else(|| NoteError::HeadingNotFound(segments.join(DEFAULT_HEADING_DELIMITER)))?;
    let node = &doc.headings.nodes()[index];
    tracing::debug!(heading = %node.text, line = node.line, %operation, "resolved heading target");

    let range = match operation {
        PatchOperation::Append => node.body.end..node.body.end,
        PatchOperation::Prepend => node.body.start..node.body.start,
        PatchOperation::Replace => node.body.clone(),
    };
    Ok(splice_lines(raw, range, content, eol))
}

fn patch_block(
    raw: &str,
    doc: &Document,
    id: &str,
    operation: PatchOperation,
    content: &str,
    eol: &str,
) -> Result<String> {
    let id = id.strip_prefix('^').unwrap_or(id);
    let anchor = doc
        .block(id)
        .ok_or_else(|| NoteError::BlockNotFound(id.to_string()))?;
    tracing::debug!(block = %anchor.id, line = anchor.line, %operation, "resolved block target");

    match operation {
        PatchOperation::Prepend => {
            let at = anchor.range.start;
            Ok(splice_lines(raw, at..at, content, eol))
        }
        PatchOperation::Append => {
            let at = anchor.range.end;
            Ok(splice_lines(raw, at..at, content, eol))
        }
        PatchOperation::Replace => {
            let line = &raw[anchor.range.clone()];
            let text = line.trim_end_matches(['\n', '\r']);
            let terminator = &line[text.len()..];

            let body = normalize_newlines(content.trim_end_matches(['\n', '\r']), eol);
            let keeps_marker = body
                .lines()
                .last()
                .and_then(|last| marker_range(last).map(|r| last[r].trim().to_string()))
                .is_some_and(|marker| marker == format!("^{}", anchor.id));

            let mut replacement = if keeps_marker || body.is_empty() {
                body
            } else {
                format!("{} ^{}", body, anchor.id)
            };
            if replacement.is_empty() {
                replacement = format!("^{}", anchor.id);
            }
            replacement.push_str(terminator);

            Ok(splice(raw, anchor.range.clone(), &replacement))
        }
    }
}

fn patch_frontmatter(
    raw: &str,
    doc: &Document,
    key: &str,
    operation: PatchOperation,
    content: &str,
) -> Result<String> {
    if doc.unterminated_frontmatter {
        return Err(NoteError::UnterminatedFrontmatterFence);
    }
    let frontmatter = doc.frontmatter.as_ref().ok_or(NoteError::FrontmatterNotFound)?;

    match operation {
        PatchOperation::Replace => frontmatter.replace_value(raw, key, content),
        PatchOperation::Append => frontmatter.append_field(raw, key, content),
        PatchOperation::Prepend => Err(NoteError::invalid_operation(
            operation,
            PatchTarget::Frontmatter(key.to_string()),
            "frontmatter fields have no order to prepend into",
        )),
    }
}

/// Replace `range` with `content` as whole lines.
///
/// The content gets a trailing line terminator when it lacks one, and a
/// preceding line that is not terminated gets one first.
fn splice_lines(raw: &str, range: Range<usize>, content: &str, eol: &str) -> String {
    let mut block = String::with_capacity(content.len() + 2);
    if !content.is_empty() {
        let before = &raw[..range.start];
        if !before.is_empty() && !before.ends_with('\n') {
            block.push_str(eol);
        }
        block.push_str(&normalize_newlines(content, eol));
        if !block.ends_with('\n') {
            block.push_str(eol);
        }
    }
    splice(raw, range, &block)
}

fn splice(raw: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(raw.len() - range.len() + replacement.len());
    out.push_str(&raw[..range.start]);
    out.push_str(replacement);
    out.push_str(&raw[range.end..]);
    out
}

fn document_eol(raw: &str) -> &'static str {
    if raw.contains("\r\n") { "\r\n" } else { "\n" }
}

fn normalize_newlines(content: &str, eol: &str) -> String {
    let unix = content.replace("\r\n", "\n");
    if eol == "\n" { unix } else { unix.replace('\n', eol) }
}
