//! Note representation.

use crate::error::Result;
use crate::frontmatter::Frontmatter;
use crate::parser::{Document, parse_document};
use crate::patch::{self, PatchOperation, PatchTarget};
use crate::types::{BlockAnchor, FileStat};
use std::path::{Path, PathBuf};

/// A note: its path, raw text and the structure parsed from that text.
#[derive(Debug, Clone)]
pub struct Note {
    /// Path relative to vault root (e.g., "proj/My Project.md").
    pub path: PathBuf,

    /// Raw content of the note.
    pub content: String,

    /// Structure parsed from `content`.
    pub document: Document,

    /// File metadata, when the note was read from storage.
    pub stat: Option<FileStat>,
}

impl Note {
    /// Parse a note from its path and raw text.
    pub fn parse(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        let document = parse_document(&content);
        Self {
            path: path.into(),
            content,
            document,
            stat: None,
        }
    }

    /// Attach storage metadata.
    pub fn with_stat(mut self, stat: FileStat) -> Self {
        self.stat = Some(stat);
        self
    }

    /// Get the note name (filename without .md extension).
    pub fn name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    /// Get the parent folder path.
    pub fn folder(&self) -> Option<&Path> {
        self.path.parent()
    }

    pub fn frontmatter(&self) -> Option<&Frontmatter> {
        self.document.frontmatter.as_ref()
    }

    /// Get content without frontmatter.
    pub fn body(&self) -> &str {
        &self.content[self.document.body_start..]
    }

    pub fn blocks(&self) -> &[BlockAnchor] {
        &self.document.blocks
    }

    /// A new note with `operation` applied at `target`.
    pub fn patched(
        &self,
        target: &PatchTarget,
        operation: PatchOperation,
        payload: &str,
    ) -> Result<Self> {
        let content = patch::patch(&self.content, target, operation, payload)?;
        Ok(Self::parse(self.path.clone(), content))
    }
}
