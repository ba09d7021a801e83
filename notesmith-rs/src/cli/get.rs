//! Get command implementation.

use crate::cli::args::GetArgs;
use crate::cli::output::Output;
use crate::error::Result;
use crate::frontmatter::Frontmatter;
use crate::note::Note;
use crate::parser::HeadingTree;
use crate::types::{BlockAnchor, FileStat};
use crate::vault::Vault;
use serde::Serialize;

/// Marker appended to truncated content.
pub const TRUNCATION_MARKER: &str = "\n...[truncated]";

#[derive(Debug, Serialize)]
pub struct NoteResponse<'a> {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<&'a Frontmatter>,
    pub headings: Vec<NestedHeading>,
    pub blocks: &'a [BlockAnchor],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat: Option<&'a FileStat>,
}

/// A heading in nested format.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NestedHeading {
    pub text: String,
    pub level: u8,
    pub line: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NestedHeading>,
}

pub fn run(vault: &Vault, args: &GetArgs, output: &Output) -> Result<()> {
    let path = vault.normalize_note_path(&args.path)?;
    let note = vault.load_note(&path)?;
    output.print(&note_response(&note, args))
}

fn note_response<'a>(note: &'a Note, args: &GetArgs) -> NoteResponse<'a> {
    let (content, truncated) = if args.metadata_only {
        (None, false)
    } else {
        match args.max_chars {
            Some(limit) => {
                let (text, truncated) = truncate_chars(&note.content, limit);
                (Some(text), truncated)
            }
            None => (Some(note.content.clone()), false),
        }
    };

    NoteResponse {
        path: note.path.to_string_lossy().to_string(),
        content,
        truncated,
        frontmatter: note.frontmatter(),
        headings: nested_headings(&note.document.headings),
        blocks: note.blocks(),
        stat: note.stat.as_ref(),
    }
}

/// Keep at most `limit` characters, marking the cut.
pub fn truncate_chars(text: &str, limit: usize) -> (String, bool) {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => (format!("{}{}", &text[..cut], TRUNCATION_MARKER), true),
        None => (text.to_string(), false),
    }
}

/// Convert the heading arena into nested output.
pub fn nested_headings(tree: &HeadingTree) -> Vec<NestedHeading> {
    fn build(tree: &HeadingTree, index: usize) -> NestedHeading {
        let node = &tree.nodes()[index];
        NestedHeading {
            text: node.text.clone(),
            level: node.level,
            line: node.line,
            children: node.children.iter().map(|&c| build(tree, c)).collect(),
        }
    }

    tree.roots().iter().map(|&r| build(tree, r)).collect()
}
