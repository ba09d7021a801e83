//! Parsers for the structural skeleton of a markdown note.

pub mod block_id;
pub mod code_block;
pub mod frontmatter;
pub mod heading;

pub use block_id::{find_block_by_id, parse_block_ids};
pub use code_block::FenceTracker;
pub use frontmatter::{FrontmatterSpan, FrontmatterSplit, extract_frontmatter, split_frontmatter};
pub use heading::{HeadingNode, HeadingTree, parse_headings};

use crate::frontmatter::Frontmatter;
use crate::types::BlockAnchor;

/// The parsed skeleton of a document.
///
/// Offsets refer to the text the document was parsed from; a `Document` is
/// rebuilt from scratch on every read and never mutated.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// The frontmatter block, if the document has a terminated one.
    pub frontmatter: Option<Frontmatter>,
    /// The document opens a frontmatter fence that is never closed.
    pub unterminated_frontmatter: bool,
    /// Byte offset where the body starts.
    pub body_start: usize,
    /// Heading hierarchy.
    pub headings: HeadingTree,
    /// Block anchor index in document order.
    pub blocks: Vec<BlockAnchor>,
}

impl Document {
    /// Look up a block anchor by id.
    pub fn block(&self, id: &str) -> Option<&BlockAnchor> {
        find_block_by_id(&self.blocks, id)
    }
}

/// Parse raw text into frontmatter, heading tree, and block-anchor index.
pub fn parse_document(content: &str) -> Document {
    let split = split_frontmatter(content);
    let frontmatter = split
        .span
        .as_ref()
        .map(|span| Frontmatter::parse(content, span.clone()));

    Document {
        frontmatter,
        unterminated_frontmatter: split.unterminated,
        body_start: split.body_start,
        headings: parse_headings(content, split.body_start),
        blocks: parse_block_ids(content, split.body_start),
    }
}
