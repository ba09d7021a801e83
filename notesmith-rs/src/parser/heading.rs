//! Heading parsing and the section tree.

use crate::parser::code_block::FenceTracker;
use crate::types::source_lines;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

// ATX-style heading: # Heading, ## Heading, etc.
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6})[ \t]+(.+?)(?:[ \t]+\^[a-zA-Z0-9_-]+)?[ \t]*$").unwrap()
});

// Optional closing sequence: "## Title ##"
static CLOSING_HASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+#+$").unwrap());

/// A heading and the byte layout of its section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingNode {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text without markers.
    pub text: String,
    /// Line number of the heading (1-indexed).
    pub line: usize,
    /// Byte range of the heading line, including its terminator.
    pub heading_range: Range<usize>,
    /// Section body: from the end of the heading line to the next heading at
    /// the same or a higher level (or end of document). Includes subsections.
    pub body: Range<usize>,
    /// End of the section's own content: the start of the next heading of any
    /// level (or end of document).
    pub own_end: usize,
    /// Index of the parent node in the tree.
    pub parent: Option<usize>,
    /// Indices of direct children, in document order.
    pub children: Vec<usize>,
}

impl HeadingNode {
    /// Byte range of the content that belongs to this heading alone.
    pub fn own_content(&self) -> Range<usize> {
        self.body.start..self.own_end
    }
}

/// Arena of heading nodes in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingTree {
    nodes: Vec<HeadingNode>,
    roots: Vec<usize>,
}

impl HeadingTree {
    /// All nodes in document order.
    pub fn nodes(&self) -> &[HeadingNode] {
        &self.nodes
    }

    /// Indices of top-level headings.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn get(&self, index: usize) -> Option<&HeadingNode> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve a heading path to the first node, in document order, whose
    /// ancestry matches every segment.
    ///
    /// Segment 0 is matched against root headings, segment 1 against direct
    /// children of that match, and so on. Text is compared after trimming
    /// and NFC normalization.
    pub fn resolve(&self, segments: &[String]) -> Option<usize> {
        let matches = self.resolve_all(segments);
        if matches.len() > 1 {
            tracing::debug!(
                path = %segments.join("::"),
                candidates = matches.len(),
                "ambiguous heading path, using first match"
            );
        }
        matches.first().copied()
    }

    /// Every node matching the heading path, in document order.
    pub fn resolve_all(&self, segments: &[String]) -> Vec<usize> {
        let wanted: Vec<String> = segments.iter().map(|s| normalize(s)).collect();
        let mut found = Vec::new();
        if !wanted.is_empty() {
            self.collect_matches(&self.roots, &wanted, &mut found);
        }
        found.sort_unstable();
        found
    }

    fn collect_matches(&self, candidates: &[usize], wanted: &[String], found: &mut Vec<usize>) {
        let Some((first, rest)) = wanted.split_first() else {
            return;
        };
        for &idx in candidates {
            let node = &self.nodes[idx];
            if normalize(&node.text) != *first {
                continue;
            }
            if rest.is_empty() {
                found.push(idx);
            } else {
                self.collect_matches(&node.children, rest, found);
            }
        }
    }

    /// Heading texts from the root down to `index`.
    pub fn path_of(&self, index: usize) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Some(index);
        while let Some(idx) = current {
            let node = &self.nodes[idx];
            path.push(node.text.clone());
            current = node.parent;
        }
        path.reverse();
        path
    }
}

fn normalize(text: &str) -> String {
    text.trim().nfc().collect()
}

/// Parse the headings of a document body into a section tree.
///
/// `body_start` is the byte offset where the body begins (after any
/// frontmatter); offsets in the returned nodes refer to the full `content`.
pub fn parse_headings(content: &str, body_start: usize) -> HeadingTree {
    let mut fences = FenceTracker::new();
    let mut nodes: Vec<HeadingNode> = Vec::new();

    for line in source_lines(content) {
        if line.start < body_start {
            continue;
        }
        if fences.observe(line.text) {
            continue;
        }
        if let Some(cap) = HEADING.captures(line.text) {
            let level = cap[1].len() as u8;
            let raw_text = cap[2].trim();
            let text = CLOSING_HASHES.replace(raw_text, "").trim().to_string();

            nodes.push(HeadingNode {
                level,
                text,
                line: line.number,
                heading_range: line.start..line.end,
                body: line.end..content.len(),
                own_end: content.len(),
                parent: None,
                children: Vec::new(),
            });
        }
    }

    build_heading_tree(nodes)
}

/// Link flat headings into a tree and compute section extents.
fn build_heading_tree(mut nodes: Vec<HeadingNode>) -> HeadingTree {
    let mut roots = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for idx in 0..nodes.len() {
        if let Some(next) = nodes.get(idx + 1).map(|n| n.heading_range.start) {
            nodes[idx].own_end = next;
        }

        let level = nodes[idx].level;
        let start = nodes[idx].heading_range.start;

        // Pop stack until we find a parent with a lower level; every popped
        // section ends where this heading starts.
        while let Some(&top) = stack.last() {
            if nodes[top].level >= level {
                nodes[top].body.end = start;
                stack.pop();
            } else {
                break;
            }
        }

        match stack.last() {
            Some(&parent) => {
                nodes[idx].parent = Some(parent);
                nodes[parent].children.push(idx);
            }
            None => roots.push(idx),
        }
        stack.push(idx);
    }

    HeadingTree { nodes, roots }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(content: &str) -> HeadingTree {
        parse_headings(content, 0)
    }

    #[test]
    fn test_simple_heading() {
        let content = "# Heading 1\n\nSome text\n\n## Heading 2";
        let t = tree(content);
        assert_eq!(t.len(), 2);
        assert_eq!(t.nodes()[0].text, "Heading 1");
        assert_eq!(t.nodes()[0].level, 1);
        assert_eq!(t.nodes()[0].line, 1);
        assert_eq!(t.nodes()[1].text, "Heading 2");
        assert_eq!(t.nodes()[1].level, 2);
        assert_eq!(t.nodes()[1].line, 5);
    }

    #[test]
    fn test_heading_with_block_id() {
        let t = tree("# Heading ^block-id");
        assert_eq!(t.len(), 1);
        assert_eq!(t.nodes()[0].text, "Heading");
    }

    #[test]
    fn test_closing_hashes_stripped() {
        let t = tree("## Title ##\n");
        assert_eq!(t.nodes()[0].text, "Title");
    }

    #[test]
    fn test_heading_in_code_block_skipped() {
        let t = tree("# Real Heading\n\n```\n# Not a heading\n```");
        assert_eq!(t.len(), 1);
        assert_eq!(t.nodes()[0].text, "Real Heading");
    }

    #[test]
    fn test_heading_not_at_line_start() {
        let t = tree("text # not a heading\n# Real heading\n#hashtag");
        assert_eq!(t.len(), 1);
        assert_eq!(t.nodes()[0].text, "Real heading");
    }

    #[test]
    fn test_headings_before_body_start_ignored() {
        let content = "---\n# comment: x\n---\n# Title\n";
        let t = parse_headings(content, 21);
        assert_eq!(t.len(), 1);
        assert_eq!(t.nodes()[0].text, "Title");
    }

    #[test]
    fn test_tree_shape() {
        let content = "# Top\n## A\n### Sub\n## B\n# Other\n";
        let t = tree(content);
        assert_eq!(t.roots(), &[0, 4]);
        assert_eq!(t.nodes()[0].children, vec![1, 3]);
        assert_eq!(t.nodes()[1].children, vec![2]);
        assert_eq!(t.nodes()[2].parent, Some(1));
        assert_eq!(t.path_of(2), vec!["Top", "A", "Sub"]);
    }

    #[test]
    fn test_section_ranges() {
        let content = "# A\nfoo\n## B\nbar\n# C\n";
        let t = tree(content);
        let a = &t.nodes()[0];
        assert_eq!(&content[a.body.clone()], "foo\n## B\nbar\n");
        assert_eq!(&content[a.own_content()], "foo\n");
        let b = &t.nodes()[1];
        assert_eq!(&content[b.body.clone()], "bar\n");
        let c = &t.nodes()[2];
        assert_eq!(c.body, content.len()..content.len());
    }

    #[test]
    fn test_own_ranges_partition_body() {
        let content = "intro\n# A\nfoo\n## B\nbar\n### C\n# D\nend";
        let t = tree(content);
        let mut cursor = t.nodes()[0].heading_range.start;
        assert_eq!(&content[..cursor], "intro\n");
        for node in t.nodes() {
            assert_eq!(node.heading_range.start, cursor);
            assert_eq!(node.heading_range.end, node.body.start);
            cursor = node.own_end;
        }
        assert_eq!(cursor, content.len());
    }

    #[test]
    fn test_resolve_nested_path() {
        let t = tree("# A\n## B\n# B\n");
        let path = vec!["A".to_string(), "B".to_string()];
        assert_eq!(t.resolve(&path), Some(1));
        assert_eq!(t.resolve(&["B".to_string()]), Some(2));
        assert_eq!(t.resolve(&["A".to_string(), "C".to_string()]), None);
    }

    #[test]
    fn test_resolve_skips_root_without_child() {
        // The first "A" has no "B" child; the second one does.
        let t = tree("# A\n## X\n# A\n## B\n");
        let path = vec!["A".to_string(), "B".to_string()];
        assert_eq!(t.resolve(&path), Some(3));
    }

    #[test]
    fn test_resolve_duplicate_siblings_first_wins() {
        let t = tree("# A\n## Log\none\n## Log\ntwo\n");
        let path = vec!["A".to_string(), "Log".to_string()];
        assert_eq!(t.resolve_all(&path), vec![1, 2]);
        assert_eq!(t.resolve(&path), Some(1));
    }

    #[test]
    fn test_resolve_is_normalization_insensitive() {
        // "é" precomposed vs. "e" + combining acute.
        let t = tree("# Caf\u{e9}\n");
        assert_eq!(t.resolve(&["Cafe\u{301}".to_string()]), Some(0));
    }

    #[test]
    fn test_all_heading_levels() {
        let t = tree("# H1\n## H2\n### H3\n#### H4\n##### H5\n###### H6\n####### H7");
        assert_eq!(t.len(), 6);
        for (i, h) in t.nodes().iter().enumerate() {
            assert_eq!(h.level, (i + 1) as u8);
        }
    }
}
