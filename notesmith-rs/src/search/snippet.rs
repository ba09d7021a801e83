//! Case-insensitive matching and character-safe snippet extraction.

use std::ops::Range;

/// Text lowercased character by character, remembering where each folded
/// character came from.
///
/// Lowercasing can expand one character into several (`İ` → `i̇`), so match
/// positions in the folded text are mapped back through `origin` before any
/// slicing of the original.
pub(crate) struct FoldedText {
    folded: Vec<char>,
    origin: Vec<usize>,
    /// Byte offset of every original character, plus the total length.
    byte_offsets: Vec<usize>,
}

impl FoldedText {
    pub(crate) fn new(text: &str) -> Self {
        let mut folded = Vec::with_capacity(text.len());
        let mut origin = Vec::with_capacity(text.len());
        let mut byte_offsets = Vec::with_capacity(text.len() + 1);

        for (idx, (offset, ch)) in text.char_indices().enumerate() {
            byte_offsets.push(offset);
            for lower in ch.to_lowercase() {
                folded.push(lower);
                origin.push(idx);
            }
        }
        byte_offsets.push(text.len());

        Self {
            folded,
            origin,
            byte_offsets,
        }
    }

    /// Number of characters in the original text.
    pub(crate) fn char_len(&self) -> usize {
        self.byte_offsets.len() - 1
    }

    /// Non-overlapping occurrences of `needle` as original character ranges.
    pub(crate) fn find_all(&self, needle: &[char]) -> Vec<Range<usize>> {
        let mut found = Vec::new();
        if needle.is_empty() || needle.len() > self.folded.len() {
            return found;
        }

        let mut pos = 0;
        while pos + needle.len() <= self.folded.len() {
            if self.folded[pos..pos + needle.len()] == *needle {
                let start = self.origin[pos];
                let end = self.origin[pos + needle.len() - 1] + 1;
                found.push(start..end);
                pos += needle.len();
            } else {
                pos += 1;
            }
        }
        found
    }

    /// Byte range for a range of original characters.
    pub(crate) fn byte_range(&self, chars: Range<usize>) -> Range<usize> {
        self.byte_offsets[chars.start]..self.byte_offsets[chars.end]
    }
}

/// Lowercase a query the same way [`FoldedText`] lowercases the haystack.
pub(crate) fn fold_query(query: &str) -> Vec<char> {
    query.chars().flat_map(char::to_lowercase).collect()
}

/// Character window of at most `width` characters centred on `hit`.
pub(crate) fn window(hit: Range<usize>, width: usize, total: usize) -> Range<usize> {
    let hit_len = hit.end - hit.start;
    if hit_len >= width {
        return hit.start..hit.start + width;
    }
    let lead = (width - hit_len) / 2;
    let start = hit.start.saturating_sub(lead);
    let end = (start + width).min(total);
    end.saturating_sub(width)..end
}

/// Render the snippet for `hit`, with line breaks shown as spaces.
pub(crate) fn snippet(text: &str, folded: &FoldedText, hit: Range<usize>, width: usize) -> String {
    let chars = window(hit, width, folded.char_len());
    text[folded.byte_range(chars)]
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}
