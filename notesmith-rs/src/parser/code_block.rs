//! Fenced code block detection for skipping structure inside code.

/// Tracks whether a line-by-line scan is currently inside a fenced code block.
///
/// A fence opens on a line starting with three or more backticks or tildes
/// (up to three spaces of indentation) and closes on a line made only of the
/// same fence character, at least as long as the opener.
#[derive(Debug, Default, Clone)]
pub struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next line. Returns `true` if the line belongs to a code block
    /// (fence lines included).
    pub fn observe(&mut self, line: &str) -> bool {
        match self.open {
            Some((fence_char, fence_len)) => {
                if let Some((c, len)) = fence_marker(line) {
                    let rest = line.trim();
                    if c == fence_char && len >= fence_len && rest.chars().all(|ch| ch == c) {
                        self.open = None;
                    }
                }
                true
            }
            None => {
                if let Some(marker) = fence_marker(line) {
                    self.open = Some(marker);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Whether a fence is currently open.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }
}

/// Return the fence character and run length if `line` starts a fence.
fn fence_marker(line: &str) -> Option<(char, usize)> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let trimmed = &line[indent..];
    let c = trimmed.chars().next()?;
    if c != '`' && c != '~' {
        return None;
    }
    let len = trimmed.chars().take_while(|&ch| ch == c).count();
    (len >= 3).then_some((c, len))
}
