//! Extracted comment regions

use serde::Serialize;

/// Which comment grammar produced a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    /// A run of line comments (`//`, `#`).
    Line,
    /// A block comment (`/* ... */`).
    Block,
}

impl RegionKind {
    /// Short lowercase label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            RegionKind::Line => "line",
            RegionKind::Block => "block",
        }
    }
}

/// A maximal span of source classified as comment.
///
/// Line numbers are 1-based and inclusive. `raw_lines` holds one entry per
/// source line in the span, with the comment marker and one layer of leading
/// decoration stripped; any deeper indentation is preserved because indented
/// text inside a comment is significant to downstream consumers. The entry
/// count always equals the line span, so regions can be mapped back onto
/// original line numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRegion {
    pub kind: RegionKind,
    pub start_line: usize,
    pub end_line: usize,
    pub raw_lines: Vec<String>,
    /// True for a block region whose close marker never appeared before
    /// end of source.
    pub unterminated: bool,
}

impl CommentRegion {
    /// Number of source lines the region spans.
    pub fn line_count(&self) -> usize {
        self.raw_lines.len()
    }

    /// The stripped region text, joined with newlines.
    pub fn text(&self) -> String {
        self.raw_lines.join("\n")
    }

    /// True when every raw line is empty or whitespace.
    ///
    /// Decorative rules (`#####`, boxes of `*`) strip down to nothing, so a
    /// purely decorative region carries no text worth searching.
    pub fn is_decorative(&self) -> bool {
        self.raw_lines.iter().all(|line| line.trim().is_empty())
    }
}
