//! Comment grammar descriptors
//!
//! A `CommentSyntax` tells the scanner how a host language spells its
//! comments: an optional line marker, an optional block open/close pair, and
//! whether consecutive line comments merge across blank source lines. At
//! least one of the two comment styles must be configured; everything else
//! about the host language is irrelevant to extraction.

use thiserror::Error;

/// Errors produced when a comment-syntax descriptor cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Neither a line marker nor a block pair is configured.
    #[error("comment syntax defines no line marker and no block markers")]
    NoMarkers,
    /// A configured marker is the empty string.
    #[error("comment markers must be non-empty")]
    EmptyMarker,
    /// Only one half of the block open/close pair is configured.
    #[error("block comment markers must be configured as an open/close pair")]
    UnpairedBlockMarker,
}

/// Immutable description of a host language's comment grammar.
///
/// Line and block styles are independently optional; a descriptor may carry
/// either or both. `merge_consecutive_lines` controls whether fully blank
/// source lines inside a run of line comments continue the run (Ruby-style
/// comment prose) or end it.
///
/// # Examples
///
/// ```
/// use rind::syntax::CommentSyntax;
///
/// let ruby = CommentSyntax::line("#").merge_consecutive(true);
/// let c = CommentSyntax::block("/*", "*/");
/// assert!(ruby.validate().is_ok());
/// assert!(c.validate().is_ok());
/// assert!(CommentSyntax::default().validate().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentSyntax {
    /// Marker that introduces a line comment, e.g. `"//"` or `"#"`.
    pub line_marker: Option<String>,
    /// Marker that opens a block comment, e.g. `"/*"`.
    pub block_open: Option<String>,
    /// Marker that closes a block comment, e.g. `"*/"`.
    pub block_close: Option<String>,
    /// Whether blank source lines inside a line-comment run continue the
    /// run instead of ending the region.
    pub merge_consecutive_lines: bool,
}

impl CommentSyntax {
    /// Descriptor with only a line marker.
    pub fn line(marker: &str) -> Self {
        Self {
            line_marker: Some(marker.to_string()),
            ..Default::default()
        }
    }

    /// Descriptor with only a block open/close pair.
    pub fn block(open: &str, close: &str) -> Self {
        Self {
            block_open: Some(open.to_string()),
            block_close: Some(close.to_string()),
            ..Default::default()
        }
    }

    /// Add a block pair to an existing descriptor.
    pub fn with_block(mut self, open: &str, close: &str) -> Self {
        self.block_open = Some(open.to_string());
        self.block_close = Some(close.to_string());
        self
    }

    /// Set whether blank source lines bridge a line-comment run.
    pub fn merge_consecutive(mut self, merge: bool) -> Self {
        self.merge_consecutive_lines = merge;
        self
    }

    /// Check that the descriptor is usable for extraction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (&self.block_open, &self.block_close) {
            (Some(open), Some(close)) => {
                if open.is_empty() || close.is_empty() {
                    return Err(ConfigError::EmptyMarker);
                }
            }
            (None, None) => {}
            _ => return Err(ConfigError::UnpairedBlockMarker),
        }
        if let Some(marker) = &self.line_marker {
            if marker.is_empty() {
                return Err(ConfigError::EmptyMarker);
            }
        }
        if self.line_marker.is_none() && self.block_open.is_none() {
            return Err(ConfigError::NoMarkers);
        }
        Ok(())
    }

    /// The block pair as a tuple, when both halves are configured.
    pub(crate) fn block_pair(&self) -> Option<(&str, &str)> {
        match (&self.block_open, &self.block_close) {
            (Some(open), Some(close)) => Some((open.as_str(), close.as_str())),
            _ => None,
        }
    }
}
