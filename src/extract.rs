//! Comment-region extraction
//!
//! The core scanner: hand it source text and a [`CommentSyntax`] and it
//! returns every comment region in source order. The scan is a single
//! line-oriented pass with no backtracking and no host-language lexing
//! beyond the markers themselves, so a marker inside a string literal is
//! still treated as a marker. That trade keeps the scanner language-agnostic
//! and linear in input size.

use crate::region::{CommentRegion, RegionKind};
use crate::syntax::{CommentSyntax, ConfigError};

/// Extract every comment region from `source` under the given syntax.
///
/// Regions come back in source order, never overlapping, with 1-based
/// inclusive line spans. A block comment that never closes is still
/// returned, flagged [`unterminated`](CommentRegion::unterminated); only an
/// unusable descriptor aborts extraction.
///
/// # Examples
///
/// ```
/// use rind::extract::extract;
/// use rind::syntax::CommentSyntax;
///
/// let source = "# Setup:\n#\n#   >> require 'json'\n";
/// let syntax = CommentSyntax::line("#").merge_consecutive(true);
/// let regions = extract(source, &syntax).unwrap();
/// assert_eq!(regions.len(), 1);
/// assert_eq!(regions[0].raw_lines, vec!["Setup:", "", "  >> require 'json'"]);
/// ```
pub fn extract(source: &str, syntax: &CommentSyntax) -> Result<Vec<CommentRegion>, ConfigError> {
    syntax.validate()?;

    let block_pair = syntax.block_pair();
    let mut regions = Vec::new();
    let mut run: Option<LineRun> = None;
    let mut block: Option<BlockRun<'_>> = None;

    for (index, line) in source.lines().enumerate() {
        let number = index + 1;

        // Inside a block everything is comment text until the close marker
        // shows up; another open marker in here is plain text.
        if let Some(mut open_block) = block.take() {
            match line.find(open_block.close) {
                Some(at) => {
                    open_block
                        .raw
                        .push(strip_block_line(&line[..at], open_block.decoration));
                    regions.push(open_block.into_region(number));
                }
                None => {
                    open_block
                        .raw
                        .push(strip_block_line(line, open_block.decoration));
                    block = Some(open_block);
                }
            }
            continue;
        }

        let trimmed = line.trim_start();

        // A block open only counts at the head of a line; after code it is
        // host-language text.
        if let Some((open, close)) = block_pair {
            if trimmed.starts_with(open) {
                if let Some(finished) = run.take() {
                    regions.push(finished.into_region());
                }
                let decoration = open.chars().last();
                let after = &trimmed[open.len()..];
                match after.find(close) {
                    Some(at) => regions.push(CommentRegion {
                        kind: RegionKind::Block,
                        start_line: number,
                        end_line: number,
                        raw_lines: vec![strip_block_line(&after[..at], decoration)],
                        unterminated: false,
                    }),
                    None => {
                        block = Some(BlockRun {
                            start: number,
                            close,
                            decoration,
                            raw: vec![strip_block_line(after, decoration)],
                        });
                    }
                }
                continue;
            }
        }

        if let Some(marker) = syntax.line_marker.as_deref() {
            if trimmed.starts_with(marker) {
                let stripped = strip_line_comment(trimmed, marker);
                match run.as_mut() {
                    Some(current) => current.push(number, stripped),
                    None => run = Some(LineRun::begin(number, stripped)),
                }
                continue;
            }
        }

        if trimmed.is_empty() {
            // A blank source line bridges the run under merge and ends it
            // otherwise. Bridged blanks only join the region if another
            // comment line follows.
            if syntax.merge_consecutive_lines {
                if let Some(current) = run.as_mut() {
                    current.pending_blanks += 1;
                }
            } else if let Some(finished) = run.take() {
                regions.push(finished.into_region());
            }
            continue;
        }

        // Anything else is code and ends a line-comment run.
        if let Some(finished) = run.take() {
            regions.push(finished.into_region());
        }
    }

    if let Some(finished) = run.take() {
        regions.push(finished.into_region());
    }
    if let Some(open_block) = block.take() {
        regions.push(open_block.into_unterminated());
    }

    Ok(regions)
}

/// An in-progress run of line comments.
struct LineRun {
    start: usize,
    end: usize,
    raw: Vec<String>,
    /// Blank source lines seen since the last comment line. They become
    /// empty raw lines if the run continues and are dropped if it ends.
    pending_blanks: usize,
}

impl LineRun {
    fn begin(number: usize, stripped: String) -> Self {
        Self {
            start: number,
            end: number,
            raw: vec![stripped],
            pending_blanks: 0,
        }
    }

    fn push(&mut self, number: usize, stripped: String) {
        for _ in 0..self.pending_blanks {
            self.raw.push(String::new());
        }
        self.pending_blanks = 0;
        self.raw.push(stripped);
        self.end = number;
    }

    fn into_region(self) -> CommentRegion {
        CommentRegion {
            kind: RegionKind::Line,
            start_line: self.start,
            end_line: self.end,
            raw_lines: self.raw,
            unterminated: false,
        }
    }
}

/// An open block comment still waiting for its close marker.
struct BlockRun<'a> {
    start: usize,
    close: &'a str,
    decoration: Option<char>,
    raw: Vec<String>,
}

impl BlockRun<'_> {
    fn into_region(self, end: usize) -> CommentRegion {
        CommentRegion {
            kind: RegionKind::Block,
            start_line: self.start,
            end_line: end,
            raw_lines: self.raw,
            unterminated: false,
        }
    }

    fn into_unterminated(self) -> CommentRegion {
        let end = self.start + self.raw.len() - 1;
        CommentRegion {
            kind: RegionKind::Block,
            start_line: self.start,
            end_line: end,
            raw_lines: self.raw,
            unterminated: true,
        }
    }
}

/// Strip the marker and one layer of decoration from a line comment.
///
/// `trimmed` must already start with `marker`. A repeated run of the
/// marker's final character is decoration (`#####`, `//// section`), so it
/// collapses together with the marker; at most one following space goes with
/// it. Everything past that is significant, indentation included.
fn strip_line_comment(trimmed: &str, marker: &str) -> String {
    let after = trimmed.strip_prefix(marker).unwrap_or(trimmed);
    let after = match marker.chars().last() {
        Some(decoration) => after.trim_start_matches(decoration),
        None => after,
    };
    let after = after.strip_prefix(' ').unwrap_or(after);
    after.to_string()
}

/// Strip one layer of gutter decoration from a block-comment line.
///
/// Lines inside `/* */` blocks are conventionally aligned with a gutter of
/// the open marker's final character (` * like this`); the gutter and at
/// most one following space come off. Lines without a gutter lose at most
/// one leading space, so deeper indentation survives.
fn strip_block_line(segment: &str, decoration: Option<char>) -> String {
    if let Some(gutter) = decoration {
        let trimmed = segment.trim_start();
        if trimmed.starts_with(gutter) {
            let after = trimmed.trim_start_matches(gutter);
            let after = after.strip_prefix(' ').unwrap_or(after);
            return after.to_string();
        }
    }
    let after = segment.strip_prefix(' ').unwrap_or(segment);
    after.to_string()
}
