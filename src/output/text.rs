//! Text listing of extracted regions
//!
//! One header per file, one span entry per region, and the region's raw
//! lines beneath it unless quiet mode is on. Files without regions are
//! omitted from the listing; a count line closes it out.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::region::CommentRegion;
use crate::scan::FileReport;

use super::config::OutputConfig;

/// Formatter for the human-readable region listing.
pub struct TextFormatter {
    config: OutputConfig,
}

impl TextFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render the listing to a plain string, without colors.
    pub fn format(&self, reports: &[FileReport]) -> String {
        let mut output = String::new();
        let mut files = 0usize;
        let mut regions = 0usize;

        for report in reports {
            if report.regions.is_empty() {
                continue;
            }
            files += 1;
            regions += report.regions.len();

            output.push_str(&format!(
                "{}  [{}]\n",
                report.path.display(),
                report.language
            ));
            for region in &report.regions {
                output.push_str(&format!("  {}  {}\n", span(region), describe(region)));
                if !self.config.quiet {
                    for raw in &region.raw_lines {
                        output.push_str(&format!("      | {}\n", raw));
                    }
                }
            }
            output.push('\n');
        }

        output.push_str(&format!("{} files, {} regions\n", files, regions));
        output
    }

    /// Print the listing to stdout, with colors when configured.
    pub fn print(&self, reports: &[FileReport]) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        let mut files = 0usize;
        let mut regions = 0usize;

        for report in reports {
            if report.regions.is_empty() {
                continue;
            }
            files += 1;
            regions += report.regions.len();

            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
            write!(stdout, "{}", report.path.display())?;
            stdout.reset()?;
            writeln!(stdout, "  [{}]", report.language)?;

            for region in &report.regions {
                write!(stdout, "  ")?;
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(stdout, "{}", span(region))?;
                stdout.reset()?;
                write!(
                    stdout,
                    "  {} ({} lines)",
                    region.kind.label(),
                    region.line_count()
                )?;
                if region.unterminated {
                    write!(stdout, " ")?;
                    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
                    write!(stdout, "[unterminated]")?;
                    stdout.reset()?;
                }
                writeln!(stdout)?;

                if !self.config.quiet {
                    for raw in &region.raw_lines {
                        stdout.set_color(ColorSpec::new().set_dimmed(true))?;
                        write!(stdout, "      |")?;
                        stdout.reset()?;
                        writeln!(stdout, " {}", raw)?;
                    }
                }
            }
            writeln!(stdout)?;
        }

        writeln!(stdout, "{} files, {} regions", files, regions)?;
        Ok(())
    }
}

/// Span label for a region, `12` for one line or `3-7` for a range.
fn span(region: &CommentRegion) -> String {
    if region.start_line == region.end_line {
        region.start_line.to_string()
    } else {
        format!("{}-{}", region.start_line, region.end_line)
    }
}

/// Kind, line count, and the unterminated tag when set.
fn describe(region: &CommentRegion) -> String {
    let mut text = format!("{} ({} lines)", region.kind.label(), region.line_count());
    if region.unterminated {
        text.push_str(" [unterminated]");
    }
    text
}
