//! JSON output formatting

use std::io;

use crate::scan::FileReport;

/// Print file reports as pretty-printed JSON to stdout.
///
/// Every report is included, even ones with no regions, so callers can
/// tell "scanned and found nothing" apart from "never scanned".
pub fn print_json(reports: &[FileReport]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(reports)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}
