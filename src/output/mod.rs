//! Rendering scanned comment regions
//!
//! Formatters for the two output modes:
//! - `text` - colored console listing, one entry per region
//! - `json` - machine-readable report array
//!
//! Both render the same `FileReport` values. The listing omits files
//! with no regions; JSON keeps every report.

mod config;
mod json;
mod text;

pub use config::OutputConfig;
pub use json::print_json;
pub use text::TextFormatter;
