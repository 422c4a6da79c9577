//! Rind - peels comment regions out of source files

pub mod extract;
pub mod language;
pub mod output;
pub mod region;
pub mod scan;
pub mod syntax;

pub use extract::extract;
pub use language::Language;
pub use output::{OutputConfig, TextFormatter, print_json};
pub use region::{CommentRegion, RegionKind};
pub use scan::{FileReport, MergeMode, ScanConfig, ScanOutcome, Scanner, SkipReason, SkippedFile};
pub use syntax::{CommentSyntax, ConfigError};
