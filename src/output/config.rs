//! Output configuration types

/// Configuration for the text listing.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    /// List region spans only, without the raw comment lines.
    pub quiet: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            quiet: false,
        }
    }
}
