//! Host-language detection and comment descriptors
//!
//! Maps file extensions to a `Language` and each language to the
//! [`CommentSyntax`] the scanner should use. The table is data driven: one
//! descriptor per language, no per-language code paths.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::syntax::CommentSyntax;

/// Host languages with a known comment descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    Go,
    Html,
    Java,
    JavaScript,
    Php,
    PowerShell,
    Ruby,
    Shell,
}

impl Language {
    /// Every supported language, in display order.
    pub const ALL: [Language; 10] = [
        Language::C,
        Language::Cpp,
        Language::Go,
        Language::Html,
        Language::Java,
        Language::JavaScript,
        Language::Php,
        Language::PowerShell,
        Language::Ruby,
        Language::Shell,
    ];

    /// Detect language from a file extension.
    ///
    /// Returns `None` if the extension has no comment descriptor.
    ///
    /// # Examples
    ///
    /// ```
    /// use rind::language::Language;
    ///
    /// assert_eq!(Language::from_extension("js"), Some(Language::JavaScript));
    /// assert_eq!(Language::from_extension("rb"), Some(Language::Ruby));
    /// assert_eq!(Language::from_extension("unknown"), None);
    /// ```
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "c" | "h" => Some(Language::C),
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Some(Language::Cpp),
            "go" => Some(Language::Go),
            "html" | "htm" | "xml" => Some(Language::Html),
            "java" => Some(Language::Java),
            "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
            "php" => Some(Language::Php),
            "ps1" => Some(Language::PowerShell),
            "rb" => Some(Language::Ruby),
            "sh" | "bash" | "zsh" => Some(Language::Shell),
            _ => None,
        }
    }

    /// Detect language from a file path.
    ///
    /// Extracts the extension and calls `from_extension()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use rind::language::Language;
    ///
    /// assert_eq!(Language::from_path(Path::new("app.js")), Some(Language::JavaScript));
    /// assert_eq!(Language::from_path(Path::new("Makefile")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Look up a language by name or extension alias, for CLI overrides.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "c" => Some(Language::C),
            "cpp" | "c++" => Some(Language::Cpp),
            "go" => Some(Language::Go),
            "html" | "xml" => Some(Language::Html),
            "java" => Some(Language::Java),
            "javascript" | "js" => Some(Language::JavaScript),
            "php" => Some(Language::Php),
            "powershell" | "ps1" => Some(Language::PowerShell),
            "ruby" | "rb" => Some(Language::Ruby),
            "shell" | "sh" | "bash" => Some(Language::Shell),
            _ => None,
        }
    }

    /// The comment descriptor for this language.
    ///
    /// C-family sources scan only `/* */` blocks; a `//` run next to code is
    /// never treated as a region in those languages. Hash-comment languages
    /// scan `#` runs and keep runs together across blank source lines.
    pub fn syntax(&self) -> CommentSyntax {
        match self {
            Language::C
            | Language::Cpp
            | Language::Go
            | Language::Java
            | Language::JavaScript
            | Language::Php => CommentSyntax::block("/*", "*/"),
            Language::Html => CommentSyntax::block("<!--", "-->"),
            Language::PowerShell | Language::Ruby | Language::Shell => {
                CommentSyntax::line("#").merge_consecutive(true)
            }
        }
    }

    /// Returns the human-readable name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Go => "Go",
            Language::Html => "HTML",
            Language::Java => "Java",
            Language::JavaScript => "JavaScript",
            Language::Php => "PHP",
            Language::PowerShell => "PowerShell",
            Language::Ruby => "Ruby",
            Language::Shell => "Shell",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension_basic() {
        assert_eq!(Language::from_extension("c"), Some(Language::C));
        assert_eq!(Language::from_extension("go"), Some(Language::Go));
        assert_eq!(Language::from_extension("js"), Some(Language::JavaScript));
        assert_eq!(Language::from_extension("php"), Some(Language::Php));
        assert_eq!(Language::from_extension("rb"), Some(Language::Ruby));
    }

    #[test]
    fn test_from_extension_case_insensitive() {
        assert_eq!(Language::from_extension("JS"), Some(Language::JavaScript));
        assert_eq!(Language::from_extension("Rb"), Some(Language::Ruby));
        assert_eq!(Language::from_extension("PS1"), Some(Language::PowerShell));
    }

    #[test]
    fn test_from_extension_variants() {
        assert_eq!(Language::from_extension("jsx"), Some(Language::JavaScript));
        assert_eq!(Language::from_extension("mjs"), Some(Language::JavaScript));
        assert_eq!(Language::from_extension("cjs"), Some(Language::JavaScript));

        assert_eq!(Language::from_extension("cpp"), Some(Language::Cpp));
        assert_eq!(Language::from_extension("cxx"), Some(Language::Cpp));
        assert_eq!(Language::from_extension("hpp"), Some(Language::Cpp));

        assert_eq!(Language::from_extension("bash"), Some(Language::Shell));
        assert_eq!(Language::from_extension("zsh"), Some(Language::Shell));

        assert_eq!(Language::from_extension("htm"), Some(Language::Html));
        assert_eq!(Language::from_extension("xml"), Some(Language::Html));
    }

    #[test]
    fn test_from_extension_unknown() {
        assert_eq!(Language::from_extension("txt"), None);
        assert_eq!(Language::from_extension("rs"), None);
        assert_eq!(Language::from_extension("md"), None);
        assert_eq!(Language::from_extension(""), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            Language::from_path(Path::new("src/app.js")),
            Some(Language::JavaScript)
        );
        assert_eq!(
            Language::from_path(Path::new("deploy.sh")),
            Some(Language::Shell)
        );
        assert_eq!(Language::from_path(Path::new("README.md")), None);
        assert_eq!(Language::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_from_name_aliases() {
        assert_eq!(Language::from_name("javascript"), Some(Language::JavaScript));
        assert_eq!(Language::from_name("js"), Some(Language::JavaScript));
        assert_eq!(Language::from_name("C++"), Some(Language::Cpp));
        assert_eq!(Language::from_name("Ruby"), Some(Language::Ruby));
        assert_eq!(Language::from_name("klingon"), None);
    }

    #[test]
    fn test_c_family_scans_blocks_only() {
        for language in [
            Language::C,
            Language::Cpp,
            Language::Go,
            Language::Java,
            Language::JavaScript,
            Language::Php,
        ] {
            let syntax = language.syntax();
            assert_eq!(syntax.line_marker, None, "{} must not scan line runs", language);
            assert_eq!(syntax.block_open.as_deref(), Some("/*"));
            assert_eq!(syntax.block_close.as_deref(), Some("*/"));
        }
    }

    #[test]
    fn test_hash_family_merges_across_blanks() {
        for language in [Language::PowerShell, Language::Ruby, Language::Shell] {
            let syntax = language.syntax();
            assert_eq!(syntax.line_marker.as_deref(), Some("#"));
            assert!(syntax.merge_consecutive_lines);
            assert_eq!(syntax.block_open, None);
        }
    }

    #[test]
    fn test_html_descriptor() {
        let syntax = Language::Html.syntax();
        assert_eq!(syntax.block_open.as_deref(), Some("<!--"));
        assert_eq!(syntax.block_close.as_deref(), Some("-->"));
    }

    #[test]
    fn test_every_descriptor_validates() {
        for language in Language::ALL {
            assert!(
                language.syntax().validate().is_ok(),
                "descriptor for {} must be usable",
                language
            );
        }
    }

    #[test]
    fn test_name() {
        assert_eq!(Language::JavaScript.name(), "JavaScript");
        assert_eq!(Language::Cpp.name(), "C++");
        assert_eq!(Language::Php.name(), "PHP");
        assert_eq!(Language::PowerShell.name(), "PowerShell");
    }
}
