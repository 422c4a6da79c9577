//! Scanning files and directories for comment regions
//!
//! Drives the extractor over real files: expands directory arguments with a
//! gitignore-aware walk, reads each candidate, looks up its language, and
//! extracts regions in parallel across files. Extraction itself is pure, so
//! the only coordination here is collecting candidates up front and putting
//! results back in path order.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::extract::extract;
use crate::language::Language;
use crate::region::CommentRegion;
use crate::syntax::{CommentSyntax, ConfigError};

/// Default cap on file size (1MB). Files over the cap are skipped so a
/// stray generated blob with a source extension cannot stall a scan.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_000_000;

/// How the per-language merge flag is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeMode {
    /// Use each language's own setting.
    #[default]
    Auto,
    /// Force blank-line bridging on.
    Always,
    /// Force blank-line bridging off.
    Never,
}

impl MergeMode {
    fn apply(&self, syntax: CommentSyntax) -> CommentSyntax {
        match self {
            MergeMode::Auto => syntax,
            MergeMode::Always => syntax.merge_consecutive(true),
            MergeMode::Never => syntax.merge_consecutive(false),
        }
    }
}

/// Configuration for a scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Treat every file as this language instead of detecting by extension.
    pub language: Option<Language>,
    /// Override for per-language blank-line merging.
    pub merge: MergeMode,
    /// Walk hidden and gitignored files too.
    pub include_all: bool,
    /// Glob patterns for files the walk should skip.
    pub ignore_patterns: Vec<String>,
    /// Files larger than this many bytes are skipped.
    pub max_file_size: u64,
    /// Worker threads for extraction (0 = rayon default).
    pub jobs: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            language: None,
            merge: MergeMode::Auto,
            include_all: false,
            ignore_patterns: Vec::new(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            jobs: 0,
        }
    }
}

/// Result of scanning one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub language: Language,
    pub regions: Vec<CommentRegion>,
}

/// A file the scan looked at but did not extract from.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Why a file was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The extension maps to no known comment descriptor.
    UnknownExtension,
    /// The file exceeds the configured size cap.
    TooLarge { size: u64, limit: u64 },
    /// The contents are not valid UTF-8.
    NotUtf8,
    /// Reading the file failed.
    Unreadable(String),
    /// The descriptor for the file's language did not validate.
    BadSyntax(ConfigError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownExtension => {
                write!(f, "no comment syntax known for this extension")
            }
            SkipReason::TooLarge { size, limit } => {
                write!(f, "file is {} bytes, over the {} byte limit", size, limit)
            }
            SkipReason::NotUtf8 => write!(f, "contents are not valid UTF-8"),
            SkipReason::Unreadable(err) => write!(f, "{}", err),
            SkipReason::BadSyntax(err) => write!(f, "{}", err),
        }
    }
}

/// Everything a scan produced.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Per-file extraction results, in sorted path order.
    pub reports: Vec<FileReport>,
    /// Files looked at but not extracted from.
    pub skipped: Vec<SkippedFile>,
    /// Argument paths that could not be scanned at all.
    pub failed: Vec<(PathBuf, String)>,
}

/// Walks paths and runs the extractor over every candidate file.
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan files and directories.
    ///
    /// Files named directly are always candidates, whatever their
    /// extension; directories are walked and only files with a known
    /// descriptor are kept. Reports come back sorted by path regardless of
    /// extraction order.
    pub fn scan(&self, paths: &[PathBuf]) -> ScanOutcome {
        let mut candidates: Vec<PathBuf> = Vec::new();
        let mut failed: Vec<(PathBuf, String)> = Vec::new();

        for path in paths {
            if path.is_dir() {
                self.collect_dir(path, &mut candidates);
            } else if path.is_file() {
                candidates.push(path.clone());
            } else {
                let message = match fs::metadata(path) {
                    Err(err) => err.to_string(),
                    Ok(_) => "not a regular file".to_string(),
                };
                failed.push((path.clone(), message));
            }
        }

        candidates.sort();
        candidates.dedup();

        let mut reports = Vec::new();
        let mut skipped = Vec::new();
        for result in self.extract_all(&candidates) {
            match result {
                Ok(report) => reports.push(report),
                Err(skip) => skipped.push(skip),
            }
        }

        ScanOutcome {
            reports,
            skipped,
            failed,
        }
    }

    /// Run extraction over the candidates, in parallel across files.
    fn extract_all(&self, candidates: &[PathBuf]) -> Vec<Result<FileReport, SkippedFile>> {
        if self.config.jobs == 0 {
            return candidates
                .par_iter()
                .map(|path| self.process_file(path))
                .collect();
        }
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()
        {
            Ok(pool) => pool.install(|| {
                candidates
                    .par_iter()
                    .map(|path| self.process_file(path))
                    .collect()
            }),
            // Fall back to the global pool if the custom pool cannot start.
            Err(_) => candidates
                .par_iter()
                .map(|path| self.process_file(path))
                .collect(),
        }
    }

    fn process_file(&self, path: &Path) -> Result<FileReport, SkippedFile> {
        let skip = |reason: SkipReason| SkippedFile {
            path: path.to_path_buf(),
            reason,
        };

        let language = match self.config.language.or_else(|| Language::from_path(path)) {
            Some(language) => language,
            None => return Err(skip(SkipReason::UnknownExtension)),
        };

        if let Ok(metadata) = path.metadata() {
            if metadata.len() > self.config.max_file_size {
                return Err(skip(SkipReason::TooLarge {
                    size: metadata.len(),
                    limit: self.config.max_file_size,
                }));
            }
        }

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                return Err(skip(SkipReason::NotUtf8));
            }
            Err(err) => return Err(skip(SkipReason::Unreadable(err.to_string()))),
        };

        let syntax = self.config.merge.apply(language.syntax());
        let regions = match extract(&text, &syntax) {
            Ok(regions) => regions,
            Err(err) => return Err(skip(SkipReason::BadSyntax(err))),
        };

        debug!(
            path = %path.display(),
            language = %language,
            regions = regions.len(),
            "scanned file"
        );

        Ok(FileReport {
            path: path.to_path_buf(),
            language,
            regions,
        })
    }

    fn collect_dir(&self, root: &Path, candidates: &mut Vec<PathBuf>) {
        let walker = if self.config.include_all {
            WalkBuilder::new(root)
                .hidden(false)
                .ignore(false)
                .git_ignore(false)
                .git_global(false)
                .git_exclude(false)
                .build()
        } else {
            WalkBuilder::new(root)
                .hidden(true)
                .ignore(true)
                .git_ignore(true)
                .git_global(true)
                .git_exclude(true)
                .build()
        };

        for entry in walker.flatten() {
            // Symlinks are skipped; the walk does not follow them either.
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.path();
            if self.is_ignored(path) {
                continue;
            }
            if self.config.language.is_none() && Language::from_path(path).is_none() {
                debug!(path = %path.display(), "no comment descriptor, skipping");
                continue;
            }
            candidates.push(path.to_path_buf());
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self.config.ignore_patterns.is_empty() {
            return false;
        }
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        self.config.ignore_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(name) || p.matches_path(path))
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    fn scan_with(config: ScanConfig, paths: &[PathBuf]) -> ScanOutcome {
        Scanner::new(config).scan(paths)
    }

    fn scan(paths: &[PathBuf]) -> ScanOutcome {
        scan_with(ScanConfig::default(), paths)
    }

    #[test]
    fn test_scan_single_file() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "app.js", "/* a session */\nlet x = 1;\n");
        let outcome = scan(&[file]);
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.reports[0].language, Language::JavaScript);
        assert_eq!(outcome.reports[0].regions.len(), 1);
        assert!(outcome.skipped.is_empty());
        assert!(outcome.failed.is_empty());
    }

    #[test]
    fn test_scan_directory_sorted() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.rb", "# b\n");
        write(&dir, "a.js", "/* a */\n");
        write(&dir, "sub/c.sh", "# c\n");
        let outcome = scan(&[dir.path().to_path_buf()]);
        let names: Vec<String> = outcome
            .reports
            .iter()
            .map(|r| {
                r.path
                    .strip_prefix(dir.path())
                    .unwrap()
                    .display()
                    .to_string()
            })
            .collect();
        assert_eq!(names, vec!["a.js", "b.rb", "sub/c.sh"]);
    }

    #[test]
    fn test_explicit_unknown_extension_is_reported() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "notes.txt", "# not scanned\n");
        let outcome = scan(&[file]);
        assert!(outcome.reports.is_empty());
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].reason, SkipReason::UnknownExtension);
    }

    #[test]
    fn test_walked_unknown_extension_is_quietly_dropped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "notes.txt", "# not scanned\n");
        write(&dir, "a.rb", "# scanned\n");
        let outcome = scan(&[dir.path().to_path_buf()]);
        assert_eq!(outcome.reports.len(), 1);
        assert!(
            outcome.skipped.is_empty(),
            "walked files without a descriptor are dropped, not reported"
        );
    }

    #[test]
    fn test_forced_language_overrides_detection() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "notes.txt", "# forced\n");
        let config = ScanConfig {
            language: Some(Language::Ruby),
            ..Default::default()
        };
        let outcome = scan_with(config, &[file]);
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.reports[0].language, Language::Ruby);
        assert_eq!(outcome.reports[0].regions.len(), 1);
    }

    #[test]
    fn test_merge_override() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "a.rb", "# a\n\n# b\n");

        let auto = scan(&[file.clone()]);
        assert_eq!(auto.reports[0].regions.len(), 1, "ruby merges by default");

        let config = ScanConfig {
            merge: MergeMode::Never,
            ..Default::default()
        };
        let never = scan_with(config, &[file]);
        assert_eq!(never.reports[0].regions.len(), 2);
    }

    #[test]
    fn test_size_cap_skips_file() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "big.js", &"/* x */\n".repeat(100));
        let config = ScanConfig {
            max_file_size: 16,
            ..Default::default()
        };
        let outcome = scan_with(config, &[file]);
        assert!(outcome.reports.is_empty());
        assert_eq!(outcome.skipped.len(), 1);
        assert!(matches!(
            outcome.skipped[0].reason,
            SkipReason::TooLarge { limit: 16, .. }
        ));
    }

    #[test]
    fn test_invalid_utf8_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.js");
        fs::write(&path, [0xff, 0xfe, b'/', b'*']).unwrap();
        let outcome = scan(&[path]);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].reason, SkipReason::NotUtf8);
    }

    #[test]
    fn test_missing_path_is_failed() {
        let dir = TempDir::new().unwrap();
        let outcome = scan(&[dir.path().join("absent.rb")]);
        assert!(outcome.reports.is_empty());
        assert_eq!(outcome.failed.len(), 1);
    }

    #[test]
    fn test_ignore_patterns_apply_to_walk() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.js", "/* a */\n");
        write(&dir, "b.rb", "# b\n");
        let config = ScanConfig {
            ignore_patterns: vec!["*.js".to_string()],
            ..Default::default()
        };
        let outcome = scan_with(config, &[dir.path().to_path_buf()]);
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.reports[0].language, Language::Ruby);
    }

    #[test]
    fn test_hidden_files_need_include_all() {
        let dir = TempDir::new().unwrap();
        write(&dir, ".hidden.rb", "# hidden\n");
        write(&dir, "seen.rb", "# seen\n");

        let outcome = scan(&[dir.path().to_path_buf()]);
        assert_eq!(outcome.reports.len(), 1);

        let config = ScanConfig {
            include_all: true,
            ..Default::default()
        };
        let outcome = scan_with(config, &[dir.path().to_path_buf()]);
        assert_eq!(outcome.reports.len(), 2);
    }

    #[test]
    fn test_same_file_named_twice_scans_once() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "a.rb", "# a\n");
        let outcome = scan(&[file.clone(), file]);
        assert_eq!(outcome.reports.len(), 1);
    }

    #[test]
    fn test_empty_file_reports_no_regions() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "empty.rb", "");
        let outcome = scan(&[file]);
        assert_eq!(outcome.reports.len(), 1);
        assert!(outcome.reports[0].regions.is_empty());
    }
}
