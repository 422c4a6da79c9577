//! CLI entry point for rind

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use regex::Regex;
use tracing_subscriber::EnvFilter;

use rind::{Language, MergeMode, OutputConfig, ScanConfig, Scanner, TextFormatter, print_json};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Check if stdout is a TTY
            std::io::stdout().is_terminal()
        }
    }
}

/// Blank-line merging mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum MergeArg {
    /// Use each language's own setting
    #[default]
    Auto,
    /// Bridge blank lines between line comment runs in every language
    Always,
    /// Never bridge blank lines
    Never,
}

impl From<MergeArg> for MergeMode {
    fn from(arg: MergeArg) -> Self {
        match arg {
            MergeArg::Auto => MergeMode::Auto,
            MergeArg::Always => MergeMode::Always,
            MergeArg::Never => MergeMode::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "rind")]
#[command(about = "Peels comment regions out of source files")]
#[command(version)]
struct Args {
    /// Files or directories to scan
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Treat every file as LANG instead of detecting by extension
    #[arg(short = 'l', long = "language", value_name = "LANG")]
    language: Option<String>,

    /// Control blank-line bridging between line comment runs
    #[arg(long = "merge", value_name = "WHEN", default_value = "auto")]
    merge: MergeArg,

    /// Keep only regions whose text matches PATTERN
    #[arg(short = 'g', long = "grep", value_name = "PATTERN")]
    grep: Option<String>,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// List region spans only, without the raw comment lines
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Scan all files (ignore .gitignore filtering and hidden files)
    #[arg(short, long)]
    all: bool,

    /// Ignore files matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Maximum file size to scan (default: 1MB)
    /// Files larger than this are skipped. Use suffixes: K, M, G (e.g. 5M for 5MB)
    #[arg(long = "max-file-size", value_name = "SIZE")]
    max_file_size: Option<String>,

    /// Number of parallel workers for extraction
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Parse a file size string like "5M", "100K", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3)
/// Without suffix, interprets as bytes.
fn parse_file_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    Ok(num * multiplier)
}

/// Set up tracing to stderr. RUST_LOG takes precedence over -v.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let max_file_size = args.max_file_size.as_ref().map(|size_str| {
        parse_file_size(size_str).unwrap_or_else(|e| {
            eprintln!("rind: error: invalid --max-file-size '{}': {}", size_str, e);
            process::exit(2);
        })
    });

    let language = args.language.as_deref().map(|name| {
        Language::from_name(name).unwrap_or_else(|| {
            eprintln!("rind: error: unknown language '{}'", name);
            eprintln!("supported: {}", Language::ALL.map(|l| l.name()).join(", "));
            process::exit(2);
        })
    });

    let grep = args.grep.as_deref().map(|pattern| {
        Regex::new(pattern).unwrap_or_else(|e| {
            eprintln!("rind: error: invalid --grep pattern '{}': {}", pattern, e);
            process::exit(2);
        })
    });

    let config = {
        let mut config = ScanConfig {
            language,
            merge: args.merge.into(),
            include_all: args.all,
            ignore_patterns: args.ignore.clone(),
            jobs: args.jobs,
            ..Default::default()
        };
        if let Some(size) = max_file_size {
            config.max_file_size = size;
        }
        config
    };

    let mut outcome = Scanner::new(config).scan(&args.paths);

    for (path, err) in &outcome.failed {
        eprintln!("rind: cannot access '{}': {}", path.display(), err);
    }
    for skip in &outcome.skipped {
        eprintln!(
            "rind: warning: skipping '{}': {}",
            skip.path.display(),
            skip.reason
        );
    }
    for report in &outcome.reports {
        for region in &report.regions {
            if region.unterminated {
                eprintln!(
                    "rind: warning: {}:{}: block comment never closed",
                    report.path.display(),
                    region.start_line
                );
            }
        }
    }

    if let Some(regex) = &grep {
        for report in &mut outcome.reports {
            report
                .regions
                .retain(|region| regex.is_match(&region.text()));
        }
    }

    let result = if args.json {
        print_json(&outcome.reports)
    } else {
        let output_config = OutputConfig {
            use_color: should_use_color(args.color),
            quiet: args.quiet,
        };
        TextFormatter::new(output_config).print(&outcome.reports)
    };

    if let Err(e) = result {
        eprintln!("rind: error writing output: {}", e);
        process::exit(1);
    }

    if !outcome.failed.is_empty() {
        process::exit(1);
    }
}
