//! CLI entry point for duplay

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use duplay::{FsTree, ReportOptions, UsageReport, print_json, print_report, print_tree, replay};

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

#[derive(Parser, Debug)]
#[command(name = "duplay")]
#[command(about = "Replays a recorded shell session and reports directory disk usage")]
#[command(version)]
struct Args {
    /// Transcript file to replay (reads standard input when omitted)
    transcript: Option<PathBuf>,

    /// Print the reconstructed tree before the report
    #[arg(short = 't', long = "tree")]
    tree: bool,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Threshold for the small-directory total
    /// Use suffixes: K, M, G (e.g. 100K for 100KB)
    #[arg(long = "small-limit", value_name = "SIZE", default_value = "100000")]
    small_limit: String,

    /// Total capacity of the recorded disk
    #[arg(long = "capacity", value_name = "SIZE", default_value = "70000000")]
    capacity: String,

    /// Free space that must be available after deleting a directory
    #[arg(long = "min-free", value_name = "SIZE", default_value = "30000000")]
    min_free: String,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

/// Parse a size string like "5M", "100K", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3)
/// Without suffix, interprets as bytes.
fn parse_size(s: &str) -> Result<u64, String> {
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

/// Parse one of the size flags, exiting with a usage error on bad input.
fn size_flag(value: &str, flag: &str) -> u64 {
    parse_size(value).unwrap_or_else(|e| {
        eprintln!("duplay: invalid {} '{}': {}", flag, value, e);
        process::exit(1);
    })
}

/// Replay the transcript from the given file, or standard input.
fn read_transcript(path: Option<&PathBuf>) -> FsTree {
    let result = match path {
        Some(path) => {
            let file = File::open(path).unwrap_or_else(|e| {
                eprintln!("duplay: cannot open '{}': {}", path.display(), e);
                process::exit(1);
            });
            replay(BufReader::new(file))
        }
        None => {
            let stdin = io::stdin();
            replay(stdin.lock())
        }
    };

    result.unwrap_or_else(|e| {
        eprintln!("duplay: {}", e);
        process::exit(1);
    })
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(io::stderr)
        .init();

    let options = ReportOptions {
        small_limit: size_flag(&args.small_limit, "--small-limit"),
        capacity: size_flag(&args.capacity, "--capacity"),
        min_free: size_flag(&args.min_free, "--min-free"),
    };

    let tree = read_transcript(args.transcript.as_ref());
    tracing::info!(
        dirs = tree.dir_count(),
        files = tree.file_count(),
        "transcript replayed"
    );

    let report = UsageReport::compute(&tree, &options);

    let result = if args.json {
        print_json(&report, args.tree.then_some(&tree))
    } else {
        let use_color = should_use_color(args.color);
        let tree_result = if args.tree {
            print_tree(&tree, use_color).map(|_| println!())
        } else {
            Ok(())
        };
        tree_result.and_then(|_| print_report(&report, use_color))
    };

    if let Err(e) = result {
        eprintln!("duplay: error writing output: {}", e);
        process::exit(1);
    }
}
