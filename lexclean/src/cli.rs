// lexclean/src/cli.rs
//! This file defines the command-line interface (CLI) for the lexclean application,
//! including all available commands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "lexclean",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Keep a forbidden term out of text and training data",
    long_about = "lexclean decides whether text expresses a single forbidden term in any surface form: literal spelling, look-alike characters, accents, leetspeak, spacing, reversal, upside-down text, base64 payloads, translations, misspellings or emoji. Use it to check text from the command line or to re-validate generated training sample files.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the lexclean crates to DEBUG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Explicitly disable debug logging, even if RUST_LOG is set to DEBUG
    #[arg(long = "disable-debug", global = true, help = "Disable debug logging, overriding RUST_LOG.")]
    pub disable_debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `lexclean` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Checks a file or stdin for the forbidden term.
    #[command(about = "Checks a file or stdin for the forbidden term and reports the evidence.")]
    Scan(ScanCommand),

    /// Re-validates JSON sample files and drops contaminated samples.
    #[command(about = "Re-validates JSON sample files, keeping only clean samples.")]
    Filter(FilterCommand),

    /// Summarizes the variant catalog without revealing any variant.
    #[command(about = "Summarizes the variant catalog (counts, languages, digests).")]
    Catalog(CatalogCommand),
}

/// Flags that select and shape the variant catalog. Shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Path to a custom catalog configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", env = "LEXCLEAN_CONFIG", help = "Path to a custom catalog configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Restrict translations to these language codes (comma-separated).
    #[arg(long = "languages", short = 'l', value_delimiter = ',', value_name = "CODES", help = "Restrict translations to these language codes (comma-separated).")]
    pub languages: Vec<String>,

    /// Fail on language codes missing from the translation table.
    #[arg(long = "strict", help = "Fail on unknown language codes instead of skipping them.")]
    pub strict: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Scan each line on its own and report as soon as it is read.
    #[arg(long = "line-buffered", help = "Scan input line by line (useful for streaming data from pipes).")]
    pub line_buffered: bool,

    /// Print the verdict as JSON on stdout.
    #[arg(long = "json", help = "Print the verdict as JSON instead of a table.")]
    pub json: bool,

    /// Exit with code 1 when the input is contaminated.
    #[arg(long = "fail-on-match", help = "Exit with a non-zero code if the input is contaminated.")]
    pub fail_on_match: bool,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

/// Arguments for the `filter` command.
#[derive(Parser, Debug)]
pub struct FilterCommand {
    /// One or more JSON sample files.
    #[arg(long = "input", short = 'i', value_name = "FILE", required = true, num_args = 1.., help = "JSON sample file(s) to re-validate.")]
    pub inputs: Vec<PathBuf>,

    /// Where the clean samples are written.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write the clean samples to this file.")]
    pub output: PathBuf,

    /// Where the rejected samples are written, if anywhere.
    #[arg(long = "rejected", value_name = "FILE", help = "Also write the rejected samples to this file.")]
    pub rejected: Option<PathBuf>,

    /// Append one JSON-lines audit record per scanned field.
    #[arg(long = "audit-log", value_name = "FILE", help = "Append hashed audit records (JSON lines) to this file.")]
    pub audit_log: Option<PathBuf>,

    /// Print the filter report as JSON on stdout.
    #[arg(long = "json-report", help = "Print the filter report as JSON to stdout.")]
    pub json_report: bool,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

/// Arguments for the `catalog` command.
#[derive(Parser, Debug)]
pub struct CatalogCommand {
    /// Print the summary as JSON on stdout.
    #[arg(long = "json", help = "Print the catalog summary as JSON.")]
    pub json: bool,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}
