//! CLI argument definitions for the binary pattern generator.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use binpat_core::parse_single_byte;

#[derive(Parser)]
#[command(
    name = "genbinpats",
    version,
    about = "Generate one-hot binary patterns from a categorical CSV dataset",
    long_about = "Generate one-hot binary patterns from a categorical CSV dataset.\n\n\
                  Every distinct value of every kept column gets its own bit. The first\n\
                  pass collects the values in first-seen order, the second pass writes\n\
                  one `label,bit,bit,...,` line per record."
)]
pub struct Cli {
    /// Input dataset, one comma separated record per line.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file for the binary patterns.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Columns to ignore: N > 0 drops the first N, N < 0 drops the last |N|.
    ///
    /// The label is the first raw column when N > 0 and the second-to-last
    /// raw column otherwise. N = 0 keeps no column at all.
    #[arg(value_name = "SKIP", allow_negative_numbers = true)]
    pub skip: i64,

    /// Field delimiter (single character, `\t` for tab).
    #[arg(long, value_name = "CHAR", default_value = ",", value_parser = parse_byte)]
    pub delimiter: u8,

    /// Ignore input lines starting with this character.
    #[arg(long, value_name = "CHAR", value_parser = parse_byte)]
    pub comment: Option<u8>,

    /// Write the collected domains as JSON.
    #[arg(long = "domains-out", value_name = "PATH")]
    pub domains_out: Option<PathBuf>,

    /// Do not print the domain summary table.
    #[arg(long = "no-summary")]
    pub no_summary: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

fn parse_byte(value: &str) -> Result<u8, String> {
    parse_single_byte(value).map_err(|error| error.to_string())
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
