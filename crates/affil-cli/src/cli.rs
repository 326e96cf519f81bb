//! CLI argument definitions for the affiliation resolver.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use affil_match::DEFAULT_MIN_NAME_LEN;

#[derive(Parser)]
#[command(
    name = "affiliation-resolver",
    version,
    about = "Resolve free-text affiliation strings to registry organization ids",
    long_about = "Resolve free-text affiliation strings to registry organization ids.\n\n\
                  Names are matched exactly on a normalized form; shared names are\n\
                  disambiguated by location text found in the affiliation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Registry CSV (default: $AFFIL_REGISTRY_PATH or data/ror_organizations.csv).
    #[arg(long = "registry", value_name = "CSV", global = true)]
    pub registry: Option<PathBuf>,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

/// Matching tunables.
#[derive(Args)]
pub struct EngineArgs {
    /// Minimum normalized length of a searchable registry name.
    #[arg(
        long = "min-name-len",
        value_name = "N",
        default_value_t = DEFAULT_MIN_NAME_LEN,
        global = true
    )]
    pub min_name_len: usize,

    /// Let all-uppercase acronyms match regardless of case in the input.
    #[arg(long = "no-acronym-guard", global = true)]
    pub no_acronym_guard: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve one or more affiliation strings.
    Match(MatchArgs),

    /// Resolve a file with one affiliation per line into JSON Lines.
    Batch(BatchArgs),

    /// Show the names and location registered for an id.
    Lookup(LookupArgs),

    /// Show registry load figures and index statistics.
    Stats(StatsArgs),
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Affiliation strings to resolve.
    #[arg(value_name = "AFFILIATION", required = true)]
    pub affiliations: Vec<String>,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,

    /// Also show spans that matched a name but produced no record.
    #[arg(long = "explain")]
    pub explain: bool,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// Input file, one affiliation per line.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Registry id, bare or prefixed.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct StatsArgs {
    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
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
