//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use layout_output::Target;

#[derive(Parser)]
#[command(
    name = "layout-forge",
    version,
    about = "Validate fixed-width field layouts and generate their artifacts",
    long_about = "Validate fixed-width field layouts and generate their artifacts.\n\n\
                  INPUT is a CSV file (one table named after the file) or a directory\n\
                  of CSV files. Outputs: fixed-layout XML, record line, persistence XML,\n\
                  attribute-map XML, enrichment XML and a column-metadata SQL script."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
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

    /// JSON file with generation and validation options.
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the tables found in the input.
    Tables(InputArgs),

    /// Check positional consistency of a layout table.
    Validate(ValidateArgs),

    /// Encode one value into a fixed-width slot.
    Encode(EncodeArgs),

    /// Validate, then write the requested artifacts.
    Generate(GenerateArgs),

    /// Renumber active field positions contiguously from 1.
    Recalculate(RecalculateArgs),

    /// Copy fields from another layout, appending them after the last field.
    #[command(name = "copy")]
    CopyFields(CopyArgs),
}

#[derive(Parser)]
pub struct InputArgs {
    /// CSV file or directory of CSV files.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Parser)]
pub struct ValidateArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Table to validate (default: the configured layout table).
    #[arg(long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Skip warnings about values longer than their slot.
    #[arg(long = "no-truncation-warnings")]
    pub no_truncation_warnings: bool,
}

#[derive(Parser)]
pub struct EncodeArgs {
    /// Value to encode.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// Slot width in characters.
    #[arg(long = "size", value_name = "N")]
    pub size: usize,

    /// Alignment tag, e.g. ZERO_ESQUERDA or LEFT_BLANK (default: inferred from type).
    #[arg(long = "alignment", value_name = "A", default_value = "")]
    pub alignment: String,

    /// Field type tag, e.g. INTEIRO or TEXT.
    #[arg(long = "type", value_name = "T", default_value = "")]
    pub field_type: String,
}

#[derive(Parser)]
pub struct GenerateArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Target to generate; repeat for several (default: all).
    #[arg(long = "target", value_name = "TARGET")]
    pub targets: Vec<Target>,

    /// Output directory (default: <INPUT directory>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Identification metadata CSV (overrides one found in INPUT).
    #[arg(long = "metadata", value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Refuse to generate while the layout has validation errors.
    #[arg(long = "block-on-errors")]
    pub block_on_errors: bool,
}

#[derive(Parser)]
pub struct RecalculateArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Table to renumber (default: the configured layout table).
    #[arg(long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// Write the renumbered table as CSV instead of printing it.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct CopyArgs {
    /// Layout receiving the fields.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// CSV file or directory holding the fields to copy.
    #[arg(long = "from", value_name = "ORIGIN")]
    pub origin: PathBuf,

    /// Table receiving the fields (default: the configured layout table).
    #[arg(long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// Table in ORIGIN to copy from (default: the configured layout table).
    #[arg(long = "origin-table", value_name = "NAME")]
    pub origin_table: Option<String>,

    /// Field to copy; repeat for several (default: all).
    #[arg(long = "field", value_name = "NAME")]
    pub fields: Vec<String>,

    /// Refresh fields that already exist instead of skipping them.
    #[arg(long = "update-existing")]
    pub update_existing: bool,

    /// Write the resulting table as CSV instead of printing it.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
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
