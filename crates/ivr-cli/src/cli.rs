//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ivr-mapper",
    version,
    about = "Assemble manufacturer insurance-verification and order forms",
    long_about = "Map clinical intake data onto manufacturer document templates.\n\n\
                  Resolves canonical records through per-manufacturer field\n\
                  configurations, reports validation and completeness, and\n\
                  curates learned field-name mappings."
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

    /// Allow field values (patient data) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Map an intake payload onto a manufacturer template.
    Map(MapArgs),

    /// Propose canonical-path matches for raw template field names.
    Match(MatchArgs),

    /// List loaded manufacturer configurations.
    Manufacturers(ManufacturersArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// Path to the submitted payload JSON (flat or nested).
    #[arg(value_name = "PAYLOAD")]
    pub payload: PathBuf,

    /// Directory of manufacturer definition TOML files.
    #[arg(long = "definitions", value_name = "DIR")]
    pub definitions: PathBuf,

    /// Manufacturer name; defaults to the payload's manufacturer.
    #[arg(long = "manufacturer", value_name = "NAME")]
    pub manufacturer: Option<String>,

    /// Document type to assemble.
    #[arg(long = "document-type", default_value = "ivr", value_name = "TYPE")]
    pub document_type: String,

    /// Provider profile JSON supplying profile-default values.
    #[arg(long = "profile", value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Selected facility JSON.
    #[arg(long = "facility", value_name = "PATH")]
    pub facility: Option<PathBuf>,

    /// Current organization JSON.
    #[arg(long = "organization", value_name = "PATH")]
    pub organization: Option<PathBuf>,

    /// Stored workflow metadata JSON (canonical keys, highest precedence).
    #[arg(long = "workflow", value_name = "PATH")]
    pub workflow: Option<PathBuf>,

    /// Curated mapping store used for low-confidence warnings.
    #[arg(long = "mappings-dir", value_name = "DIR")]
    pub mappings_dir: Option<PathBuf>,

    /// Write the output field list JSON for the submission step.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Fall back to the generic configuration when the manufacturer has
    /// no template for the requested document type.
    #[arg(long = "generic-fallback")]
    pub generic_fallback: bool,

    /// Override the request date (YYYY-MM-DD); defaults to today.
    #[arg(long = "today", value_name = "DATE")]
    pub today: Option<String>,
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Text file of raw template field names, one per line.
    #[arg(value_name = "FIELDS_FILE")]
    pub fields_file: PathBuf,

    /// Manufacturer id the template belongs to.
    #[arg(long = "manufacturer-id", value_name = "ID")]
    pub manufacturer_id: u32,

    /// Template identifier the fields were scraped from.
    #[arg(long = "template", value_name = "TEMPLATE_ID")]
    pub template_id: String,

    /// Curated mapping store directory.
    #[arg(long = "mappings-dir", value_name = "DIR")]
    pub mappings_dir: Option<PathBuf>,

    /// Persist auto-acceptable candidates (exact/pattern/semantic tiers).
    #[arg(long = "accept", requires = "mappings_dir")]
    pub accept: bool,

    /// Curator recorded on accepted rows.
    #[arg(long = "created-by", default_value = "cli", value_name = "NAME")]
    pub created_by: String,

    /// Candidate thresholds profile.
    #[arg(long = "thresholds", value_enum, default_value = "default")]
    pub thresholds: ThresholdsArg,

    /// How many candidates to show per field.
    #[arg(long = "top", default_value_t = 3, value_name = "N")]
    pub top: usize,
}

#[derive(Parser)]
pub struct ManufacturersArgs {
    /// Directory of manufacturer definition TOML files.
    #[arg(long = "definitions", value_name = "DIR")]
    pub definitions: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThresholdsArg {
    Default,
    Strict,
    Relaxed,
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
