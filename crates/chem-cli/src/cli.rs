//! CLI argument definitions for the inventory converter.

use std::path::PathBuf;

use chem_model::ResponsibleSource;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "chem-cli",
    version,
    about = "Convert chemical inventory exports into inventory entities",
    long_about = "Convert chemical inventory spreadsheet exports into inventory entities.\n\n\
                  Rows are validated and normalized; every data-quality problem is\n\
                  reported as a diagnostic attributed to file, row and handling id."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert inventory exports into entities.
    Convert(ConvertArgs),

    /// Show the effective parser profile.
    Profile(ProfileArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Input spreadsheets or directories containing them.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write entities as JSON to this file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write all diagnostics as CSV to this file.
    #[arg(long = "report", value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Parser profile TOML (default: built-in profile or $CHEM_STANDARDS_DIR).
    #[arg(long = "profile", value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Column the responsible person is read from.
    #[arg(long = "responsible-source", value_enum)]
    pub responsible_source: Option<ResponsibleSourceArg>,

    /// Minimum width of the zero-padded handling identifier.
    #[arg(long = "pad-width", value_name = "N")]
    pub pad_width: Option<usize>,

    /// Process and report without writing entities.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ProfileArgs {
    /// Parser profile TOML (default: built-in profile or $CHEM_STANDARDS_DIR).
    #[arg(long = "profile", value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Print the profile as TOML instead of tables.
    #[arg(long = "toml")]
    pub toml: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ResponsibleSourceArg {
    Applicant,
    Coordinator,
}

impl From<ResponsibleSourceArg> for ResponsibleSource {
    fn from(arg: ResponsibleSourceArg) -> Self {
        match arg {
            ResponsibleSourceArg::Applicant => ResponsibleSource::Applicant,
            ResponsibleSourceArg::Coordinator => ResponsibleSource::Coordinator,
        }
    }
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
