use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about="Validate IPv4 target lists.", long_about = None)]
pub struct Args {
    /// Maximum total number of target addresses; 0 disables the cap
    /// [env: TARGETSPEC_MAX_TARGETS]
    #[arg(short = 'm', long = "max")]
    pub max_targets: Option<u64>,

    /// Reject out-of-range octets, reversed ranges, and CIDR prefixes longer than /32
    /// [env: TARGETSPEC_STRICT]
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Save the accepted targets to a CSV file
    #[arg(long = "csv")]
    pub csv_file: Option<PathBuf>,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Targets - IPv4 addresses, ranges (a.b.c.d-a.b.c.d), or CIDR blocks (a.b.c.d/n); each
    /// argument may be a comma-separated list
    #[arg(required = true)]
    pub targets: Vec<String>,
}

/*--------------------------------------------------------------------------------------
  Output Format
--------------------------------------------------------------------------------------*/

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Table of accepted targets with their address counts
    #[default]
    Table,

    /// Total number of addresses
    Count,

    /// JSON report
    Json,
}
