//! Command-line argument parsing for RINEX Lister
//!
//! This module defines the CLI structure using clap derive macros: a `list`
//! command that prints the files matching a search, and an `availability`
//! command that grades known sites by the age of their newest data.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::app::defines::{DataCenter, DataRate, DataType, RinexVersion};
use crate::app::ListingOptions;

/// RINEX Lister - find GNSS data published by IGS data centers
#[derive(Parser, Debug)]
#[command(
    name = "rinex_lister",
    version,
    about = "List RINEX files published by IGS data centers",
    long_about = "Searches the FTP and HTTP archives of IGS data centers for RINEX files.
Lists the files matching a set of stations, dates and file categories, or reports how recent each known site's data is."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List files matching stations, dates and categories
    List(ListArgs),

    /// Report how recent each known site's observation data is
    Availability(AvailabilityArgs),
}

/// Data center login
#[derive(Args, Debug, Clone, Default)]
pub struct CredentialArgs {
    /// Data center user name (falls back to IGS_USERNAME)
    #[arg(long)]
    pub username: Option<String>,

    /// Data center password (falls back to IGS_PASSWORD, then a prompt)
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for the list command
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Stations to list; only the first four characters are compared
    #[arg(value_name = "STATION")]
    pub stations: Vec<String>,

    /// Day to search (YYYY-MM-DD or YYYY-DDD), repeatable
    #[arg(long = "date", value_parser = parse_date, conflicts_with_all = ["start", "end"])]
    pub dates: Vec<NaiveDate>,

    /// First day of an inclusive range
    #[arg(short, long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Last day of an inclusive range
    #[arg(short, long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// Data center to search (e.g. CDDIS, IGN), repeatable
    #[arg(short = 'd', long = "data-center")]
    pub data_centers: Vec<DataCenter>,

    /// RINEX major version (2, 3 or 4), repeatable
    #[arg(long = "version")]
    pub rinex_versions: Vec<RinexVersion>,

    /// File cadence (daily, hourly, highrate), repeatable
    #[arg(short = 'r', long = "rate")]
    pub data_rates: Vec<DataRate>,

    /// Data type (e.g. mixed-obs, MO, d), repeatable
    #[arg(short = 't', long = "type")]
    pub data_types: Vec<DataType>,

    /// Hour of day (0-23), repeatable
    #[arg(long = "hour", value_parser = clap::value_parser!(u8).range(0..=23))]
    pub hours: Vec<u8>,

    /// Directories listed concurrently
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub batch_size: Option<u16>,

    /// Also print names that match no RINEX convention
    #[arg(long)]
    pub unrecognized: bool,

    /// Print one JSON object per file
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

/// Arguments for the availability command
#[derive(Args, Debug, Clone)]
pub struct AvailabilityArgs {
    /// Stations to check; all listed stations when empty
    #[arg(value_name = "STATION")]
    pub stations: Vec<String>,

    /// File with one site name per line
    #[arg(long, value_name = "FILE")]
    pub sites: Option<PathBuf>,

    /// Days into the past to search
    #[arg(short, long)]
    pub lookback: Option<u32>,

    /// Data center to search, repeatable
    #[arg(short = 'd', long = "data-center")]
    pub data_centers: Vec<DataCenter>,

    /// RINEX major version, repeatable
    #[arg(long = "version")]
    pub rinex_versions: Vec<RinexVersion>,

    /// File cadence, repeatable
    #[arg(short = 'r', long = "rate")]
    pub data_rates: Vec<DataRate>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    pub fn log_level(&self) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}

impl ListArgs {
    /// Layer the flags over `defaults`; dimensions left empty keep the defaults
    pub fn apply(&self, defaults: ListingOptions) -> ListingOptions {
        let mut options = defaults
            .with_stations(self.stations.iter().cloned())
            .with_dates(self.dates.iter().copied())
            .with_range(self.start, self.end)
            .with_unrecognized(self.unrecognized);

        if !self.data_centers.is_empty() {
            options = options.with_data_centers(self.data_centers.iter().copied());
        }
        if !self.rinex_versions.is_empty() {
            options = options.with_rinex_versions(self.rinex_versions.iter().copied());
        }
        if !self.data_rates.is_empty() {
            options = options.with_data_rates(self.data_rates.iter().copied());
        }
        if !self.data_types.is_empty() {
            options = options.with_data_types(self.data_types.iter().copied());
        }
        if !self.hours.is_empty() {
            options = options.with_hours(self.hours.iter().copied());
        }
        if let Some(batch_size) = self.batch_size {
            options = options.with_batch_size(batch_size.into());
        }
        options
    }
}

/// Parse `YYYY-MM-DD` or a day of year as `YYYY-DDD`
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%j"))
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD or YYYY-DDD", value))
}
