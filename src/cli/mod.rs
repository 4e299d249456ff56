//! Command-line interface components
//!
//! This module contains CLI-specific code for the RINEX Lister application,
//! including argument parsing, progress display, and the command handlers.

pub mod args;
pub mod commands;
pub mod progress;

pub use args::{AvailabilityArgs, Cli, Commands, CredentialArgs, GlobalArgs, ListArgs};
pub use commands::{format_row, handle_availability, handle_list};
pub use progress::CrawlSpinner;
