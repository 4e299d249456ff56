//! RINEX Lister Library
//!
//! Lists GNSS RINEX files published by IGS data centers over FTP and HTTP,
//! classifies their names, and summarizes per-station data availability.

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
