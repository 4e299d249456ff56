//! Prelude module for RINEX Lister Library
//!
//! This module re-exports the most commonly used items from the library,
//! providing a convenient way to import everything needed for typical usage
//! with a single `use rinex_lister::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use rinex_lister::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let factory = Arc::new(TransportFactory::new(
//!         Credentials::from_env(),
//!         ClientConfig::default(),
//!     ));
//!     let options = ListingOptions::new().with_data_centers([DataCenter::Ign]);
//!     let listings = DirectoryListing::new(options, factory)?.collect_all().await;
//!     println!("{} files", listings.len());
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Essential app components that are used in most integrations
pub use crate::app::{
    AvailabilityReport,
    // Availability
    AvailabilityTracker,
    // Transport
    ClientConfig,
    Connection,
    ConnectionFactory,
    // Crawling
    DirectoryListing,
    DirectorySearchKey,
    FileOverrides,
    Health,
    HealthThresholds,
    ListedFile,
    Listing,
    ListingOptions,
    ListingStats,
    MimeType,
    // Classification
    RinexFilename,
    SiteDirectory,
    StationRegistry,
    TransportFactory,
};

// Enumerations
pub use crate::app::defines::{DataCenter, DataRate, DataSource, DataType, RinexVersion};

// Authentication
pub use crate::auth::Credentials;

// Commonly used constants
pub use crate::constants::{DEFAULT_RATE_LIMIT_RPS, ENV_PASSWORD, ENV_USERNAME, USER_AGENT};

// Standard library re-exports that are commonly needed
pub use std::path::{Path, PathBuf};
pub use std::sync::Arc;

// Common external crate re-exports for convenience
pub use futures::StreamExt;
pub use tokio;
