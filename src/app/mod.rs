//! Core application logic for RINEX Lister
//!
//! This module contains the filename classifier, the data center
//! definitions, the FTP and HTTP transports, the directory crawler and the
//! availability tracker built on top of it.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use futures::StreamExt;
//! use rinex_lister::app::{DirectoryListing, ListingOptions, TransportFactory};
//! use rinex_lister::app::defines::{DataRate, RinexVersion};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ListingOptions::new()
//!     .with_stations(["TRAK"])
//!     .with_rinex_versions([RinexVersion::V2, RinexVersion::V3])
//!     .with_data_rates([DataRate::Daily]);
//! let mut listing = DirectoryListing::new(options, Arc::new(TransportFactory::default()))?;
//!
//! let mut stream = listing.stream();
//! while let Some(entry) = stream.next().await {
//!     if let Some(file) = entry.file.classified() {
//!         println!("{} {} {}", file.station(), file.date(), entry.url());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod availability;
pub mod connection;
pub mod defines;
pub mod directory;
pub mod file;

// Re-export main public API
pub use availability::{
    AvailabilityReport, AvailabilityTracker, Health, HealthThresholds, SiteDirectory,
    StationRegistry,
};
pub use connection::{ClientConfig, Connection, ConnectionFactory, TransportFactory};
pub use directory::{
    DirectoryListing, DirectorySearchKey, ListedFile, Listing, ListingOptions, ListingStats,
};
pub use file::{FileOverrides, MimeType, RinexFilename};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        // Ensure public API is accessible
        let config = ClientConfig::default();
        assert_eq!(config.archive_selector, "a.archiveItemText");
        assert!(RinexFilename::parse("trak0700.23o.gz").is_ok());
    }
}
