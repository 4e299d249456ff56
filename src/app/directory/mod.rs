//! Crawl data center archives for RINEX files
//!
//! [`DirectoryListing`] walks a [`SearchSpace`] in batches. Within a batch the
//! directories are resolved and de-duplicated first, then listed concurrently;
//! a batch completes before the next one starts. Connections are opened
//! lazily, one per data center, and live as long as the `DirectoryListing`.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use futures::StreamExt;
//! use rinex_lister::app::{DirectoryListing, ListingOptions, TransportFactory};
//! use rinex_lister::app::defines::DataCenter;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ListingOptions::new()
//!     .with_stations(["NYA1"])
//!     .with_data_centers([DataCenter::Ign]);
//! let mut listing = DirectoryListing::new(options, Arc::new(TransportFactory::default()))?;
//!
//! let mut stream = listing.stream();
//! while let Some(entry) = stream.next().await {
//!     println!("{}", entry.path());
//! }
//! # Ok(())
//! # }
//! ```

pub mod listing;
pub mod options;
pub mod search;
pub mod stats;

use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::Arc;

use futures::future::join_all;
use futures::stream::{self, BoxStream, StreamExt};
use tracing::{debug, info, warn};

use crate::app::connection::{Connection, ConnectionFactory};
use crate::app::defines::{DataCenter, Directory};
use crate::app::file::RinexFilename;
use crate::errors::{ConfigResult, Result};

pub use listing::{ListedFile, Listing};
pub use options::{site_code, FileFilters, ListingOptions};
pub use search::{DirectorySearchKey, SearchSpace};
pub use stats::ListingStats;

/// Lazily enumerated listings of RINEX files
pub struct DirectoryListing {
    space: SearchSpace,
    filters: FileFilters,
    batch_size: usize,
    include_unrecognized: bool,
    factory: Arc<dyn ConnectionFactory>,
    connections: HashMap<DataCenter, Arc<dyn Connection>>,
    visited: HashSet<(DataCenter, String)>,
    stats: ListingStats,
}

impl DirectoryListing {
    /// Validate `options` and prepare a crawl
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when explicit dates and a range are both given or
    /// a filter value is out of range
    pub fn new(options: ListingOptions, factory: Arc<dyn ConnectionFactory>) -> ConfigResult<Self> {
        let space = options.search_space()?;
        Ok(Self::with_space(options, space, factory))
    }

    /// Prepare a crawl over an explicit search space
    pub fn with_space(
        options: ListingOptions,
        space: SearchSpace,
        factory: Arc<dyn ConnectionFactory>,
    ) -> Self {
        let batch_size = options
            .batch_size
            .unwrap_or(space.data_centers().len())
            .max(1);

        Self {
            filters: options.filters(),
            include_unrecognized: options.include_unrecognized,
            space,
            batch_size,
            factory,
            connections: HashMap::new(),
            visited: HashSet::new(),
            stats: ListingStats::default(),
        }
    }

    pub fn search_space(&self) -> &SearchSpace {
        &self.space
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Counters of the current or most recent run
    pub fn stats(&self) -> &ListingStats {
        &self.stats
    }

    /// Stream every matching listing.
    ///
    /// Each call starts a new run: the visited directories and the statistics
    /// are reset, while open connections are reused.
    pub fn stream(&mut self) -> BoxStream<'_, Listing> {
        self.visited.clear();
        self.stats = ListingStats::default();
        info!(
            "Searching {} directories in batches of {}",
            self.space.len(),
            self.batch_size
        );

        stream::unfold((self, 0usize), |(this, cursor)| async move {
            let total = this.space.len();
            if cursor >= total {
                debug!("Listing finished: {}", this.stats.summary());
                return None;
            }
            let end = (cursor + this.batch_size).min(total);
            let batch = this.read_batch(cursor..end).await;
            Some((stream::iter(batch), (this, end)))
        })
        .flatten()
        .boxed()
    }

    /// Run the crawl to completion
    pub async fn collect_all(&mut self) -> Vec<Listing> {
        self.stream().collect().await
    }

    /// List the directories of the keys in `indices` concurrently
    async fn read_batch(&mut self, indices: Range<usize>) -> Vec<Listing> {
        let mut pending = Vec::with_capacity(indices.len());

        for index in indices {
            let Some(key) = self.space.get(index) else {
                continue;
            };
            self.stats.keys_searched += 1;

            let path = match key.directory() {
                Directory::Remote(path) => path,
                Directory::Unsupported => {
                    debug!(
                        "{} publishes no {} {} directory",
                        key.data_center, key.data_rate, key.rinex_version
                    );
                    self.stats.unsupported_keys += 1;
                    continue;
                }
            };

            let connection = match self.connection(key.data_center) {
                Ok(connection) => connection,
                Err(e) => {
                    warn!("No connection to {}: {}", key.data_center, e);
                    self.stats.connection_failures += 1;
                    continue;
                }
            };

            if !self.visited.insert((key.data_center, path.clone())) {
                self.stats.revisits_skipped += 1;
                continue;
            }

            pending.push((key, path, connection));
        }

        let listed = join_all(pending.into_iter().map(|(key, path, connection)| async move {
            let names = connection.list(&path).await;
            (key, path, names)
        }))
        .await;

        let mut listings = Vec::new();
        for (key, path, names) in listed {
            self.stats.directories_listed += 1;
            self.stats.files_seen += names.len();
            listings.extend(
                names
                    .into_iter()
                    .filter_map(|name| self.accept(key, &path, name)),
            );
        }
        listings
    }

    /// Classify and filter one listed name
    fn accept(&mut self, key: DirectorySearchKey, path: &str, name: String) -> Option<Listing> {
        let file = match RinexFilename::parse(&name) {
            Ok(file) => ListedFile::Classified(file),
            Err(e) => {
                debug!("{}", e);
                self.stats.unrecognized += 1;
                if !self.include_unrecognized {
                    return None;
                }
                ListedFile::Unrecognized(name)
            }
        };

        if let ListedFile::Classified(classified) = &file {
            if !self.filters.matches(classified) {
                self.stats.filtered += 1;
                return None;
            }
        }

        self.stats.yielded += 1;
        Some(Listing::new(key, path, file))
    }

    fn connection(&mut self, data_center: DataCenter) -> Result<Arc<dyn Connection>> {
        if let Some(connection) = self.connections.get(&data_center) {
            return Ok(Arc::clone(connection));
        }
        let connection = self.factory.connect(data_center)?;
        self.connections.insert(data_center, Arc::clone(&connection));
        Ok(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    use crate::app::defines::{DataRate, DataType, RinexVersion};
    use crate::errors::{AppError, ConfigError, TransportError, TransportResult};

    struct StubConnection {
        data_center: DataCenter,
        names: Vec<String>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Connection for StubConnection {
        fn data_center(&self) -> DataCenter {
            self.data_center
        }

        async fn list(&self, directory: &str) -> Vec<String> {
            self.calls.lock().unwrap().push(directory.to_string());
            self.names.clone()
        }

        async fn download(&self, path: &str) -> TransportResult<Vec<u8>> {
            Err(TransportError::DownloadNotImplemented {
                path: path.to_string(),
            })
        }
    }

    struct StubFactory {
        names: Vec<String>,
        calls: Arc<Mutex<Vec<String>>>,
        refuse: Option<DataCenter>,
    }

    impl StubFactory {
        fn new(names: &[&str]) -> Self {
            Self {
                names: names.iter().map(|n| n.to_string()).collect(),
                calls: Arc::new(Mutex::new(Vec::new())),
                refuse: None,
            }
        }
    }

    impl ConnectionFactory for StubFactory {
        fn connect(&self, data_center: DataCenter) -> Result<Arc<dyn Connection>> {
            if self.refuse == Some(data_center) {
                return Err(AppError::Config(ConfigError::UnsupportedProtocol {
                    protocol: "ftp".to_string(),
                    data_center: data_center.to_string(),
                }));
            }
            Ok(Arc::new(StubConnection {
                data_center,
                names: self.names.clone(),
                calls: Arc::clone(&self.calls),
            }))
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 3, 11).unwrap()
    }

    #[tokio::test]
    async fn test_hours_share_daily_directory() {
        let factory = Arc::new(StubFactory::new(&["trak0700.23o.gz"]));
        let calls = Arc::clone(&factory.calls);
        let options = ListingOptions::new()
            .with_dates([day()])
            .with_data_centers([DataCenter::Ign])
            .with_rinex_versions([RinexVersion::V2])
            .with_hours([0, 1, 2]);

        let mut listing = DirectoryListing::new(options, factory).unwrap();
        let found = listing.collect_all().await;

        assert_eq!(found.len(), 1);
        assert_eq!(calls.lock().unwrap().len(), 1);
        assert_eq!(listing.stats().revisits_skipped, 2);
    }

    #[tokio::test]
    async fn test_unsupported_keys_are_skipped() {
        let factory = Arc::new(StubFactory::new(&["trak0700.23o.gz"]));
        let calls = Arc::clone(&factory.calls);
        let options = ListingOptions::new()
            .with_dates([day()])
            .with_data_centers([DataCenter::Kasi, DataCenter::Whu])
            .with_data_rates([DataRate::Hourly]);

        let mut listing = DirectoryListing::new(options, factory).unwrap();
        assert!(listing.collect_all().await.is_empty());
        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(listing.stats().unsupported_keys, 2);
    }

    #[tokio::test]
    async fn test_connection_failure_skips_center() {
        let mut factory = StubFactory::new(&["NYA100NOR_S_20230700000_01D_30S_MO.crx.gz"]);
        factory.refuse = Some(DataCenter::Cddis);
        let options = ListingOptions::new()
            .with_dates([day()])
            .with_data_centers([DataCenter::Cddis, DataCenter::Ign]);

        let mut listing = DirectoryListing::new(options, Arc::new(factory)).unwrap();
        let found = listing.collect_all().await;

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].data_center, DataCenter::Ign);
        assert_eq!(listing.stats().connection_failures, 1);
    }

    #[tokio::test]
    async fn test_unrecognized_names_optionally_yielded() {
        let names = ["README", "trak0700.23o.gz"];
        let options = ListingOptions::new()
            .with_dates([day()])
            .with_data_centers([DataCenter::Sio])
            .with_rinex_versions([RinexVersion::V2]);

        let mut skipping =
            DirectoryListing::new(options.clone(), Arc::new(StubFactory::new(&names))).unwrap();
        assert_eq!(skipping.collect_all().await.len(), 1);
        assert_eq!(skipping.stats().unrecognized, 1);

        let mut keeping = DirectoryListing::new(
            options.with_unrecognized(true),
            Arc::new(StubFactory::new(&names)),
        )
        .unwrap();
        let found = keeping.collect_all().await;
        assert_eq!(found.len(), 2);
        assert_eq!(found.iter().filter(|l| !l.is_gnss_data()).count(), 1);
    }

    #[tokio::test]
    async fn test_runs_are_independent() {
        let factory = Arc::new(StubFactory::new(&["trak0700.23o.gz"]));
        let calls = Arc::clone(&factory.calls);
        let options = ListingOptions::new()
            .with_dates([day()])
            .with_data_centers([DataCenter::Ign])
            .with_rinex_versions([RinexVersion::V2]);

        let mut listing = DirectoryListing::new(options, factory).unwrap();
        assert_eq!(listing.collect_all().await.len(), 1);
        assert_eq!(listing.collect_all().await.len(), 1);
        assert_eq!(calls.lock().unwrap().len(), 2);
        assert_eq!(listing.stats().yielded, 1);
    }

    #[test]
    fn test_batch_size_defaults_to_center_count() {
        let factory = Arc::new(StubFactory::new(&[]));
        let options = ListingOptions::new()
            .with_dates([day()])
            .with_data_centers([DataCenter::Ign, DataCenter::Sio, DataCenter::Whu])
            .with_data_types([DataType::MixedObs]);
        let listing = DirectoryListing::new(options.clone(), factory.clone()).unwrap();
        assert_eq!(listing.batch_size(), 3);

        let listing = DirectoryListing::new(options.with_batch_size(0), factory).unwrap();
        assert_eq!(listing.batch_size(), 1);
    }
}
