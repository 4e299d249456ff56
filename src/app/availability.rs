//! Station data availability
//!
//! Aggregates crawl results into the most recent observation file per known
//! site and grades each site by how old that file is. Sites come from a
//! [`StationRegistry`]; listed stations the registry does not know are
//! counted as ignored.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::defines::{DataRate, RinexVersion};
use crate::app::directory::Listing;
use crate::constants::availability;
use crate::errors::{RegistryError, RegistryResult};

/// Known sites
pub trait StationRegistry {
    /// Site name for a listed station, when exactly one site matches
    fn resolve(&self, station: &str) -> Option<&str>;
}

/// Sites read from a text file with one name per line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteDirectory {
    sites: Vec<String>,
}

impl SiteDirectory {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sites = names
            .into_iter()
            .map(Into::into)
            .map(|name: String| name.trim().to_string())
            .filter(|name| !name.is_empty() && !name.starts_with('#'))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self { sites }
    }

    /// Read a site file; blank lines and `#` comments are skipped
    pub fn load(path: &Path) -> RegistryResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let directory = Self::from_names(content.lines());
        if directory.is_empty() {
            return Err(RegistryError::Empty {
                path: path.to_path_buf(),
            });
        }
        debug!("Loaded {} sites from {}", directory.len(), path.display());
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl StationRegistry for SiteDirectory {
    fn resolve(&self, station: &str) -> Option<&str> {
        let prefix = station.to_lowercase();
        let mut matches = self
            .sites
            .iter()
            .filter(|site| site.to_lowercase().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(site), None) => Some(site.as_str()),
            _ => None,
        }
    }
}

/// How recent a site's data is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Health {
    Healthy,
    Stale,
    Unhealthy,
}

/// Ages, in days, at which a site's newest file makes it stale or unhealthy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthThresholds {
    pub stale_after_days: u32,
    pub unhealthy_after_days: u32,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            stale_after_days: availability::STALE_AFTER_DAYS,
            unhealthy_after_days: availability::UNHEALTHY_AFTER_DAYS,
        }
    }
}

impl HealthThresholds {
    /// Grade a site whose newest file is from `last`
    pub fn grade(&self, last: NaiveDate, today: NaiveDate) -> Health {
        let before = |days: u32| today.checked_sub_days(Days::new(days.into()));
        if before(self.unhealthy_after_days).is_some_and(|limit| last < limit) {
            Health::Unhealthy
        } else if before(self.stale_after_days).is_some_and(|limit| last < limit) {
            Health::Stale
        } else {
            Health::Healthy
        }
    }
}

/// One day of data for a site
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AvailabilityRecord {
    pub site: String,
    pub rinex_version: RinexVersion,
    pub data_rate: DataRate,
    pub date: NaiveDate,
}

/// Site and the date of its newest file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteStatus {
    pub site: String,
    pub last: NaiveDate,
    pub health: Health,
}

/// Graded sites and what was ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AvailabilityReport {
    pub healthy: Vec<SiteStatus>,
    pub stale: Vec<SiteStatus>,
    pub unhealthy: Vec<SiteStatus>,
    /// Listed stations no site matched
    pub ignored: BTreeSet<String>,
}

impl AvailabilityReport {
    /// Number of sites with data
    pub fn updated(&self) -> usize {
        self.healthy.len() + self.stale.len() + self.unhealthy.len()
    }
}

/// Collects listings into per-site availability
pub struct AvailabilityTracker<R> {
    registry: R,
    records: BTreeSet<AvailabilityRecord>,
    latest: BTreeMap<String, NaiveDate>,
    ignored: BTreeSet<String>,
}

impl<R: StationRegistry> AvailabilityTracker<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            records: BTreeSet::new(),
            latest: BTreeMap::new(),
            ignored: BTreeSet::new(),
        }
    }

    /// Record a listing; returns whether it added data for a known site.
    ///
    /// Only observation files count.
    pub fn record(&mut self, listing: &Listing) -> bool {
        let Some(file) = listing.file.classified() else {
            return false;
        };
        if !file.data_type().is_observation() {
            return false;
        }

        let Some(site) = self.registry.resolve(file.station()) else {
            self.ignored.insert(file.station().to_string());
            return false;
        };
        let site = site.to_string();

        let date = file.date();
        self.latest
            .entry(site.clone())
            .and_modify(|last| *last = (*last).max(date))
            .or_insert(date);

        self.records.insert(AvailabilityRecord {
            site,
            rinex_version: file.rinex_version(),
            data_rate: file.data_rate().unwrap_or(listing.key.data_rate),
            date,
        })
    }

    /// Every distinct (site, version, rate, date) seen
    pub fn records(&self) -> impl Iterator<Item = &AvailabilityRecord> {
        self.records.iter()
    }

    /// Grade every site with data against `today`
    pub fn report(&self, today: NaiveDate, thresholds: HealthThresholds) -> AvailabilityReport {
        let mut report = AvailabilityReport {
            ignored: self.ignored.clone(),
            ..Default::default()
        };

        for (site, last) in &self.latest {
            let health = thresholds.grade(*last, today);
            let status = SiteStatus {
                site: site.clone(),
                last: *last,
                health,
            };
            match health {
                Health::Healthy => report.healthy.push(status),
                Health::Stale => report.stale.push(status),
                Health::Unhealthy => report.unhealthy.push(status),
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::defines::{DataCenter, DataType};
    use crate::app::directory::{DirectorySearchKey, ListedFile};
    use crate::app::file::RinexFilename;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn listing(name: &str) -> Listing {
        let file = RinexFilename::parse(name).unwrap();
        let key = DirectorySearchKey {
            hour: 0,
            data_type: DataType::MixedObs,
            date: file.date(),
            data_rate: DataRate::Daily,
            rinex_version: file.rinex_version(),
            data_center: DataCenter::Ign,
        };
        Listing::new(key, "/pub/igs/data", ListedFile::Classified(file))
    }

    fn sites() -> SiteDirectory {
        SiteDirectory::from_names(["NYA100NOR", "NYA200NOR", "TRAK00USA", "ABMF00GLP"])
    }

    #[test]
    fn test_resolve_prefix_case_insensitive() {
        let sites = sites();
        assert_eq!(sites.resolve("trak"), Some("TRAK00USA"));
        assert_eq!(sites.resolve("NYA100NOR"), Some("NYA100NOR"));
        assert_eq!(sites.resolve("nya1"), Some("NYA100NOR"));
        // two sites start with "nya"
        assert_eq!(sites.resolve("nya"), None);
        assert_eq!(sites.resolve("zzzz"), None);
    }

    #[test]
    fn test_load_site_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# IGS sites\nTRAK00USA\n\n  ABMF00GLP  \nTRAK00USA").unwrap();

        let sites = SiteDirectory::load(file.path()).unwrap();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites.resolve("abmf"), Some("ABMF00GLP"));
    }

    #[test]
    fn test_load_empty_site_file() {
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(
            SiteDirectory::load(file.path()),
            Err(RegistryError::Empty { .. })
        ));
    }

    #[test]
    fn test_grading() {
        let today = day(2023, 3, 31);
        let thresholds = HealthThresholds::default();
        assert_eq!(thresholds.grade(day(2023, 3, 30), today), Health::Healthy);
        assert_eq!(thresholds.grade(day(2023, 3, 21), today), Health::Healthy);
        assert_eq!(thresholds.grade(day(2023, 3, 20), today), Health::Stale);
        assert_eq!(thresholds.grade(day(2023, 3, 1), today), Health::Stale);
        assert_eq!(thresholds.grade(day(2023, 2, 28), today), Health::Unhealthy);
    }

    #[test]
    fn test_tracker_keeps_latest_observation() {
        let mut tracker = AvailabilityTracker::new(sites());

        assert!(tracker.record(&listing("trak0700.23d.Z")));
        assert!(tracker.record(&listing("trak0850.23d.Z")));
        assert!(!tracker.record(&listing("trak0850.23d.Z")));
        assert!(tracker.record(&listing("ABMF00GLP_R_20230200000_01D_30S_MO.crx.gz")));
        // navigation files do not count
        assert!(!tracker.record(&listing("NYA100NOR_R_20230890000_01D_GN.rnx.gz")));
        // unknown station
        assert!(!tracker.record(&listing("zzzz0890.23o.Z")));

        let report = tracker.report(day(2023, 3, 31), HealthThresholds::default());
        assert_eq!(report.updated(), 2);
        assert!(report.stale.is_empty());
        assert_eq!(report.healthy[0].site, "TRAK00USA");
        assert_eq!(report.healthy[0].last, day(2023, 3, 26));
        assert_eq!(report.unhealthy[0].site, "ABMF00GLP");
        assert_eq!(report.unhealthy[0].last, day(2023, 1, 20));
        assert!(report.ignored.contains("zzzz"));
        assert_eq!(tracker.records().count(), 3);
    }
}
