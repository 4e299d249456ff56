//! Crawl filters and their validation
//!
//! Empty dimensions fall back to defaults: every data center, RINEX 3, daily
//! files, mixed observation data, hour 0 and today's date.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::search::SearchSpace;
use crate::app::defines::{CategorySet, DataCenter, DataRate, DataType, RinexVersion};
use crate::app::file::RinexFilename;
use crate::constants::listing;
use crate::errors::{ConfigError, ConfigResult};

/// What to search for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingOptions {
    /// Station names; only the first four characters are compared
    pub stations: Vec<String>,
    pub data_centers: CategorySet<DataCenter>,
    pub rinex_versions: CategorySet<RinexVersion>,
    pub data_rates: CategorySet<DataRate>,
    pub data_types: CategorySet<DataType>,
    pub hours: CategorySet<u8>,
    /// Explicit dates; exclusive with `start`/`end`
    pub dates: CategorySet<NaiveDate>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Directories listed concurrently; defaults to the number of data centers
    pub batch_size: Option<usize>,
    /// Yield names matching no RINEX convention instead of skipping them
    pub include_unrecognized: bool,
}

impl ListingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stations<I, S>(mut self, stations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stations = stations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_data_centers(mut self, centers: impl IntoIterator<Item = DataCenter>) -> Self {
        self.data_centers = centers.into_iter().collect();
        self
    }

    pub fn with_rinex_versions(
        mut self,
        versions: impl IntoIterator<Item = RinexVersion>,
    ) -> Self {
        self.rinex_versions = versions.into_iter().collect();
        self
    }

    pub fn with_data_rates(mut self, rates: impl IntoIterator<Item = DataRate>) -> Self {
        self.data_rates = rates.into_iter().collect();
        self
    }

    pub fn with_data_types(mut self, types: impl IntoIterator<Item = DataType>) -> Self {
        self.data_types = types.into_iter().collect();
        self
    }

    pub fn with_hours(mut self, hours: impl IntoIterator<Item = u8>) -> Self {
        self.hours = hours.into_iter().collect();
        self
    }

    pub fn with_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.dates = dates.into_iter().collect();
        self
    }

    /// Inclusive range; the endpoints may come in either order
    pub fn with_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn with_unrecognized(mut self, include: bool) -> Self {
        self.include_unrecognized = include;
        self
    }

    /// Dates to search, resolved against `today` when none are given
    pub fn resolve_dates(&self, today: NaiveDate) -> ConfigResult<Vec<NaiveDate>> {
        if !self.dates.is_empty() {
            if self.start.is_some() || self.end.is_some() {
                return Err(ConfigError::ConflictingDates);
            }
            return Ok(self.dates.to_vec());
        }

        let (start, end) = match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => (end, start),
            (Some(start), Some(end)) => (start, end),
            (Some(only), None) | (None, Some(only)) => (only, only),
            (None, None) => (today, today),
        };

        Ok(start.iter_days().take_while(|day| *day <= end).collect())
    }

    /// Validate the options and lay out the search space
    pub fn search_space(&self) -> ConfigResult<SearchSpace> {
        self.search_space_on(Utc::now().date_naive())
    }

    pub(crate) fn search_space_on(&self, today: NaiveDate) -> ConfigResult<SearchSpace> {
        let dates = self.resolve_dates(today)?;

        if let Some(hour) = self.hours.iter().find(|h| *h > listing::MAX_HOUR) {
            return Err(ConfigError::InvalidValue {
                field: "hour",
                value: hour.to_string(),
                expected: format!("0-{}", listing::MAX_HOUR),
            });
        }

        Ok(SearchSpace::new(
            or_default(&self.hours, vec![listing::DEFAULT_HOUR]),
            or_default(&self.data_types, vec![DataType::MixedObs]),
            dates,
            or_default(&self.data_rates, vec![DataRate::Daily]),
            or_default(&self.rinex_versions, vec![RinexVersion::V3]),
            or_default(&self.data_centers, DataCenter::iter().collect()),
        ))
    }

    /// Filters applied to classified files
    pub fn filters(&self) -> FileFilters {
        FileFilters {
            stations: self.stations.iter().map(|s| site_code(s)).collect(),
            rinex_versions: nonempty_or(&self.rinex_versions, RinexVersion::V3),
            data_types: nonempty_or(&self.data_types, DataType::MixedObs),
        }
    }
}

fn or_default<T: Ord + Copy>(set: &CategorySet<T>, default: Vec<T>) -> Vec<T> {
    if set.is_empty() {
        default
    } else {
        set.to_vec()
    }
}

fn nonempty_or<T: Ord + Copy>(set: &CategorySet<T>, default: T) -> CategorySet<T> {
    if set.is_empty() {
        CategorySet::single(default)
    } else {
        set.clone()
    }
}

/// Lower-cased first four characters of a station name
pub fn site_code(station: &str) -> String {
    station.chars().take(4).collect::<String>().to_lowercase()
}

/// Accepts or rejects classified files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilters {
    stations: BTreeSet<String>,
    rinex_versions: CategorySet<RinexVersion>,
    data_types: CategorySet<DataType>,
}

impl FileFilters {
    pub fn matches(&self, file: &RinexFilename) -> bool {
        self.rinex_versions.contains(&file.rinex_version())
            && self.data_types.contains(&file.data_type())
            && (self.stations.is_empty() || self.stations.contains(&file.site_code()))
    }
}
