//! Search keys and the lazily enumerated search space
//!
//! The search space is the product of hours, data types, dates, data rates,
//! RINEX versions and data centers. Keys are computed from their index on
//! demand, with the data center varying fastest, so consecutive keys (and
//! therefore each concurrent batch) spread across as many centers as
//! possible.

use chrono::NaiveDate;
use serde::Serialize;

use crate::app::defines::{DataCenter, DataRate, DataType, Directory, RinexVersion};

/// One point of the search space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DirectorySearchKey {
    pub hour: u8,
    pub data_type: DataType,
    pub date: NaiveDate,
    pub data_rate: DataRate,
    pub rinex_version: RinexVersion,
    pub data_center: DataCenter,
}

impl DirectorySearchKey {
    /// Remote directory this key resolves to
    pub fn directory(&self) -> Directory {
        self.data_center.directory(
            self.rinex_version,
            self.data_rate,
            self.date,
            self.data_type,
            self.hour,
        )
    }
}

/// Cartesian product of the search dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpace {
    hours: Vec<u8>,
    data_types: Vec<DataType>,
    dates: Vec<NaiveDate>,
    data_rates: Vec<DataRate>,
    rinex_versions: Vec<RinexVersion>,
    data_centers: Vec<DataCenter>,
}

impl SearchSpace {
    pub fn new(
        hours: Vec<u8>,
        data_types: Vec<DataType>,
        dates: Vec<NaiveDate>,
        data_rates: Vec<DataRate>,
        rinex_versions: Vec<RinexVersion>,
        data_centers: Vec<DataCenter>,
    ) -> Self {
        Self {
            hours,
            data_types,
            dates,
            data_rates,
            rinex_versions,
            data_centers,
        }
    }

    /// Number of keys; zero if any dimension is empty
    pub fn len(&self) -> usize {
        self.hours.len()
            * self.data_types.len()
            * self.dates.len()
            * self.data_rates.len()
            * self.rinex_versions.len()
            * self.data_centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn data_centers(&self) -> &[DataCenter] {
        &self.data_centers
    }

    /// Key at `index` in enumeration order
    pub fn get(&self, index: usize) -> Option<DirectorySearchKey> {
        if index >= self.len() {
            return None;
        }

        let mut rest = index;
        let mut digit = |radix: usize| {
            let value = rest % radix;
            rest /= radix;
            value
        };

        let data_center = self.data_centers[digit(self.data_centers.len())];
        let rinex_version = self.rinex_versions[digit(self.rinex_versions.len())];
        let data_rate = self.data_rates[digit(self.data_rates.len())];
        let date = self.dates[digit(self.dates.len())];
        let data_type = self.data_types[digit(self.data_types.len())];
        let hour = self.hours[digit(self.hours.len())];

        Some(DirectorySearchKey {
            hour,
            data_type,
            date,
            data_rate,
            rinex_version,
            data_center,
        })
    }

    pub fn iter(&self) -> SearchKeys<'_> {
        SearchKeys {
            space: self,
            next: 0,
        }
    }
}

/// Iterator over a [`SearchSpace`]
pub struct SearchKeys<'a> {
    space: &'a SearchSpace,
    next: usize,
}

impl Iterator for SearchKeys<'_> {
    type Item = DirectorySearchKey;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.space.get(self.next)?;
        self.next += 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.space.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SearchKeys<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 3, d).unwrap()
    }

    fn space() -> SearchSpace {
        SearchSpace::new(
            vec![0, 12],
            vec![DataType::MixedObs],
            vec![day(10), day(11), day(12)],
            vec![DataRate::Daily, DataRate::Hourly],
            vec![RinexVersion::V3],
            vec![DataCenter::Cddis, DataCenter::Ign, DataCenter::Kasi],
        )
    }

    #[test]
    fn test_len_is_product() {
        assert_eq!(space().len(), 2 * 3 * 2 * 3);
        assert_eq!(space().iter().len(), 36);
    }

    #[test]
    fn test_data_center_varies_fastest() {
        let keys: Vec<_> = space().iter().take(4).collect();
        assert_eq!(keys[0].data_center, DataCenter::Cddis);
        assert_eq!(keys[1].data_center, DataCenter::Ign);
        assert_eq!(keys[2].data_center, DataCenter::Kasi);
        assert_eq!(keys[3].data_center, DataCenter::Cddis);
        assert_eq!(keys[0].data_rate, DataRate::Daily);
        assert_eq!(keys[3].data_rate, DataRate::Hourly);
        assert!(keys.iter().all(|k| k.hour == 0 && k.date == day(10)));
    }

    #[test]
    fn test_hour_varies_slowest() {
        let keys: Vec<_> = space().iter().collect();
        assert!(keys[..18].iter().all(|k| k.hour == 0));
        assert!(keys[18..].iter().all(|k| k.hour == 12));
    }

    #[test]
    fn test_every_key_once() {
        let keys: HashSet<_> = space().iter().collect();
        assert_eq!(keys.len(), 36);
        assert_eq!(space().get(36), None);
    }

    #[test]
    fn test_empty_dimension() {
        let space = SearchSpace::new(
            vec![0],
            vec![],
            vec![day(1)],
            vec![DataRate::Daily],
            vec![RinexVersion::V3],
            vec![DataCenter::Ign],
        );
        assert!(space.is_empty());
        assert_eq!(space.iter().next(), None);
    }
}
