//! RINEX format versions and data rate categories

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::errors::ConfigError;

/// Major RINEX format version
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Serialize, Deserialize,
)]
pub enum RinexVersion {
    V1,
    V2,
    V3,
    V4,
}

impl RinexVersion {
    /// Major version number
    pub fn major(&self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
            Self::V3 => 3,
            Self::V4 => 4,
        }
    }

    /// Human readable label (e.g. "RINEX 3")
    pub fn label(&self) -> &'static str {
        match self {
            Self::V1 => "RINEX 1",
            Self::V2 => "RINEX 2",
            Self::V3 => "RINEX 3",
            Self::V4 => "RINEX 4",
        }
    }

    /// Short slug used on the command line (e.g. "3")
    pub fn slug(&self) -> &'static str {
        match self {
            Self::V1 => "1",
            Self::V2 => "2",
            Self::V3 => "3",
            Self::V4 => "4",
        }
    }

    /// Publication date of the first revision of this major version
    pub fn published(&self) -> NaiveDate {
        let (y, m, d) = match self {
            Self::V1 => (1988, 1, 1),
            Self::V2 => (1993, 4, 1),
            Self::V3 => (2007, 11, 28),
            Self::V4 => (2021, 12, 1),
        };
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
    }

    /// Versions that can be searched for on data centers
    pub fn major_versions() -> [RinexVersion; 3] {
        [Self::V2, Self::V3, Self::V4]
    }

    /// Look up a version from its major number
    pub fn from_major(major: u8) -> Option<Self> {
        Self::iter().find(|v| v.major() == major)
    }
}

impl fmt::Display for RinexVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RinexVersion {
    type Err = ConfigError;

    /// Accepts a major slug ("3"), a minor revision ("3.04") or a label
    /// ("RINEX 3"). Only searchable major versions are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let numeric = trimmed
            .strip_prefix("RINEX ")
            .or_else(|| trimmed.strip_prefix("rinex "))
            .unwrap_or(trimmed);
        let major = numeric.split('.').next().unwrap_or(numeric);
        major
            .parse::<u8>()
            .ok()
            .and_then(Self::from_major)
            .filter(|version| Self::major_versions().contains(version))
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "rinex version",
                value: s.to_string(),
                expected: Self::major_versions()
                    .iter()
                    .map(|v| v.slug())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Coarse file cadence of a RINEX file
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Serialize, Deserialize,
)]
pub enum DataRate {
    Daily,
    Hourly,
    HighRate,
}

impl DataRate {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Hourly => "Hourly",
            Self::HighRate => "High Rate",
        }
    }

    /// Short slug used on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Hourly => "hourly",
            Self::HighRate => "high",
        }
    }

    /// Categorize a file by the span of data it holds.
    ///
    /// Spans of a day or more are daily files, an hour or more hourly files,
    /// anything shorter is high rate.
    pub fn from_span(span: Duration) -> Self {
        match span.as_secs() {
            s if s >= 86_400 => Self::Daily,
            s if s >= 3_600 => Self::Hourly,
            _ => Self::HighRate,
        }
    }
}

impl fmt::Display for DataRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DataRate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.trim().to_lowercase();
        Self::iter()
            .find(|rate| rate.slug() == folded || rate.label().to_lowercase() == folded)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "data rate",
                value: s.to_string(),
                expected: Self::iter()
                    .map(|r| r.slug())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
