//! RINEX data types and data sources

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use super::set::CategorySet;
use crate::errors::ConfigError;

/// Kind of data held in a RINEX file
///
/// Long file names carry a two letter label (`MO`, `GN`, ...), short file
/// names a single letter code (`o`, `n`, ...). Several types share a label or
/// code; lookups resolve to the first type declared here.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
pub enum DataType {
    MixedObs,
    MixedNav,
    CombinedNav,
    HatanakaObs,
    BeidouNav,
    GlonassNav,
    SbasNav,
    IrnssNav,
    GalileoNav,
    Meteorology,
    GpsNav,
    QzssNav,
    Summary,
    MixedEph,
    GpsObs,
    GlonassObs,
    GalileoObs,
    QzssObs,
    BeidouObs,
    IrnssObs,
    SbasObs,
}

impl DataType {
    /// RINEX 2 single letter codes for this type
    pub fn r2codes(&self) -> &'static [char] {
        match self {
            Self::MixedObs => &['o'],
            Self::MixedNav => &['p'],
            Self::CombinedNav => &['b'],
            Self::HatanakaObs => &['d'],
            Self::BeidouNav => &['f'],
            Self::GlonassNav => &['g'],
            Self::SbasNav => &['h'],
            Self::IrnssNav => &['i'],
            Self::GalileoNav => &['l'],
            Self::Meteorology => &['m'],
            Self::GpsNav => &['n'],
            Self::QzssNav => &['q'],
            Self::Summary => &['s'],
            Self::MixedEph => &['x'],
            Self::GpsObs
            | Self::GlonassObs
            | Self::GalileoObs
            | Self::QzssObs
            | Self::BeidouObs
            | Self::IrnssObs
            | Self::SbasObs => &['o', 'd'],
        }
    }

    /// Primary RINEX 2 code
    pub fn r2code(&self) -> char {
        self.r2codes()[0]
    }

    /// RINEX 3 two letter label
    pub fn label(&self) -> &'static str {
        match self {
            Self::MixedObs | Self::HatanakaObs | Self::Summary => "MO",
            Self::MixedNav | Self::CombinedNav | Self::MixedEph => "MN",
            Self::BeidouNav => "CN",
            Self::GlonassNav => "RN",
            Self::SbasNav => "SN",
            Self::IrnssNav => "IN",
            Self::GalileoNav => "EN",
            Self::Meteorology => "MM",
            Self::GpsNav => "GN",
            Self::QzssNav => "JN",
            Self::GpsObs => "GO",
            Self::GlonassObs => "RO",
            Self::GalileoObs => "EO",
            Self::QzssObs => "JO",
            Self::BeidouObs => "CO",
            Self::IrnssObs => "IO",
            Self::SbasObs => "SO",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::MixedObs => "Mixed observation data",
            Self::MixedNav => "Navigation data (All GNSS Constellations)",
            Self::CombinedNav => "Combined broadcast ephemeris data",
            Self::HatanakaObs => "Hatanaka-compressed mixed observation data",
            Self::BeidouNav => "BDS Navigation data",
            Self::GlonassNav => "GLONASS Navigation data",
            Self::SbasNav => "SBAS Navigation data",
            Self::IrnssNav => "IRNSS Navigation data",
            Self::GalileoNav => "Galileo Navigation data",
            Self::Meteorology => "Meteorological Observation",
            Self::GpsNav => "GPS Navigation data",
            Self::QzssNav => "QZSS Navigation data",
            Self::Summary => "Observation summary files",
            Self::MixedEph => "Mixed broadcast ephemeris data",
            Self::GpsObs => "GPS Observation data",
            Self::GlonassObs => "GLONASS Observation data",
            Self::GalileoObs => "Galileo Observation data",
            Self::QzssObs => "QZSS Observation data",
            Self::BeidouObs => "BDS Observation data",
            Self::IrnssObs => "IRNSS Observation data",
            Self::SbasObs => "SBAS Observation data",
        }
    }

    /// Whether this type holds observables
    pub fn is_observation(&self) -> bool {
        Self::observables().contains(self)
    }

    /// Whether this type holds navigation messages
    pub fn is_navigation(&self) -> bool {
        Self::navigation().contains(self)
    }

    /// All observation data types
    pub fn observables() -> CategorySet<DataType> {
        [
            Self::MixedObs,
            Self::HatanakaObs,
            Self::GpsObs,
            Self::GlonassObs,
            Self::GalileoObs,
            Self::QzssObs,
            Self::BeidouObs,
            Self::IrnssObs,
            Self::SbasObs,
        ]
        .into_iter()
        .collect()
    }

    /// All navigation data types
    pub fn navigation() -> CategorySet<DataType> {
        [
            Self::MixedNav,
            Self::CombinedNav,
            Self::BeidouNav,
            Self::GlonassNav,
            Self::SbasNav,
            Self::IrnssNav,
            Self::GalileoNav,
            Self::GpsNav,
            Self::QzssNav,
            Self::MixedEph,
        ]
        .into_iter()
        .collect()
    }

    /// Resolve a RINEX 3 two letter label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::iter().find(|t| t.label() == label)
    }

    /// Resolve a RINEX 2 single letter code
    pub fn from_r2code(code: char) -> Option<Self> {
        Self::iter().find(|t| t.r2codes().contains(&code))
    }

    /// Resolve either form of code as found in a file name
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_r2code(c),
            _ => Self::from_label(code),
        }
    }

    /// Variant name in kebab case, as accepted on the command line
    pub fn slug(&self) -> &'static str {
        (*self).into()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl FromStr for DataType {
    type Err = ConfigError;

    /// Accepts a kebab case slug ("mixed-obs"), a RINEX 3 label ("MO") or
    /// a RINEX 2 code ("o")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let folded = trimmed.to_lowercase();
        Self::iter()
            .find(|t| t.slug() == folded)
            .or_else(|| Self::from_code(trimmed))
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "data type",
                value: s.to_string(),
                expected: Self::iter().map(|t| t.slug()).collect::<Vec<_>>().join(", "),
            })
    }
}

/// Origin of the data in a RINEX 3 file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Serialize, Deserialize)]
pub enum DataSource {
    Receiver,
    Stream,
    Unknown,
}

impl DataSource {
    /// Single letter code used in long file names
    pub fn code(&self) -> char {
        match self {
            Self::Receiver => 'R',
            Self::Stream => 'S',
            Self::Unknown => 'U',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Receiver => "Receiver",
            Self::Stream => "Stream",
            Self::Unknown => "Unknown",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Receiver => "From Receiver data using vendor or other software.",
            Self::Stream => "From data stream (RTCM or other)",
            Self::Unknown => "Unknown source",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::iter().find(|s| code.len() == 1 && code.starts_with(s.code()))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
