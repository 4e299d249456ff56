//! IGS data centers and their archive layouts
//!
//! Each data center publishes RINEX files under its own directory scheme.
//! The layout is a fixed algorithm per center rather than configuration,
//! so it lives here next to the enumeration.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use super::data_type::DataType;
use super::rinex::{DataRate, RinexVersion};
use crate::errors::ConfigError;

/// Transport protocol a data center is reached with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    Ftp,
    Http,
    Https,
}

impl Protocol {
    /// URL scheme for this protocol
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Ftp => "ftp",
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Self::Ftp => 21,
            Self::Http => 80,
            Self::Https => 443,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// IGS groups data centers into three tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataCenterCategory {
    Global,
    Regional,
    Operational,
}

impl DataCenterCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Regional => "Regional",
            Self::Operational => "Operational",
        }
    }

    /// IGS page describing the tier
    pub fn link(&self) -> &'static str {
        match self {
            Self::Global => "https://igs.org/data-access/#global-dcs",
            Self::Regional => "https://igs.org/data-access/#regional-dcs",
            Self::Operational => "https://igs.org/data-access/#operational-project-dcs",
        }
    }
}

/// Result of resolving a search key to a remote directory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Directory {
    /// Absolute path of the directory on the data center
    Remote(String),
    /// The center does not publish this rate/version combination
    Unsupported,
}

impl Directory {
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Remote(path) => Some(path),
            Self::Unsupported => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// Data centers offering open online archives of GNSS data
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Serialize, Deserialize,
)]
pub enum DataCenter {
    /// NASA Crustal Dynamics Data Information System
    Cddis,
    /// Institut National de l'Information Géographique et Forestière
    Ign,
    /// Korea Astronomy and Space Science Institute
    Kasi,
    /// Scripps Institution of Oceanography
    Sio,
    /// Wuhan University
    Whu,
}

impl DataCenter {
    /// Short label used on the command line and in output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cddis => "CDDIS",
            Self::Ign => "IGN",
            Self::Kasi => "KASI",
            Self::Sio => "SIO",
            Self::Whu => "WHU",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Self::Cddis => "NASA Center for Data and Information Services",
            Self::Ign => "Institut National de l'Information Géographique et Forestière",
            Self::Kasi => "Korea Astronomy and Space Science Institute",
            Self::Sio => "Scripps Institution of Oceanography",
            Self::Whu => "Wuhan University",
        }
    }

    pub fn protocol(&self) -> Protocol {
        match self {
            Self::Cddis => Protocol::Https,
            Self::Ign | Self::Kasi | Self::Sio | Self::Whu => Protocol::Ftp,
        }
    }

    pub fn domain(&self) -> &'static str {
        match self {
            Self::Cddis => "cddis.nasa.gov",
            Self::Ign => "igs.ign.fr",
            Self::Kasi => "nfs.kasi.re.kr",
            Self::Sio => "garner.ucsd.edu",
            Self::Whu => "igs.gnsswhu.cn",
        }
    }

    pub fn port(&self) -> u16 {
        self.protocol().default_port()
    }

    pub fn category(&self) -> DataCenterCategory {
        DataCenterCategory::Global
    }

    /// Page documenting the center's archive
    pub fn info(&self) -> &'static str {
        match self {
            Self::Cddis => "https://cddis.gsfc.nasa.gov/Data_and_Derived_Products/GNSS/GNSS_data_and_product_archive.html",
            Self::Ign => "https://www.ign.fr",
            Self::Kasi => "https://gnss.kasi.re.kr/gdc_download.php",
            Self::Sio => "http://sopac-csrc.ucsd.edu/index.php/data-download",
            Self::Whu => "http://www.igs.gnsswhu.cn/index.php/home/index/index.html",
        }
    }

    /// Base URL of the archive (scheme and host)
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.protocol().scheme(), self.domain())
    }

    /// Root of the GNSS data tree on the server
    pub fn gnss_root(&self) -> &'static str {
        match self {
            Self::Cddis => "/archive/gnss/data",
            Self::Ign => "/pub/igs/data",
            Self::Kasi => "/gps/data",
            Self::Sio => "/pub/rinex",
            Self::Whu => "/pub/gps/data",
        }
    }

    /// Centers in the given tier
    pub fn in_category(category: DataCenterCategory) -> Vec<DataCenter> {
        Self::iter().filter(|c| c.category() == category).collect()
    }

    /// Resolve the directory holding files for one search key.
    ///
    /// Combinations a center does not publish resolve to
    /// [`Directory::Unsupported`] so callers can skip them.
    pub fn directory(
        &self,
        _rinex_version: RinexVersion,
        data_rate: DataRate,
        date: NaiveDate,
        data_type: DataType,
        hour: u8,
    ) -> Directory {
        // every layout keeps RINEX 2 and 3 files side by side
        let root = self.gnss_root();
        let year = date.year();
        let doy = date.ordinal();
        let yy = year.rem_euclid(100);
        let sub = type_subdirectory(data_type);

        let path = match (self, data_rate) {
            (Self::Cddis, DataRate::Daily) => {
                format!("{root}/daily/{year}/{doy:03}/{yy:02}{sub}")
            }
            (Self::Cddis, DataRate::Hourly) => {
                format!("{root}/hourly/{year}/{doy:03}/{hour:02}")
            }
            (Self::Cddis, DataRate::HighRate) => {
                format!("{root}/highrate/{year}/{doy:03}/{yy:02}{sub}/{hour:02}")
            }

            (Self::Ign, DataRate::Daily) => format!("{root}/{year}/{doy:03}"),
            (Self::Ign, DataRate::Hourly) => format!("{root}/hourly/{year}/{doy:03}"),
            (Self::Ign, DataRate::HighRate) => format!("{root}/highrate/{year}/{doy:03}"),

            (Self::Kasi, DataRate::Daily) => {
                format!("{root}/daily/{year}/{doy:03}/{yy:02}{sub}")
            }
            (Self::Kasi, _) => return Directory::Unsupported,

            (Self::Sio, DataRate::Daily) => format!("{root}/{year}/{doy:03}"),
            (Self::Sio, DataRate::Hourly) => return Directory::Unsupported,
            (Self::Sio, DataRate::HighRate) => {
                format!("{root}/rinex_highrate/{year}/{doy:03}")
            }

            (Self::Whu, DataRate::Daily) => format!("{root}/daily/{year}/{doy:03}"),
            (Self::Whu, _) => return Directory::Unsupported,
        };

        Directory::Remote(path)
    }
}

/// Suffix letter of per-type daily subdirectories (`23d`, `23n`, ...).
/// Observation files are archived Hatanaka-compressed under `d`.
fn type_subdirectory(data_type: DataType) -> char {
    if data_type.is_observation() {
        'd'
    } else {
        data_type.r2code()
    }
}

impl fmt::Display for DataCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DataCenter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::iter()
            .find(|c| c.label() == upper)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "data center",
                value: s.to_string(),
                expected: Self::iter().map(|c| c.label()).collect::<Vec<_>>().join(", "),
            })
    }
}
