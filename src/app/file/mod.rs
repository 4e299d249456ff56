//! RINEX filename classification
//!
//! A [`RinexFilename`] is built from the final segment of a remote path. Long
//! (RINEX 3+) names are tried before short (RINEX 2) names; the first pattern
//! that matches decides the version, and [`FileOverrides`] may replace any
//! value a pattern would otherwise provide.
//!
//! ```text
//! NYA100NOR_S_20230700000_01D_30S_MO.crx.sum.gz
//! tabv069w.21m.Z
//! ```

pub mod mimetype;
pub mod patterns;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::app::defines::{DataRate, DataSource, DataType, RinexVersion};
use crate::errors::{FilenameError, FilenameResult};

pub use mimetype::MimeType;
pub use patterns::{decode_hour, normalize_year, parse_period};
use patterns::PATTERNS;

/// Values that take precedence over what a filename pattern captures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOverrides {
    pub rinex_version: Option<RinexVersion>,
    pub station: Option<String>,
    pub data_source: Option<DataSource>,
    pub data_rate: Option<DataRate>,
    pub data_type: Option<DataType>,
    pub year: Option<i32>,
    pub day_of_year: Option<u16>,
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    pub data_span: Option<Duration>,
    pub sampling_period: Option<Duration>,
    pub file_format: Option<String>,
    pub aggregation: Option<String>,
    pub extension: Option<String>,
}

impl FileOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rinex_version(mut self, version: RinexVersion) -> Self {
        self.rinex_version = Some(version);
        self
    }

    pub fn with_station(mut self, station: impl Into<String>) -> Self {
        self.station = Some(station.into());
        self
    }

    pub fn with_data_source(mut self, source: DataSource) -> Self {
        self.data_source = Some(source);
        self
    }

    /// Replace the rate category; a captured sampling period is kept
    pub fn with_data_rate(mut self, rate: DataRate) -> Self {
        self.data_rate = Some(rate);
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Two digit years are expanded the same way captured ones are
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_day_of_year(mut self, day_of_year: u16) -> Self {
        self.day_of_year = Some(day_of_year);
        self
    }

    pub fn with_hour(mut self, hour: u8) -> Self {
        self.hour = Some(hour);
        self
    }

    pub fn with_minute(mut self, minute: u8) -> Self {
        self.minute = Some(minute);
        self
    }

    /// Also derives the rate category unless one is overridden
    pub fn with_data_span(mut self, span: Duration) -> Self {
        self.data_span = Some(span);
        self
    }

    pub fn with_sampling_period(mut self, period: Duration) -> Self {
        self.sampling_period = Some(period);
        self
    }

    pub fn with_file_format(mut self, format: impl Into<String>) -> Self {
        self.file_format = Some(format.into());
        self
    }

    pub fn with_aggregation(mut self, aggregation: impl Into<String>) -> Self {
        self.aggregation = Some(aggregation.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }
}

/// A classified RINEX filename
///
/// Every field is validated at construction; a value of this type never
/// carries a partially decoded name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RinexFilename {
    name: String,
    station: String,
    rinex_version: RinexVersion,
    data_source: Option<DataSource>,
    year: i32,
    day_of_year: u16,
    hour: u8,
    minute: u8,
    #[serde(serialize_with = "as_seconds")]
    data_span: Option<Duration>,
    data_rate: Option<DataRate>,
    #[serde(serialize_with = "as_seconds")]
    sampling_period: Option<Duration>,
    data_type: DataType,
    file_format: Option<String>,
    aggregation: Option<String>,
    extension: String,
    datetime: NaiveDateTime,
    mimetype: MimeType,
}

impl RinexFilename {
    /// Classify the final segment of `path`
    pub fn parse(path: &str) -> FilenameResult<Self> {
        Self::parse_with(path, &FileOverrides::default())
    }

    /// Classify the final segment of `path`, preferring `overrides` to any
    /// captured value
    pub fn parse_with(path: &str, overrides: &FileOverrides) -> FilenameResult<Self> {
        let name = path.rsplit('/').next().unwrap_or(path);

        let (pattern, caps) = PATTERNS
            .iter()
            .find_map(|p| p.regex.captures(name).map(|caps| (p, caps)))
            .ok_or_else(|| FilenameError::Unrecognized {
                name: name.to_string(),
            })?;
        let group = |key: &str| caps.name(key).map(|m| m.as_str());

        let rinex_version = overrides.rinex_version.unwrap_or(pattern.rinex_version);

        let station = match (&overrides.station, group("station")) {
            (Some(station), _) => station.clone(),
            (None, Some(station)) => station.to_string(),
            (None, None) => return Err(FilenameError::invalid("station", "")),
        };

        let data_source = match (overrides.data_source, group("data_source")) {
            (Some(source), _) => Some(source),
            (None, Some(code)) => Some(
                DataSource::from_code(code)
                    .ok_or_else(|| FilenameError::invalid("data source", code))?,
            ),
            (None, None) => None,
        };

        let year = match (overrides.year, group("year")) {
            (Some(year), _) => normalize_year(year),
            (None, Some(token)) => normalize_year(
                token
                    .parse()
                    .map_err(|_| FilenameError::invalid("year", token))?,
            ),
            (None, None) => return Err(FilenameError::invalid("year", "")),
        };

        let day_of_year = match (overrides.day_of_year, group("day_of_year")) {
            (Some(doy), _) => doy,
            (None, Some(token)) => token
                .parse()
                .map_err(|_| FilenameError::invalid("day of year", token))?,
            (None, None) => return Err(FilenameError::invalid("day of year", "")),
        };
        if !(1..=366).contains(&day_of_year) {
            return Err(FilenameError::invalid(
                "day of year",
                day_of_year.to_string(),
            ));
        }

        let hour = match (overrides.hour, group("hour")) {
            (Some(hour), _) => hour,
            (None, Some(token)) => {
                decode_hour(token).ok_or_else(|| FilenameError::invalid("hour", token))?
            }
            (None, None) => 0,
        };
        if hour > 23 {
            return Err(FilenameError::invalid("hour", hour.to_string()));
        }

        let minute = match (overrides.minute, group("minute")) {
            (Some(minute), _) => minute,
            (None, Some(token)) => token
                .parse()
                .map_err(|_| FilenameError::invalid("minute", token))?,
            (None, None) => 0,
        };
        if minute > 59 {
            return Err(FilenameError::invalid("minute", minute.to_string()));
        }

        let data_span = match (overrides.data_span, group("data_span")) {
            (Some(span), _) => Some(span),
            (None, Some(token)) => {
                Some(parse_period(token).ok_or_else(|| FilenameError::invalid("data span", token))?)
            }
            (None, None) => None,
        };

        let sampling_period = match (overrides.sampling_period, group("data_rate")) {
            (Some(period), _) => Some(period),
            (None, Some(token)) => Some(
                parse_period(token)
                    .ok_or_else(|| FilenameError::invalid("sampling period", token))?,
            ),
            (None, None) => None,
        };
        if let (None, Some(period)) = (data_span, sampling_period) {
            return Err(FilenameError::RateWithoutSpan {
                value: format!("{}s", period.as_secs()),
            });
        }

        let data_rate = overrides
            .data_rate
            .or_else(|| data_span.map(DataRate::from_span));

        let data_type = match (overrides.data_type, group("data_type")) {
            (Some(data_type), _) => data_type,
            (None, Some(code)) => {
                DataType::from_code(code).ok_or_else(|| FilenameError::invalid("data type", code))?
            }
            (None, None) => return Err(FilenameError::invalid("data type", "")),
        };

        let file_format = overrides
            .file_format
            .clone()
            .or_else(|| group("file_format").map(str::to_string));
        let aggregation = overrides
            .aggregation
            .clone()
            .or_else(|| group("aggregation").map(str::to_string));
        let extension = overrides
            .extension
            .clone()
            .or_else(|| group("extension").map(str::to_string))
            .unwrap_or_default();

        let datetime = NaiveDate::from_ymd_opt(year, 1, 1)
            .and_then(|jan1| jan1.checked_add_days(Days::new(u64::from(day_of_year) - 1)))
            .and_then(|date| date.and_hms_opt(hour.into(), minute.into(), 0))
            .ok_or_else(|| {
                FilenameError::invalid("date", format!("{}-{:03}", year, day_of_year))
            })?;

        Ok(Self {
            name: name.to_string(),
            station,
            rinex_version,
            data_source,
            year,
            day_of_year,
            hour,
            minute,
            data_span,
            data_rate,
            sampling_period,
            data_type,
            file_format,
            aggregation,
            extension,
            datetime,
            mimetype: MimeType::guess(name),
        })
    }

    /// Bare filename as listed by the server
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Station identifier: 9 characters for long names, 4 for short ones
    pub fn station(&self) -> &str {
        &self.station
    }

    /// Lower-cased 4 character site code used for station filtering
    pub fn site_code(&self) -> String {
        self.station.chars().take(4).collect::<String>().to_lowercase()
    }

    pub fn rinex_version(&self) -> RinexVersion {
        self.rinex_version
    }

    /// Only long names carry a data source
    pub fn data_source(&self) -> Option<DataSource> {
        self.data_source
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn day_of_year(&self) -> u16 {
        self.day_of_year
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Span of time covered by the file
    pub fn data_span(&self) -> Option<Duration> {
        self.data_span
    }

    /// Rate category, derived from the data span unless overridden
    pub fn data_rate(&self) -> Option<DataRate> {
        self.data_rate
    }

    /// Observation interval within the file
    pub fn sampling_period(&self) -> Option<Duration> {
        self.sampling_period
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn file_format(&self) -> Option<&str> {
        self.file_format.as_deref()
    }

    pub fn aggregation(&self) -> Option<&str> {
        self.aggregation.as_deref()
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Start of the data held in the file
    pub fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    pub fn date(&self) -> NaiveDate {
        self.datetime.date()
    }

    pub fn mimetype(&self) -> MimeType {
        self.mimetype
    }
}

impl fmt::Display for RinexFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl AsRef<str> for RinexFilename {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl FromStr for RinexFilename {
    type Err = FilenameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn as_seconds<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(duration) => serializer.serialize_some(&duration.as_secs()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_long_name_all_fields() {
        let file = RinexFilename::parse("NYA100NOR_S_20230700000_01D_30S_MO.crx.sum.gz").unwrap();

        assert_eq!(file.station(), "NYA100NOR");
        assert_eq!(file.rinex_version(), RinexVersion::V3);
        assert_eq!(file.data_source(), Some(DataSource::Stream));
        assert_eq!(file.year(), 2023);
        assert_eq!(file.day_of_year(), 70);
        assert_eq!(file.hour(), 0);
        assert_eq!(file.minute(), 0);
        assert_eq!(file.data_span(), Some(Duration::from_secs(86_400)));
        assert_eq!(file.data_rate(), Some(DataRate::Daily));
        assert_eq!(file.sampling_period(), Some(Duration::from_secs(30)));
        assert_eq!(file.data_type(), DataType::MixedObs);
        assert_eq!(file.file_format(), Some("crx"));
        assert_eq!(file.aggregation(), Some("sum"));
        assert_eq!(file.extension(), "gz");
        assert_eq!(file.date(), ymd(2023, 3, 11));
        assert_eq!(file.mimetype().encoding, Some("gzip"));
    }

    #[test]
    fn test_hourly_long_name() {
        let file = RinexFilename::parse("NYA100NOR_U_20210690500_01H_15S_JO.rnx.Z").unwrap();

        assert_eq!(file.data_source(), Some(DataSource::Unknown));
        assert_eq!(file.hour(), 5);
        assert_eq!(file.data_rate(), Some(DataRate::Hourly));
        assert_eq!(file.sampling_period(), Some(Duration::from_secs(15)));
        assert_eq!(file.data_type(), DataType::QzssObs);
        assert_eq!(file.file_format(), Some("rnx"));
        assert_eq!(file.aggregation(), None);
        assert_eq!(file.extension(), "Z");
        assert_eq!(file.mimetype().encoding, Some("compress"));
    }

    #[test]
    fn test_long_name_without_sampling_period() {
        let file = RinexFilename::parse("NYAL00NOR_R_20230700000_01D_EN.rnx.gz").unwrap();

        assert_eq!(file.station(), "NYAL00NOR");
        assert_eq!(file.data_source(), Some(DataSource::Receiver));
        assert_eq!(file.data_rate(), Some(DataRate::Daily));
        assert_eq!(file.sampling_period(), None);
        assert_eq!(file.data_type(), DataType::GalileoNav);
        assert!(file.data_type().is_navigation());
    }

    #[test]
    fn test_short_name() {
        let file = RinexFilename::parse("trak0700.23s.gz").unwrap();

        assert_eq!(file.station(), "trak");
        assert_eq!(file.rinex_version(), RinexVersion::V2);
        assert_eq!(file.data_source(), None);
        assert_eq!(file.year(), 2023);
        assert_eq!(file.day_of_year(), 70);
        assert_eq!(file.hour(), 0);
        assert_eq!(file.data_type(), DataType::Summary);
        assert_eq!(file.data_rate(), None);
        assert_eq!(file.file_format(), None);
        assert_eq!(file.extension(), "gz");
    }

    #[test]
    fn test_short_name_letter_hour_with_override() {
        let overrides = FileOverrides::new().with_data_rate(DataRate::Daily);
        let file = RinexFilename::parse_with("tabv069w.21m.Z", &overrides).unwrap();

        assert_eq!(file.station(), "tabv");
        assert_eq!(file.hour(), 22);
        assert_eq!(file.year(), 2021);
        assert_eq!(file.data_type(), DataType::Meteorology);
        assert_eq!(file.data_rate(), Some(DataRate::Daily));
        assert_eq!(
            file.datetime(),
            ymd(2021, 3, 10).and_hms_opt(22, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_tar_archive_date() {
        let file = RinexFilename::parse("DJIG00DJI_R_20211300000_01D_01S_RN.rnx.tar").unwrap();

        assert_eq!(file.date(), ymd(2021, 5, 10));
        assert_eq!(file.data_type(), DataType::GlonassNav);
        assert_eq!(file.mimetype().content_type, Some("application/x-tar"));
        assert_eq!(file.mimetype().encoding, None);
    }

    #[test]
    fn test_path_is_stripped() {
        let file = RinexFilename::parse("/gnss/data/daily/2023/070/23d/trak0700.23d.Z").unwrap();
        assert_eq!(file.name(), "trak0700.23d.Z");
        assert_eq!(file.data_type(), DataType::HatanakaObs);
    }

    #[test]
    fn test_unrecognized_name() {
        let err = RinexFilename::parse("not_a_rinex_file.xyz").unwrap_err();
        assert_eq!(
            err,
            FilenameError::Unrecognized {
                name: "not_a_rinex_file.xyz".to_string()
            }
        );
        assert!("index.html".parse::<RinexFilename>().is_err());
    }

    #[test]
    fn test_invalid_tokens_rejected() {
        // day 000
        assert!(RinexFilename::parse("trak0000.23o.gz").is_err());
        // day 367
        assert!(RinexFilename::parse("trak3670.23o.gz").is_err());
        // hour letter beyond x
        assert!(RinexFilename::parse("trak070y.23o.gz").is_err());
        // minute 61
        assert!(RinexFilename::parse("NYA100NOR_S_20230700061_01D_30S_MO.crx.gz").is_err());
        // unknown data source
        assert!(RinexFilename::parse("NYA100NOR_X_20230700000_01D_30S_MO.crx.gz").is_err());
        // unknown label
        assert!(RinexFilename::parse("NYA100NOR_S_20230700000_01D_30S_ZZ.crx.gz").is_err());
    }

    #[test]
    fn test_sampling_period_requires_span() {
        let overrides = FileOverrides::new().with_sampling_period(Duration::from_secs(30));
        let err = RinexFilename::parse_with("trak0700.23o.gz", &overrides).unwrap_err();
        assert!(matches!(err, FilenameError::RateWithoutSpan { .. }));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = FileOverrides::new()
            .with_rinex_version(RinexVersion::V4)
            .with_year(99)
            .with_data_span(Duration::from_secs(900))
            .with_station("ABCD00XYZ");
        let file =
            RinexFilename::parse_with("NYA100NOR_S_20230700000_01D_30S_MO.crx.gz", &overrides)
                .unwrap();

        assert_eq!(file.rinex_version(), RinexVersion::V4);
        assert_eq!(file.year(), 1999);
        assert_eq!(file.station(), "ABCD00XYZ");
        assert_eq!(file.site_code(), "abcd");
        assert_eq!(file.data_rate(), Some(DataRate::HighRate));
        assert_eq!(file.sampling_period(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_rate_override_keeps_period() {
        let overrides = FileOverrides::new().with_data_rate(DataRate::HighRate);
        let file =
            RinexFilename::parse_with("NYA100NOR_S_20230700000_01D_30S_MO.crx.gz", &overrides)
                .unwrap();

        assert_eq!(file.data_rate(), Some(DataRate::HighRate));
        assert_eq!(file.data_span(), Some(Duration::from_secs(86_400)));
        assert_eq!(file.sampling_period(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let overrides = FileOverrides::new().with_data_rate(DataRate::Daily);
        let first = RinexFilename::parse_with("tabv069w.21m.Z", &overrides).unwrap();
        let second = RinexFilename::parse_with("tabv069w.21m.Z", &overrides).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_datetime_from_year_and_day() {
        for (name, expected) in [
            ("trak0010.23o.gz", ymd(2023, 1, 1)),
            ("trak0600.24o.gz", ymd(2024, 2, 29)),
            ("trak3650.99o.gz", ymd(1999, 12, 31)),
            ("trak3660.00o.gz", ymd(2000, 12, 31)),
        ] {
            let file = RinexFilename::parse(name).unwrap();
            assert_eq!(file.date(), expected, "{}", name);
            let offset = Days::new(u64::from(file.day_of_year()) - 1);
            assert_eq!(
                ymd(file.year(), 1, 1).checked_add_days(offset).unwrap(),
                file.date()
            );
        }
    }

    #[test]
    fn test_serializes_spans_as_seconds() {
        let file = RinexFilename::parse("NYA100NOR_S_20230700000_01D_30S_MO.crx.gz").unwrap();
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["data_span"], 86_400);
        assert_eq!(json["sampling_period"], 30);
        assert_eq!(json["station"], "NYA100NOR");
    }
}
