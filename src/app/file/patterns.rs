//! RINEX file naming conventions
//!
//! Patterns are tried in order and the first match wins. Each pattern seeds
//! the RINEX version its convention implies.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;

use crate::app::defines::RinexVersion;

/// A naming convention and the version it implies
pub struct FilenamePattern {
    pub regex: Regex,
    pub rinex_version: RinexVersion,
    pub convention: &'static str,
}

lazy_static! {
    pub static ref PATTERNS: Vec<FilenamePattern> = vec![
        // XXXXMRCCC_K_YYYYDDDHHMM_01D_30S_tt.FFF.gz
        FilenamePattern {
            regex: Regex::new(concat!(
                r"^(?P<station>[A-Z0-9]{9})_(?P<data_source>\w{1})_",
                r"(?P<year>\d{4})(?P<day_of_year>\d{3})(?P<hour>\d{2})",
                r"(?P<minute>\d{2})_((?P<data_span>\w{3})_)?",
                r"((?P<data_rate>\w{3})_)?(?P<data_type>\w{2})[.]",
                r"(?P<file_format>\w+)[.]((?P<aggregation>\w+)[.])?",
                r"(?P<extension>\w*)$",
            ))
            .expect("long name pattern is valid"),
            rinex_version: RinexVersion::V3,
            convention: "long",
        },
        // ssssDDDh.YYt.gz
        FilenamePattern {
            regex: Regex::new(concat!(
                r"^(?P<station>[a-z0-9]{4})",
                r"(?P<day_of_year>\d{3})",
                r"(?P<hour>[0a-z]{1})",
                r"[.](?P<year>\d{2})(?P<data_type>[a-z]{1})",
                r"[.](?P<extension>\w*)$",
            ))
            .expect("short name pattern is valid"),
            rinex_version: RinexVersion::V2,
            convention: "short",
        },
    ];
}

/// Expand a two digit year around the 1970 pivot; longer years pass through
pub fn normalize_year(year: i32) -> i32 {
    match year {
        70..=99 => 1900 + year,
        0..=69 => 2000 + year,
        _ => year,
    }
}

/// Decode an hour token: a single letter counts from `a` = 0, digits parse
/// directly. Returns `None` outside 0-23.
pub fn decode_hour(token: &str) -> Option<u8> {
    let mut chars = token.chars();
    let hour = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => c.to_ascii_lowercase() as u8 - b'a',
        _ => token.parse::<u8>().ok()?,
    };
    (hour <= 23).then_some(hour)
}

/// Parse a GNSS period token such as `30S`, `15M`, `01H` or `01D`
pub fn parse_period(token: &str) -> Option<Duration> {
    let unit = token.chars().last()?;
    let count: u64 = token[..token.len() - unit.len_utf8()].parse().ok()?;
    let seconds = match unit.to_ascii_uppercase() {
        'S' => count,
        'M' => count * 60,
        'H' => count * 3_600,
        'D' => count * 86_400,
        _ => return None,
    };
    Some(Duration::from_secs(seconds))
}
