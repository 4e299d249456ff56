//! Integration tests for RINEX filename classification

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use rinex_lister::app::defines::{DataRate, DataType, RinexVersion};
use rinex_lister::app::{FileOverrides, RinexFilename};
use rinex_lister::errors::FilenameError;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

#[test]
fn test_archive_names() {
    let cases = [
        (
            "NYA100NOR_S_20230700000_01D_30S_MO.crx.sum.gz",
            RinexVersion::V3,
            DataType::MixedObs,
            at(2023, 3, 11, 0, 0),
        ),
        (
            "NYA100NOR_U_20210690500_01H_15S_JO.rnx.Z",
            RinexVersion::V3,
            DataType::QzssObs,
            at(2021, 3, 10, 5, 0),
        ),
        (
            "NYAL00NOR_R_20230700000_01D_EN.rnx.gz",
            RinexVersion::V3,
            DataType::GalileoNav,
            at(2023, 3, 11, 0, 0),
        ),
        (
            "DJIG00DJI_R_20211300000_01D_01S_RN.rnx.tar",
            RinexVersion::V3,
            DataType::GlonassNav,
            at(2021, 5, 10, 0, 0),
        ),
        ("trak0700.23s.gz", RinexVersion::V2, DataType::Summary, at(2023, 3, 11, 0, 0)),
        ("abmf1230.99d.Z", RinexVersion::V2, DataType::HatanakaObs, at(1999, 5, 3, 0, 0)),
    ];

    for (name, version, data_type, datetime) in cases {
        let file = RinexFilename::parse(name).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(file.rinex_version(), version, "{name}");
        assert_eq!(file.data_type(), data_type, "{name}");
        assert_eq!(file.datetime(), datetime, "{name}");
        assert_eq!(file.to_string(), name);
    }
}

#[test]
fn test_two_digit_years_pivot_at_1970() {
    let year = |name: &str| RinexFilename::parse(name).unwrap().year();
    assert_eq!(year("abcd0010.70o.Z"), 1970);
    assert_eq!(year("abcd0010.99o.Z"), 1999);
    assert_eq!(year("abcd0010.00o.Z"), 2000);
    assert_eq!(year("abcd0010.69o.Z"), 2069);
}

#[test]
fn test_short_name_hour_letters() {
    let hour = |name: &str| RinexFilename::parse(name).unwrap().hour();
    assert_eq!(hour("tabv069a.21m.Z"), 0);
    assert_eq!(hour("tabv069w.21m.Z"), 22);
    assert_eq!(hour("tabv069x.21m.Z"), 23);
    assert!(RinexFilename::parse("tabv069y.21m.Z").is_err());
}

#[test]
fn test_directory_rate_applied_to_short_names() {
    let overrides = FileOverrides::new().with_data_rate(DataRate::Hourly);
    let file = RinexFilename::parse_with("/pub/igs/data/hourly/2021/069/tabv069w.21m.Z", &overrides)
        .unwrap();
    assert_eq!(file.name(), "tabv069w.21m.Z");
    assert_eq!(file.data_rate(), Some(DataRate::Hourly));
    assert_eq!(file.datetime(), at(2021, 3, 10, 22, 0));
}

#[test]
fn test_unrecognized_names() {
    for name in ["not_a_rinex_file.xyz", "README", "", "igs22501.sp3.Z"] {
        assert!(
            matches!(
                RinexFilename::parse(name),
                Err(FilenameError::Unrecognized { .. })
            ),
            "{name:?} should not classify"
        );
    }
}

#[test]
fn test_json_shape() {
    let file = RinexFilename::parse("NYA100NOR_S_20230700000_01D_30S_MO.crx.gz").unwrap();
    let value: Value = serde_json::to_value(&file).unwrap();

    assert_eq!(value["station"], "NYA100NOR");
    assert_eq!(value["data_span"], 86_400);
    assert_eq!(value["sampling_period"], 30);
    assert_eq!(value["extension"], "gz");
    assert_eq!(value["mimetype"]["encoding"], "gzip");

    let short = serde_json::to_value(RinexFilename::parse("trak0700.23o.Z").unwrap()).unwrap();
    assert!(short["data_span"].is_null());
    assert!(short["data_source"].is_null());
}
