use chrono::{Datelike, Timelike};
use viirscat::SwathMetadata;
use viirscat::core::timestamps::{akdt_datestamp, beginning_utc, date_utc, time_utc};

fn metadata(date: &str, time: &str) -> SwathMetadata {
    SwathMetadata {
        granule_id: "NPP001212345678".to_string(),
        orbit_number: 39315,
        beginning_date: date.to_string(),
        beginning_time: time.to_string(),
        ascending_node: false,
    }
}

#[test]
fn test_utc_date_and_time() {
    let meta = metadata("20190615", "120012.345678Z");
    assert_eq!(date_utc(&meta).unwrap(), "2019-06-15");
    assert_eq!(time_utc(&meta).unwrap(), "1200");

    let start = beginning_utc(&meta).unwrap();
    assert_eq!((start.year(), start.month(), start.day()), (2019, 6, 15));
    assert_eq!((start.hour(), start.minute(), start.second()), (12, 0, 12));
}

#[test]
fn test_akdt_crosses_midnight() {
    let meta = metadata("20190615", "033015.000000Z");
    assert_eq!(akdt_datestamp(&meta, true).unwrap(), "2019-06-14 19:30:15 AKDT");
    assert_eq!(akdt_datestamp(&meta, false).unwrap(), "20190614_193015_AKDT");
}

#[test]
fn test_malformed_time_is_an_error() {
    let meta = metadata("20190615", "12:00");
    assert!(time_utc(&meta).is_err());
    assert!(akdt_datestamp(&meta, true).is_err());
    assert!(date_utc(&metadata("2019-06-15", "120012.345678Z")).is_err());
}
