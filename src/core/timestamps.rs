//! Human-readable timestamps from a granule's aggregate beginning date/time
//! (`YYYYMMDD` + `HHMMSS.ffffffZ`).
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::Result;
use crate::io::swath::SwathMetadata;

/// Alaska daylight time relative to UTC
pub const AKDT_OFFSET_HOURS: i64 = -8;

const DATE_FORMAT: &str = "%Y%m%d";
const TIME_FORMAT: &str = "%H%M%S%.fZ";

/// Aggregate beginning instant (UTC)
pub fn beginning_utc(meta: &SwathMetadata) -> Result<NaiveDateTime> {
    let stamp = format!("{}_{}", meta.beginning_date, meta.beginning_time);
    let format = format!("{}_{}", DATE_FORMAT, TIME_FORMAT);
    let parsed = NaiveDateTime::parse_from_str(&stamp, &format)?;
    Ok(parsed)
}

/// `YYYY-MM-DD` (UTC)
pub fn date_utc(meta: &SwathMetadata) -> Result<String> {
    let date = NaiveDate::parse_from_str(&meta.beginning_date, DATE_FORMAT)?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// `HHMM` (UTC)
pub fn time_utc(meta: &SwathMetadata) -> Result<String> {
    let time = NaiveTime::parse_from_str(&meta.beginning_time, TIME_FORMAT)?;
    Ok(time.format("%H%M").to_string())
}

/// Beginning time in Alaska daylight time, either `2019-06-15 04:00:12 AKDT`
/// or, without spaces, `20190615_040012_AKDT`
pub fn akdt_datestamp(meta: &SwathMetadata, spaces: bool) -> Result<String> {
    let local = beginning_utc(meta)? + Duration::hours(AKDT_OFFSET_HOURS);
    let format = if spaces {
        "%Y-%m-%d %H:%M:%S AKDT"
    } else {
        "%Y%m%d_%H%M%S_AKDT"
    };
    Ok(local.format(format).to_string())
}
