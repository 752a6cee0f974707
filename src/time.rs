use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use crate::constants::BASE_DATE;

/// Normalize a timestamp onto the reference date.
///
/// Only the time-of-day component is kept; it is reattached to `BASE_DATE` and
/// rounded to the nearest whole second so that independently computed schedules
/// never differ by sub-second noise.
#[must_use]
pub fn normalize(time: NaiveDateTime) -> NaiveDateTime {
    let rounded = if time.nanosecond() >= 500_000_000 {
        time + Duration::seconds(1)
    } else {
        time
    };
    let time_of_day = rounded.time();
    let whole_second =
        NaiveTime::from_hms_opt(time_of_day.hour(), time_of_day.minute(), time_of_day.second())
            .unwrap_or(time_of_day);
    BASE_DATE.and_time(whole_second)
}

/// Parse a time string in HH:MM:SS format
///
/// # Errors
///
/// Returns an error if the string cannot be parsed as a valid time in HH:MM:SS format.
pub fn parse_time_hms(s: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
}
