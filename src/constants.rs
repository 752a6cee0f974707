use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Base date used for all time calculations
pub const BASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(date) => date,
    None => panic!("Invalid base date"),
};

/// Base midnight datetime (`BASE_DATE` at 00:00:00)
pub const BASE_MIDNIGHT: NaiveDateTime = match BASE_DATE.and_hms_opt(0, 0, 0) {
    Some(dt) => dt,
    None => panic!("Invalid base midnight"),
};

/// Window synthesized around a stop that is missing its arrival or departure time
pub const STATION_MARGIN: Duration = Duration::seconds(30);

/// Stabilization buffer added to an occupation's exit when testing for overlap.
/// Never part of a reported conflict window.
pub const STABILIZATION_BUFFER: Duration = Duration::seconds(30);

/// Width of the time bucket used when collapsing segment conflicts into incidents
pub const INCIDENT_WINDOW_MINUTES: i64 = 30;

/// Platforms assumed for a station that does not declare a platform count
pub const DEFAULT_PLATFORM_COUNT: u32 = 2;

/// Track a stop is assigned to when no explicit track is given
pub const DEFAULT_STOP_TRACK: &str = "1";

/// Platform time reserved before an origin departure under the relation-driven
/// dwell policy
pub const ORIGIN_PREPARATION: Duration = Duration::minutes(3);

/// Platform time reserved after a terminal arrival under the relation-driven
/// dwell policy
pub const TERMINAL_CLEARANCE: Duration = Duration::seconds(30);
