//! Zone-aware time conversion.
//!
//! Converts absolute instants into a participant's local civil time using the
//! IANA database embedded in `chrono-tz`. Offsets are resolved per instant, so
//! historical and future daylight-saving transitions are honored rather than
//! assuming today's offset.
//!
//! Nothing here reads the system clock; callers pass every instant explicitly.

use chrono::{DateTime, Datelike, Offset, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{OverlapError, Result};

/// `HH:mm`, 24-hour.
pub(crate) const TIME_FORMAT: &str = "%H:%M";

/// `MMM dd, yyyy HH:mm`, e.g. `Jul 15, 2024 08:00`.
pub(crate) const DATE_TIME_FORMAT: &str = "%b %d, %Y %H:%M";

/// An instant expressed as wall-clock fields in one time zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalCivilTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub weekday: Weekday,
    /// The IANA timezone name used.
    pub timezone: String,
    /// The UTC offset at this instant (e.g., "-04:00").
    pub utc_offset: String,
    /// Whether the zone is away from its January offset at this instant.
    pub dst_active: bool,
}

impl LocalCivilTime {
    /// Saturday or Sunday on the local calendar.
    pub fn is_weekend(&self) -> bool {
        is_weekend(self.weekday)
    }
}

/// Parse an IANA timezone name.
///
/// # Errors
///
/// Returns [`OverlapError::InvalidTimezone`] for anything `chrono-tz` does not
/// recognize. There is no fallback zone.
pub fn parse_time_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| OverlapError::InvalidTimezone(format!("'{}'", name)))
}

/// Parse an RFC 3339 datetime string into a UTC instant.
///
/// # Errors
///
/// Returns [`OverlapError::InvalidDatetime`] if the string cannot be parsed.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| OverlapError::InvalidDatetime(format!("'{}': {}", s, e)))
}

/// Convert an instant to local civil time in `time_zone`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc, Weekday};
/// use overlap_engine::zone::to_local;
///
/// let instant = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
/// let local = to_local(instant, "America/New_York").unwrap();
/// assert_eq!((local.hour, local.minute), (8, 0));
/// assert_eq!(local.weekday, Weekday::Mon);
/// assert_eq!(local.utc_offset, "-04:00");
/// assert!(local.dst_active);
/// ```
pub fn to_local(instant: DateTime<Utc>, time_zone: &str) -> Result<LocalCivilTime> {
    let tz = parse_time_zone(time_zone)?;
    let local = instant.with_timezone(&tz);

    Ok(LocalCivilTime {
        year: local.year(),
        month: local.month(),
        day: local.day(),
        hour: local.hour(),
        minute: local.minute(),
        second: local.second(),
        weekday: local.weekday(),
        timezone: time_zone.to_string(),
        utc_offset: format_utc_offset(&local),
        dst_active: is_dst_active(&local, &tz),
    })
}

/// Local wall-clock time as `HH:mm`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use overlap_engine::zone::local_time_string;
///
/// let instant = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
/// assert_eq!(local_time_string(instant, "America/New_York").unwrap(), "08:00");
/// ```
pub fn local_time_string(instant: DateTime<Utc>, time_zone: &str) -> Result<String> {
    let tz = parse_time_zone(time_zone)?;
    Ok(instant.with_timezone(&tz).format(TIME_FORMAT).to_string())
}

/// Local date and time as `MMM dd, yyyy HH:mm`.
pub fn local_date_time_string(instant: DateTime<Utc>, time_zone: &str) -> Result<String> {
    let tz = parse_time_zone(time_zone)?;
    Ok(instant.with_timezone(&tz).format(DATE_TIME_FORMAT).to_string())
}

pub(crate) fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

fn is_dst_active<T: TimeZone>(dt: &DateTime<T>, tz: &Tz) -> bool {
    // Compare against January 1 of the same year. Southern-hemisphere zones
    // report the opposite season, which is fine for a display flag.
    let utc = dt.with_timezone(&Utc);
    let jan1 = Utc
        .with_ymd_and_hms(utc.year(), 1, 1, 12, 0, 0)
        .single()
        .unwrap_or(utc);

    let current_offset = dt.offset().fix().local_minus_utc();
    let jan_offset = jan1.with_timezone(tz).offset().fix().local_minus_utc();

    current_offset != jan_offset
}

fn format_utc_offset<T: TimeZone>(dt: &DateTime<T>) -> String {
    let offset_secs = dt.offset().fix().local_minus_utc();
    let sign = if offset_secs >= 0 { "+" } else { "-" };
    let abs_secs = offset_secs.unsigned_abs();
    let hours = abs_secs / 3600;
    let minutes = (abs_secs % 3600) / 60;
    format!("{sign}{hours:02}:{minutes:02}")
}
