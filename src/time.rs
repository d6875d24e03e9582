use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Source of "now". Handlers never call `Utc::now()` directly so tests can pin the day.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Parses an IANA zone identifier.
pub fn parse_tz(tz: &str) -> Result<Tz, TimeError> {
    tz.parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimezone(tz.to_string()))
}

/// `None` and the empty string both resolve to `default`.
pub fn resolve_tz(tz: Option<&str>, default: Tz) -> Result<Tz, TimeError> {
    match tz.map(str::trim) {
        None | Some("") => Ok(default),
        Some(name) => parse_tz(name),
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_incident_date(date: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| TimeError::InvalidDate(date.to_string()))
}

/// Calendar date of `now` as seen in `tz`.
pub fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// First instant of `date` in `tz`.
///
/// Zones that skip midnight on a DST change start the day at the earliest
/// valid local time instead.
pub fn start_of_day(date: NaiveDate, tz: Tz) -> Option<DateTime<Tz>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&midnight).earliest().or_else(|| {
        (1..=3)
            .filter_map(|h| date.and_hms_opt(h, 0, 0))
            .find_map(|t| tz.from_local_datetime(&t).earliest())
    })
}

/// Whole days between the start of today in `tz` and the start of `date`.
///
/// Counted on calendar dates, so a 23h or 25h DST day still counts as one.
/// Negative when `date` lies in the future.
pub fn days_since(date: NaiveDate, tz: Tz, now: DateTime<Utc>) -> i64 {
    today_in(tz, now).signed_duration_since(date).num_days()
}

pub fn compute_days(
    date: &str,
    tz: Option<&str>,
    default_tz: Tz,
    now: DateTime<Utc>,
) -> Result<i64, TimeError> {
    let tz = resolve_tz(tz, default_tz)?;
    let date = parse_incident_date(date)?;
    let days = days_since(date, tz, now);
    let today_start = start_of_day(today_in(tz, now), tz).map(|t| t.to_rfc3339());
    debug!(%date, %tz, ?today_start, days, "time.compute_days");
    Ok(days)
}
