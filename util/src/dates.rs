//! Calendar helpers shared by the leave workflows and the reminder scheduler.
//!
//! All "today" decisions go through a [`Clock`] so that the hostel timezone is explicit
//! and tests can pin the date to a specific weekday.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid ISO date pattern"));

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `to` falls before `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("to date {to} is before from date {from}")]
pub struct InvalidRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// True iff `s` is literally `YYYY-MM-DD` and names a real calendar day.
pub fn is_valid_calendar_date(s: &str) -> bool {
    parse_calendar_date(s).is_some()
}

/// Parses a strict `YYYY-MM-DD` string. `2024-02-30` and `2024-2-3` are rejected.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    if !ISO_DATE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Monday through Friday (ISO weekday 1-5).
pub fn is_working_day(date: NaiveDate) -> bool {
    (1..=5).contains(&date.weekday().number_from_monday())
}

pub fn compare_date_range(from: NaiveDate, to: NaiveDate) -> Result<(), InvalidRange> {
    if to < from {
        return Err(InvalidRange { from, to });
    }
    Ok(())
}

/// Resolves a wall-clock time in `tz`, skipping forward over DST gaps.
pub fn localize(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    let mut candidate = naive;
    for _ in 0..3 {
        if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
            return dt;
        }
        candidate += chrono::Duration::hours(1);
    }
    tz.from_utc_datetime(&naive)
}

/// First instant strictly after `now` whose local time of day in `tz` equals `at`.
///
/// A time already passed today is scheduled for tomorrow; it is never fired late.
pub fn next_daily_occurrence(now: DateTime<Utc>, tz: &Tz, at: NaiveTime) -> DateTime<Utc> {
    let local_today = now.with_timezone(tz).date_naive();
    let today_at = localize(tz, local_today.and_time(at)).with_timezone(&Utc);
    if today_at > now {
        return today_at;
    }
    let tomorrow = local_today.succ_opt().unwrap_or(local_today);
    localize(tz, tomorrow.and_time(at)).with_timezone(&Utc)
}

/// Source of the current instant and of the hostel's calendar day.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn timezone(&self) -> Tz;

    /// The calendar day in the hostel timezone.
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&self.timezone()).date_naive()
    }
}

/// Wall clock in a configured timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn from_config() -> Self {
        Self::new(crate::config::timezone())
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn timezone(&self) -> Tz {
        self.tz
    }
}

/// Clock frozen at one instant. Used by tests and the seeder.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    tz: Tz,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, tz: Tz) -> Self {
        Self { now, tz }
    }

    /// Noon local time on `date`.
    pub fn on(date: NaiveDate, tz: Tz) -> Self {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
        let now = localize(&tz, date.and_time(noon)).with_timezone(&Utc);
        Self { now, tz }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn timezone(&self) -> Tz {
        self.tz
    }
}
