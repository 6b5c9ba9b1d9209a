//! Calendar arithmetic in the tracker's reference timezone.
//!
//! Completion days and month buckets are computed against a single fixed UTC
//! offset so that "today" and "this month" mean the same thing for every
//! request, regardless of the server's local timezone.

use std::str::FromStr;

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Offset, TimeDelta, Utc};
use chrono::FixedOffset;

/// Largest accepted offset magnitude, exclusive.
const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// Years a metrics target date may name.
const METRICS_YEARS: RangeInclusive<i32> = 1..=9999;

/// Errors raised when configuring a [`Calendar`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The offset does not describe a real timezone.
    #[error("utc offset must be within ±{max} minutes (got {minutes})", max = MAX_OFFSET_MINUTES - 1)]
    OffsetOutOfRange {
        /// Rejected offset.
        minutes: i32,
    },
}

/// Inclusive `[start, end]` span covering one calendar month.
///
/// `end` is the last millisecond of the month, so the span matches a
/// start-of-month/end-of-month pair at millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl MonthWindow {
    /// First instant of the month.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Last millisecond of the month.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `instant` falls inside the window, bounds included.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Target date supplied to the monthly metrics queries.
///
/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` calendar date; the
/// latter names a day in the reference timezone rather than in UTC. Years
/// outside `1..=9999` are rejected.
///
/// # Examples
/// ```
/// use habit_tracker::domain::MetricsDate;
///
/// assert!("2024-03-15".parse::<MetricsDate>().is_ok());
/// assert!("2024-03-15T10:00:00Z".parse::<MetricsDate>().is_ok());
/// assert!("March".parse::<MetricsDate>().is_err());
/// assert!("-262143-01-15".parse::<MetricsDate>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsDate {
    /// A precise instant.
    Instant(DateTime<Utc>),
    /// A calendar day in the reference timezone.
    Day(NaiveDate),
}

/// Error returned when a metrics date cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected an RFC 3339 timestamp or a YYYY-MM-DD date between years 1 and 9999")]
pub struct ParseMetricsDateError;

impl FromStr for MetricsDate {
    type Err = ParseMetricsDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let parsed = match DateTime::parse_from_rfc3339(raw) {
            Ok(instant) => Self::Instant(instant.with_timezone(&Utc)),
            Err(_) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Self::Day)
                .map_err(|_| ParseMetricsDateError)?,
        };
        if METRICS_YEARS.contains(&parsed.year()) {
            Ok(parsed)
        } else {
            Err(ParseMetricsDateError)
        }
    }
}

impl MetricsDate {
    fn year(&self) -> i32 {
        match self {
            Self::Instant(instant) => instant.year(),
            Self::Day(day) => day.year(),
        }
    }
}

/// Day and month arithmetic pinned to a fixed reference offset.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use habit_tracker::domain::Calendar;
///
/// let calendar = Calendar::utc();
/// let noon = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
/// assert_eq!(
///     calendar.start_of_day(noon),
///     Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).single()
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: FixedOffset,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl Calendar {
    /// Calendar anchored at UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Calendar anchored at `minutes` east of UTC.
    pub fn with_offset_minutes(minutes: i32) -> Result<Self, CalendarError> {
        if minutes.abs() >= MAX_OFFSET_MINUTES {
            return Err(CalendarError::OffsetOutOfRange { minutes });
        }
        FixedOffset::east_opt(minutes * 60)
            .map(|offset| Self { offset })
            .ok_or(CalendarError::OffsetOutOfRange { minutes })
    }

    /// Reference offset in seconds east of UTC.
    pub fn offset_seconds(&self) -> i32 {
        self.offset.local_minus_utc()
    }

    /// Calendar day containing `instant` in the reference offset.
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// First instant of `day` in the reference offset, expressed in UTC.
    ///
    /// `None` when the instant falls outside chrono's representable range.
    pub fn start_of_date(&self, day: NaiveDate) -> Option<DateTime<Utc>> {
        day.and_time(NaiveTime::MIN)
            .checked_sub_signed(TimeDelta::seconds(i64::from(self.offset_seconds())))
            .map(|utc| utc.and_utc())
    }

    /// First instant of the calendar day containing `instant`.
    pub fn start_of_day(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.start_of_date(self.day_of(instant))
    }

    /// Inclusive window of the month containing `day`.
    ///
    /// `None` when either bound is not representable.
    pub fn month_window_of_date(&self, day: NaiveDate) -> Option<MonthWindow> {
        let first = day.checked_sub_days(Days::new(u64::from(day.day0())))?;
        let next_first = first.checked_add_months(Months::new(1))?;
        let start = self.start_of_date(first)?;
        let end = self
            .start_of_date(next_first)?
            .checked_sub_signed(TimeDelta::milliseconds(1))?;
        Some(MonthWindow { start, end })
    }

    /// Inclusive window of the month containing `instant`.
    pub fn month_window(&self, instant: DateTime<Utc>) -> Option<MonthWindow> {
        self.month_window_of_date(self.day_of(instant))
    }

    /// Inclusive window of the month named by a metrics target date.
    pub fn month_window_for(&self, target: MetricsDate) -> Option<MonthWindow> {
        match target {
            MetricsDate::Instant(instant) => self.month_window(instant),
            MetricsDate::Day(day) => self.month_window_of_date(day),
        }
    }
}
