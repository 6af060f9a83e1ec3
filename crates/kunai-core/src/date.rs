//! The calendar capability the expansion engine is generic over.
//!
//! The engine manipulates points in time only through this interface, so any
//! date library can sit behind it. This crate ships the implementation for
//! [`chrono::NaiveDateTime`], the zone-resolved representation used across
//! the project; the engine treats values as already zone-resolved and
//! performs no time-zone conversion of its own.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

use crate::weekday::Weekday;

/// Calendar unit for stepping a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

/// An opaque, comparable point in time with calendar accessors.
///
/// All accessors use 1-based calendar conventions (`month` is `1..=12`,
/// `day` is `1..=31`, `day_of_year` is `1..=366`). Stepping operations are
/// checked: `None` means the result is not representable, never a panic.
pub trait CalendarDate: Clone + Ord + core::fmt::Debug + Sized {
    /// Calendar year.
    fn year(&self) -> i32;
    /// Month of year, `1..=12`.
    fn month(&self) -> u32;
    /// Day of month, `1..=31`.
    fn day(&self) -> u32;
    /// Hour of day, `0..=23`.
    fn hour(&self) -> u32;
    /// Minute of hour, `0..=59`.
    fn minute(&self) -> u32;
    /// Second of minute, `0..=59`.
    fn second(&self) -> u32;
    /// Day of week.
    fn weekday(&self) -> Weekday;
    /// Day of year, `1..=366`.
    fn day_of_year(&self) -> u32;
    /// ISO 8601 week number, `1..=53`.
    fn iso_week(&self) -> u32;
    /// Number of days in this date's month.
    fn days_in_month(&self) -> u32;
    /// Whether this date's year is a leap year.
    fn is_leap_year(&self) -> bool;

    /// Steps by `amount` units, calendar-aware for months and years (a day
    /// of month past the end of the target month clamps to its last day).
    fn checked_add(&self, unit: DateUnit, amount: i64) -> Option<Self>;

    /// The same point in time with the day of month replaced.
    ///
    /// `None` when the day does not exist in the month.
    fn with_day(&self, day: u32) -> Option<Self>;

    /// The same point in time with month and day of month replaced.
    ///
    /// `None` when the combination does not exist in the year.
    fn with_month_day(&self, month: u32, day: u32) -> Option<Self>;

    /// Builds a value from calendar fields.
    ///
    /// `None` when the fields do not name a real point in time.
    fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self>;
}

impl CalendarDate for NaiveDateTime {
    fn year(&self) -> i32 {
        Datelike::year(self)
    }

    fn month(&self) -> u32 {
        Datelike::month(self)
    }

    fn day(&self) -> u32 {
        Datelike::day(self)
    }

    fn hour(&self) -> u32 {
        Timelike::hour(self)
    }

    fn minute(&self) -> u32 {
        Timelike::minute(self)
    }

    fn second(&self) -> u32 {
        Timelike::second(self)
    }

    fn weekday(&self) -> Weekday {
        Weekday::from(Datelike::weekday(self))
    }

    fn day_of_year(&self) -> u32 {
        self.ordinal()
    }

    fn iso_week(&self) -> u32 {
        Datelike::iso_week(self).week()
    }

    fn days_in_month(&self) -> u32 {
        let (year, month) = if Datelike::month(self) == 12 {
            (Datelike::year(self) + 1, 1)
        } else {
            (Datelike::year(self), Datelike::month(self) + 1)
        };
        // Last day of this month = day before the first of the next month.
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|first| first.pred_opt())
            .map_or(31, |last| last.day())
    }

    fn is_leap_year(&self) -> bool {
        self.date().leap_year()
    }

    fn checked_add(&self, unit: DateUnit, amount: i64) -> Option<Self> {
        match unit {
            DateUnit::Seconds => TimeDelta::try_seconds(amount)
                .and_then(|delta| self.checked_add_signed(delta)),
            DateUnit::Minutes => TimeDelta::try_minutes(amount)
                .and_then(|delta| self.checked_add_signed(delta)),
            DateUnit::Hours => {
                TimeDelta::try_hours(amount).and_then(|delta| self.checked_add_signed(delta))
            }
            DateUnit::Days => {
                TimeDelta::try_days(amount).and_then(|delta| self.checked_add_signed(delta))
            }
            DateUnit::Weeks => {
                TimeDelta::try_weeks(amount).and_then(|delta| self.checked_add_signed(delta))
            }
            DateUnit::Months => checked_add_months_signed(self, amount),
            DateUnit::Years => checked_add_months_signed(self, amount.checked_mul(12)?),
        }
    }

    fn with_day(&self, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(Datelike::year(self), Datelike::month(self), day)
            .map(|date| date.and_time(self.time()))
    }

    fn with_month_day(&self, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(Datelike::year(self), month, day)
            .map(|date| date.and_time(self.time()))
    }

    fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
    }
}

/// Month stepping for a signed amount; chrono only exposes unsigned
/// add/sub.
fn checked_add_months_signed(value: &NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
    if amount >= 0 {
        value.checked_add_months(Months::new(u32::try_from(amount).ok()?))
    } else {
        value.checked_sub_months(Months::new(u32::try_from(amount.checked_neg()?).ok()?))
    }
}
