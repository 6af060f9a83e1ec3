//! The validated recurrence rule and its builder.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use kunai_core::{CalendarDate, Weekday};

use crate::error::{RecurError, RecurResult};
use crate::expand::Occurrences;
use crate::rule::Frequency;

/// One BYDAY entry: a signed ordinal and a weekday.
///
/// Ordinal 0 matches every occurrence of the weekday within the period;
/// positive ordinals count from the period's start (`2` = second), negative
/// ordinals from its end (`-1` = last).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekdayNum {
    /// Signed occurrence ordinal; 0 is the wildcard.
    pub ordinal: i8,
    /// The weekday the ordinal applies to.
    pub weekday: Weekday,
}

impl WeekdayNum {
    /// An entry matching every occurrence of `weekday`.
    #[must_use]
    pub const fn any(weekday: Weekday) -> Self {
        Self {
            ordinal: 0,
            weekday,
        }
    }

    /// An entry matching the `ordinal`-th occurrence of `weekday`.
    #[must_use]
    pub const fn nth(ordinal: i8, weekday: Weekday) -> Self {
        Self { ordinal, weekday }
    }
}

impl fmt::Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ordinal == 0 {
            write!(f, "{}", self.weekday)
        } else {
            write!(f, "{}{}", self.ordinal, self.weekday)
        }
    }
}

/// A constraint dimension: either the implicit full default range or an
/// explicitly supplied set of allowed values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ByFilter<T> {
    /// Not set; every value passes.
    #[default]
    Default,
    /// Explicitly set; never empty.
    Explicit(BTreeSet<T>),
}

impl<T: Ord> ByFilter<T> {
    /// Whether the filter was explicitly set.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }

    /// Whether `value` passes the filter; vacuously true when defaulted.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        match self {
            Self::Default => true,
            Self::Explicit(set) => set.contains(value),
        }
    }

    /// The explicit value set, if any.
    #[must_use]
    pub fn values(&self) -> Option<&BTreeSet<T>> {
        match self {
            Self::Default => None,
            Self::Explicit(set) => Some(set),
        }
    }

    /// An empty collection leaves the filter at its default.
    fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let set: BTreeSet<T> = values.into_iter().collect();
        if set.is_empty() {
            Self::Default
        } else {
            Self::Explicit(set)
        }
    }
}

/// A validated, immutable recurrence rule.
///
/// Built through [`Recur::builder`] or parsed from the token grammar with
/// [`str::parse`]. A rule is read-only once built and may be shared by
/// reference across any number of cursors; all expansion state lives in
/// [`Occurrences`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recur<D = NaiveDateTime> {
    frequency: Frequency,
    interval: u32,
    count: Option<u32>,
    until: Option<D>,
    week_start: Weekday,
    by_month: ByFilter<u32>,
    by_week_no: ByFilter<u32>,
    by_year_day: ByFilter<i16>,
    by_month_day: ByFilter<i8>,
    by_day: ByFilter<WeekdayNum>,
    by_set_pos: ByFilter<i32>,
}

impl<D: CalendarDate> Recur<D> {
    /// Starts a builder for a rule with the given frequency.
    #[must_use]
    pub fn builder(frequency: Frequency) -> RecurBuilder<D> {
        RecurBuilder {
            frequency,
            interval: 1,
            count: None,
            until: None,
            week_start: Weekday::Sunday,
            by_month: ByFilter::Default,
            by_week_no: ByFilter::Default,
            by_year_day: ByFilter::Default,
            by_month_day: ByFilter::Default,
            by_day: ByFilter::Default,
            by_set_pos: ByFilter::Default,
        }
    }

    /// The recurrence unit.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Step multiplier between periods, at least 1.
    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Upper bound on emitted occurrences, if any.
    #[must_use]
    pub const fn count(&self) -> Option<u32> {
        self.count
    }

    /// Inclusive upper bound date; `None` means unbounded.
    #[must_use]
    pub const fn until(&self) -> Option<&D> {
        self.until.as_ref()
    }

    /// The weekday that opens a week.
    #[must_use]
    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Allowed months, `1..=12`.
    #[must_use]
    pub const fn by_month(&self) -> &ByFilter<u32> {
        &self.by_month
    }

    /// Allowed ISO week numbers.
    #[must_use]
    pub const fn by_week_no(&self) -> &ByFilter<u32> {
        &self.by_week_no
    }

    /// Allowed days of year; negative values count from the year's end.
    #[must_use]
    pub const fn by_year_day(&self) -> &ByFilter<i16> {
        &self.by_year_day
    }

    /// Allowed days of month; negative values count from the month's end.
    #[must_use]
    pub const fn by_month_day(&self) -> &ByFilter<i8> {
        &self.by_month_day
    }

    /// Allowed weekday/ordinal combinations.
    #[must_use]
    pub const fn by_day(&self) -> &ByFilter<WeekdayNum> {
        &self.by_day
    }

    /// Positional selection within a period; absent means none.
    #[must_use]
    pub const fn by_set_pos(&self) -> &ByFilter<i32> {
        &self.by_set_pos
    }

    /// Lazily expands this rule from `start`.
    ///
    /// `start` is both the anchor of the first period and the floor of the
    /// produced sequence. The cursor is forward-only; to iterate again,
    /// build a new one from the same rule. An `until` earlier than `start`
    /// yields an immediately exhausted cursor.
    #[must_use]
    pub fn occurrences(&self, start: D) -> Occurrences<'_, D> {
        Occurrences::new(self, start)
    }
}

impl<D: CalendarDate> fmt::Display for Recur<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FREQ={}", self.frequency)?;
        if self.interval != 1 {
            write!(f, ";INTERVAL={}", self.interval)?;
        }
        if let Some(count) = self.count {
            write!(f, ";COUNT={count}")?;
        }
        if let Some(until) = &self.until {
            write!(
                f,
                ";UNTIL={:04}{:02}{:02}T{:02}{:02}{:02}Z",
                until.year(),
                until.month(),
                until.day(),
                until.hour(),
                until.minute(),
                until.second()
            )?;
        }
        write_filter(f, "BYMONTH", &self.by_month)?;
        write_filter(f, "BYWEEKNO", &self.by_week_no)?;
        write_filter(f, "BYYEARDAY", &self.by_year_day)?;
        write_filter(f, "BYMONTHDAY", &self.by_month_day)?;
        write_filter(f, "BYDAY", &self.by_day)?;
        write_filter(f, "BYSETPOS", &self.by_set_pos)?;
        if self.week_start != Weekday::Sunday {
            write!(f, ";WKST={}", self.week_start)?;
        }
        Ok(())
    }
}

fn write_filter<T: fmt::Display + Ord>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    filter: &ByFilter<T>,
) -> fmt::Result {
    let Some(set) = filter.values() else {
        return Ok(());
    };
    write!(f, ";{name}=")?;
    for (i, value) in set.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

/// Builder mirroring each grammar token as a typed setter.
///
/// Setting a by-filter with a non-empty collection marks it explicit;
/// passing an empty collection leaves the filter at its default.
#[derive(Debug, Clone)]
pub struct RecurBuilder<D = NaiveDateTime> {
    frequency: Frequency,
    interval: u32,
    count: Option<u32>,
    until: Option<D>,
    week_start: Weekday,
    by_month: ByFilter<u32>,
    by_week_no: ByFilter<u32>,
    by_year_day: ByFilter<i16>,
    by_month_day: ByFilter<i8>,
    by_day: ByFilter<WeekdayNum>,
    by_set_pos: ByFilter<i32>,
}

impl<D: CalendarDate> RecurBuilder<D> {
    /// Step multiplier between periods.
    #[must_use]
    pub fn interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Upper bound on emitted occurrences.
    #[must_use]
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Inclusive upper bound date.
    #[must_use]
    pub fn until(mut self, until: D) -> Self {
        self.until = Some(until);
        self
    }

    /// The weekday that opens a week (default Sunday).
    #[must_use]
    pub fn week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    /// Allowed months, `1..=12`.
    #[must_use]
    pub fn by_month(mut self, months: impl IntoIterator<Item = u32>) -> Self {
        self.by_month = ByFilter::from_values(months);
        self
    }

    /// Allowed ISO week numbers.
    #[must_use]
    pub fn by_week_no(mut self, weeks: impl IntoIterator<Item = u32>) -> Self {
        self.by_week_no = ByFilter::from_values(weeks);
        self
    }

    /// Allowed days of year; negative values count from the year's end.
    #[must_use]
    pub fn by_year_day(mut self, days: impl IntoIterator<Item = i16>) -> Self {
        self.by_year_day = ByFilter::from_values(days);
        self
    }

    /// Allowed days of month; negative values count from the month's end.
    #[must_use]
    pub fn by_month_day(mut self, days: impl IntoIterator<Item = i8>) -> Self {
        self.by_month_day = ByFilter::from_values(days);
        self
    }

    /// Allowed weekday/ordinal combinations.
    #[must_use]
    pub fn by_day(mut self, days: impl IntoIterator<Item = WeekdayNum>) -> Self {
        self.by_day = ByFilter::from_values(days);
        self
    }

    /// Positional selection within each period.
    #[must_use]
    pub fn by_set_pos(mut self, positions: impl IntoIterator<Item = i32>) -> Self {
        self.by_set_pos = ByFilter::from_values(positions);
        self
    }

    /// Validates the structural invariants and freezes the rule.
    ///
    /// ## Errors
    /// Returns [`RecurError::InvalidRulePart`] when `interval` is zero.
    pub fn build(self) -> RecurResult<Recur<D>> {
        if self.interval == 0 {
            return Err(RecurError::InvalidRulePart {
                name: "INTERVAL".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(Recur {
            frequency: self.frequency,
            interval: self.interval,
            count: self.count,
            until: self.until,
            week_start: self.week_start,
            by_month: self.by_month,
            by_week_no: self.by_week_no,
            by_year_day: self.by_year_day,
            by_month_day: self.by_month_day,
            by_day: self.by_day,
            by_set_pos: self.by_set_pos,
        })
    }
}
