//! Candidate generation: one period's candidate dates and the next anchor.
//!
//! Strategy selection depends on the frequency and on which filters are
//! explicit; the first matching strategy wins. The generator casts a wide
//! net on purpose (e.g. every day of the month) and leaves the narrowing
//! to the validator; only positional selection filters here, because it
//! needs the whole period's match list at once.

use std::cmp::Ordering;

use kunai_core::{CalendarDate, DateUnit};

use crate::expand::validator;
use crate::rule::{Frequency, Recur};

/// One period's worth of candidates plus the anchor of the next period.
///
/// Candidates are date-ordered and deduplicated (explicit sets iterate in
/// value order, which is not date order). A `None` anchor means stepping
/// left the representable range and the cursor should exhaust.
pub(crate) struct Period<D> {
    pub candidates: Vec<D>,
    pub next_anchor: Option<D>,
}

/// Which candidate strategy a rule selects for its periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Positional selection among the month's BYDAY matches.
    SetPositions,
    /// Explicit days of the anchor's year.
    YearDays,
    /// Every day of the selected months of the anchor's year.
    YearWeekdays,
    /// The anchor's week, bounded by the week start.
    Week,
    /// Every day of the anchor's month.
    MonthDays,
    /// The anchor's day of month in each selected month.
    Months,
    /// The anchor itself.
    Anchor,
}

fn select<D: CalendarDate>(rule: &Recur<D>) -> Strategy {
    if rule.by_set_pos().is_explicit() {
        Strategy::SetPositions
    } else if rule.by_year_day().is_explicit() {
        Strategy::YearDays
    } else if rule.frequency() == Frequency::Yearly && rule.by_day().is_explicit() {
        Strategy::YearWeekdays
    } else if rule.frequency() == Frequency::Weekly {
        Strategy::Week
    } else if rule.frequency() == Frequency::Monthly
        && (rule.by_day().is_explicit() || rule.by_month_day().is_explicit())
    {
        Strategy::MonthDays
    } else if rule.by_month().is_explicit() {
        Strategy::Months
    } else {
        Strategy::Anchor
    }
}

/// Expands the period anchored at `anchor` and computes the next anchor.
pub(crate) fn expand_period<D: CalendarDate>(rule: &Recur<D>, anchor: &D, start: &D) -> Period<D> {
    let mut candidates = Vec::new();
    let mut week_boundary = None;

    match select(rule) {
        Strategy::SetPositions => fill_set_positions(rule, anchor, start, &mut candidates),
        Strategy::YearDays => fill_year_days(rule, anchor, &mut candidates),
        Strategy::YearWeekdays => fill_year_weekdays(rule, anchor, &mut candidates),
        Strategy::Week => week_boundary = fill_week(rule, anchor, &mut candidates),
        Strategy::MonthDays => push_month_days(rule, anchor, &mut candidates),
        Strategy::Months => fill_months(rule, anchor, start, &mut candidates),
        Strategy::Anchor => candidates.push(anchor.clone()),
    }

    candidates.sort_unstable();
    candidates.dedup();

    let next_anchor = advance(rule, anchor, start, week_boundary);
    Period {
        candidates,
        next_anchor,
    }
}

/// The earliest date the period anchored at `anchor` can produce; the
/// cursor compares it against UNTIL to bound the refill loop.
pub(crate) fn period_floor<D: CalendarDate>(rule: &Recur<D>, anchor: &D) -> D {
    let floor = match select(rule) {
        Strategy::SetPositions | Strategy::MonthDays => anchor.with_day(1),
        Strategy::YearDays | Strategy::YearWeekdays | Strategy::Months => {
            anchor.with_month_day(1, 1)
        }
        Strategy::Week | Strategy::Anchor => None,
    };
    floor.unwrap_or_else(|| anchor.clone())
}

/// Positional selection: the seed occurrence is proposed as-is; later
/// periods pick one candidate per set position from the month's ordered
/// BYDAY matches. Out-of-range positions yield no candidate.
fn fill_set_positions<D: CalendarDate>(rule: &Recur<D>, anchor: &D, start: &D, out: &mut Vec<D>) {
    if anchor == start {
        out.push(anchor.clone());
        return;
    }

    let mut matches = Vec::new();
    for day in 1..=anchor.days_in_month() {
        if let Some(date) = anchor.with_day(day)
            && validator::weekday_matches(rule.by_day(), &date)
        {
            matches.push(date);
        }
    }

    let Some(positions) = rule.by_set_pos().values() else {
        return;
    };
    for &position in positions {
        let index = match position.cmp(&0) {
            Ordering::Greater => usize::try_from(position - 1).ok(),
            Ordering::Less => usize::try_from(i64::from(position).unsigned_abs())
                .ok()
                .filter(|&back| back <= matches.len())
                .map(|back| matches.len() - back),
            Ordering::Equal => None,
        };
        if let Some(date) = index.and_then(|index| matches.get(index)) {
            out.push(date.clone());
        }
    }
}

/// Explicit year days, resolved against the anchor's year; negative values
/// count from the year's end. Values outside the year yield no candidate.
fn fill_year_days<D: CalendarDate>(rule: &Recur<D>, anchor: &D, out: &mut Vec<D>) {
    let Some(values) = rule.by_year_day().values() else {
        return;
    };
    let Some(jan1) = anchor.with_month_day(1, 1) else {
        return;
    };
    let year_length: i64 = if anchor.is_leap_year() { 366 } else { 365 };
    for &value in values {
        let offset = if value > 0 {
            i64::from(value) - 1
        } else {
            year_length + i64::from(value)
        };
        if (0..year_length).contains(&offset)
            && let Some(date) = jan1.checked_add(DateUnit::Days, offset)
        {
            out.push(date);
        }
    }
}

/// Yearly BYDAY: every day of every selected month of the anchor's year
/// whose ISO week number passes BYWEEKNO; the validator picks the matching
/// weekdays out of these.
fn fill_year_weekdays<D: CalendarDate>(rule: &Recur<D>, anchor: &D, out: &mut Vec<D>) {
    for month in 1..=12 {
        if !rule.by_month().contains(&month) {
            continue;
        }
        let Some(first) = anchor.with_month_day(month, 1) else {
            continue;
        };
        push_month_days(rule, &first, out);
    }
}

/// The anchor's week: the anchor itself and, with an explicit BYDAY, every
/// following day whose weekday is named, up to the next week-start-aligned
/// day. Returns that boundary so the caller can anchor the next period on
/// it.
fn fill_week<D: CalendarDate>(rule: &Recur<D>, anchor: &D, out: &mut Vec<D>) -> Option<D> {
    out.push(anchor.clone());
    if !rule.by_day().is_explicit() {
        return None;
    }
    let mut day = anchor.checked_add(DateUnit::Days, 1)?;
    while day.weekday() != rule.week_start() {
        if validator::byday_names_weekday(rule.by_day(), day.weekday()) {
            out.push(day.clone());
        }
        day = day.checked_add(DateUnit::Days, 1)?;
    }
    Some(day)
}

/// Every day of `in_month`'s month whose ISO week number passes BYWEEKNO.
fn push_month_days<D: CalendarDate>(rule: &Recur<D>, in_month: &D, out: &mut Vec<D>) {
    for day in 1..=in_month.days_in_month() {
        if let Some(date) = in_month.with_day(day)
            && rule.by_week_no().contains(&date.iso_week())
        {
            out.push(date);
        }
    }
}

/// Explicit months: the anchor's day of month in each selected month of
/// the anchor's year. Combinations that do not exist (Feb 31) and dates
/// before the sequence start produce nothing.
fn fill_months<D: CalendarDate>(rule: &Recur<D>, anchor: &D, start: &D, out: &mut Vec<D>) {
    let Some(months) = rule.by_month().values() else {
        return;
    };
    for &month in months {
        if let Some(date) = anchor.with_month_day(month, anchor.day())
            && date >= *start
        {
            out.push(date);
        }
    }
}

/// The next period's anchor.
fn advance<D: CalendarDate>(
    rule: &Recur<D>,
    anchor: &D,
    start: &D,
    week_boundary: Option<D>,
) -> Option<D> {
    // Weekly with an explicit BYDAY owns its advance through the week
    // boundary; the first interval week is the one the boundary opens.
    if let Some(boundary) = week_boundary {
        return boundary.checked_add(DateUnit::Weeks, i64::from(rule.interval()) - 1);
    }
    match rule.frequency() {
        Frequency::Monthly => advance_month(rule, anchor, start),
        frequency => anchor.checked_add(frequency.unit(), i64::from(rule.interval())),
    }
}

/// Monthly stepping preserves "same day of month" across short months: the
/// first of the month `interval` months ahead, then the start's day of
/// month clamped to that month's length.
fn advance_month<D: CalendarDate>(rule: &Recur<D>, anchor: &D, start: &D) -> Option<D> {
    let first = anchor.with_day(1)?;
    let stepped = first.checked_add(DateUnit::Months, i64::from(rule.interval()))?;
    let day = start.day().min(stepped.days_in_month());
    stepped.with_day(day)
}
