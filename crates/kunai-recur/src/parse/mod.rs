//! Rule token-string parser (RFC 5545 §3.3.10).
//!
//! Grammar: a `;`-separated list of `NAME=VALUE` pairs with comma-separated
//! value lists, e.g. `FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE,FR;COUNT=10`.
//! Unknown part names are ignored; malformed BYDAY items are dropped
//! rather than failing the rule (legacy calendar data relies on this).
//!
//! Error sources are intentionally discarded during parsing
//! (`map_err_ignore`) until richer error types are implemented for
//! value-level parsing.
#![expect(
    clippy::map_err_ignore,
    reason = "Value parsers intentionally discard error sources pending richer error types"
)]

use std::str::FromStr;

use kunai_core::{CalendarDate, Weekday};

use crate::error::{RecurError, RecurResult};
use crate::rule::{Frequency, Recur, WeekdayNum};

/// Parses a recurrence rule from its token string.
///
/// ## Errors
///
/// Returns [`RecurError::InvalidFrequency`] when FREQ is missing or
/// unrecognized, [`RecurError::InvalidDate`] when UNTIL does not parse, and
/// [`RecurError::InvalidRulePart`] for numeric values that do not parse or
/// violate a structural invariant.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_recur<D: CalendarDate>(input: &str) -> RecurResult<Recur<D>> {
    let mut frequency = None;
    let mut interval = None;
    let mut count = None;
    let mut until = None;
    let mut week_start = None;
    let mut by_month: Vec<u32> = Vec::new();
    let mut by_week_no: Vec<u32> = Vec::new();
    let mut by_year_day: Vec<i16> = Vec::new();
    let mut by_month_day: Vec<i8> = Vec::new();
    let mut by_day: Vec<WeekdayNum> = Vec::new();
    let mut by_set_pos: Vec<i32> = Vec::new();

    for part in input.split(';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let Some((name, value)) = part.split_once('=') else {
            return Err(RecurError::InvalidRulePart {
                name: part.to_string(),
                value: String::new(),
            });
        };

        match name.to_ascii_uppercase().as_str() {
            "FREQ" => {
                frequency = Some(
                    Frequency::parse(value)
                        .ok_or_else(|| RecurError::InvalidFrequency(value.to_string()))?,
                );
            }
            "INTERVAL" => interval = Some(parse_number("INTERVAL", value)?),
            "COUNT" => count = Some(parse_number("COUNT", value)?),
            "UNTIL" => until = Some(parse_date_value(value)?),
            "WKST" => {
                // Unrecognized codes leave the Sunday default unchanged.
                if let Some(day) = Weekday::parse(value) {
                    week_start = Some(day);
                } else {
                    tracing::trace!(value, "Ignoring unrecognized WKST value");
                }
            }
            "BYMONTH" => by_month = parse_number_list("BYMONTH", value)?,
            "BYWEEKNO" => by_week_no = parse_number_list("BYWEEKNO", value)?,
            "BYYEARDAY" => by_year_day = parse_number_list("BYYEARDAY", value)?,
            "BYMONTHDAY" => by_month_day = parse_number_list("BYMONTHDAY", value)?,
            "BYDAY" => by_day = parse_byday(value),
            "BYSETPOS" => by_set_pos = parse_number_list("BYSETPOS", value)?,
            _ => {
                tracing::trace!(name, "Ignoring unknown rule part");
            }
        }
    }

    let Some(frequency) = frequency else {
        return Err(RecurError::InvalidFrequency(input.to_string()));
    };

    let mut builder = Recur::builder(frequency)
        .by_month(by_month)
        .by_week_no(by_week_no)
        .by_year_day(by_year_day)
        .by_month_day(by_month_day)
        .by_day(by_day)
        .by_set_pos(by_set_pos);
    if let Some(interval) = interval {
        builder = builder.interval(interval);
    }
    if let Some(count) = count {
        builder = builder.count(count);
    }
    if let Some(until) = until {
        builder = builder.until(until);
    }
    if let Some(week_start) = week_start {
        builder = builder.week_start(week_start);
    }

    let rule = builder.build()?;
    tracing::debug!(rule = %rule, "Parsed recurrence rule");
    Ok(rule)
}

impl<D: CalendarDate> FromStr for Recur<D> {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_recur(s)
    }
}

/// Parses a single numeric token value.
fn parse_number<T: FromStr>(name: &'static str, value: &str) -> RecurResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| RecurError::InvalidRulePart {
            name: name.to_string(),
            value: value.to_string(),
        })
}

/// Parses a comma-separated list of numeric token values.
fn parse_number_list<T: FromStr>(name: &'static str, value: &str) -> RecurResult<Vec<T>> {
    value
        .split(',')
        .map(|item| parse_number(name, item))
        .collect()
}

/// Parses a BYDAY list; items that do not resolve are dropped.
fn parse_byday(value: &str) -> Vec<WeekdayNum> {
    value
        .split(',')
        .filter_map(|item| {
            let item = item.trim();
            let parsed = parse_weekday_num(item);
            if parsed.is_none() {
                tracing::trace!(item, "Dropping unrecognized BYDAY entry");
            }
            parsed
        })
        .collect()
}

/// Parses a single weekday with optional signed ordinal (`MO`, `2MO`,
/// `-1FR`); the last two characters are the weekday code.
fn parse_weekday_num(item: &str) -> Option<WeekdayNum> {
    if item.len() < 2 {
        return None;
    }
    let split = item.len() - 2;
    let weekday = Weekday::parse(item.get(split..)?)?;
    let ordinal_str = item.get(..split)?;
    let ordinal = if ordinal_str.is_empty() {
        0
    } else {
        ordinal_str.parse().ok()?
    };
    Some(WeekdayNum::nth(ordinal, weekday))
}

/// Parses an UNTIL-style date token.
///
/// A trailing `Z` marker is stripped first; both the compact
/// `YYYYMMDD[THHMMSS]` forms and their dashed/colon-separated ISO
/// equivalents are accepted.
fn parse_date_value<D: CalendarDate>(raw: &str) -> RecurResult<D> {
    let invalid = || RecurError::InvalidDate(raw.to_string());

    let text = raw.trim();
    let text = text.strip_suffix(['Z', 'z']).unwrap_or(text);

    let mut digits = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if !matches!(c, '-' | ':' | 'T' | ' ') {
            return Err(invalid());
        }
    }

    let time = match digits.len() {
        8 => None,
        14 => Some(&digits[8..]),
        _ => return Err(invalid()),
    };

    let year = digits[0..4].parse::<i32>().map_err(|_| invalid())?;
    let month = digits[4..6].parse::<u32>().map_err(|_| invalid())?;
    let day = digits[6..8].parse::<u32>().map_err(|_| invalid())?;

    let (hour, minute, second) = if let Some(time) = time {
        (
            time[0..2].parse::<u32>().map_err(|_| invalid())?,
            time[2..4].parse::<u32>().map_err(|_| invalid())?,
            time[4..6].parse::<u32>().map_err(|_| invalid())?,
        )
    } else {
        (0, 0, 0)
    };

    D::from_parts(year, month, day, hour, minute, second).ok_or_else(invalid)
}
