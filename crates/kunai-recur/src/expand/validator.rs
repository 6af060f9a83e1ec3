//! Candidate validation: the pure conjunction of a rule's date filters.

use kunai_core::{CalendarDate, Weekday};

use crate::rule::{ByFilter, Recur, WeekdayNum};

/// Whether `date` satisfies every explicit filter of `rule`.
///
/// Filters left at their defaults pass vacuously. Pure: neither the rule
/// nor the candidate is touched.
pub(crate) fn validate<D: CalendarDate>(rule: &Recur<D>, date: &D) -> bool {
    rule.by_month().contains(&date.month())
        && rule.by_week_no().contains(&date.iso_week())
        && month_day_matches(rule.by_month_day(), date)
        && year_day_matches(rule.by_year_day(), date)
        && weekday_matches(rule.by_day(), date)
}

/// Day-of-month test, in both the forward and the counted-from-month-end
/// form (the last day of the month is `-1`).
fn month_day_matches<D: CalendarDate>(filter: &ByFilter<i8>, date: &D) -> bool {
    let ByFilter::Explicit(set) = filter else {
        return true;
    };
    let day = to_i8(date.day());
    let from_end = -to_i8(date.days_in_month() - date.day() + 1);
    set.contains(&day) || set.contains(&from_end)
}

/// Day-of-year test, in both the forward and the counted-from-year-end
/// form (the last day of the year is `-1`).
fn year_day_matches<D: CalendarDate>(filter: &ByFilter<i16>, date: &D) -> bool {
    let ByFilter::Explicit(set) = filter else {
        return true;
    };
    let day = i16::try_from(date.day_of_year()).unwrap_or(i16::MAX);
    let year_length: i16 = if date.is_leap_year() { 366 } else { 365 };
    set.contains(&day) || set.contains(&(day - year_length - 1))
}

/// Weekday-ordinal label test: the forward ordinal (`ceil(day/7)`), the
/// wildcard 0, or the ordinal counted back from the month's end; a match
/// on any of the three satisfies the filter.
pub(crate) fn weekday_matches<D: CalendarDate>(filter: &ByFilter<WeekdayNum>, date: &D) -> bool {
    let ByFilter::Explicit(set) = filter else {
        return true;
    };
    let weekday = date.weekday();
    let forward = to_i8((date.day() - 1) / 7 + 1);
    let backward = to_i8((date.days_in_month() - date.day()) / 7 + 1);
    set.contains(&WeekdayNum::nth(forward, weekday))
        || set.contains(&WeekdayNum::any(weekday))
        || set.contains(&WeekdayNum::nth(-backward, weekday))
}

/// Whether any entry of an explicit BYDAY filter names `weekday`,
/// regardless of ordinal; vacuously true when defaulted.
pub(crate) fn byday_names_weekday(filter: &ByFilter<WeekdayNum>, weekday: Weekday) -> bool {
    match filter.values() {
        None => true,
        Some(set) => set.iter().any(|entry| entry.weekday == weekday),
    }
}

/// Day-derived quantities stay well under `i8::MAX`; the fallback only
/// guards the conversion.
fn to_i8(value: u32) -> i8 {
    i8::try_from(value).unwrap_or(i8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    type NaiveRecur = Recur<NaiveDateTime>;

    fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDateTime::from_parts(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn default_rule_accepts_everything() {
        let rule = NaiveRecur::builder(crate::rule::Frequency::Daily)
            .build()
            .unwrap();
        assert!(validate(&rule, &date(2024, 2, 29)));
    }

    #[test]
    fn month_filter() {
        let rule = NaiveRecur::builder(crate::rule::Frequency::Yearly)
            .by_month([11_u32])
            .build()
            .unwrap();
        assert!(validate(&rule, &date(2024, 11, 5)));
        assert!(!validate(&rule, &date(2024, 10, 5)));
    }

    #[test]
    fn month_day_negative_form() {
        let rule = NaiveRecur::builder(crate::rule::Frequency::Monthly)
            .by_month_day([-1_i8])
            .build()
            .unwrap();
        assert!(validate(&rule, &date(2024, 1, 31)));
        assert!(validate(&rule, &date(2024, 2, 29)));
        assert!(!validate(&rule, &date(2024, 2, 28)));
    }

    #[test]
    fn year_day_negative_form() {
        let rule = NaiveRecur::builder(crate::rule::Frequency::Yearly)
            .by_year_day([-1_i16])
            .build()
            .unwrap();
        // Last day of a leap and a regular year.
        assert!(validate(&rule, &date(2024, 12, 31)));
        assert!(validate(&rule, &date(2025, 12, 31)));
        assert!(!validate(&rule, &date(2024, 12, 30)));
    }

    #[test]
    fn year_day_forward_form() {
        let rule = NaiveRecur::builder(crate::rule::Frequency::Yearly)
            .by_year_day([60_i16])
            .build()
            .unwrap();
        // Day 60 is Feb 29 in a leap year, Mar 1 otherwise.
        assert!(validate(&rule, &date(2024, 2, 29)));
        assert!(validate(&rule, &date(2025, 3, 1)));
    }

    #[test]
    fn weekday_forward_ordinal() {
        let rule = NaiveRecur::builder(crate::rule::Frequency::Monthly)
            .by_day([WeekdayNum::nth(2, Weekday::Monday)])
            .build()
            .unwrap();
        // Mondays of January 2024: 1, 8, 15, 22, 29.
        assert!(validate(&rule, &date(2024, 1, 8)));
        assert!(!validate(&rule, &date(2024, 1, 1)));
        assert!(!validate(&rule, &date(2024, 1, 15)));
        assert!(!validate(&rule, &date(2024, 1, 9)));
    }

    #[test]
    fn weekday_backward_ordinal() {
        let rule = NaiveRecur::builder(crate::rule::Frequency::Monthly)
            .by_day([WeekdayNum::nth(-1, Weekday::Friday)])
            .build()
            .unwrap();
        // Fridays of February 2024: 2, 9, 16, 23.
        assert!(validate(&rule, &date(2024, 2, 23)));
        assert!(!validate(&rule, &date(2024, 2, 16)));
    }

    #[test]
    fn weekday_wildcard() {
        let rule = NaiveRecur::builder(crate::rule::Frequency::Weekly)
            .by_day([WeekdayNum::any(Weekday::Wednesday)])
            .build()
            .unwrap();
        assert!(validate(&rule, &date(2024, 1, 3)));
        assert!(validate(&rule, &date(2024, 1, 31)));
        assert!(!validate(&rule, &date(2024, 1, 4)));
    }

    #[test]
    fn week_number_filter() {
        let rule = NaiveRecur::builder(crate::rule::Frequency::Yearly)
            .by_week_no([20_u32])
            .build()
            .unwrap();
        // 2024-05-13 opens ISO week 20 of 2024.
        assert!(validate(&rule, &date(2024, 5, 13)));
        assert!(!validate(&rule, &date(2024, 5, 6)));
    }

    #[test]
    fn conjunction_requires_every_filter() {
        let rule = NaiveRecur::builder(crate::rule::Frequency::Monthly)
            .by_month_day([13_i8])
            .by_day([WeekdayNum::any(Weekday::Friday)])
            .build()
            .unwrap();
        // 2024-09-13 is a Friday; 2024-01-13 is a Saturday.
        assert!(validate(&rule, &date(2024, 9, 13)));
        assert!(!validate(&rule, &date(2024, 1, 13)));
        assert!(!validate(&rule, &date(2024, 9, 6)));
    }
}
