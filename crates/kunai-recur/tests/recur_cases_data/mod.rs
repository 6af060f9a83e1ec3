use chrono::NaiveDateTime;
use kunai_recur::Recur;

pub struct RecurCase {
    pub name: &'static str,
    pub rule: &'static str,
    pub start: &'static str,
    pub expected: &'static [&'static str],
    pub limit: usize,
    /// Whether the cursor must be exhausted once `expected` is consumed.
    pub expect_end: bool,
}

#[expect(clippy::too_many_lines)]
pub fn recur_cases() -> Vec<RecurCase> {
    vec![
        RecurCase {
            name: "daily_count",
            rule: "FREQ=DAILY;COUNT=3",
            start: "2024-01-30T09:30:00",
            expected: &[
                "2024-01-30T09:30:00",
                "2024-01-31T09:30:00",
                "2024-02-01T09:30:00",
            ],
            limit: 10,
            expect_end: true,
        },
        RecurCase {
            name: "daily_until",
            rule: "FREQ=DAILY;UNTIL=20240103T000000Z",
            start: "2024-01-01T00:00:00",
            expected: &[
                "2024-01-01T00:00:00",
                "2024-01-02T00:00:00",
                "2024-01-03T00:00:00",
            ],
            limit: 10,
            expect_end: true,
        },
        RecurCase {
            name: "secondly_basic",
            rule: "FREQ=SECONDLY;COUNT=3",
            start: "2024-01-01T09:00:00",
            expected: &[
                "2024-01-01T09:00:00",
                "2024-01-01T09:00:01",
                "2024-01-01T09:00:02",
            ],
            limit: 10,
            expect_end: true,
        },
        RecurCase {
            name: "minutely_basic",
            rule: "FREQ=MINUTELY;COUNT=3",
            start: "2024-01-01T09:00:00",
            expected: &[
                "2024-01-01T09:00:00",
                "2024-01-01T09:01:00",
                "2024-01-01T09:02:00",
            ],
            limit: 10,
            expect_end: true,
        },
        RecurCase {
            name: "hourly_basic",
            rule: "FREQ=HOURLY;COUNT=3",
            start: "2024-01-01T09:00:00",
            expected: &[
                "2024-01-01T09:00:00",
                "2024-01-01T10:00:00",
                "2024-01-01T11:00:00",
            ],
            limit: 10,
            expect_end: true,
        },
        RecurCase {
            name: "weekly_plain",
            rule: "FREQ=WEEKLY;COUNT=3",
            start: "1997-09-02T09:00:00",
            expected: &[
                "1997-09-02T09:00:00",
                "1997-09-09T09:00:00",
                "1997-09-16T09:00:00",
            ],
            limit: 10,
            expect_end: true,
        },
        RecurCase {
            name: "weekly_byday",
            rule: "FREQ=WEEKLY;COUNT=3;BYDAY=TU,TH",
            start: "1997-09-02T09:00:00",
            expected: &[
                "1997-09-02T09:00:00",
                "1997-09-04T09:00:00",
                "1997-09-09T09:00:00",
            ],
            limit: 10,
            expect_end: true,
        },
        RecurCase {
            name: "weekly_byday_wkst",
            rule: "FREQ=WEEKLY;BYDAY=MO,WE,FR;WKST=MO",
            start: "2024-01-01T09:00:00",
            expected: &[
                "2024-01-01T09:00:00",
                "2024-01-03T09:00:00",
                "2024-01-05T09:00:00",
                "2024-01-08T09:00:00",
                "2024-01-10T09:00:00",
            ],
            limit: 5,
            expect_end: false,
        },
        RecurCase {
            name: "weekly_interval_two",
            rule: "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,FR;WKST=MO",
            start: "2024-01-01T09:00:00",
            expected: &[
                "2024-01-01T09:00:00",
                "2024-01-05T09:00:00",
                "2024-01-15T09:00:00",
                "2024-01-19T09:00:00",
            ],
            limit: 4,
            expect_end: false,
        },
        RecurCase {
            name: "monthly_last_day",
            rule: "FREQ=MONTHLY;BYMONTHDAY=-1",
            start: "2024-01-01T00:00:00",
            expected: &[
                "2024-01-31T00:00:00",
                "2024-02-29T00:00:00",
                "2024-03-31T00:00:00",
            ],
            limit: 3,
            expect_end: false,
        },
        RecurCase {
            name: "monthly_month_end_clamp",
            rule: "FREQ=MONTHLY",
            start: "2024-01-31T09:00:00",
            expected: &[
                "2024-01-31T09:00:00",
                "2024-02-29T09:00:00",
                "2024-03-31T09:00:00",
                "2024-04-30T09:00:00",
            ],
            limit: 4,
            expect_end: false,
        },
        RecurCase {
            name: "monthly_second_monday",
            rule: "FREQ=MONTHLY;BYDAY=2MO",
            start: "2024-01-01T00:00:00",
            expected: &[
                "2024-01-08T00:00:00",
                "2024-02-12T00:00:00",
                "2024-03-11T00:00:00",
            ],
            limit: 3,
            expect_end: false,
        },
        RecurCase {
            name: "monthly_last_friday_setpos",
            rule: "FREQ=MONTHLY;BYDAY=FR;BYSETPOS=-1",
            start: "2024-01-01T00:00:00",
            expected: &[
                "2024-02-23T00:00:00",
                "2024-03-29T00:00:00",
                "2024-04-26T00:00:00",
            ],
            limit: 3,
            expect_end: false,
        },
        RecurCase {
            name: "yearly_fourth_thursday",
            rule: "FREQ=YEARLY;BYMONTH=11;BYDAY=4TH",
            start: "2024-01-01T09:00:00",
            expected: &["2024-11-28T09:00:00", "2025-11-27T09:00:00"],
            limit: 2,
            expect_end: false,
        },
        RecurCase {
            name: "yearly_year_days",
            rule: "FREQ=YEARLY;BYYEARDAY=1,-1",
            start: "2024-01-01T00:00:00",
            expected: &[
                "2024-01-01T00:00:00",
                "2024-12-31T00:00:00",
                "2025-01-01T00:00:00",
                "2025-12-31T00:00:00",
            ],
            limit: 4,
            expect_end: false,
        },
        RecurCase {
            name: "yearly_by_month",
            rule: "FREQ=YEARLY;BYMONTH=3,9",
            start: "2024-06-15T12:00:00",
            expected: &[
                "2024-09-15T12:00:00",
                "2025-03-15T12:00:00",
                "2025-09-15T12:00:00",
            ],
            limit: 3,
            expect_end: false,
        },
        RecurCase {
            name: "yearly_week_numbers",
            rule: "FREQ=YEARLY;BYDAY=MO;BYWEEKNO=20",
            start: "2024-01-01T00:00:00",
            expected: &["2024-05-13T00:00:00", "2025-05-12T00:00:00"],
            limit: 2,
            expect_end: false,
        },
        RecurCase {
            name: "yearly_plain",
            rule: "FREQ=YEARLY;COUNT=3",
            start: "2012-01-01T09:00:00",
            expected: &[
                "2012-01-01T09:00:00",
                "2013-01-01T09:00:00",
                "2014-01-01T09:00:00",
            ],
            limit: 10,
            expect_end: true,
        },
    ]
}

pub fn assert_case(case: &RecurCase) {
    let rule: Recur = case
        .rule
        .parse()
        .unwrap_or_else(|err| panic!("Failed to parse {}: {err}", case.name));

    let start = parse_datetime(case.start);
    let mut cursor = rule.occurrences(start);
    let actual: Vec<NaiveDateTime> = cursor.by_ref().take(case.limit).collect();
    let expected: Vec<NaiveDateTime> = case
        .expected
        .iter()
        .map(|value| parse_datetime(value))
        .collect();

    assert_eq!(actual, expected, "Case {} did not match", case.name);

    if case.expect_end {
        assert_eq!(
            cursor.next(),
            None,
            "Case {} should be exhausted",
            case.name
        );
        assert_eq!(
            cursor.next(),
            None,
            "Case {} exhaustion should be sticky",
            case.name
        );
    }
}

fn parse_datetime(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .unwrap_or_else(|err| panic!("Failed to parse datetime {value}: {err}"))
}
