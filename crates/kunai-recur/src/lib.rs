//! Recurrence-rule expansion engine (RFC 5545 §3.3.10 RECUR subset).
//!
//! Expands an iCalendar-style recurrence rule (frequency, interval,
//! count/until bounds, and the BY* constraint dimensions) into the ordered
//! sequence of concrete occurrence dates it describes. Expansion is a lazy,
//! forward-only cursor: the engine is pure computation with no I/O and no
//! time-zone handling (points in time arrive already zone-resolved through
//! the [`CalendarDate`] capability, implemented out of the box for
//! [`chrono::NaiveDateTime`]).
//!
//! ```
//! use kunai_recur::Recur;
//! use chrono::NaiveDate;
//!
//! let rule: Recur = "FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=5".parse()?;
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//! let occurrences: Vec<_> = rule.occurrences(start).collect();
//! assert_eq!(occurrences.len(), 5);
//! # Ok::<(), kunai_recur::RecurError>(())
//! ```

pub mod error;
pub mod expand;
pub mod parse;
pub mod rule;

pub use error::{RecurError, RecurResult};
pub use expand::Occurrences;
pub use kunai_core::{CalendarDate, DateUnit, Weekday};
pub use rule::{ByFilter, Frequency, Recur, RecurBuilder, WeekdayNum};
