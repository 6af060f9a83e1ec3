//! The recurrence rule model.
//!
//! These types are the validated, immutable description of a rule. They are
//! designed for:
//! - Sharing: a built rule is read-only and may back any number of cursors
//! - Intent: each constraint dimension is a tagged default-or-explicit
//!   filter rather than a set plus an ambient boolean
//! - Round-tripping: `Display` renders the canonical token string

mod frequency;
mod recur;

pub use frequency::Frequency;
pub use recur::{ByFilter, Recur, RecurBuilder, WeekdayNum};
