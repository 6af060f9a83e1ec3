//! Shared calendar primitives for the kunai recurrence engine.
//!
//! This crate holds the environment-supplied calendar capability the engine
//! is generic over: the [`CalendarDate`] trait, the [`DateUnit`] stepping
//! unit, and the [`Weekday`] token enum. The engine itself lives in
//! `kunai-recur`; everything here is a leaf with no knowledge of recurrence
//! rules.

pub mod date;
pub mod weekday;

pub use date::{CalendarDate, DateUnit};
pub use weekday::Weekday;
