//! Rule expansion: candidate generation, validation, and the occurrence
//! cursor.
//!
//! The generator proposes one period's worth of candidate dates, the
//! validator is the pure pass/fail predicate over the rule's filters, and
//! [`Occurrences`] drives both across successive periods while applying the
//! count/until bounds.

mod cursor;
mod generator;
mod validator;

pub use cursor::Occurrences;
