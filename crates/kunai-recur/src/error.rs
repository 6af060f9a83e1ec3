use thiserror::Error;

/// Rule construction errors.
///
/// All failures surface synchronously while building a rule; once a rule is
/// built, expansion only terminates, it never errors.
#[derive(Error, Debug)]
pub enum RecurError {
    /// The FREQ token is missing or not one of the seven frequency names.
    #[error("invalid frequency: {0:?}")]
    InvalidFrequency(String),

    /// An UNTIL or start date token that does not parse.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// A rule part whose value does not parse or violates a structural
    /// invariant (e.g. `INTERVAL=0`).
    #[error("invalid value for {name}: {value:?}")]
    InvalidRulePart {
        /// The token the value belongs to.
        name: String,
        /// The offending raw value.
        value: String,
    },
}

pub type RecurResult<T> = std::result::Result<T, RecurError>;
