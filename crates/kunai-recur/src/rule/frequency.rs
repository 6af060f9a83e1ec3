//! Recurrence frequency (RFC 5545 §3.3.10 FREQ).

use std::fmt;

use kunai_core::DateUnit;

/// The recurrence unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Parses a frequency name, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SECONDLY" => Some(Self::Secondly),
            "MINUTELY" => Some(Self::Minutely),
            "HOURLY" => Some(Self::Hourly),
            "DAILY" => Some(Self::Daily),
            "WEEKLY" => Some(Self::Weekly),
            "MONTHLY" => Some(Self::Monthly),
            "YEARLY" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// The canonical token name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// The calendar unit one period step covers.
    #[must_use]
    pub const fn unit(self) -> DateUnit {
        match self {
            Self::Secondly => DateUnit::Seconds,
            Self::Minutely => DateUnit::Minutes,
            Self::Hourly => DateUnit::Hours,
            Self::Daily => DateUnit::Days,
            Self::Weekly => DateUnit::Weeks,
            Self::Monthly => DateUnit::Months,
            Self::Yearly => DateUnit::Years,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
