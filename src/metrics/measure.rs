use core::fmt::{Display, Formatter};
use serde::{Serialize, Serializer};

/// Text rendered for a measure that has no meaningful value.
pub const NOT_APPLICABLE: &str = "N/A";

/// A rounded integer statistic that may be undefined.
///
/// Percentages with a zero denominator and averages over no samples are `NotApplicable`
/// rather than zero so that reports can tell "none" apart from "nothing to measure".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Value(i64),
    NotApplicable,
}

impl Measure {
    #[must_use]
    pub const fn value(self) -> Option<i64> {
        match self {
            Self::Value(v) => Some(v),
            Self::NotApplicable => None,
        }
    }

    #[must_use]
    pub const fn is_applicable(self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl Display for Measure {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::NotApplicable => f.write_str(NOT_APPLICABLE),
        }
    }
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_i64(*v),
            Self::NotApplicable => serializer.serialize_str(NOT_APPLICABLE),
        }
    }
}
