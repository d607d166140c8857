//! Bounded utilization percentage with an explicit "unavailable" state.
//!
//! Every derived metric in a snapshot is one of these values, so a failed
//! or degenerate computation (zero denominator, unreadable counter file)
//! shows up as `Unavailable` instead of being dropped from the output.

use serde::{Serialize, Serializer};
use std::fmt;

/// A utilization percentage in `[0, 100]`, displayed with two decimals,
/// or `Unavailable` when the underlying counters could not be read or the
/// computation was degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Utilization {
    Percent(f64),
    Unavailable,
}

impl Utilization {
    /// Wraps a raw percentage, clamping it into `[0, 100]`.
    ///
    /// Non-finite inputs become `Unavailable` rather than NaN output.
    pub fn percent(value: f64) -> Self {
        if value.is_finite() {
            Utilization::Percent(value.clamp(0.0, 100.0))
        } else {
            Utilization::Unavailable
        }
    }

    /// Derives `100 * used / total`, treating a zero or invalid total as
    /// `Unavailable`.
    pub fn from_ratio(used: f64, total: f64) -> Self {
        if total <= 0.0 || !total.is_finite() || !used.is_finite() {
            return Utilization::Unavailable;
        }
        Utilization::percent(100.0 * used / total)
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Utilization::Percent(_))
    }
}

impl fmt::Display for Utilization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Utilization::Percent(v) => write!(f, "{:.2}", v),
            Utilization::Unavailable => write!(f, "unavailable"),
        }
    }
}

impl Serialize for Utilization {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Round to the two decimals the display contract promises.
            Utilization::Percent(v) => serializer.serialize_f64((v * 100.0).round() / 100.0),
            Utilization::Unavailable => serializer.serialize_none(),
        }
    }
}
