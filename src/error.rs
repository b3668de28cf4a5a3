//! Construction-time error surface.
//!
//! Everything that happens *during* a solve is categorical rather than
//! exceptional (see the crate-level docs): unrepresentable magnitudes,
//! non-isolated clusters and exhausted Newton budgets are reported through
//! status tags and `continue`s, never through `Result`. `CoreError` exists
//! only for malformed inputs discovered before any engine call is made.

use std::fmt;

/// Errors raised while building a [`crate::polynomial::Polynomial`] or an
/// [`crate::config::EngineConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The coefficient slice did not have `degree + 1` entries.
    DegreeMismatch { expected: usize, got: usize },
    /// Every coefficient modulus was zero; there is no leading term to hang
    /// a Newton polygon off of.
    NoRepresentableLeadingCoefficient,
    /// `goal` did not start with a character this engine recognises.
    UnknownGoal(char),
    /// `data_type` did not start with a character this engine recognises.
    UnknownDataType(char),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegreeMismatch { expected, got } => {
                write!(f, "expected {expected} coefficients, got {got}")
            }
            Self::NoRepresentableLeadingCoefficient => {
                write!(f, "all coefficient moduli are zero")
            }
            Self::UnknownGoal(c) => write!(f, "unrecognized goal tag '{c}'"),
            Self::UnknownDataType(c) => write!(f, "unrecognized data_type tag '{c}'"),
        }
    }
}

impl std::error::Error for CoreError {}

pub type Result<T> = std::result::Result<T, CoreError>;
