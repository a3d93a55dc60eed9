//! Options accepted by the vectorized entry points.

use core::{fmt, str::FromStr};

/// How input lengths that do not divide the longest length are treated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RecyclingPolicy {
    /// Shorter inputs are repeated cyclically without comment.
    Permissive,
    /// Shorter inputs are repeated cyclically and a warning is logged.
    #[default]
    Warn,
    /// Lengths that do not divide the longest length are rejected.
    Strict,
}

/// A parsing error for `RecyclingPolicy`.
#[derive(Debug, Clone, Copy)]
pub struct ParseRecyclingPolicyError;

impl fmt::Display for ParseRecyclingPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid recycling policy")
    }
}

impl FromStr for RecyclingPolicy {
    type Err = ParseRecyclingPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permissive" => Ok(Self::Permissive),
            "warn" => Ok(Self::Warn),
            "strict" => Ok(Self::Strict),
            _ => Err(ParseRecyclingPolicyError),
        }
    }
}

impl fmt::Display for RecyclingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permissive => "permissive",
            Self::Warn => "warn",
            Self::Strict => "strict",
        }
        .fmt(f)
    }
}
