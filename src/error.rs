//! This module implements `DateFmtError`.

use alloc::borrow::Cow;
use core::fmt;

use datefmt_provider::TimeZoneProviderError;

/// `DateFmtError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// RangeError.
    Range,
    /// An internal invariant failed.
    Assert,
    /// A recycled index fell outside of the vectorized length.
    OutOfBounds,
    /// A missing element was read without checking for it first.
    MissingValue,
    /// The calendar engine could not complete an operation.
    Engine,
    /// A literal date pattern is malformed.
    UnsupportedPattern,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Range => "RangeError",
            Self::Assert => "ImplementationError",
            Self::OutOfBounds => "OutOfBoundsError",
            Self::MissingValue => "MissingValueError",
            Self::Engine => "EngineError",
            Self::UnsupportedPattern => "PatternError",
        }
        .fmt(f)
    }
}

/// The error type for `datefmt_rs`.
#[derive(Debug, Clone, PartialEq)]
pub struct DateFmtError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl DateFmtError {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Create a generic error
    #[must_use]
    pub fn general<S>(msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a range error.
    #[must_use]
    pub fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create an assertion error.
    #[must_use]
    pub fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Create an out of bounds access error.
    #[must_use]
    pub fn out_of_bounds() -> Self {
        Self::new(ErrorKind::OutOfBounds)
    }

    /// Create a missing value access error.
    #[must_use]
    pub fn missing_value() -> Self {
        Self::new(ErrorKind::MissingValue)
    }

    /// Create a calendar engine error.
    #[must_use]
    pub fn engine() -> Self {
        Self::new(ErrorKind::Engine)
    }

    /// Create a malformed pattern error.
    #[must_use]
    pub fn pattern() -> Self {
        Self::new(ErrorKind::UnsupportedPattern)
    }

    /// Add a message to the error.
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Returns this error's kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Extracts the error message.
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for DateFmtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl core::error::Error for DateFmtError {}

impl From<TimeZoneProviderError> for DateFmtError {
    fn from(value: TimeZoneProviderError) -> Self {
        match value {
            TimeZoneProviderError::Range(msg) => Self::range().with_message(msg),
            TimeZoneProviderError::Assert(msg) => Self::assert().with_message(msg),
            TimeZoneProviderError::Data(msg) => Self::general(msg),
        }
    }
}
