//! The `datefmt_rs` crate formats and parses date-times element-wise over
//! sequences of timestamps, texts and patterns.
//!
//! ```rust
//! use datefmt_rs::{format_datetime, parse_datetime};
//!
//! let formatted = format_datetime(
//!     &[Some(0.0)],
//!     &[Some("date_short"), Some("yyyy-MM-dd'T'HH:mm")],
//!     Some("UTC"),
//!     Some("en_US"),
//! )
//! .unwrap();
//! assert_eq!(formatted, [Some("1/1/70".to_owned()), Some("1970-01-01T00:00".to_owned())]);
//!
//! let parsed = parse_datetime(
//!     &[Some("1/1/70")],
//!     &[Some("date_short")],
//!     false,
//!     Some("UTC"),
//!     Some("en_US"),
//! )
//! .unwrap();
//! assert_eq!(parsed.values, [Some(0.0)]);
//! assert_eq!(parsed.tzone.as_deref(), Some("UTC"));
//! ```
//!
//! Shorter inputs are recycled to the length of the longest one, a missing
//! element in any input gives a missing output, and patterns are either one
//! of the symbolic style names in [`StyleName::VOCABULARY`] or LDML date
//! patterns. Formatters are reused for as long as consecutive elements share
//! a pattern.
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    clippy::option_if_let_else,

    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
)]

extern crate alloc;
extern crate core;

pub mod calendar;
pub mod error;
pub mod format;
pub mod locale;
pub mod options;
pub mod recycle;
pub mod timezone;
pub mod vector;

mod driver;
mod iso;
mod sys;

#[cfg(feature = "tzdb")]
mod compiled;

#[doc(inline)]
pub use error::DateFmtError;

/// The `datefmt_rs` result type
pub type DateFmtResult<T> = Result<T, DateFmtError>;

pub use calendar::Calendar;
pub use driver::{format_datetime_with_provider, parse_datetime_with_provider, ParsedDateTimes};
pub use format::{DateFormatter, FormatSpec, FormatterCache, StyleName};
pub use locale::Locale;
pub use options::RecyclingPolicy;
pub use recycle::recycling_length;
pub use timezone::TimeZone;

#[cfg(feature = "tzdb")]
pub use compiled::{format_datetime, parse_datetime, TZ_PROVIDER};

/// Re-export of the time zone provider crate.
pub use datefmt_provider as provider;

/// A library specific trait for unwrapping assertions.
pub(crate) trait DateFmtUnwrap {
    type Output;

    /// `datefmt_rs` based assertion for unwrapping. This will panic in
    /// debug builds, but throws error during runtime.
    fn datefmt_unwrap(self) -> DateFmtResult<Self::Output>;
}

impl<T> DateFmtUnwrap for Option<T> {
    type Output = T;

    fn datefmt_unwrap(self) -> DateFmtResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(DateFmtError::assert())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! datefmt_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::DateFmtError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::DateFmtError::assert());
        }
    };
}
