//! Data providers for time zone data
//!
//! This crate provides the time zone data used by `datefmt_rs` to map
//! instants onto local wall-clock time.
//!
//! With the `tzif` feature enabled, [`tzdb::TzdbProvider`] resolves IANA
//! identifiers against the bundled `jiff-tzdb` data, falling back to the
//! host's zoneinfo directory.
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions)]

extern crate alloc;

use alloc::string::String;
use core::fmt;

pub mod provider;
#[doc(hidden)]
pub mod utils;

#[cfg(feature = "tzif")]
mod posix;
#[cfg(feature = "tzif")]
pub mod tzdb;
#[cfg(feature = "tzif")]
pub mod tzif;

pub use provider::{NeverProvider, ResolvedZone, TimeZoneProvider, UtcOffsetSeconds, ZoneOffsets};

/// An error produced while resolving time zone data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeZoneProviderError {
    /// A provided value or identifier was out of range.
    Range(&'static str),
    /// An internal invariant was violated.
    Assert(&'static str),
    /// Time zone data was present but could not be read.
    Data(String),
}

impl fmt::Display for TimeZoneProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range(msg) => write!(f, "RangeError: {msg}"),
            Self::Assert(msg) => write!(f, "AssertError: {msg}"),
            Self::Data(msg) => write!(f, "DataError: {msg}"),
        }
    }
}

impl core::error::Error for TimeZoneProviderError {}
