//! The `TimeZoneProvider` trait.

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use crate::TimeZoneProviderError;

pub(crate) type TimeZoneProviderResult<T> = Result<T, TimeZoneProviderError>;

/// `UtcOffsetSeconds` represents the amount of seconds we need to add to the UTC to reach the local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct UtcOffsetSeconds(pub i64);

#[cfg(feature = "tzif")]
use tzif::data::{posix::TimeZoneVariantInfo, tzif::LocalTimeTypeRecord};

#[cfg(feature = "tzif")]
impl From<&TimeZoneVariantInfo> for UtcOffsetSeconds {
    fn from(value: &TimeZoneVariantInfo) -> Self {
        // The POSIX tz string stores offsets as negative offsets;
        // i.e. "seconds that must be added to reach UTC"
        Self(-value.offset.0)
    }
}

#[cfg(feature = "tzif")]
impl From<LocalTimeTypeRecord> for UtcOffsetSeconds {
    fn from(value: LocalTimeTypeRecord) -> Self {
        Self(value.utoff.0)
    }
}

/// The offset rules of a single named time zone.
pub trait ZoneOffsets: fmt::Debug + Send + Sync {
    /// Returns the UTC offset in effect at `epoch_seconds`.
    fn offset_at(&self, epoch_seconds: i64) -> TimeZoneProviderResult<UtcOffsetSeconds>;
}

/// A named time zone resolved by a [`TimeZoneProvider`].
///
/// The offset rules are shared, so cloning a `ResolvedZone` is cheap.
#[derive(Debug, Clone)]
pub struct ResolvedZone {
    /// The canonical identifier of the zone.
    pub identifier: String,
    /// The rules used to compute offsets for the zone.
    pub offsets: Arc<dyn ZoneOffsets>,
}

impl ResolvedZone {
    pub fn new(identifier: impl Into<String>, offsets: Arc<dyn ZoneOffsets>) -> Self {
        Self {
            identifier: identifier.into(),
            offsets,
        }
    }

    /// Returns the UTC offset of this zone at `epoch_seconds`.
    pub fn offset_at(&self, epoch_seconds: i64) -> TimeZoneProviderResult<UtcOffsetSeconds> {
        self.offsets.offset_at(epoch_seconds)
    }
}

/// A source of named time zone data.
pub trait TimeZoneProvider {
    /// Resolves an IANA time zone identifier into its offset rules.
    fn resolve_zone(&self, identifier: &str) -> TimeZoneProviderResult<ResolvedZone>;
}

/// A provider that knows no named time zones.
///
/// Useful when only `UTC` and fixed offsets are expected.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverProvider;

impl TimeZoneProvider for NeverProvider {
    fn resolve_zone(&self, _: &str) -> TimeZoneProviderResult<ResolvedZone> {
        Err(TimeZoneProviderError::Range(
            "Named time zones are not supported by this provider.",
        ))
    }
}
