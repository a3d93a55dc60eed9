//! Offset lookups over parsed TZif data.

use alloc::string::ToString;
use std::path::Path;

use combine::Parser;
use tzif::data::{
    posix::PosixTzString,
    tzif::{DataBlock, TzifData},
};

use crate::{
    posix,
    provider::{TimeZoneProviderResult, UtcOffsetSeconds, ZoneOffsets},
    TimeZoneProviderError,
};

/// `TZif` stands for Time zone information format is laid out by [RFC 8536][rfc8536] and
/// laid out by the [tzdata manual][tzif-manual]
///
/// Only the most precise data block is retained, together with the POSIX
/// footer that describes local time past the last transition.
///
/// [rfc8536]: https://datatracker.ietf.org/doc/html/rfc8536
/// [tzif-manual]: https://man7.org/linux/man-pages/man5/tzfile.5.html
#[derive(Debug, Clone)]
pub struct Tzif {
    data_block: DataBlock,
    footer: Option<PosixTzString>,
}

impl From<TzifData> for Tzif {
    fn from(value: TzifData) -> Self {
        let TzifData {
            data_block1,
            data_block2,
            footer,
            ..
        } = value;

        Self {
            data_block: data_block2.unwrap_or(data_block1),
            footer,
        }
    }
}

impl Tzif {
    pub fn from_bytes(data: &[u8]) -> TimeZoneProviderResult<Self> {
        let Ok((parse_result, _)) = tzif::parse::tzif::tzif().parse(data) else {
            return Err(TimeZoneProviderError::Data("Illformed Tzif data.".into()));
        };
        Ok(Self::from(parse_result))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> TimeZoneProviderResult<Self> {
        tzif::parse_tzif_file(path.as_ref())
            .map(Into::into)
            .map_err(|e| TimeZoneProviderError::Data(e.to_string()))
    }

    pub fn posix_tz_string(&self) -> Option<&PosixTzString> {
        self.footer.as_ref()
    }

    /// Returns the UTC offset in effect at `epoch_seconds`.
    pub fn get(&self, epoch_seconds: i64) -> TimeZoneProviderResult<UtcOffsetSeconds> {
        let db = &self.data_block;

        // <https://datatracker.ietf.org/doc/html/rfc8536#section-3.2>
        // If there are no transitions, local time for all timestamps is specified by the TZ
        // string in the footer if present and nonempty; otherwise, it is
        // specified by time type 0.
        if db.transition_times.is_empty() {
            return match self.posix_tz_string() {
                Some(posix_tz_string) => Ok(posix::offset_for_epoch_seconds(
                    posix_tz_string,
                    epoch_seconds,
                )),
                None => local_time_type(db, 0),
            };
        }

        match db
            .transition_times
            .binary_search_by_key(&epoch_seconds, |seconds| seconds.0)
        {
            // The new offset applies from the transition instant onwards.
            Ok(idx) => transition_offset(db, idx),
            // Before the first transition local time is specified by time type 0.
            Err(0) => local_time_type(db, 0),
            Err(idx) if idx >= db.transition_times.len() => match self.posix_tz_string() {
                // The time is past the last transition, so the time zone is
                // resolved with the POSIX tz string.
                Some(posix_tz_string) => Ok(posix::offset_for_epoch_seconds(
                    posix_tz_string,
                    epoch_seconds,
                )),
                None => transition_offset(db, idx - 1),
            },
            Err(idx) => transition_offset(db, idx - 1),
        }
    }
}

impl ZoneOffsets for Tzif {
    fn offset_at(&self, epoch_seconds: i64) -> TimeZoneProviderResult<UtcOffsetSeconds> {
        self.get(epoch_seconds)
    }
}

#[inline]
fn transition_offset(db: &DataBlock, idx: usize) -> TimeZoneProviderResult<UtcOffsetSeconds> {
    // NOTE: Transition type can be empty. If no transition_type exists,
    // then use 0 as the default index of local_time_type_records.
    local_time_type(db, db.transition_types.get(idx).copied().unwrap_or(0))
}

#[inline]
fn local_time_type(db: &DataBlock, idx: usize) -> TimeZoneProviderResult<UtcOffsetSeconds> {
    db.local_time_type_records
        .get(idx)
        .copied()
        .map(UtcOffsetSeconds::from)
        .ok_or(TimeZoneProviderError::Assert(
            "TZif transition refers to a missing local time type.",
        ))
}
