//! A tzdb backed [`TimeZoneProvider`].

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use core::cell::RefCell;

#[cfg(not(target_os = "windows"))]
use std::path::PathBuf;

use crate::{
    provider::{ResolvedZone, TimeZoneProvider, TimeZoneProviderResult},
    tzif::Tzif,
    TimeZoneProviderError,
};

#[cfg(not(target_os = "windows"))]
const ZONEINFO_DIR: &str = "/usr/share/zoneinfo/";

/// A time zone provider backed by the tz database.
///
/// Identifiers are looked up case-insensitively in the data bundled by
/// `jiff-tzdb`. Identifiers unknown to the bundle are read from the host's
/// zoneinfo directory where one exists. Resolved zones are cached.
#[derive(Debug, Default)]
pub struct TzdbProvider {
    cache: RefCell<BTreeMap<String, ResolvedZone>>,
}

impl TzdbProvider {
    pub fn get(&self, identifier: &str) -> TimeZoneProviderResult<ResolvedZone> {
        if let Some(zone) = self.cache.borrow().get(identifier) {
            return Ok(zone.clone());
        }

        let zone = match jiff_tzdb::get(identifier) {
            Some((canonical_name, data)) => {
                ResolvedZone::new(canonical_name, Arc::new(Tzif::from_bytes(data)?))
            }
            None => Self::read_zoneinfo(identifier)?,
        };

        Ok(self
            .cache
            .borrow_mut()
            .entry(identifier.into())
            .or_insert(zone)
            .clone())
    }

    #[cfg(not(target_os = "windows"))]
    fn read_zoneinfo(identifier: &str) -> TimeZoneProviderResult<ResolvedZone> {
        if identifier.is_empty()
            || identifier.starts_with('/')
            || identifier.split('/').any(|part| part == ".." || part == ".")
        {
            return Err(TimeZoneProviderError::Range(
                "Time zone identifier does not exist.",
            ));
        }
        let mut path = PathBuf::from(ZONEINFO_DIR);
        path.push(identifier);
        if !path.is_file() {
            return Err(TimeZoneProviderError::Range(
                "Time zone identifier does not exist.",
            ));
        }
        Ok(ResolvedZone::new(identifier, Arc::new(Tzif::from_path(&path)?)))
    }

    #[cfg(target_os = "windows")]
    fn read_zoneinfo(_: &str) -> TimeZoneProviderResult<ResolvedZone> {
        Err(TimeZoneProviderError::Range(
            "Time zone identifier does not exist.",
        ))
    }
}

impl TimeZoneProvider for TzdbProvider {
    fn resolve_zone(&self, identifier: &str) -> TimeZoneProviderResult<ResolvedZone> {
        self.get(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UtcOffsetSeconds;

    #[test]
    fn case_insensitive_lookup() {
        let provider = TzdbProvider::default();
        let zone = provider.get("america/CHICAGO").unwrap();
        assert_eq!(zone.identifier, "America/Chicago");
        // 2024-01-15T12:00:00Z
        assert_eq!(
            zone.offset_at(1_705_320_000).unwrap(),
            UtcOffsetSeconds(-21600)
        );
    }

    #[test]
    fn cached_zone_is_reused() {
        let provider = TzdbProvider::default();
        let first = provider.get("Europe/Warsaw").unwrap();
        let second = provider.get("Europe/Warsaw").unwrap();
        assert!(Arc::ptr_eq(&first.offsets, &second.offsets));
    }

    #[test]
    fn unknown_identifier() {
        let provider = TzdbProvider::default();
        assert!(provider.get("Mars/Olympus_Mons").is_err());
        assert!(provider.get("../etc/passwd").is_err());
    }
}
