//! Entry points backed by the bundled time zone database.

use alloc::string::String;
use alloc::vec::Vec;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use datefmt_provider::tzdb::TzdbProvider;

use crate::{
    driver::{format_datetime_with_provider, parse_datetime_with_provider, ParsedDateTimes},
    DateFmtResult, TimeZone,
};

/// The process-wide time zone provider used by the convenience entry points.
pub static TZ_PROVIDER: LazyLock<Mutex<TzdbProvider>> =
    LazyLock::new(|| Mutex::new(TzdbProvider::default()));

/// Locks [`TZ_PROVIDER`], recovering the lock if it was poisoned. The
/// provider only holds a cache of resolved zones.
fn lock_provider() -> MutexGuard<'static, TzdbProvider> {
    TZ_PROVIDER.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Formats timestamps with [`TZ_PROVIDER`].
///
/// See [`format_datetime_with_provider`].
pub fn format_datetime<S: AsRef<str>>(
    times: &[Option<f64>],
    formats: &[Option<S>],
    time_zone: Option<&str>,
    locale: Option<&str>,
) -> DateFmtResult<Vec<Option<String>>> {
    let provider = lock_provider();
    format_datetime_with_provider(times, formats, time_zone, locale, &*provider)
}

/// Parses texts with [`TZ_PROVIDER`].
///
/// See [`parse_datetime_with_provider`].
pub fn parse_datetime<T: AsRef<str>, S: AsRef<str>>(
    texts: &[Option<T>],
    formats: &[Option<S>],
    lenient: bool,
    time_zone: Option<&str>,
    locale: Option<&str>,
) -> DateFmtResult<ParsedDateTimes> {
    let provider = lock_provider();
    parse_datetime_with_provider(texts, formats, lenient, time_zone, locale, &*provider)
}

impl TimeZone {
    /// Parses a `TimeZone` from an identifier using [`TZ_PROVIDER`].
    pub fn try_from_identifier_str(source: &str) -> DateFmtResult<Self> {
        let provider = lock_provider();
        Self::try_from_identifier_str_with_provider(source, &*provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic;

    #[test]
    fn poisoned_provider_is_recovered() {
        let _ = panic::catch_unwind(|| {
            let _guard = lock_provider();
            panic!("panic while holding the provider");
        });
        assert!(TZ_PROVIDER.is_poisoned());

        let formatted =
            format_datetime(&[Some(0.0)], &[Some("yyyy")], Some("Europe/Warsaw"), None).unwrap();
        assert_eq!(formatted, [Some("1970".to_owned())]);
    }
}
