//! Access to the host system: clock, time zone and locale.

use alloc::string::String;

use crate::DateFmtResult;

#[cfg(feature = "sys")]
use crate::DateFmtError;
#[cfg(feature = "sys")]
use web_time::{SystemTime, UNIX_EPOCH};

/// Returns the system time in milliseconds since the Unix epoch.
#[cfg(feature = "sys")]
pub(crate) fn get_system_millis() -> DateFmtResult<f64> {
    let millis = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs_f64() * 1_000.0,
        Err(before_epoch) => -before_epoch.duration().as_secs_f64() * 1_000.0,
    };
    if !millis.is_finite() {
        return Err(DateFmtError::general("Error fetching system time"));
    }
    Ok(millis)
}

/// Without a system clock the reference time is the Unix epoch.
#[cfg(not(feature = "sys"))]
pub(crate) fn get_system_millis() -> DateFmtResult<f64> {
    Ok(0.0)
}

/// Returns the IANA identifier of the host's time zone, if it can be determined.
#[cfg(feature = "sys")]
pub(crate) fn get_system_timezone_id() -> Option<String> {
    iana_time_zone::get_timezone().ok()
}

#[cfg(not(feature = "sys"))]
pub(crate) fn get_system_timezone_id() -> Option<String> {
    None
}

/// Returns the host's locale from the usual POSIX environment variables.
pub(crate) fn get_system_locale_id() -> Option<String> {
    ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.is_empty())
}
