//! This module implements the `TimeZone` used to map instants onto wall-clock time.

use alloc::borrow::Cow;
use alloc::format;
use core::{iter::Peekable, str::Chars};

use datefmt_provider::{provider::TimeZoneProvider, utils::SECONDS_PER_DAY, ResolvedZone};

use crate::{sys, DateFmtError, DateFmtResult};

/// A time zone: UTC, a fixed UTC offset, or a named IANA zone.
#[derive(Debug, Clone, Default)]
pub enum TimeZone {
    #[default]
    Utc,
    /// A fixed offset in seconds east of UTC.
    UtcOffset(i32),
    Named(ResolvedZone),
}

impl TimeZone {
    /// Parses a `TimeZone` from an identifier.
    ///
    /// Accepts `UTC`, `GMT`, `Z`, offsets such as `+05:30`, `-0800` or
    /// `GMT+1`, and any IANA identifier known to `provider`.
    pub fn try_from_identifier_str_with_provider(
        source: &str,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> DateFmtResult<Self> {
        if ["UTC", "GMT", "Z", "UT"]
            .iter()
            .any(|utc| source.eq_ignore_ascii_case(utc))
        {
            return Ok(Self::Utc);
        }

        let offset_source = strip_gmt_prefix(source).unwrap_or(source);
        let mut cursor = offset_source.chars().peekable();
        if cursor.peek().is_some_and(is_ascii_sign) {
            return parse_offset(&mut cursor).map(Self::UtcOffset);
        }

        provider
            .resolve_zone(source)
            .map(Self::Named)
            .map_err(|_| DateFmtError::range().with_message("Valid time zone was not provided."))
    }

    /// Returns the host's time zone, or UTC when it cannot be determined.
    pub fn system_with_provider(provider: &(impl TimeZoneProvider + ?Sized)) -> Self {
        sys::get_system_timezone_id()
            .and_then(|id| Self::try_from_identifier_str_with_provider(&id, provider).ok())
            .unwrap_or_default()
    }

    /// Returns the identifier of this time zone.
    pub fn identifier(&self) -> Cow<'_, str> {
        match self {
            Self::Utc => Cow::Borrowed("UTC"),
            Self::UtcOffset(offset) => {
                let (sign, abs) = if *offset < 0 { ('-', -offset) } else { ('+', *offset) };
                let (hours, minutes, seconds) = (abs / 3600, abs / 60 % 60, abs % 60);
                if seconds == 0 {
                    Cow::Owned(format!("GMT{sign}{hours:02}:{minutes:02}"))
                } else {
                    Cow::Owned(format!("GMT{sign}{hours:02}:{minutes:02}:{seconds:02}"))
                }
            }
            Self::Named(zone) => Cow::Borrowed(zone.identifier.as_str()),
        }
    }

    /// Returns whether this is UTC, either directly or through one of its IANA aliases.
    pub fn is_utc(&self) -> bool {
        match self {
            Self::Utc => true,
            Self::UtcOffset(_) => false,
            Self::Named(zone) => matches!(
                zone.identifier.strip_prefix("Etc/").unwrap_or(&zone.identifier),
                "UTC" | "UCT" | "Universal" | "Zulu"
            ),
        }
    }

    /// Returns the UTC offset in seconds at `epoch_seconds`.
    pub fn offset_at(&self, epoch_seconds: i64) -> DateFmtResult<i64> {
        match self {
            Self::Utc => Ok(0),
            Self::UtcOffset(offset) => Ok(i64::from(*offset)),
            Self::Named(zone) => Ok(zone.offset_at(epoch_seconds)?.0),
        }
    }

    /// Converts local wall-clock seconds into epoch seconds.
    ///
    /// A repeated wall time resolves to the later instant. A skipped wall
    /// time is an error unless `lenient`, in which case it is interpreted
    /// with the offset in effect before the transition.
    pub(crate) fn local_to_epoch_seconds(&self, local: i64, lenient: bool) -> DateFmtResult<i64> {
        let Self::Named(_) = self else {
            return Ok(local - self.offset_at(local)?);
        };

        // No zone transitions by more than a day, so the offsets a day on
        // either side are the only possible candidates.
        let before = self.offset_at(local - SECONDS_PER_DAY)?;
        let after = self.offset_at(local + SECONDS_PER_DAY)?;

        let mut resolved = None;
        for offset in [before, after] {
            let candidate = local - offset;
            if self.offset_at(candidate)? == offset {
                resolved = Some(resolved.map_or(candidate, |prev: i64| prev.max(candidate)));
            }
        }

        match resolved {
            Some(epoch_seconds) => Ok(epoch_seconds),
            None if lenient => Ok(local - before),
            None => Err(DateFmtError::engine()
                .with_message("Wall time was skipped by a time zone transition.")),
        }
    }
}

fn strip_gmt_prefix(source: &str) -> Option<&str> {
    ["GMT", "UTC", "UT"].iter().find_map(|prefix| {
        let head = source.get(..prefix.len())?;
        let rest = &source[prefix.len()..];
        (head.eq_ignore_ascii_case(prefix) && rest.starts_with(['+', '-'])).then_some(rest)
    })
}

/// Parses `±h`, `±hh`, `±hhmm`, `±hh:mm`, `±hhmmss` or `±hh:mm:ss` into seconds.
pub(crate) fn parse_offset(chars: &mut Peekable<Chars<'_>>) -> DateFmtResult<i32> {
    let sign = chars.next().map_or(1, |c| if c == '+' { 1 } else { -1 });

    let hours = match parse_digits(chars, 2) {
        (value, 1 | 2) => value,
        _ => return Err(non_ascii_digit()),
    };

    let mut minutes = 0;
    let mut seconds = 0;
    for component in [&mut minutes, &mut seconds] {
        if chars.peek() == Some(&':') {
            let _ = chars.next();
        }
        match parse_digits(chars, 2) {
            (value, 2) => *component = value,
            (_, 0) => break,
            _ => return Err(non_ascii_digit()),
        }
    }

    if chars.next().is_some() {
        return Err(DateFmtError::range().with_message("Unexpected trailing characters in offset"));
    }
    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(DateFmtError::range().with_message("Offset is out of range"));
    }

    Ok(sign * (hours * 3600 + minutes * 60 + seconds))
}

fn parse_digits(chars: &mut Peekable<Chars<'_>>, max: usize) -> (i32, usize) {
    let mut value = 0;
    let mut count = 0;
    while count < max {
        let Some(digit) = chars.peek().and_then(|ch| ch.to_digit(10)) else {
            break;
        };
        let _ = chars.next();
        value = value * 10 + digit as i32;
        count += 1;
    }
    (value, count)
}

fn non_ascii_digit() -> DateFmtError {
    DateFmtError::range().with_message("Non ascii digit found while parsing offset string")
}

fn is_ascii_sign(ch: &char) -> bool {
    *ch == '+' || *ch == '-'
}
