//! The vectorized format and parse entry points.
//!
//! Both drivers follow the same steps. They compute the recycling length,
//! returning early on empty input, then resolve the time zone and the
//! locale. For each logical index, a
//! missing input gives a missing output; otherwise the formatter for the
//! pattern is ensured and the element is formatted or parsed. Every handle
//! is dropped on scope exit, so early returns and errors release them as well.

use alloc::string::String;
use alloc::vec::Vec;

use datefmt_provider::TimeZoneProvider;

use crate::{
    calendar::Calendar,
    format::{parse::ParsedZone, FormatterCache},
    locale::Locale,
    options::RecyclingPolicy,
    recycle::recycling_length,
    timezone::TimeZone,
    vector::{TextVector, TimestampVector},
    DateFmtError, DateFmtResult,
};

/// The result of [`parse_datetime_with_provider`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDateTimes {
    /// Seconds since the epoch, `None` where the input was missing or did not parse.
    pub values: Vec<Option<f64>>,
    /// The time zone identifier, when one was supplied by the caller.
    pub tzone: Option<String>,
}

/// Formats each timestamp, in seconds since the epoch, with the pattern at
/// the same recycled index.
///
/// `time_zone` and `locale` default to the host's settings.
pub fn format_datetime_with_provider<S: AsRef<str>>(
    times: &[Option<f64>],
    formats: &[Option<S>],
    time_zone: Option<&str>,
    locale: Option<&str>,
    provider: &(impl TimeZoneProvider + ?Sized),
) -> DateFmtResult<Vec<Option<String>>> {
    let length = recycling_length(&[times.len(), formats.len()], RecyclingPolicy::default())?;
    if length == 0 {
        return Ok(Vec::new());
    }

    let time_zone = resolve_time_zone(time_zone, provider)?;
    let locale = resolve_locale(locale)?;
    #[cfg(feature = "log")]
    log::debug!(
        "formatting {length} date-times in {} for {locale}",
        time_zone.identifier()
    );
    let times = TimestampVector::try_new(times, length)?;
    let formats = TextVector::try_new(formats, length)?;

    let mut engine = Engine::try_new(locale, time_zone)?;
    let mut output = Vec::with_capacity(length);
    for i in times.indices() {
        // NaN timestamps are missing values.
        if times.is_missing(i) || formats.is_missing(i) || times.get(i)?.is_nan() {
            output.push(None);
            continue;
        }
        engine.ensure_formatter(formats.physical_index(i), formats.get_str(i)?)?;
        output.push(Some(engine.format_one(*times.get(i)?)?));
    }
    Ok(output)
}

/// Parses each text with the pattern at the same recycled index.
///
/// Text that does not match its pattern, or whose fields are out of range
/// for a non-lenient calendar, parses to `None`.
pub fn parse_datetime_with_provider<T: AsRef<str>, S: AsRef<str>>(
    texts: &[Option<T>],
    formats: &[Option<S>],
    lenient: bool,
    time_zone: Option<&str>,
    locale: Option<&str>,
    provider: &(impl TimeZoneProvider + ?Sized),
) -> DateFmtResult<ParsedDateTimes> {
    let tzone = time_zone.map(String::from);
    let length = recycling_length(&[texts.len(), formats.len()], RecyclingPolicy::default())?;
    if length == 0 {
        return Ok(ParsedDateTimes {
            values: Vec::new(),
            tzone,
        });
    }

    let time_zone = resolve_time_zone(time_zone, provider)?;
    let locale = resolve_locale(locale)?;
    #[cfg(feature = "log")]
    log::debug!(
        "parsing {length} date-times in {} for {locale}, lenient: {lenient}",
        time_zone.identifier()
    );
    let texts = TextVector::try_new(texts, length)?;
    let formats = TextVector::try_new(formats, length)?;

    let mut engine = Engine::try_new(locale, time_zone)?;
    engine.calendar.set_lenient(lenient);
    let mut values = Vec::with_capacity(length);
    for i in texts.indices() {
        if texts.is_missing(i) || formats.is_missing(i) {
            values.push(None);
            continue;
        }
        engine.ensure_formatter(formats.physical_index(i), formats.get_str(i)?)?;
        values.push(engine.parse_one(texts.get_str(i)?, provider)?);
    }
    Ok(ParsedDateTimes { values, tzone })
}

fn resolve_time_zone(
    identifier: Option<&str>,
    provider: &(impl TimeZoneProvider + ?Sized),
) -> DateFmtResult<TimeZone> {
    match identifier {
        Some(identifier) => TimeZone::try_from_identifier_str_with_provider(identifier, provider),
        None => Ok(TimeZone::system_with_provider(provider)),
    }
}

fn resolve_locale(identifier: Option<&str>) -> DateFmtResult<Locale> {
    identifier.map_or_else(|| Ok(Locale::system()), Locale::try_from_str)
}

/// The calendar and formatter of one driver call.
#[derive(Debug)]
pub(crate) struct Engine {
    calendar: Calendar,
    formatters: FormatterCache,
    locale: Locale,
}

impl Engine {
    pub(crate) fn try_new(locale: Locale, time_zone: TimeZone) -> DateFmtResult<Self> {
        Ok(Self {
            calendar: Calendar::try_new(&locale, time_zone)?,
            formatters: FormatterCache::new(),
            locale,
        })
    }

    pub(crate) fn ensure_formatter(&mut self, slot: usize, pattern: &str) -> DateFmtResult<()> {
        self.formatters.ensure(slot, pattern, &self.locale).map(|_| ())
    }

    /// Formats `seconds` since the epoch with the current formatter.
    pub(crate) fn format_one(&mut self, seconds: f64) -> DateFmtResult<String> {
        self.calendar.set_time(seconds * 1_000.0)?;
        let formatter = self.formatters.current().ok_or_else(no_formatter)?;
        let formatted = formatter.format(&self.calendar)?;
        Ok(writeable::Writeable::write_to_string(&formatted).into_owned())
    }

    /// Parses `text` with the current formatter into seconds since the epoch.
    ///
    /// Zone identifiers in the text are resolved with `provider`.
    pub(crate) fn parse_one(
        &mut self,
        text: &str,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> DateFmtResult<Option<f64>> {
        let formatter = self.formatters.current().ok_or_else(no_formatter)?;
        let Some(mut fields) = formatter.parse(text, &self.calendar)? else {
            return Ok(None);
        };

        let time_zone = match fields.zone.take() {
            None => None,
            Some(ParsedZone::Offset(offset)) => Some(TimeZone::UtcOffset(offset)),
            Some(ParsedZone::Named(id)) => {
                match TimeZone::try_from_identifier_str_with_provider(&id, provider) {
                    Ok(time_zone) => Some(time_zone),
                    Err(_) => return Ok(None),
                }
            }
        };

        self.calendar.apply_fields(fields, time_zone);
        Ok(self.calendar.time().ok().map(|millis| millis / 1_000.0))
    }
}

fn no_formatter() -> DateFmtError {
    DateFmtError::assert().with_message("No formatter was ensured before use.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use datefmt_provider::NeverProvider;

    fn format(times: &[Option<f64>], formats: &[Option<&str>]) -> Vec<Option<String>> {
        format_datetime_with_provider(times, formats, Some("UTC"), Some("en_US"), &NeverProvider)
            .unwrap()
    }

    #[test]
    fn recycles_patterns() {
        assert_eq!(
            format(&[Some(0.0)], &[Some("yyyy"), Some("yyyy-MM")]),
            [Some("1970".to_owned()), Some("1970-01".to_owned())]
        );
        assert_eq!(
            format(&[Some(0.0), Some(86_400.0), Some(172_800.0)], &[Some("d")]),
            [Some("1".to_owned()), Some("2".to_owned()), Some("3".to_owned())]
        );
    }

    #[test]
    fn missing_elements() {
        assert_eq!(
            format(&[None, Some(0.0)], &[Some("yyyy"), None]),
            [None, None]
        );
        assert!(format(&[], &[Some("yyyy")]).is_empty());
        assert!(format(&[Some(0.0)], &[]).is_empty());
        assert_eq!(format(&[Some(f64::NAN)], &[Some("yyyy")]), [None]);
    }

    #[test]
    fn call_level_errors() {
        let err = format_datetime_with_provider(
            &[Some(0.0)],
            &[Some("yyyy 'oops")],
            Some("UTC"),
            None,
            &NeverProvider,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedPattern);

        let err = format_datetime_with_provider(
            &[Some(f64::INFINITY)],
            &[Some("yyyy")],
            Some("UTC"),
            None,
            &NeverProvider,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Engine);

        let err = format_datetime_with_provider(
            &[Some(0.0)],
            &[Some("yyyy")],
            Some("Not/AZone"),
            None,
            &NeverProvider,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn empty_input_skips_resolution() {
        let formatted = format_datetime_with_provider::<&str>(
            &[],
            &[Some("yyyy")],
            Some("Not/AZone"),
            Some("not a locale!"),
            &NeverProvider,
        )
        .unwrap();
        assert!(formatted.is_empty());

        let parsed = parse_datetime_with_provider::<&str, &str>(
            &[Some("1970")],
            &[],
            false,
            Some("Not/AZone"),
            Some("en_US"),
            &NeverProvider,
        )
        .unwrap();
        assert!(parsed.values.is_empty());
        assert_eq!(parsed.tzone.as_deref(), Some("Not/AZone"));
    }

    #[test]
    fn overflowing_fields_are_missing() {
        for lenient in [true, false] {
            let parsed = parse_datetime_with_provider(
                &[
                    Some("2021-999999999999999999-01"),
                    Some("2021-01-999999999999999999"),
                    Some("999999999999999999-01-01"),
                    Some("2021-13-01"),
                ],
                &[Some("yyyy-MM-dd")],
                lenient,
                Some("UTC"),
                Some("en_US"),
                &NeverProvider,
            )
            .unwrap();
            let last = lenient.then_some(1_640_995_200.0);
            assert_eq!(parsed.values, [None, None, None, last]);
        }
    }

    #[test]
    fn parse_with_offsets() {
        let parsed = parse_datetime_with_provider(
            &[Some("1970-01-01 01:00 +0100"), Some("1970-01-01 00:00 Z"), Some("nope")],
            &[Some("yyyy-MM-dd HH:mm Z")],
            false,
            Some("UTC"),
            Some("en_US"),
            &NeverProvider,
        )
        .unwrap();
        assert_eq!(parsed.values, [Some(0.0), Some(0.0), None]);
        assert_eq!(parsed.tzone.as_deref(), Some("UTC"));

        // Zone names the provider cannot resolve give a missing value.
        let parsed = parse_datetime_with_provider(
            &[Some("1970-01-01 Mars/Olympus")],
            &[Some("yyyy-MM-dd VV")],
            false,
            Some("UTC"),
            Some("en_US"),
            &NeverProvider,
        )
        .unwrap();
        assert_eq!(parsed.values, [None]);
    }

    #[test]
    fn engine_requires_a_formatter() {
        let mut engine = Engine::try_new(Locale::default(), TimeZone::Utc).unwrap();
        let err = engine.format_one(0.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Assert);
        engine.ensure_formatter(0, "HH:mm").unwrap();
        assert_eq!(engine.format_one(90.0).unwrap(), "00:01");
    }
}
