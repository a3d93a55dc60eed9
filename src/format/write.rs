//! Rendering of compiled patterns through `writeable::Writeable`.

use core::fmt;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    calendar::CalendarFields,
    format::pattern::{Field, FieldSymbol, Item},
    locale::{LocaleData, NameWidth},
    timezone::TimeZone,
};

/// A date-time ready to be written with a compiled pattern.
///
/// Returned by [`DateFormatter::format`](super::DateFormatter::format).
#[derive(Debug)]
pub struct FormattedDateTime<'a> {
    pub(crate) items: &'a [Item],
    pub(crate) fields: CalendarFields,
    pub(crate) data: &'static LocaleData,
    pub(crate) time_zone: &'a TimeZone,
}

impl Writeable for FormattedDateTime<'_> {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        for item in self.items {
            match item {
                Item::Literal(text) => sink.write_str(text)?,
                Item::Field(field) => self.write_field(*field, sink)?,
                Item::RelativeDay(offset) => {
                    let name = self
                        .data
                        .relative_days
                        .iter()
                        .find_map(|(candidate, name)| (candidate == offset).then_some(*name))
                        .unwrap_or_default();
                    sink.write_str(name)?;
                }
            }
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.items
            .iter()
            .map(|item| match item {
                Item::Literal(text) => LengthHint::exact(text.len()),
                Item::Field(field) => LengthHint::at_least(usize::from(field.count)),
                Item::RelativeDay(_) => LengthHint::at_least(1),
            })
            .sum()
    }
}

impl_display_with_writeable!(FormattedDateTime<'_>);

impl FormattedDateTime<'_> {
    fn write_field<W: fmt::Write + ?Sized>(&self, field: Field, sink: &mut W) -> fmt::Result {
        use FieldSymbol as S;

        let fields = &self.fields;
        let data = self.data;
        let count = field.count;
        let width = NameWidth::from_count(count);
        let hour = fields.time.hour;

        match field.symbol {
            S::Era => data.era(fields.era(), width).write_to(sink),
            S::Year => write_year(fields.era_year(), count, sink),
            S::WeekYear => write_year(fields.week_of_year().0, count, sink),
            S::ExtendedYear | S::RelatedYear => write_padded(fields.date.year, count, sink),
            S::Quarter | S::StandaloneQuarter if count <= 2 => {
                write_padded(fields.quarter().into(), count, sink)
            }
            S::Quarter | S::StandaloneQuarter => data.quarter(fields.quarter(), width).write_to(sink),
            S::Month | S::StandaloneMonth if count <= 2 => {
                write_padded(fields.date.month.into(), count, sink)
            }
            S::Month => data.month(fields.date.month, width, false).write_to(sink),
            S::StandaloneMonth => data.month(fields.date.month, width, true).write_to(sink),
            S::WeekOfYear => write_padded(fields.week_of_year().1.into(), count, sink),
            S::WeekOfMonth => write_padded(fields.week_of_month().into(), count, sink),
            S::Day => write_padded(fields.date.day.into(), count, sink),
            S::DayOfYear => write_padded(fields.date.day_of_year().into(), count, sink),
            S::DayOfWeekInMonth => write_padded(fields.day_of_week_in_month().into(), count, sink),
            S::JulianDay => write_padded(fields.julian_day(), count, sink),
            S::LocalWeekday | S::StandaloneLocalWeekday if count <= 2 => {
                write_padded(fields.local_weekday().into(), count, sink)
            }
            S::Weekday | S::LocalWeekday | S::StandaloneLocalWeekday => {
                // `EEEEEE` is the short form, which falls back to the abbreviation.
                let width = if count == 6 { NameWidth::Abbreviated } else { width };
                data.weekday(fields.weekday(), width).write_to(sink)
            }
            S::DayPeriod => data.day_period(u8::from(hour >= 12), width).write_to(sink),
            S::Hour12 => write_padded(i64::from(if hour % 12 == 0 { 12 } else { hour % 12 }), count, sink),
            S::Hour23 => write_padded(hour.into(), count, sink),
            S::Hour24 => write_padded(i64::from(if hour == 0 { 24 } else { hour }), count, sink),
            S::Hour11 => write_padded(i64::from(hour % 12), count, sink),
            S::Minute => write_padded(fields.time.minute.into(), count, sink),
            S::Second => write_padded(fields.time.second.into(), count, sink),
            S::FractionalSecond => write_fraction(fields.time.millisecond, count, sink),
            S::MillisInDay => write_padded(fields.time.millis_in_day(), count, sink),
            S::SpecificZone
            | S::Rfc822Zone
            | S::LocalizedGmtZone
            | S::IsoZoneZ
            | S::IsoZone
            | S::ZoneId
            | S::GenericZone => self.write_zone(field, sink),
        }
    }

    fn write_zone<W: fmt::Write + ?Sized>(&self, field: Field, sink: &mut W) -> fmt::Result {
        use FieldSymbol as S;

        let offset = self.fields.offset_seconds;
        let count = field.count;
        match field.symbol {
            S::SpecificZone | S::GenericZone if count < 4 && self.time_zone.is_utc() => {
                sink.write_str("UTC")
            }
            S::SpecificZone | S::GenericZone | S::LocalizedGmtZone => {
                write_localized_gmt(offset, count >= 4, sink)
            }
            S::Rfc822Zone if count == 4 => write_localized_gmt(offset, true, sink),
            S::Rfc822Zone if count >= 5 => IsoOffset::from_count(5, true).write(offset, sink),
            S::Rfc822Zone => IsoOffset::from_count(4, false).write(offset, sink),
            S::IsoZoneZ => IsoOffset::from_count(count, true).write(offset, sink),
            S::IsoZone => IsoOffset::from_count(count, false).write(offset, sink),
            S::ZoneId => match count {
                1 if self.time_zone.is_utc() => sink.write_str("utc"),
                1 => sink.write_str("unk"),
                2 => sink.write_str(&self.time_zone.identifier()),
                3 => write_exemplar_city(self.time_zone, sink),
                _ => write_localized_gmt(offset, true, sink),
            },
            _ => Ok(()),
        }
    }
}

/// Two letter years are truncated to their last two digits.
fn write_year<W: fmt::Write + ?Sized>(year: i64, count: u8, sink: &mut W) -> fmt::Result {
    if count == 2 {
        write_padded(year.rem_euclid(100), 2, sink)
    } else {
        write_padded(year, count, sink)
    }
}

/// Writes `value` zero padded to at least `width` digits.
pub(crate) fn write_padded<W: fmt::Write + ?Sized>(
    value: i64,
    width: u8,
    sink: &mut W,
) -> fmt::Result {
    if value < 0 {
        sink.write_char('-')?;
    }
    let abs = value.unsigned_abs();
    let digits = abs.checked_ilog10().map_or(1, |log| log + 1);
    for _ in digits..u32::from(width) {
        sink.write_char('0')?;
    }
    abs.write_to(sink)
}

/// Writes the first `count` digits of the fraction of a second.
fn write_fraction<W: fmt::Write + ?Sized>(millisecond: u16, count: u8, sink: &mut W) -> fmt::Result {
    let digits = [millisecond / 100, millisecond / 10 % 10, millisecond % 10];
    (0..usize::from(count)).try_for_each(|i| {
        let digit = digits.get(i).copied().unwrap_or(0);
        sink.write_char(char::from(b'0' + digit as u8))
    })
}

/// Writes an offset as `GMT+1`, `GMT+5:30` or, in the long form,
/// `GMT+01:00`. A zero offset is written as `GMT`.
fn write_localized_gmt<W: fmt::Write + ?Sized>(offset: i64, long: bool, sink: &mut W) -> fmt::Result {
    sink.write_str("GMT")?;
    if offset == 0 {
        return Ok(());
    }
    sink.write_char(if offset < 0 { '-' } else { '+' })?;
    let abs = offset.unsigned_abs();
    let (hours, minutes, seconds) = (abs / 3600, abs / 60 % 60, abs % 60);
    if long {
        write_padded(hours as i64, 2, sink)?;
        sink.write_char(':')?;
        write_padded(minutes as i64, 2, sink)?;
    } else {
        hours.write_to(sink)?;
        if minutes != 0 || seconds != 0 {
            sink.write_char(':')?;
            write_padded(minutes as i64, 2, sink)?;
        }
    }
    if seconds != 0 {
        sink.write_char(':')?;
        write_padded(seconds as i64, 2, sink)?;
    }
    Ok(())
}

fn write_exemplar_city<W: fmt::Write + ?Sized>(time_zone: &TimeZone, sink: &mut W) -> fmt::Result {
    let TimeZone::Named(zone) = time_zone else {
        return sink.write_str("Unknown City");
    };
    let city = zone
        .identifier
        .rsplit('/')
        .next()
        .unwrap_or(&zone.identifier);
    city.chars()
        .try_for_each(|ch| sink.write_char(if ch == '_' { ' ' } else { ch }))
}

/// An ISO 8601 offset layout, as selected by the count of `X`, `x` and `Z`.
#[derive(Debug, Clone, Copy)]
struct IsoOffset {
    extended: bool,
    minutes_required: bool,
    seconds_allowed: bool,
    utc_z: bool,
}

impl IsoOffset {
    fn from_count(count: u8, utc_z: bool) -> Self {
        let (extended, minutes_required, seconds_allowed) = match count {
            1 => (false, false, false),
            2 => (false, true, false),
            3 => (true, true, false),
            4 => (false, true, true),
            _ => (true, true, true),
        };
        Self {
            extended,
            minutes_required,
            seconds_allowed,
            utc_z,
        }
    }

    fn write<W: fmt::Write + ?Sized>(self, offset: i64, sink: &mut W) -> fmt::Result {
        if offset == 0 && self.utc_z {
            return sink.write_char('Z');
        }
        sink.write_char(if offset < 0 { '-' } else { '+' })?;
        let abs = offset.unsigned_abs();
        let (hours, minutes, seconds) = (abs / 3600, abs / 60 % 60, abs % 60);
        write_padded(hours as i64, 2, sink)?;
        let seconds = if self.seconds_allowed { seconds } else { 0 };
        for (value, shown) in [
            (minutes, self.minutes_required || minutes != 0),
            (seconds, seconds != 0),
        ] {
            if !shown {
                break;
            }
            if self.extended {
                sink.write_char(':')?;
            }
            write_padded(value as i64, 2, sink)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use writeable::assert_writeable_eq;

    struct Padded(i64, u8);

    impl Writeable for Padded {
        fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
            write_padded(self.0, self.1, sink)
        }
    }

    impl_display_with_writeable!(Padded);

    fn offset(offset: i64, count: u8, utc_z: bool) -> String {
        let mut out = String::new();
        IsoOffset::from_count(count, utc_z)
            .write(offset, &mut out)
            .unwrap();
        out
    }

    fn gmt(offset: i64, long: bool) -> String {
        let mut out = String::new();
        write_localized_gmt(offset, long, &mut out).unwrap();
        out
    }

    #[test]
    fn padding() {
        assert_writeable_eq!(Padded(7, 2), "07");
        assert_writeable_eq!(Padded(1970, 2), "1970");
        assert_writeable_eq!(Padded(0, 1), "0");
        assert_writeable_eq!(Padded(-44, 4), "-0044");
    }

    #[test]
    fn iso_offsets() {
        assert_eq!(offset(19_800, 1, true), "+0530");
        assert_eq!(offset(3_600, 1, true), "+01");
        assert_eq!(offset(3_600, 2, true), "+0100");
        assert_eq!(offset(-28_800, 3, false), "-08:00");
        assert_eq!(offset(0, 3, true), "Z");
        assert_eq!(offset(0, 3, false), "+00:00");
        assert_eq!(offset(3_661, 5, false), "+01:01:01");
        assert_eq!(offset(3_661, 3, false), "+01:01");
    }

    #[test]
    fn localized_gmt() {
        assert_eq!(gmt(0, false), "GMT");
        assert_eq!(gmt(0, true), "GMT");
        assert_eq!(gmt(3_600, false), "GMT+1");
        assert_eq!(gmt(3_600, true), "GMT+01:00");
        assert_eq!(gmt(-34_200, false), "GMT-9:30");
    }

    #[test]
    fn fractions() {
        let mut out = String::new();
        write_fraction(45, 2, &mut out).unwrap();
        assert_eq!(out, "04");
        out.clear();
        write_fraction(45, 5, &mut out).unwrap();
        assert_eq!(out, "04500");
    }
}
