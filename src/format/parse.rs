//! Parsing of text with compiled patterns into calendar fields.

use alloc::string::String;

use crate::{
    format::pattern::{Field, FieldSymbol, Item},
    locale::{Locale, LocaleData, WeekRules},
};

/// Numbers are read greedily up to this many digits.
const MAX_DIGITS: usize = 18;

/// A time zone read from the parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedZone {
    /// Seconds east of UTC.
    Offset(i32),
    /// An identifier to be resolved by a time zone provider.
    Named(String),
}

/// The fields read from a text. Values are unchecked; range checks happen
/// when a calendar resolves them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ParsedFields {
    pub(crate) era: Option<i64>,
    /// The year of the era.
    pub(crate) year: Option<i64>,
    pub(crate) extended_year: Option<i64>,
    pub(crate) week_year: Option<i64>,
    pub(crate) month: Option<i64>,
    pub(crate) week_of_year: Option<i64>,
    pub(crate) week_of_month: Option<i64>,
    pub(crate) day: Option<i64>,
    pub(crate) day_of_year: Option<i64>,
    pub(crate) day_of_week_in_month: Option<i64>,
    pub(crate) julian_day: Option<i64>,
    /// 1 is Sunday.
    pub(crate) weekday: Option<i64>,
    pub(crate) relative_day: Option<i8>,
    pub(crate) day_period: Option<u8>,
    /// Hour from `H` or `k`, 0 to 23.
    pub(crate) hour_of_day: Option<i64>,
    /// Hour from `h` or `K`, 0 to 11.
    pub(crate) hour: Option<i64>,
    pub(crate) minute: Option<i64>,
    pub(crate) second: Option<i64>,
    pub(crate) millisecond: Option<i64>,
    pub(crate) millis_in_day: Option<i64>,
    pub(crate) zone: Option<ParsedZone>,
}

/// A single pass over `text` with a compiled pattern.
pub(crate) struct Parser<'a> {
    items: &'a [Item],
    data: &'static LocaleData,
    week: WeekRules,
    /// The first year of the 100 year window for two digit years.
    century_start: i64,
    text: &'a str,
    pos: usize,
    fields: ParsedFields,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(items: &'a [Item], locale: &Locale, century_start: i64, text: &'a str) -> Self {
        Self {
            items,
            data: locale.data(),
            week: locale.week_rules(),
            century_start,
            text,
            pos: 0,
            fields: ParsedFields::default(),
        }
    }

    /// Parses from the start of the text. Trailing text is ignored.
    pub(crate) fn parse(mut self) -> Option<ParsedFields> {
        let items = self.items;
        for (index, item) in items.iter().enumerate() {
            match item {
                Item::Literal(literal) => self.literal(literal)?,
                Item::RelativeDay(offset) => {
                    let name = self
                        .data
                        .relative_days
                        .iter()
                        .find_map(|(candidate, name)| (candidate == offset).then_some(*name))?;
                    self.pos += prefix_len_ignore_case(self.rest(), name)?;
                    self.fields.relative_day = Some(*offset);
                }
                Item::Field(field) => {
                    let abutting = matches!(
                        items.get(index + 1),
                        Some(Item::Field(next)) if next.is_numeric()
                    );
                    self.skip_whitespace();
                    self.field(*field, abutting && field.is_numeric())?;
                }
            }
        }
        Some(self.fields)
    }

    fn rest(&self) -> &'a str {
        self.text.get(self.pos..).unwrap_or_default()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// A run of whitespace in the pattern matches any run of whitespace,
    /// including none. Other characters match case-insensitively.
    fn literal(&mut self, literal: &str) -> Option<()> {
        let mut expected = literal.chars().peekable();
        while let Some(ch) = expected.next() {
            if ch.is_whitespace() {
                while expected.next_if(|next| next.is_whitespace()).is_some() {}
                self.skip_whitespace();
                continue;
            }
            let actual = self.rest().chars().next()?;
            if !chars_eq_ignore_case(ch, actual) {
                return None;
            }
            self.pos += actual.len_utf8();
        }
        Some(())
    }

    fn field(&mut self, field: Field, abutting: bool) -> Option<()> {
        use FieldSymbol as S;

        let max_digits = if abutting {
            usize::from(field.count)
        } else {
            MAX_DIGITS
        };
        let textual = field.count >= 3 && !self.starts_with_digit();
        let data = self.data;

        match field.symbol {
            S::Era => self.fields.era = Some(self.name(data.era_candidates())?.into()),
            S::Year | S::WeekYear => {
                let (value, digits) = self.number(max_digits, false)?;
                let value = if field.count <= 2 && digits == 2 {
                    self.two_digit_year(value)
                } else {
                    value
                };
                if field.symbol == S::Year {
                    self.fields.year = Some(value);
                } else {
                    self.fields.week_year = Some(value);
                }
            }
            S::ExtendedYear | S::RelatedYear => {
                self.fields.extended_year = Some(self.number(max_digits, true)?.0);
            }
            S::Quarter | S::StandaloneQuarter => {
                let quarter = if textual {
                    self.name(data.quarter_candidates())?.into()
                } else {
                    self.number(max_digits, false)?.0
                };
                self.fields.month = Some((quarter - 1) * 3 + 1);
            }
            S::Month | S::StandaloneMonth => {
                let month = if textual {
                    self.name(data.month_candidates())?.into()
                } else {
                    self.number(max_digits, false)?.0
                };
                self.fields.month = Some(month);
            }
            S::WeekOfYear => self.fields.week_of_year = Some(self.number(max_digits, false)?.0),
            S::WeekOfMonth => self.fields.week_of_month = Some(self.number(max_digits, false)?.0),
            S::Day => self.fields.day = Some(self.number(max_digits, false)?.0),
            S::DayOfYear => self.fields.day_of_year = Some(self.number(max_digits, false)?.0),
            S::DayOfWeekInMonth => {
                self.fields.day_of_week_in_month = Some(self.number(max_digits, false)?.0);
            }
            S::JulianDay => self.fields.julian_day = Some(self.number(max_digits, true)?.0),
            S::LocalWeekday | S::StandaloneLocalWeekday if field.count <= 2 => {
                let local = self.number(max_digits, false)?.0;
                let first = i64::from(self.week.first_weekday);
                self.fields.weekday = Some((local - 2 + first).rem_euclid(7) + 1);
            }
            S::Weekday | S::LocalWeekday | S::StandaloneLocalWeekday => {
                self.fields.weekday = Some(self.name(data.weekday_candidates())?.into());
            }
            S::DayPeriod => self.fields.day_period = Some(self.name(data.day_period_candidates())?),
            S::Hour12 => {
                let hour = self.number(max_digits, false)?.0;
                self.fields.hour = Some(if hour == 12 { 0 } else { hour });
            }
            S::Hour11 => self.fields.hour = Some(self.number(max_digits, false)?.0),
            S::Hour23 => self.fields.hour_of_day = Some(self.number(max_digits, false)?.0),
            S::Hour24 => {
                let hour = self.number(max_digits, false)?.0;
                self.fields.hour_of_day = Some(if hour == 24 { 0 } else { hour });
            }
            S::Minute => self.fields.minute = Some(self.number(max_digits, false)?.0),
            S::Second => self.fields.second = Some(self.number(max_digits, false)?.0),
            S::FractionalSecond => {
                let (value, digits) = self.number(max_digits, false)?;
                self.fields.millisecond = Some(match digits {
                    0..=2 => value * 10_i64.pow(3 - digits as u32),
                    _ => value / 10_i64.pow(digits as u32 - 3),
                });
            }
            S::MillisInDay => self.fields.millis_in_day = Some(self.number(max_digits, false)?.0),
            S::SpecificZone
            | S::Rfc822Zone
            | S::LocalizedGmtZone
            | S::IsoZoneZ
            | S::IsoZone
            | S::ZoneId
            | S::GenericZone => self.fields.zone = Some(self.zone()?),
        }
        Some(())
    }

    fn starts_with_digit(&self) -> bool {
        self.rest().starts_with(|ch: char| ch.is_ascii_digit())
    }

    /// Reads up to `max_digits` ASCII digits, returning the value and the
    /// number of digits read.
    fn number(&mut self, max_digits: usize, signed: bool) -> Option<(i64, usize)> {
        let rest = self.rest();
        let sign_len = usize::from(signed && rest.starts_with('-'));
        let digits = rest[sign_len..]
            .bytes()
            .take(max_digits)
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            return None;
        }
        let value = rest[sign_len..sign_len + digits].parse::<i64>().ok()?;
        self.pos += sign_len + digits;
        Some((if sign_len == 1 { -value } else { value }, digits))
    }

    /// Reads exactly `count` digits `skip` bytes ahead without consuming them.
    fn peek_digits(&self, skip: usize, count: usize) -> Option<i64> {
        let digits = self.rest().get(skip..skip + count)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    /// Reads the longest matching name, ignoring case.
    fn name(&mut self, candidates: impl Iterator<Item = (&'static str, u8)>) -> Option<u8> {
        let rest = self.rest();
        let (len, value) = candidates
            .filter(|(name, _)| !name.is_empty())
            .filter_map(|(name, value)| prefix_len_ignore_case(rest, name).map(|len| (len, value)))
            .max_by_key(|(len, _)| *len)?;
        self.pos += len;
        Some(value)
    }

    fn two_digit_year(&self, value: i64) -> i64 {
        let year = self.century_start.div_euclid(100) * 100 + value;
        if year < self.century_start {
            year + 100
        } else {
            year
        }
    }

    /// Reads a localized GMT offset (`GMT+1`, `UTC-05:00`), an ISO 8601
    /// offset (`Z`, `+0530`, `-08:00`) or a zone identifier.
    fn zone(&mut self) -> Option<ParsedZone> {
        let rest = self.rest();
        if let Some(len) = ["GMT", "UTC", "UT"]
            .iter()
            .find_map(|prefix| prefix_len_ignore_case(rest, prefix))
        {
            self.pos += len;
            if self.rest().starts_with(['+', '-']) {
                return self.offset().map(ParsedZone::Offset);
            }
            return Some(ParsedZone::Offset(0));
        }
        if rest.starts_with(['+', '-']) {
            return self.offset().map(ParsedZone::Offset);
        }
        if rest.starts_with(['Z', 'z'])
            && !rest[1..].starts_with(|ch: char| ch.is_ascii_alphanumeric() || ch == '/')
        {
            self.pos += 1;
            return Some(ParsedZone::Offset(0));
        }

        let len = rest
            .find(|ch: char| !(ch.is_ascii_alphanumeric() || matches!(ch, '/' | '_' | '+' | '-')))
            .unwrap_or(rest.len());
        let id = &rest[..len];
        if !id.starts_with(|ch: char| ch.is_ascii_alphabetic()) {
            return None;
        }
        self.pos += len;
        Some(ParsedZone::Named(id.into()))
    }

    /// Reads `±h`, `±hh`, `±hhmm`, `±hh:mm`, `±hhmmss` or `±hh:mm:ss`.
    fn offset(&mut self) -> Option<i32> {
        let sign = if self.rest().starts_with('-') { -1 } else { 1 };
        self.pos += 1;
        let (hours, digits) = self.number(2, false)?;
        let mut seconds = hours * 3600;
        if digits == 2 {
            for unit in [60, 1] {
                let colon = usize::from(self.rest().starts_with(':'));
                match self.peek_digits(colon, 2) {
                    Some(value) if value < 60 => {
                        self.pos += colon + 2;
                        seconds += value * unit;
                    }
                    _ => break,
                }
            }
        }
        if hours > 23 {
            return None;
        }
        i32::try_from(seconds).ok().map(|seconds| sign * seconds)
    }
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Returns the byte length of the prefix of `text` matching `name`, ignoring case.
fn prefix_len_ignore_case(text: &str, name: &str) -> Option<usize> {
    let mut len = 0;
    let mut chars = text.chars();
    for expected in name.chars() {
        let actual = chars.next()?;
        if !chars_eq_ignore_case(expected, actual) {
            return None;
        }
        len += actual.len_utf8();
    }
    Some(len)
}
