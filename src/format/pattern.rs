//! Compiles LDML date patterns, such as `"yyyy-MM-dd HH:mm"`, into a
//! sequence of [`Item`]s.

use alloc::string::String;
use alloc::vec::Vec;

use crate::{DateFmtError, DateFmtResult};

/// A compiled element of a date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Item {
    Literal(String),
    Field(Field),
    /// The localized name of the day `n` days from today.
    RelativeDay(i8),
}

/// A pattern field: a symbol repeated `count` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Field {
    pub(crate) symbol: FieldSymbol,
    pub(crate) count: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldSymbol {
    /// `G`
    Era,
    /// `y`
    Year,
    /// `Y`
    WeekYear,
    /// `u`
    ExtendedYear,
    /// `r`
    RelatedYear,
    /// `Q`
    Quarter,
    /// `q`
    StandaloneQuarter,
    /// `M`
    Month,
    /// `L`
    StandaloneMonth,
    /// `w`
    WeekOfYear,
    /// `W`
    WeekOfMonth,
    /// `d`
    Day,
    /// `D`
    DayOfYear,
    /// `F`
    DayOfWeekInMonth,
    /// `g`
    JulianDay,
    /// `E`
    Weekday,
    /// `e`
    LocalWeekday,
    /// `c`
    StandaloneLocalWeekday,
    /// `a`, `b` and `B`
    DayPeriod,
    /// `h`, 1 to 12
    Hour12,
    /// `H`, 0 to 23
    Hour23,
    /// `k`, 1 to 24
    Hour24,
    /// `K`, 0 to 11
    Hour11,
    /// `m`
    Minute,
    /// `s`
    Second,
    /// `S`
    FractionalSecond,
    /// `A`
    MillisInDay,
    /// `z`
    SpecificZone,
    /// `Z`
    Rfc822Zone,
    /// `O`
    LocalizedGmtZone,
    /// `X`, using `Z` for a zero offset
    IsoZoneZ,
    /// `x`
    IsoZone,
    /// `V`
    ZoneId,
    /// `v`
    GenericZone,
}

impl FieldSymbol {
    fn from_char(ch: char) -> Option<Self> {
        let symbol = match ch {
            'G' => Self::Era,
            'y' => Self::Year,
            'Y' => Self::WeekYear,
            'u' => Self::ExtendedYear,
            'r' => Self::RelatedYear,
            'Q' => Self::Quarter,
            'q' => Self::StandaloneQuarter,
            'M' => Self::Month,
            'L' => Self::StandaloneMonth,
            'w' => Self::WeekOfYear,
            'W' => Self::WeekOfMonth,
            'd' => Self::Day,
            'D' => Self::DayOfYear,
            'F' => Self::DayOfWeekInMonth,
            'g' => Self::JulianDay,
            'E' => Self::Weekday,
            'e' => Self::LocalWeekday,
            'c' => Self::StandaloneLocalWeekday,
            'a' | 'b' | 'B' => Self::DayPeriod,
            'h' => Self::Hour12,
            'H' => Self::Hour23,
            'k' => Self::Hour24,
            'K' => Self::Hour11,
            'm' => Self::Minute,
            's' => Self::Second,
            'S' => Self::FractionalSecond,
            'A' => Self::MillisInDay,
            'z' => Self::SpecificZone,
            'Z' => Self::Rfc822Zone,
            'O' => Self::LocalizedGmtZone,
            'X' => Self::IsoZoneZ,
            'x' => Self::IsoZone,
            'V' => Self::ZoneId,
            'v' => Self::GenericZone,
            _ => return None,
        };
        Some(symbol)
    }
}

impl Field {
    /// Returns whether this field is rendered as a number.
    pub(crate) fn is_numeric(self) -> bool {
        use FieldSymbol as S;
        match self.symbol {
            S::Year
            | S::WeekYear
            | S::ExtendedYear
            | S::RelatedYear
            | S::WeekOfYear
            | S::WeekOfMonth
            | S::Day
            | S::DayOfYear
            | S::DayOfWeekInMonth
            | S::JulianDay
            | S::Hour12
            | S::Hour23
            | S::Hour24
            | S::Hour11
            | S::Minute
            | S::Second
            | S::FractionalSecond
            | S::MillisInDay => true,
            S::Quarter
            | S::StandaloneQuarter
            | S::Month
            | S::StandaloneMonth
            | S::LocalWeekday
            | S::StandaloneLocalWeekday => self.count <= 2,
            _ => false,
        }
    }
}

/// Compiles `pattern` into items.
///
/// ASCII letters are field symbols unless quoted. Text between single quotes
/// is literal, and `''` is a literal quote both inside and outside of quotes.
pub(crate) fn compile(pattern: &str) -> DateFmtResult<Vec<Item>> {
    let mut items = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                if chars.next_if_eq(&'\'').is_some() {
                    literal.push('\'');
                    continue;
                }
                loop {
                    match chars.next() {
                        Some('\'') if chars.next_if_eq(&'\'').is_some() => literal.push('\''),
                        Some('\'') => break,
                        Some(quoted) => literal.push(quoted),
                        None => {
                            return Err(DateFmtError::pattern()
                                .with_message("Unterminated quote in date pattern."))
                        }
                    }
                }
            }
            ch if ch.is_ascii_alphabetic() => {
                let symbol = FieldSymbol::from_char(ch).ok_or_else(|| {
                    DateFmtError::pattern().with_message("Unknown field symbol in date pattern.")
                })?;
                let mut count: u8 = 1;
                while chars.next_if_eq(&ch).is_some() {
                    count = count.saturating_add(1);
                }
                if !literal.is_empty() {
                    items.push(Item::Literal(core::mem::take(&mut literal)));
                }
                items.push(Item::Field(Field { symbol, count }));
            }
            ch => literal.push(ch),
        }
    }

    if !literal.is_empty() {
        items.push(Item::Literal(literal));
    }
    Ok(items)
}

/// Combines date and time items using a locale glue pattern such as
/// `"{1} 'at' {0}"`, where `{0}` is the time and `{1}` the date.
pub(crate) fn combine(glue: &str, date: &[Item], time: &[Item]) -> DateFmtResult<Vec<Item>> {
    let mut items = Vec::new();
    let mut rest = glue;
    while let Some(start) = rest.find('{') {
        let placeholder = match rest.get(start..start + 3) {
            Some("{0}") => time,
            Some("{1}") => date,
            _ => {
                return Err(
                    DateFmtError::pattern().with_message("Invalid placeholder in glue pattern.")
                )
            }
        };
        items.extend(compile(&rest[..start])?);
        items.extend_from_slice(placeholder);
        rest = &rest[start + 3..];
    }
    items.extend(compile(rest)?);
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(symbol: FieldSymbol, count: u8) -> Item {
        Item::Field(Field { symbol, count })
    }

    fn literal(text: &str) -> Item {
        Item::Literal(text.into())
    }

    #[test]
    fn fields_and_literals() {
        let items = compile("yyyy-MM-dd HH:mm").unwrap();
        assert_eq!(
            items,
            [
                field(FieldSymbol::Year, 4),
                literal("-"),
                field(FieldSymbol::Month, 2),
                literal("-"),
                field(FieldSymbol::Day, 2),
                literal(" "),
                field(FieldSymbol::Hour23, 2),
                literal(":"),
                field(FieldSymbol::Minute, 2),
            ]
        );
    }

    #[test]
    fn quoting() {
        assert_eq!(
            compile("h 'o''clock' a").unwrap(),
            [
                field(FieldSymbol::Hour12, 1),
                literal(" o'clock "),
                field(FieldSymbol::DayPeriod, 1),
            ]
        );
        assert_eq!(compile("''yy").unwrap()[0], literal("'"));
        assert_eq!(compile("'T'").unwrap(), [literal("T")]);
    }

    #[test]
    fn malformed() {
        assert!(compile("yyyy 'at").is_err());
        assert!(compile("yyyy-jj").is_err());
        assert_eq!(compile("").unwrap(), []);
    }

    #[test]
    fn glue() {
        let date = compile("M/d/yy").unwrap();
        let time = compile("h:mm").unwrap();
        let items = combine("{1} 'at' {0}", &date, &time).unwrap();
        assert_eq!(items.len(), date.len() + time.len() + 1);
        assert_eq!(items[date.len()], literal(" at "));
        assert!(combine("{2}", &date, &time).is_err());
    }

    #[test]
    fn numeric_fields() {
        assert!(Field { symbol: FieldSymbol::Month, count: 2 }.is_numeric());
        assert!(!Field { symbol: FieldSymbol::Month, count: 3 }.is_numeric());
        assert!(!Field { symbol: FieldSymbol::Weekday, count: 1 }.is_numeric());
    }
}
