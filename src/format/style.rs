//! The closed vocabulary of symbolic style names.

use core::{fmt, str::FromStr};

use crate::{DateFmtError, DateFmtResult};

/// The kind of a symbolic style: which parts of an instant it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Date,
    Time,
    DateTime,
}

/// The length of a style, from the most to the least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleLength {
    Full,
    Long,
    Medium,
    Short,
}

impl StyleLength {
    /// The index of this length in the locale's pattern tables.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// A style length together with its relative flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatStyle {
    pub length: StyleLength,
    /// Whether dates near today are rendered as relative day names.
    pub relative: bool,
}

impl FormatStyle {
    const LENGTHS: [StyleLength; 4] = [
        StyleLength::Full,
        StyleLength::Long,
        StyleLength::Medium,
        StyleLength::Short,
    ];

    /// Returns the style at `index` in `0..8`, absolute styles first.
    fn from_index(index: usize) -> Self {
        Self {
            length: Self::LENGTHS[index % 4],
            relative: index >= 4,
        }
    }

    fn index(self) -> usize {
        self.length.index() + if self.relative { 4 } else { 0 }
    }

    /// Returns this style with the relative flag masked off.
    #[must_use]
    pub fn absolute(self) -> Self {
        Self {
            length: self.length,
            relative: false,
        }
    }
}

/// One of the 24 symbolic style names, such as `date_short` or
/// `datetime_relative_full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleName {
    pub kind: FormatKind,
    pub style: FormatStyle,
}

impl StyleName {
    /// The style names in lookup order. Index `k` has kind `k / 8` and style `k % 8`.
    pub const VOCABULARY: [&'static str; 24] = [
        "date_full",
        "date_long",
        "date_medium",
        "date_short",
        "date_relative_full",
        "date_relative_long",
        "date_relative_medium",
        "date_relative_short",
        "time_full",
        "time_long",
        "time_medium",
        "time_short",
        "time_relative_full",
        "time_relative_long",
        "time_relative_medium",
        "time_relative_short",
        "datetime_full",
        "datetime_long",
        "datetime_medium",
        "datetime_short",
        "datetime_relative_full",
        "datetime_relative_long",
        "datetime_relative_medium",
        "datetime_relative_short",
    ];

    const KINDS: [FormatKind; 3] = [FormatKind::Date, FormatKind::Time, FormatKind::DateTime];

    /// Looks up `name` in [`Self::VOCABULARY`]. The match is exact and case-sensitive.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::VOCABULARY
            .iter()
            .position(|candidate| *candidate == name)
            .map(|index| Self {
                kind: Self::KINDS[index / 8],
                style: FormatStyle::from_index(index % 8),
            })
    }

    /// The style of the date part, if this style renders a date.
    pub fn date_style(self) -> Option<FormatStyle> {
        match self.kind {
            FormatKind::Date | FormatKind::DateTime => Some(self.style),
            FormatKind::Time => None,
        }
    }

    /// The style of the time part, if this style renders a time.
    ///
    /// Relative time styles are not supported and fall back to their absolute
    /// counterpart.
    pub fn time_style(self) -> Option<FormatStyle> {
        match self.kind {
            FormatKind::Time | FormatKind::DateTime => Some(self.style.absolute()),
            FormatKind::Date => None,
        }
    }

    fn index(self) -> usize {
        let kind = match self.kind {
            FormatKind::Date => 0,
            FormatKind::Time => 1,
            FormatKind::DateTime => 2,
        };
        kind * 8 + self.style.index()
    }
}

impl FromStr for StyleName {
    type Err = DateFmtError;

    fn from_str(s: &str) -> DateFmtResult<Self> {
        Self::lookup(s).ok_or_else(|| DateFmtError::range().with_message("Unknown style name."))
    }
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::VOCABULARY[self.index()].fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn vocabulary_grid() {
        let name = StyleName::lookup("time_relative_short").unwrap();
        assert_eq!(name.kind, FormatKind::Time);
        assert_eq!(name.style.length, StyleLength::Short);
        assert!(name.style.relative);
        assert_eq!(name.time_style(), Some(StyleName::lookup("time_short").unwrap().style));
        assert_eq!(name.date_style(), None);

        let name = StyleName::lookup("datetime_relative_long").unwrap();
        assert!(name.date_style().unwrap().relative);
        assert!(!name.time_style().unwrap().relative);
    }

    #[test]
    fn names_round_trip() {
        for name in StyleName::VOCABULARY {
            assert_eq!(name.parse::<StyleName>().unwrap().to_string(), name);
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert!(StyleName::lookup("Date_Short").is_none());
        assert!(StyleName::lookup("date_short ").is_none());
        assert!(StyleName::lookup("yyyy").is_none());
    }
}
