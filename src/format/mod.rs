//! Locale-bound date formatters and their reuse across a run of elements.
//!
//! A [`DateFormatter`] is built from either one of the symbolic style names
//! in [`StyleName::VOCABULARY`] or a literal LDML pattern:
//!
//! ```rust
//! use datefmt_rs::{format::DateFormatter, Locale};
//!
//! let locale = Locale::try_from_str("en_US").unwrap();
//! assert!(DateFormatter::try_new("date_short", &locale).is_ok());
//! assert!(DateFormatter::try_new("yyyy-MM-dd'T'HH:mm:ss", &locale).is_ok());
//! assert!(DateFormatter::try_new("yyyy 'unterminated", &locale).is_err());
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::{calendar::Calendar, locale::Locale, DateFmtResult, DateFmtUnwrap};

pub(crate) mod parse;
pub(crate) mod pattern;
mod style;
mod write;

pub use style::{FormatKind, FormatStyle, StyleLength, StyleName};
pub use write::FormattedDateTime;

use parse::{ParsedFields, Parser};
use pattern::Item;

/// What a [`DateFormatter`] was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSpec {
    /// A symbolic style name.
    Style(StyleName),
    /// A literal LDML pattern.
    Pattern(String),
}

impl FormatSpec {
    /// Resolves `pattern`, preferring the style vocabulary over a literal pattern.
    pub fn resolve(pattern: &str) -> Self {
        StyleName::lookup(pattern).map_or_else(|| Self::Pattern(pattern.into()), Self::Style)
    }

    /// Returns whether this was resolved from `pattern`.
    pub fn matches(&self, pattern: &str) -> bool {
        match self {
            Self::Style(name) => StyleName::lookup(pattern) == Some(*name),
            Self::Pattern(source) => source == pattern,
        }
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Style(name) => name.fmt(f),
            Self::Pattern(source) => source.fmt(f),
        }
    }
}

/// A formatter bound to a locale and a pattern.
#[derive(Debug, Clone)]
pub struct DateFormatter {
    spec: FormatSpec,
    items: Vec<Item>,
    /// Alternative layouts for days with a relative name, keyed by their
    /// offset from today.
    relative: Vec<(i8, Vec<Item>)>,
    locale: Locale,
}

impl DateFormatter {
    /// Creates a new `DateFormatter` for `pattern`.
    ///
    /// `pattern` is first looked up in [`StyleName::VOCABULARY`]; anything
    /// else is compiled as a literal LDML pattern, which fails on an
    /// unterminated quote or an unknown field letter.
    pub fn try_new(pattern: &str, locale: &Locale) -> DateFmtResult<Self> {
        let spec = FormatSpec::resolve(pattern);
        let FormatSpec::Style(name) = spec else {
            return Ok(Self {
                items: pattern::compile(pattern)?,
                spec,
                relative: Vec::new(),
                locale: locale.clone(),
            });
        };

        let data = locale.data();
        let date = name
            .date_style()
            .map(|style| pattern::compile(data.date_patterns[style.length.index()]))
            .transpose()?;
        let time = name
            .time_style()
            .map(|style| pattern::compile(data.time_patterns[style.length.index()]))
            .transpose()?;
        let glue = data.datetime_patterns[name.style.length.index()];

        let assemble = |date: Option<&[Item]>| -> DateFmtResult<Vec<Item>> {
            match (date, time.as_deref()) {
                (Some(date), Some(time)) => pattern::combine(glue, date, time),
                (Some(items), None) | (None, Some(items)) => Ok(items.to_vec()),
                (None, None) => Ok(Vec::new()),
            }
        };

        let items = assemble(date.as_deref())?;
        let relative = if name.date_style().is_some_and(|style| style.relative) {
            locale
                .relative_days()
                .iter()
                .map(|(offset, _)| Ok((*offset, assemble(Some(&[Item::RelativeDay(*offset)]))?)))
                .collect::<DateFmtResult<Vec<_>>>()?
        } else {
            Vec::new()
        };

        Ok(Self {
            spec,
            items,
            relative,
            locale: locale.clone(),
        })
    }

    pub fn spec(&self) -> &FormatSpec {
        &self.spec
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Formats the current instant of `calendar`.
    pub fn format<'a>(&'a self, calendar: &'a Calendar) -> DateFmtResult<FormattedDateTime<'a>> {
        let fields = calendar.fields()?;
        let mut items = self.items.as_slice();
        if !self.relative.is_empty() {
            let offset = fields.epoch_days() - calendar.today()?.to_epoch_days();
            if let Some((_, relative)) = self
                .relative
                .iter()
                .find(|(day, _)| i64::from(*day) == offset)
            {
                items = relative;
            }
        }
        Ok(FormattedDateTime {
            items,
            fields,
            data: self.locale.data(),
            time_zone: calendar.time_zone(),
        })
    }

    /// Parses `text` from its start, trying relative day names first.
    ///
    /// Returns `None` when the text does not match.
    pub(crate) fn parse(&self, text: &str, calendar: &Calendar) -> DateFmtResult<Option<ParsedFields>> {
        let century_start = calendar.today()?.year - 80;
        Ok(self
            .relative
            .iter()
            .map(|(_, items)| items.as_slice())
            .chain(core::iter::once(self.items.as_slice()))
            .find_map(|items| Parser::new(items, &self.locale, century_start, text).parse()))
    }
}

/// Holds the formatter of the current run of elements.
///
/// A formatter is reused while the pattern comes from the same slot of the
/// pattern sequence, or has the same content; otherwise it is rebuilt.
#[derive(Debug, Default)]
pub struct FormatterCache {
    current: Option<CachedFormatter>,
    rebuilds: usize,
}

#[derive(Debug)]
struct CachedFormatter {
    slot: usize,
    formatter: DateFormatter,
}

impl FormatterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a formatter for `pattern`, found at physical index `slot` of
    /// the pattern sequence.
    pub fn ensure(&mut self, slot: usize, pattern: &str, locale: &Locale) -> DateFmtResult<&DateFormatter> {
        let hit = match &mut self.current {
            Some(cached) if cached.slot == slot => true,
            Some(cached) if cached.formatter.spec.matches(pattern) => {
                cached.slot = slot;
                true
            }
            _ => false,
        };
        if !hit {
            self.current = None;
            let formatter = DateFormatter::try_new(pattern, locale)?;
            #[cfg(feature = "log")]
            log::trace!("rebuilt formatter for slot {slot}: {}", formatter.spec);
            self.rebuilds += 1;
            self.current = Some(CachedFormatter { slot, formatter });
        }
        self.current().datefmt_unwrap()
    }

    /// The formatter of the current run, if any.
    pub fn current(&self) -> Option<&DateFormatter> {
        self.current.as_ref().map(|cached| &cached.formatter)
    }

    /// The number of formatters built so far.
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }
}
