//! Locale resolution and access to localized date-time symbols.

use core::{fmt, str::FromStr};

use icu_calendar::week::WeekInformation;
use icu_locale::{locale, Locale as IcuLocale};

use crate::{sys, DateFmtError, DateFmtResult};

mod data;

pub(crate) use data::LocaleData;

/// The week numbering rules of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WeekRules {
    /// 1 is Sunday, 7 is Saturday.
    pub(crate) first_weekday: u8,
    /// The minimal number of days the first week of a year or month must have.
    pub(crate) min_days: u8,
}

/// A resolved locale: its identifier, symbols and week rules.
#[derive(Debug, Clone)]
pub struct Locale {
    id: IcuLocale,
    data: &'static LocaleData,
    localized: bool,
    week: WeekRules,
}

impl Default for Locale {
    fn default() -> Self {
        Self::from_icu(locale!("en-US"))
    }
}

impl Locale {
    /// Parses a BCP-47 or POSIX style locale identifier such as `en_US`,
    /// `de-DE` or `pl_PL.UTF-8`.
    pub fn try_from_str(source: &str) -> DateFmtResult<Self> {
        let source = source
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        if source.is_empty() || source == "C" || source == "POSIX" {
            return Ok(Self::default());
        }
        let normalized = source.replace('_', "-");
        let id = normalized
            .parse::<IcuLocale>()
            .map_err(|_| DateFmtError::range().with_message("Invalid locale identifier."))?;
        Ok(Self::from_icu(id))
    }

    /// Returns the locale of the host, or `en-US` when it cannot be determined.
    pub fn system() -> Self {
        sys::get_system_locale_id()
            .and_then(|id| Self::try_from_str(&id).ok())
            .unwrap_or_default()
    }

    fn from_icu(id: IcuLocale) -> Self {
        let localized = data::lookup(
            id.id.language.as_str(),
            id.id.region.as_ref().map(|region| region.as_str()),
        );
        #[cfg(feature = "log")]
        if localized.is_none() {
            log::warn!("no date-time symbols for {id}, using the root (English) data");
        }
        let data = localized.unwrap_or(data::ROOT);
        let first_weekday = WeekInformation::try_new((&id).into())
            .map(|info| info.first_weekday as u8 % 7 + 1)
            .unwrap_or(data.first_weekday);
        Self {
            id,
            data,
            localized: localized.is_some(),
            week: WeekRules {
                first_weekday,
                min_days: data.min_days_in_first_week,
            },
        }
    }

    /// Returns the underlying locale identifier.
    pub fn id(&self) -> &IcuLocale {
        &self.id
    }

    /// Returns whether this locale has its own date-time symbols and
    /// patterns. Other locales format and parse with the root (English) data.
    pub fn is_localized(&self) -> bool {
        self.localized
    }

    pub(crate) fn data(&self) -> &'static LocaleData {
        self.data
    }

    pub(crate) fn week_rules(&self) -> WeekRules {
        self.week
    }

    /// Returns the day offsets with a localized name, such as "yesterday".
    pub(crate) fn relative_days(&self) -> &'static [(i8, &'static str)] {
        self.data.relative_days
    }
}

impl FromStr for Locale {
    type Err = DateFmtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_str(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// The width of a localized name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NameWidth {
    Abbreviated,
    Wide,
    Narrow,
}

impl NameWidth {
    pub(crate) fn from_count(count: u8) -> Self {
        match count {
            0..=3 => Self::Abbreviated,
            4 => Self::Wide,
            _ => Self::Narrow,
        }
    }
}

/// A localized name, either a full string or the narrow form of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Name {
    Full(&'static str),
    Narrow(&'static str),
}

impl writeable::Writeable for Name {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        match self {
            Self::Full(name) => sink.write_str(name),
            Self::Narrow(name) => name
                .chars()
                .next()
                .into_iter()
                .flat_map(char::to_uppercase)
                .try_for_each(|ch| sink.write_char(ch)),
        }
    }

    fn writeable_length_hint(&self) -> writeable::LengthHint {
        match self {
            Self::Full(name) => writeable::LengthHint::exact(name.len()),
            Self::Narrow(_) => writeable::LengthHint::between(1, 4),
        }
    }
}

#[cfg(test)]
writeable::impl_display_with_writeable!(Name);

impl LocaleData {
    fn month_names(&self, standalone: bool) -> &data::MonthNames {
        match (&self.standalone_months, standalone) {
            (Some(names), true) => names,
            _ => &self.months,
        }
    }

    /// `month` is 1-based.
    pub(crate) fn month(&self, month: u8, width: NameWidth, standalone: bool) -> Name {
        let names = self.month_names(standalone);
        let idx = usize::from(month.clamp(1, 12) - 1);
        match width {
            NameWidth::Abbreviated => Name::Full(names.abbreviated[idx]),
            NameWidth::Wide => Name::Full(names.wide[idx]),
            NameWidth::Narrow => Name::Narrow(names.wide[idx]),
        }
    }

    /// `weekday` is 1 for Sunday through 7 for Saturday.
    pub(crate) fn weekday(&self, weekday: u8, width: NameWidth) -> Name {
        let idx = usize::from(weekday.clamp(1, 7) - 1);
        match width {
            NameWidth::Abbreviated => Name::Full(self.weekdays_abbreviated[idx]),
            NameWidth::Wide => Name::Full(self.weekdays_wide[idx]),
            NameWidth::Narrow => Name::Narrow(self.weekdays_wide[idx]),
        }
    }

    /// `era` is 0 before the common era, 1 otherwise.
    pub(crate) fn era(&self, era: u8, width: NameWidth) -> Name {
        let idx = usize::from(era.min(1));
        match width {
            NameWidth::Abbreviated => Name::Full(self.eras_abbreviated[idx]),
            NameWidth::Wide => Name::Full(self.eras_wide[idx]),
            NameWidth::Narrow => Name::Narrow(self.eras_abbreviated[idx]),
        }
    }

    /// `quarter` is 1-based.
    pub(crate) fn quarter(&self, quarter: u8, width: NameWidth) -> Name {
        let idx = usize::from(quarter.clamp(1, 4) - 1);
        match width {
            NameWidth::Abbreviated => Name::Full(self.quarters_abbreviated[idx]),
            NameWidth::Wide => Name::Full(self.quarters_wide[idx]),
            NameWidth::Narrow => Name::Narrow(QUARTER_DIGITS[idx]),
        }
    }

    /// `period` is 0 for AM, 1 for PM.
    pub(crate) fn day_period(&self, period: u8, width: NameWidth) -> Name {
        let name = self.day_periods[usize::from(period.min(1))];
        match width {
            NameWidth::Narrow => Name::Narrow(name),
            _ => Name::Full(name),
        }
    }

    /// Candidate names for parsing a month, with their 1-based values.
    pub(crate) fn month_candidates(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        [Some(&self.months), self.standalone_months.as_ref()]
            .into_iter()
            .flatten()
            .flat_map(|names| names.wide.iter().chain(names.abbreviated.iter()).zip(month_values()))
            .map(|(name, value)| (*name, value))
    }

    pub(crate) fn weekday_candidates(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        self.weekdays_wide
            .iter()
            .zip(1..=7)
            .chain(self.weekdays_abbreviated.iter().zip(1..=7))
            .map(|(name, value)| (*name, value))
    }

    pub(crate) fn era_candidates(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        self.eras_wide
            .iter()
            .zip(0..=1)
            .chain(self.eras_abbreviated.iter().zip(0..=1))
            .map(|(name, value)| (*name, value))
    }

    pub(crate) fn quarter_candidates(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        self.quarters_wide
            .iter()
            .zip(1..=4)
            .chain(self.quarters_abbreviated.iter().zip(1..=4))
            .map(|(name, value)| (*name, value))
    }

    pub(crate) fn day_period_candidates(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        self.day_periods.iter().zip(0..=1).map(|(name, value)| (*name, value))
    }
}

const QUARTER_DIGITS: [&str; 4] = ["1", "2", "3", "4"];

// Month values repeated for the wide and then the abbreviated names.
fn month_values() -> impl Iterator<Item = u8> {
    (1..=12).chain(1..=12)
}
