//! This module implements `Calendar`, the stateful mapping between an
//! instant and the localized fields of a proleptic Gregorian calendar.

use datefmt_provider::utils::{self, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE};

use crate::{
    format::parse::ParsedFields,
    iso::{IsoDate, IsoDateTime, IsoTime, MAX_YEAR},
    locale::{Locale, WeekRules},
    sys,
    timezone::TimeZone,
    DateFmtError, DateFmtResult,
};

/// The earliest supported instant, in milliseconds since the epoch.
pub const MIN_MILLIS: f64 = -184_303_902_528_000_000.0;
/// The latest supported instant, in milliseconds since the epoch.
pub const MAX_MILLIS: f64 = 183_882_168_921_600_000.0;

/// Julian day number of 1970-01-01.
pub(crate) const EPOCH_JULIAN_DAY: i64 = 2_440_588;

/// A calendar bound to a time zone and a locale's week rules.
///
/// A `Calendar` holds one instant at a time. Formatting reads the fields of
/// that instant; parsing applies fields and reads the resulting instant back
/// with [`Calendar::time`].
#[derive(Debug)]
pub struct Calendar {
    time_zone: TimeZone,
    week: WeekRules,
    lenient: bool,
    millis: f64,
    /// The instant treated as "now" for defaults and relative names.
    now_millis: f64,
    pending: Option<PendingFields>,
}

#[derive(Debug)]
struct PendingFields {
    fields: ParsedFields,
    time_zone: Option<TimeZone>,
}

impl Calendar {
    /// Creates a lenient calendar set to the current time.
    pub fn try_new(locale: &Locale, time_zone: TimeZone) -> DateFmtResult<Self> {
        let now_millis = sys::get_system_millis()?;
        Ok(Self {
            time_zone,
            week: locale.week_rules(),
            lenient: true,
            millis: now_millis,
            now_millis,
            pending: None,
        })
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    pub fn is_lenient(&self) -> bool {
        self.lenient
    }

    /// Sets whether out of range fields are normalized rather than rejected.
    pub fn set_lenient(&mut self, lenient: bool) {
        self.lenient = lenient;
    }

    /// Sets the instant, in milliseconds since the epoch.
    pub fn set_time(&mut self, millis: f64) -> DateFmtResult<()> {
        if !millis.is_finite() {
            return Err(DateFmtError::engine().with_message("Time value must be finite."));
        }
        if !(MIN_MILLIS..=MAX_MILLIS).contains(&millis) {
            return Err(DateFmtError::engine().with_message("Time value is out of range."));
        }
        self.pending = None;
        self.millis = millis;
        Ok(())
    }

    /// Returns the instant in milliseconds since the epoch, first resolving
    /// any fields applied by parsing.
    pub fn time(&mut self) -> DateFmtResult<f64> {
        if let Some(pending) = self.pending.take() {
            let millis = self.resolve(&pending.fields, pending.time_zone.as_ref())?;
            self.millis = millis;
        }
        Ok(self.millis)
    }

    /// Applies parsed fields, to be resolved by the next call to [`Calendar::time`].
    ///
    /// `time_zone` overrides the calendar's zone when the text carried one.
    pub(crate) fn apply_fields(&mut self, fields: ParsedFields, time_zone: Option<TimeZone>) {
        self.pending = Some(PendingFields { fields, time_zone });
    }

    #[cfg(test)]
    pub(crate) fn set_reference_time(&mut self, millis: f64) {
        self.now_millis = millis;
    }

    /// Returns the fields of the current instant.
    pub(crate) fn fields(&self) -> DateFmtResult<CalendarFields> {
        self.fields_at(self.millis)
    }

    /// Returns today's date in the calendar's time zone.
    pub(crate) fn today(&self) -> DateFmtResult<IsoDate> {
        Ok(self.fields_at(self.now_millis)?.date)
    }

    fn fields_at(&self, millis: f64) -> DateFmtResult<CalendarFields> {
        let epoch_millis = millis.floor() as i64;
        let offset_seconds = self.time_zone.offset_at(epoch_millis.div_euclid(1_000))?;
        let local = IsoDateTime::from_local_millis(epoch_millis + offset_seconds * 1_000);
        Ok(CalendarFields {
            date: local.date,
            time: local.time,
            offset_seconds,
            week: self.week,
        })
    }

    fn resolve(&self, fields: &ParsedFields, time_zone: Option<&TimeZone>) -> DateFmtResult<f64> {
        let today = self.today()?;
        let epoch_days = self.resolve_date(fields, today)?;
        let millis_in_day = self.resolve_time(fields)?;

        let local_millis = epoch_days
            .checked_mul(MS_PER_DAY)
            .and_then(|millis| millis.checked_add(millis_in_day))
            .ok_or_else(out_of_range)?;
        let time_zone = time_zone.unwrap_or(&self.time_zone);
        let epoch_seconds =
            time_zone.local_to_epoch_seconds(local_millis.div_euclid(1_000), self.lenient)?;
        let millis = epoch_seconds
            .checked_mul(1_000)
            .map(|millis| (millis + local_millis.rem_euclid(1_000)) as f64)
            .ok_or_else(out_of_range)?;

        if !(MIN_MILLIS..=MAX_MILLIS).contains(&millis) {
            return Err(out_of_range());
        }
        Ok(millis)
    }

    /// Resolves the parsed date fields to epoch days.
    ///
    /// Unparsed fields finer than a parsed one take their minimum; unparsed
    /// fields coarser than every parsed one come from `today`.
    fn resolve_date(&self, fields: &ParsedFields, today: IsoDate) -> DateFmtResult<i64> {
        if let Some(offset) = fields.relative_day {
            return Ok(today.to_epoch_days() + i64::from(offset));
        }
        if let Some(julian_day) = fields.julian_day {
            return Ok(julian_day - EPOCH_JULIAN_DAY);
        }

        if let Some(era) = fields.era {
            self.check_range(era, 0, 1)?;
        }
        let year = match (fields.extended_year, fields.year) {
            (Some(year), _) => Some(year),
            (None, Some(year)) => {
                self.check_range(year, 1, i64::MAX)?;
                Some(if fields.era == Some(0) { 1 - year } else { year })
            }
            (None, None) => None,
        };
        if year
            .into_iter()
            .chain(fields.week_year)
            .any(|year| year.unsigned_abs() > MAX_YEAR)
        {
            return Err(out_of_range());
        }
        if let Some(weekday) = fields.weekday {
            self.check_range(weekday, 1, 7)?;
        }

        if let (Some(day_of_year), None) = (fields.day_of_year, fields.day) {
            let year = year.unwrap_or(today.year);
            self.check_range(day_of_year, 1, i64::from(utils::days_in_year(year)))?;
            return Ok(utils::epoch_days_for_year(year) + day_of_year - 1);
        }

        if let (Some(week), None, None) = (fields.week_of_year, fields.month, fields.day) {
            self.check_range(week, 1, 53)?;
            let week_year = fields.week_year.or(year).unwrap_or(today.year);
            let start = self.week.week_one_start(utils::epoch_days_for_year(week_year));
            return Ok(start + (week - 1) * 7 + self.week.days_into_week(fields.weekday));
        }

        if let (Some(month), None) = (fields.month, fields.day) {
            let year = year.unwrap_or(today.year);
            if let Some(ordinal) = fields.day_of_week_in_month {
                self.check_range(ordinal, 1, 5)?;
                let first = IsoDate::balance(year, month, 1)?;
                let weekday = fields.weekday.unwrap_or(i64::from(self.week.first_weekday));
                let skip = (weekday - i64::from(first.weekday())).rem_euclid(7);
                return Ok(first.to_epoch_days() + skip + (ordinal - 1) * 7);
            }
            if let Some(week) = fields.week_of_month {
                self.check_range(week, 0, 6)?;
                let first = IsoDate::balance(year, month, 1)?;
                let start = self.week.week_one_start(first.to_epoch_days());
                return Ok(start + (week - 1) * 7 + self.week.days_into_week(fields.weekday));
            }
        }

        let has_date = year.is_some() || fields.month.is_some() || fields.day.is_some();
        if !has_date && fields.weekday.is_some() {
            let week_start =
                today.to_epoch_days() - self.week.days_into_week(Some(i64::from(today.weekday())));
            return Ok(week_start + self.week.days_into_week(fields.weekday));
        }

        let month = fields
            .month
            .unwrap_or(if year.is_some() { 1 } else { i64::from(today.month) });
        let day = fields.day.unwrap_or(if year.is_some() || fields.month.is_some() {
            1
        } else {
            i64::from(today.day)
        });
        let year = year.unwrap_or(today.year);

        let date = if self.lenient {
            IsoDate::balance(year, month, day)?
        } else {
            IsoDate::new_with_reject(year, month, day)?
        };
        Ok(date.to_epoch_days())
    }

    /// Resolves the parsed time of day fields to milliseconds.
    fn resolve_time(&self, fields: &ParsedFields) -> DateFmtResult<i64> {
        let has_time = fields.hour_of_day.is_some()
            || fields.hour.is_some()
            || fields.minute.is_some()
            || fields.second.is_some()
            || fields.millisecond.is_some();
        if let (Some(millis), false) = (fields.millis_in_day, has_time) {
            self.check_range(millis, 0, MS_PER_DAY - 1)?;
            return Ok(millis);
        }

        let hour = match (fields.hour_of_day, fields.hour) {
            (Some(hour), _) => {
                self.check_range(hour, 0, 23)?;
                hour
            }
            (None, Some(hour)) => {
                self.check_range(hour, 0, 11)?;
                let period = fields.day_period.unwrap_or(0);
                self.check_range(i64::from(period), 0, 1)?;
                hour + 12 * i64::from(period)
            }
            (None, None) => 0,
        };
        let minute = fields.minute.unwrap_or(0);
        let second = fields.second.unwrap_or(0);
        let millisecond = fields.millisecond.unwrap_or(0);
        self.check_range(minute, 0, 59)?;
        self.check_range(second, 0, 59)?;
        self.check_range(millisecond, 0, 999)?;

        [
            (hour, MS_PER_HOUR),
            (minute, MS_PER_MINUTE),
            (second, 1_000),
            (millisecond, 1),
        ]
        .into_iter()
        .try_fold(0i64, |acc, (value, unit)| {
            value.checked_mul(unit).and_then(|v| acc.checked_add(v))
        })
        .ok_or_else(out_of_range)
    }

    /// Rejects `value` outside of `min..=max` unless the calendar is lenient.
    fn check_range(&self, value: i64, min: i64, max: i64) -> DateFmtResult<()> {
        if self.lenient || (min..=max).contains(&value) {
            return Ok(());
        }
        Err(DateFmtError::engine().with_message("Field value is out of range."))
    }
}

fn out_of_range() -> DateFmtError {
    DateFmtError::engine().with_message("Resolved time is out of range.")
}

impl WeekRules {
    /// Returns the position of `weekday` (1 is Sunday) within a week, 0 for
    /// the first day of the week. `None` is the first day.
    pub(crate) fn days_into_week(self, weekday: Option<i64>) -> i64 {
        weekday.map_or(0, |weekday| {
            (weekday - i64::from(self.first_weekday)).rem_euclid(7)
        })
    }

    /// Returns the epoch days of the first day of week 1 of a year or a
    /// month starting on `period_start`.
    pub(crate) fn week_one_start(self, period_start: i64) -> i64 {
        let weekday = i64::from(utils::epoch_days_to_day_of_week(period_start)) + 1;
        let offset = self.days_into_week(Some(weekday));
        let start = period_start - offset;
        if 7 - offset >= i64::from(self.min_days) {
            start
        } else {
            start + 7
        }
    }
}

/// The fields of an instant in a calendar's time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CalendarFields {
    pub(crate) date: IsoDate,
    pub(crate) time: IsoTime,
    pub(crate) offset_seconds: i64,
    pub(crate) week: WeekRules,
}

impl CalendarFields {
    pub(crate) fn epoch_days(&self) -> i64 {
        self.date.to_epoch_days()
    }

    /// 0 before the common era, 1 otherwise.
    pub(crate) fn era(&self) -> u8 {
        u8::from(self.date.year > 0)
    }

    pub(crate) fn era_year(&self) -> i64 {
        if self.date.year > 0 {
            self.date.year
        } else {
            1 - self.date.year
        }
    }

    pub(crate) fn quarter(&self) -> u8 {
        (self.date.month - 1) / 3 + 1
    }

    pub(crate) fn weekday(&self) -> u8 {
        self.date.weekday()
    }

    /// 1 for the locale's first day of the week.
    pub(crate) fn local_weekday(&self) -> u8 {
        self.week.days_into_week(Some(i64::from(self.weekday()))) as u8 + 1
    }

    pub(crate) fn day_of_week_in_month(&self) -> u8 {
        (self.date.day - 1) / 7 + 1
    }

    /// Returns the week-numbering year and the week of that year.
    pub(crate) fn week_of_year(&self) -> (i64, u8) {
        let days = self.epoch_days();
        let year = self.date.year;
        let next = self.week.week_one_start(utils::epoch_days_for_year(year + 1));
        if days >= next {
            return (year + 1, 1);
        }
        let start = self.week.week_one_start(utils::epoch_days_for_year(year));
        if days < start {
            let previous = self.week.week_one_start(utils::epoch_days_for_year(year - 1));
            return (year - 1, ((days - previous) / 7 + 1) as u8);
        }
        (year, ((days - start) / 7 + 1) as u8)
    }

    /// Week of the month, 0 for days before the month's first full week.
    pub(crate) fn week_of_month(&self) -> u8 {
        let first = self.epoch_days() - i64::from(self.date.day) + 1;
        let start = self.week.week_one_start(first);
        ((self.epoch_days() - start).div_euclid(7) + 1) as u8
    }

    pub(crate) fn julian_day(&self) -> i64 {
        self.epoch_days() + EPOCH_JULIAN_DAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc_calendar(locale: &str) -> Calendar {
        let locale = Locale::try_from_str(locale).unwrap();
        let mut calendar = Calendar::try_new(&locale, TimeZone::Utc).unwrap();
        // 2024-06-15T12:00:00Z, a Saturday.
        calendar.set_reference_time(1_718_452_800_000.0);
        calendar
    }

    fn resolve(calendar: &mut Calendar, fields: ParsedFields) -> DateFmtResult<f64> {
        calendar.apply_fields(fields, None);
        calendar.time()
    }

    #[test]
    fn set_time_range() {
        let mut calendar = utc_calendar("en_US");
        assert!(calendar.set_time(f64::NAN).is_err());
        assert!(calendar.set_time(MAX_MILLIS * 2.0).is_err());
        assert!(calendar.set_time(-1.0).is_ok());
        assert_eq!(calendar.time(), Ok(-1.0));

        let fields = calendar.fields().unwrap();
        assert_eq!(fields.date, IsoDate::new_unchecked(1969, 12, 31));
        assert_eq!(fields.time.millisecond, 999);
    }

    #[test]
    fn week_fields() {
        let mut calendar = utc_calendar("en_US");
        // 2024-12-31 is in week 1 of 2025 with US rules.
        calendar.set_time(1_735_646_400_000.0).unwrap();
        let fields = calendar.fields().unwrap();
        assert_eq!(fields.week_of_year(), (2025, 1));
        assert_eq!(fields.week_of_month(), 5);
        assert_eq!(fields.local_weekday(), 3);

        // With ISO rules it is still in week 1 of 2025.
        let mut calendar = utc_calendar("pl_PL");
        calendar.set_time(1_735_646_400_000.0).unwrap();
        let fields = calendar.fields().unwrap();
        assert_eq!(fields.week_of_year(), (2025, 1));
        assert_eq!(fields.local_weekday(), 2);

        // 2021-01-01 belongs to week 53 of 2020 with ISO rules.
        calendar.set_time(1_609_459_200_000.0).unwrap();
        assert_eq!(calendar.fields().unwrap().week_of_year(), (2020, 53));
    }

    #[test]
    fn coarser_fields_reset_finer_ones() {
        let mut calendar = utc_calendar("en_US");
        let fields = ParsedFields {
            year: Some(1970),
            ..Default::default()
        };
        assert_eq!(resolve(&mut calendar, fields), Ok(0.0));

        // Only a day: month and year from today.
        let fields = ParsedFields {
            day: Some(1),
            ..Default::default()
        };
        assert_eq!(resolve(&mut calendar, fields), Ok(1_717_200_000_000.0));

        // Only a time: today's date.
        let fields = ParsedFields {
            hour_of_day: Some(1),
            ..Default::default()
        };
        assert_eq!(resolve(&mut calendar, fields), Ok(1_718_413_200_000.0));
    }

    #[test]
    fn leniency() {
        let mut calendar = utc_calendar("en_US");
        assert!(calendar.is_lenient());
        let fields = ParsedFields {
            year: Some(2021),
            month: Some(13),
            day: Some(1),
            ..Default::default()
        };
        assert_eq!(
            resolve(&mut calendar, fields.clone()),
            Ok(1_640_995_200_000.0)
        );
        calendar.set_lenient(false);
        assert!(!calendar.is_lenient());
        assert!(resolve(&mut calendar, fields).is_err());

        let fields = ParsedFields {
            year: Some(999_999_999_999),
            ..Default::default()
        };
        calendar.set_lenient(true);
        assert!(resolve(&mut calendar, fields).is_err());
        for (month, day) in [(999_999_999_999_999_999, 1), (1, 999_999_999_999_999_999)] {
            let fields = ParsedFields {
                year: Some(2021),
                month: Some(month),
                day: Some(day),
                ..Default::default()
            };
            let err = resolve(&mut calendar, fields).unwrap_err();
            assert_eq!(err.kind(), crate::error::ErrorKind::Engine);
        }
        calendar.set_lenient(false);

        let fields = ParsedFields {
            year: Some(2021),
            month: Some(1),
            day: Some(1),
            hour: Some(0),
            day_period: Some(1),
            minute: Some(60),
            ..Default::default()
        };
        assert!(resolve(&mut calendar, fields.clone()).is_err());
        calendar.set_lenient(true);
        // 2021-01-01T13:00:00Z
        assert_eq!(resolve(&mut calendar, fields), Ok(1_609_506_000_000.0));
    }

    #[test]
    fn weekday_only_stays_in_current_week() {
        let mut calendar = utc_calendar("en_US");
        // Monday of the week of 2024-06-15 with a Sunday week start.
        let fields = ParsedFields {
            weekday: Some(2),
            ..Default::default()
        };
        assert_eq!(resolve(&mut calendar, fields), Ok(1_717_977_600_000.0));
    }

    #[test]
    fn relative_and_julian_days() {
        let mut calendar = utc_calendar("en_US");
        let fields = ParsedFields {
            relative_day: Some(-1),
            ..Default::default()
        };
        assert_eq!(resolve(&mut calendar, fields), Ok(1_718_323_200_000.0));

        let fields = ParsedFields {
            julian_day: Some(EPOCH_JULIAN_DAY),
            ..Default::default()
        };
        assert_eq!(resolve(&mut calendar, fields), Ok(0.0));
    }
}
