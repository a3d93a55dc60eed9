//! This module implements the internal ISO field records.
//!
//!   - `IsoDate` holds a proleptic Gregorian year, month and day.
//!   - `IsoTime` holds the hour, minute, second and millisecond of a day.
//!   - `IsoDateTime` holds both.
//!
//! Years are extended years: 0 is 1 BCE, -1 is 2 BCE and so on.

use datefmt_provider::utils::{self, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE};

use crate::{DateFmtError, DateFmtResult};

/// Years past this magnitude are out of range even for a lenient calendar.
pub(crate) const MAX_YEAR: u64 = 10_000_000;

/// `IsoDateTime` is the record of the `IsoDate` and `IsoTime` slots.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct IsoDateTime {
    pub(crate) date: IsoDate,
    pub(crate) time: IsoTime,
}

impl IsoDateTime {
    /// Splits local epoch milliseconds into date and time of day.
    pub(crate) fn from_local_millis(local_millis: i64) -> Self {
        let epoch_days = local_millis.div_euclid(MS_PER_DAY);
        let millis_in_day = local_millis.rem_euclid(MS_PER_DAY);
        Self {
            date: IsoDate::from_epoch_days(epoch_days),
            time: IsoTime::from_millis_in_day(millis_in_day),
        }
    }
}

/// A proleptic Gregorian date.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct IsoDate {
    pub(crate) year: i64,
    pub(crate) month: u8,
    pub(crate) day: u8,
}

impl IsoDate {
    pub(crate) const fn new_unchecked(year: i64, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a new `IsoDate`, rejecting out of range months and days.
    pub(crate) fn new_with_reject(year: i64, month: i64, day: i64) -> DateFmtResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DateFmtError::engine().with_message("month is not within a valid range."));
        }
        let max_day = i64::from(utils::iso_days_in_month(year, month as u8));
        if !(1..=max_day).contains(&day) {
            return Err(DateFmtError::engine().with_message("day is not within a valid range."));
        }
        Ok(Self::new_unchecked(year, month as u8, day as u8))
    }

    /// Creates a new `IsoDate`, carrying out of range months into the year
    /// and out of range days into the following or preceding months.
    pub(crate) fn balance(year: i64, month: i64, day: i64) -> DateFmtResult<Self> {
        let months = year
            .checked_mul(12)
            .and_then(|m| m.checked_add(month.checked_sub(1)?))
            .ok_or_else(overflow)?;
        let year = months.div_euclid(12);
        if year.unsigned_abs() > MAX_YEAR {
            return Err(overflow());
        }
        let month = months.rem_euclid(12) + 1;
        let first = utils::epoch_days_from_gregorian_parts(year, month, 1);
        let date = first
            .checked_add(day.checked_sub(1).ok_or_else(overflow)?)
            .filter(|days| days.unsigned_abs() <= MAX_YEAR * 366)
            .map(Self::from_epoch_days)
            .ok_or_else(overflow)?;
        Ok(date)
    }

    pub(crate) fn from_epoch_days(epoch_days: i64) -> Self {
        let (year, month, day) = utils::gregorian_date_from_epoch_days(epoch_days);
        Self::new_unchecked(year, month, day)
    }

    pub(crate) fn to_epoch_days(self) -> i64 {
        utils::epoch_days_from_gregorian_date(self.year, self.month, self.day)
    }

    /// 1 is Sunday, 7 is Saturday.
    pub(crate) fn weekday(self) -> u8 {
        utils::epoch_days_to_day_of_week(self.to_epoch_days()) + 1
    }

    /// 1-based day of the year.
    pub(crate) fn day_of_year(self) -> u16 {
        utils::month_to_day(self.month - 1, utils::is_leap(self.year)) + u16::from(self.day)
    }
}

/// The time of day, in the range of a single day.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct IsoTime {
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) second: u8,
    pub(crate) millisecond: u16,
}

impl IsoTime {
    pub(crate) fn from_millis_in_day(millis: i64) -> Self {
        let millis = millis.rem_euclid(MS_PER_DAY);
        Self {
            hour: (millis / MS_PER_HOUR) as u8,
            minute: (millis / MS_PER_MINUTE % 60) as u8,
            second: (millis / 1_000 % 60) as u8,
            millisecond: (millis % 1_000) as u16,
        }
    }

    pub(crate) fn millis_in_day(self) -> i64 {
        i64::from(self.hour) * MS_PER_HOUR
            + i64::from(self.minute) * MS_PER_MINUTE
            + i64::from(self.second) * 1_000
            + i64::from(self.millisecond)
    }
}

fn overflow() -> DateFmtError {
    DateFmtError::engine().with_message("Date fields are outside of the supported range.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_carries_months_and_days() {
        assert_eq!(
            IsoDate::balance(2021, 13, 1),
            Ok(IsoDate::new_unchecked(2022, 1, 1))
        );
        assert_eq!(
            IsoDate::balance(2021, 0, 1),
            Ok(IsoDate::new_unchecked(2020, 12, 1))
        );
        assert_eq!(
            IsoDate::balance(2021, 2, 29),
            Ok(IsoDate::new_unchecked(2021, 3, 1))
        );
        assert_eq!(
            IsoDate::balance(2021, 1, 0),
            Ok(IsoDate::new_unchecked(2020, 12, 31))
        );
    }

    #[test]
    fn balance_rejects_unbounded_years() {
        let err = IsoDate::balance(2021, 999_999_999_999_999_999, 1).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Engine);
        assert!(IsoDate::balance(2021, 1, 999_999_999_999_999_999).is_err());
        assert!(IsoDate::balance(-10_000_001, 1, 1).is_err());
        assert_eq!(
            IsoDate::balance(2021, 1, 366),
            Ok(IsoDate::new_unchecked(2022, 1, 1))
        );
    }

    #[test]
    fn reject_out_of_range() {
        assert!(IsoDate::new_with_reject(2021, 13, 1).is_err());
        assert!(IsoDate::new_with_reject(2021, 2, 29).is_err());
        assert!(IsoDate::new_with_reject(2020, 2, 29).is_ok());
    }

    #[test]
    fn local_millis() {
        let dt = IsoDateTime::from_local_millis(-1);
        assert_eq!(dt.date, IsoDate::new_unchecked(1969, 12, 31));
        assert_eq!(dt.time.hour, 23);
        assert_eq!(dt.time.millisecond, 999);
        assert_eq!(dt.time.millis_in_day(), MS_PER_DAY - 1);

        // 1970-01-01 was a Thursday.
        assert_eq!(IsoDate::new_unchecked(1970, 1, 1).weekday(), 5);
        assert_eq!(IsoDate::new_unchecked(2024, 12, 31).day_of_year(), 366);
    }
}
