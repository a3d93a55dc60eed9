//! Proleptic Gregorian calendar equations shared by the providers and `datefmt_rs`.
//!
//! All values are computed with `i64` epoch days so that the full range of
//! supported instants (roughly ±5.8 million years) can be represented.

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const MS_PER_DAY: i64 = 86_400_000;
pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_MINUTE: i64 = 60_000;

// Days from 0000-03-01 to 1970-01-01.
const EPOCH_SHIFT: i64 = 719_468;
const DAYS_IN_A_400Y_CYCLE: i64 = 146_097;

/// Returns the days since the Unix epoch of the given Gregorian date.
///
/// `month` is 1-based. Out of range `day` values are carried arithmetically.
pub const fn epoch_days_from_gregorian_date(year: i64, month: u8, day: u8) -> i64 {
    epoch_days_from_gregorian_parts(year, month as i64, day as i64)
}

/// Like [`epoch_days_from_gregorian_date`], but accepts wide month and day values.
///
/// `month` must already be within `1..=12`.
pub const fn epoch_days_from_gregorian_parts(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let shifted_month = (month + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_IN_A_400Y_CYCLE + day_of_era - EPOCH_SHIFT
}

/// Returns the `(year, month, day)` of the given epoch days.
pub const fn gregorian_date_from_epoch_days(epoch_days: i64) -> (i64, u8, u8) {
    let shifted = epoch_days + EPOCH_SHIFT;
    let era = shifted.div_euclid(DAYS_IN_A_400Y_CYCLE);
    let day_of_era = shifted - era * DAYS_IN_A_400Y_CYCLE;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + (month <= 2) as i64;
    (year, month as u8, day as u8)
}

/// Returns the epoch days of January 1st of `year`.
pub const fn epoch_days_for_year(year: i64) -> i64 {
    epoch_days_from_gregorian_date(year, 1, 1)
}

pub const fn is_leap(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub const fn days_in_year(year: i64) -> u16 {
    if is_leap(year) {
        366
    } else {
        365
    }
}

pub const fn iso_days_in_month(year: i64, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap(year) => 29,
        _ => 28,
    }
}

/// Returns the number of days in the year before the zero-based `month`.
pub const fn month_to_day(month: u8, is_leap: bool) -> u16 {
    let leap_day = is_leap as u16;
    match month {
        0 => 0,
        1 => 31,
        2 => 59 + leap_day,
        3 => 90 + leap_day,
        4 => 120 + leap_day,
        5 => 151 + leap_day,
        6 => 181 + leap_day,
        7 => 212 + leap_day,
        8 => 243 + leap_day,
        9 => 273 + leap_day,
        10 => 304 + leap_day,
        _ => 334 + leap_day,
    }
}

/// Returns the day of the week for the epoch days, where 0 is Sunday.
pub const fn epoch_days_to_day_of_week(epoch_days: i64) -> u8 {
    // 1970-01-01 was a Thursday.
    (epoch_days + 4).rem_euclid(7) as u8
}

/// Returns the Gregorian year containing `epoch_seconds`.
pub const fn epoch_seconds_to_year(epoch_seconds: i64) -> i64 {
    gregorian_date_from_epoch_days(epoch_seconds.div_euclid(SECONDS_PER_DAY)).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_days_round_trip() {
        assert_eq!(epoch_days_from_gregorian_date(1970, 1, 1), 0);
        assert_eq!(gregorian_date_from_epoch_days(0), (1970, 1, 1));
        assert_eq!(epoch_days_from_gregorian_date(2000, 3, 1), 11_017);
        assert_eq!(gregorian_date_from_epoch_days(11_016), (2000, 2, 29));
        assert_eq!(gregorian_date_from_epoch_days(-1), (1969, 12, 31));
        assert_eq!(epoch_days_from_gregorian_date(-1, 12, 31), -719_529);
        assert_eq!(gregorian_date_from_epoch_days(-719_529), (-1, 12, 31));
    }

    #[test]
    fn extreme_years() {
        let days = epoch_days_from_gregorian_date(-5_000_000, 6, 15);
        assert_eq!(gregorian_date_from_epoch_days(days), (-5_000_000, 6, 15));
        let days = epoch_days_from_gregorian_date(5_000_000, 2, 29);
        assert_eq!(gregorian_date_from_epoch_days(days), (5_000_000, 2, 29));
    }

    #[test]
    fn day_of_week() {
        // Thursday
        assert_eq!(epoch_days_to_day_of_week(0), 4);
        // 2024-01-07 was a Sunday
        assert_eq!(
            epoch_days_to_day_of_week(epoch_days_from_gregorian_date(2024, 1, 7)),
            0
        );
    }

    #[test]
    fn month_lengths() {
        assert_eq!(iso_days_in_month(2024, 2), 29);
        assert_eq!(iso_days_in_month(1900, 2), 28);
        assert_eq!(month_to_day(2, true), 60);
        assert_eq!(days_in_year(2000), 366);
    }
}
