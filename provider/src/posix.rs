//! Resolution of the POSIX tz string found in a TZif footer.

use tzif::data::posix::{DstTransitionInfo, PosixTzString, TransitionDate, TransitionDay};

use crate::{provider::UtcOffsetSeconds, utils};

/// Stores the information about DST transitions for a given year
struct DstTransitionInfoForYear {
    dst_start_seconds: i64,
    dst_end_seconds: i64,
    std_offset: UtcOffsetSeconds,
    dst_offset: UtcOffsetSeconds,
}

impl DstTransitionInfoForYear {
    fn compute(posix_tz_string: &PosixTzString, dst_variant: &DstTransitionInfo, year: i64) -> Self {
        let std_offset = UtcOffsetSeconds::from(&posix_tz_string.std_info);
        let dst_offset = UtcOffsetSeconds::from(&dst_variant.variant_info);
        let dst_start_seconds =
            calculate_transition_seconds_for_year(year, dst_variant.start_date, std_offset);
        let dst_end_seconds =
            calculate_transition_seconds_for_year(year, dst_variant.end_date, dst_offset);
        Self {
            dst_start_seconds,
            dst_end_seconds,
            std_offset,
            dst_offset,
        }
    }

    fn offset_at(&self, seconds: i64) -> UtcOffsetSeconds {
        let in_dst = if self.dst_start_seconds <= self.dst_end_seconds {
            // Northern hemisphere: DST sits in the middle of the year.
            (self.dst_start_seconds..self.dst_end_seconds).contains(&seconds)
        } else {
            // Southern hemisphere: DST wraps the year boundary.
            seconds < self.dst_end_seconds || seconds >= self.dst_start_seconds
        };
        if in_dst {
            self.dst_offset
        } else {
            self.std_offset
        }
    }
}

/// Returns the offset described by a POSIX tz string at `seconds`.
pub(crate) fn offset_for_epoch_seconds(posix_tz_string: &PosixTzString, seconds: i64) -> UtcOffsetSeconds {
    let Some(dst_variant) = &posix_tz_string.dst_info else {
        // Regardless of the time, there is one variant and we can return it.
        return UtcOffsetSeconds::from(&posix_tz_string.std_info);
    };
    let year = utils::epoch_seconds_to_year(seconds);
    DstTransitionInfoForYear::compute(posix_tz_string, dst_variant, year).offset_at(seconds)
}

fn calculate_transition_seconds_for_year(
    year: i64,
    transition_date: TransitionDate,
    offset: UtcOffsetSeconds,
) -> i64 {
    // Determine the year of the requested time.
    let year_epoch_days = utils::epoch_days_for_year(year);
    let is_leap = utils::is_leap(year);

    // Zero-indexed day of the year for the TransitionDate.
    let days = match transition_date.day {
        TransitionDay::NoLeap(day) if day > 59 => i64::from(day) - 1 + i64::from(is_leap),
        TransitionDay::NoLeap(day) => i64::from(day) - 1,
        TransitionDay::WithLeap(day) => i64::from(day),
        TransitionDay::Mwd(month, week, day) => {
            let month = month.clamp(1, 12) as u8;
            let days_to_month = i64::from(utils::month_to_day(month - 1, is_leap));
            let days_in_month = i64::from(utils::iso_days_in_month(year, month));
            let (week, day) = (i64::from(week), i64::from(day));

            // Weekday the month starts on, 0 being Sunday.
            let day_offset = i64::from(utils::epoch_days_to_day_of_week(
                year_epoch_days + days_to_month,
            ));

            // Zero-indexed day of the month of the `week`th `day`. If the
            // month starts after `day` the count begins on the second week.
            let mut day_of_month = (week - i64::from(day_offset <= day)) * 7 + day - day_offset;

            // Week 5 means "last <dayofweek> of month", which may spill into
            // the next month.
            if day_of_month + 1 > days_in_month {
                day_of_month -= 7;
            }

            days_to_month + day_of_month
        }
    };

    // Transition time is on local time, so we need to add the UTC offset to get the correct UTC timestamp
    // for the transition.
    (year_epoch_days + days) * utils::SECONDS_PER_DAY + transition_date.time.0 - offset.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tzif::data::time::Seconds;

    #[test]
    fn mwd_transitions_for_us_rules() {
        // M3.2.0/2: second Sunday of March, 02:00 local standard time.
        let start = TransitionDate {
            day: TransitionDay::Mwd(3, 2, 0),
            time: Seconds(7200),
        };
        let seconds = calculate_transition_seconds_for_year(2024, start, UtcOffsetSeconds(-18000));
        // 2024-03-10T07:00:00Z
        assert_eq!(seconds, 1_710_054_000);

        // M11.1.0/2: first Sunday of November, 02:00 local daylight time.
        let end = TransitionDate {
            day: TransitionDay::Mwd(11, 1, 0),
            time: Seconds(7200),
        };
        let seconds = calculate_transition_seconds_for_year(2024, end, UtcOffsetSeconds(-14400));
        // 2024-11-03T06:00:00Z
        assert_eq!(seconds, 1_730_613_600);
    }

    #[test]
    fn last_week_clamps_into_month() {
        // M10.5.0/3: last Sunday of October.
        let date = TransitionDate {
            day: TransitionDay::Mwd(10, 5, 0),
            time: Seconds(3600),
        };
        let seconds = calculate_transition_seconds_for_year(2023, date, UtcOffsetSeconds(0));
        // 2023-10-29T01:00:00Z
        assert_eq!(seconds, 1_698_541_200);
    }
}
