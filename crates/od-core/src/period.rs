//! # Analytics Period Keys
//!
//! Converts a nanosecond timestamp into the calendar-date string used to
//! bucket tickets ("2024-3-7", unpadded).
//!
//! The calendar here is deliberately simplified: 365-day years with a fixed
//! month-length table and no leap handling. It drifts from the real calendar
//! the further a date sits from the epoch, but the exact output values are a
//! compatibility contract — period keys are compared against stored keys by
//! consumers, so this formatter must not be swapped for a calendar-accurate
//! one.

const NANOS_PER_DAY: u64 = 86_400_000_000_000;
const DAYS_PER_YEAR: u64 = 365;
const MONTH_LENGTHS: [u64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Formats a nanosecond epoch timestamp as `"{year}-{month}-{day}"`.
pub fn period_key(timestamp_ns: u64) -> String {
    let days = timestamp_ns / NANOS_PER_DAY;
    let year = 1970 + days / DAYS_PER_YEAR;

    let mut remaining = days % DAYS_PER_YEAR;
    let mut month = 1;
    for len in MONTH_LENGTHS {
        if remaining < len {
            break;
        }
        remaining -= len;
        month += 1;
    }

    format!("{}-{}-{}", year, month, remaining + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_first_day() {
        assert_eq!(period_key(0), "1970-1-1");
    }

    #[test]
    fn last_nanosecond_of_a_day_stays_in_that_day() {
        assert_eq!(period_key(NANOS_PER_DAY - 1), "1970-1-1");
        assert_eq!(period_key(NANOS_PER_DAY), "1970-1-2");
    }

    #[test]
    fn month_table_rolls_over() {
        // Day 31 of the year is February 1 in the fixed table.
        assert_eq!(period_key(31 * NANOS_PER_DAY), "1970-2-1");
        // Day 30 is still January 31.
        assert_eq!(period_key(30 * NANOS_PER_DAY), "1970-1-31");
    }

    #[test]
    fn december_does_not_spill_into_month_13() {
        // Last day of the 365-day year.
        assert_eq!(period_key(364 * NANOS_PER_DAY), "1970-12-31");
        // First day of the next.
        assert_eq!(period_key(365 * NANOS_PER_DAY), "1971-1-1");
    }

    #[test]
    fn no_zero_padding() {
        // Day 8 of the year: single-digit month and day.
        assert_eq!(period_key(8 * NANOS_PER_DAY), "1970-1-9");
    }

    #[test]
    fn drifts_from_real_calendar_by_design() {
        // 2000-03-01 in the real calendar lands elsewhere here because
        // leap days are ignored. Pin the simplified value.
        let ns = 11_017 * NANOS_PER_DAY; // 2000-03-01 real
        assert_eq!(period_key(ns), "2000-3-9");
    }
}
