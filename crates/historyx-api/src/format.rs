//! Duration, remaining-time and date formatting shared by punishment entries.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Pattern used for every date label, e.g. `05/12/2020 12:34:56 (Dec 05)`.
pub const DATE_LABEL_FORMAT: &str = "%d/%m/%Y %H:%M:%S (%b %d)";

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn current_millis() -> i64 {
    Utc::now().timestamp_millis()
}

struct Breakdown {
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
}

impl Breakdown {
    fn of(millis: i64) -> Self {
        let days = millis / MILLIS_PER_DAY;
        let millis = millis % MILLIS_PER_DAY;
        let hours = millis / MILLIS_PER_HOUR;
        let millis = millis % MILLIS_PER_HOUR;
        let minutes = millis / MILLIS_PER_MINUTE;
        let millis = millis % MILLIS_PER_MINUTE;
        let seconds = millis / MILLIS_PER_SECOND;

        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }
}

/// Formats a millisecond count using its largest non-zero unit and at most
/// one smaller unit: `1d 1h`, `3h`, `1m 1s`, `0s`.
///
/// Negative input is not special-cased: every unit above seconds fails the
/// `> 0` checks, so the output degrades to the (negative) seconds term.
pub fn format_compact(millis: i64) -> String {
    let Breakdown {
        days,
        hours,
        minutes,
        seconds,
    } = Breakdown::of(millis);

    if days > 0 {
        if hours > 0 {
            format!("{days}d {hours}h")
        } else {
            format!("{days}d")
        }
    } else if hours > 0 {
        if minutes > 0 {
            format!("{hours}h {minutes}m")
        } else {
            format!("{hours}h")
        }
    } else if minutes > 0 {
        if seconds > 0 {
            format!("{minutes}m {seconds}s")
        } else {
            format!("{minutes}m")
        }
    } else {
        format!("{seconds}s")
    }
}

/// Formats a millisecond count as `DD:HH:MM:SS`.
///
/// Fields truncate toward zero, so a negative count produces negative
/// fields (`00:00:00:-5` for five seconds overdue).
pub fn format_digital(millis: i64) -> String {
    let Breakdown {
        days,
        hours,
        minutes,
        seconds,
    } = Breakdown::of(millis);

    format!("{days:02}:{hours:02}:{minutes:02}:{seconds:02}")
}

/// Formats an epoch-millisecond timestamp with [`DATE_LABEL_FORMAT`] in `tz`.
///
/// Timestamps chrono cannot represent fall back to the raw millisecond value.
pub fn format_date_in<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(utc) => utc
            .with_timezone(tz)
            .format(DATE_LABEL_FORMAT)
            .to_string(),
        None => millis.to_string(),
    }
}

/// Formats an epoch-millisecond timestamp in the local system time zone.
pub fn format_date(millis: i64) -> String {
    format_date_in(millis, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_compact_day_and_hour() {
        assert_eq!(format_compact(90_061_000), "1d 1h");
        assert_eq!(format_compact(2 * MILLIS_PER_DAY), "2d");
        // minutes are dropped once a day is shown
        assert_eq!(format_compact(MILLIS_PER_DAY + 5 * MILLIS_PER_MINUTE), "1d");
    }

    #[test]
    fn test_compact_hour_and_minute() {
        assert_eq!(format_compact(3_661_000), "1h 1m");
        assert_eq!(format_compact(3 * MILLIS_PER_HOUR), "3h");
        assert_eq!(format_compact(3 * MILLIS_PER_HOUR + 59 * MILLIS_PER_SECOND), "3h");
    }

    #[test]
    fn test_compact_minute_and_second() {
        assert_eq!(format_compact(61_000), "1m 1s");
        assert_eq!(format_compact(10 * MILLIS_PER_MINUTE), "10m");
    }

    #[test]
    fn test_compact_seconds_only() {
        assert_eq!(format_compact(999), "0s");
        assert_eq!(format_compact(0), "0s");
        assert_eq!(format_compact(59_999), "59s");
    }

    #[test]
    fn test_compact_negative_degrades_to_seconds() {
        assert_eq!(format_compact(-5_000), "-5s");
        assert_eq!(format_compact(-90_061_000), "-1s");
    }

    #[test]
    fn test_digital() {
        let millis = MILLIS_PER_DAY + 2 * MILLIS_PER_HOUR + 3 * MILLIS_PER_MINUTE + 4_000;
        assert_eq!(format_digital(millis), "01:02:03:04");
        assert_eq!(format_digital(0), "00:00:00:00");
        assert_eq!(format_digital(123 * MILLIS_PER_DAY), "123:00:00:00");
    }

    #[test]
    fn test_digital_negative_is_not_clamped() {
        assert_eq!(format_digital(-5_000), "00:00:00:-5");
        assert_eq!(format_digital(-(MILLIS_PER_HOUR + 1_000)), "00:-1:00:-1");
    }

    #[test]
    fn test_date_golden_utc() {
        assert_eq!(
            format_date_in(1_607_171_696_000, &Utc),
            "05/12/2020 12:34:56 (Dec 05)"
        );
    }

    #[test]
    fn test_date_golden_fixed_offset() {
        let tz = FixedOffset::west_opt(2 * 3600).unwrap();
        assert_eq!(
            format_date_in(1_609_461_000_000, &tz),
            "31/12/2020 22:30:00 (Dec 31)"
        );
    }

    #[test]
    fn test_date_out_of_range_falls_back() {
        assert_eq!(format_date_in(i64::MAX, &Utc), i64::MAX.to_string());
    }
}
