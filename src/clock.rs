//! Clock and Greeting Formatting
//!
//! Pure local-time formatting for the clock region: an hour-bucketed
//! greeting, an uppercased date line, and a 24-hour HH:MM:SS clock string.

use chrono::{NaiveDateTime, Timelike};

/// Greeting for an hour of day: Morning before 12, Afternoon 12-16,
/// Evening from 17 on.
pub fn greeting(hour: u32) -> &'static str {
    if (12..17).contains(&hour) {
        "Good Afternoon"
    } else if hour >= 17 {
        "Good Evening"
    } else {
        "Good Morning"
    }
}

/// Greeting for an instant.
pub fn greeting_for(now: NaiveDateTime) -> &'static str {
    greeting(now.hour())
}

/// Date line in the fixed uppercase format, e.g. `THU, NOV 27, 2025`.
pub fn date_line(now: NaiveDateTime) -> String {
    now.format("%a, %b %-d, %Y").to_string().to_uppercase()
}

/// Zero-padded 24-hour clock string, e.g. `07:05:09`.
pub fn time_line(now: NaiveDateTime) -> String {
    now.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 27)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    #[test]
    fn greeting_buckets() {
        assert_eq!(greeting(0), "Good Morning");
        assert_eq!(greeting(11), "Good Morning");
        assert_eq!(greeting(12), "Good Afternoon");
        assert_eq!(greeting(16), "Good Afternoon");
        assert_eq!(greeting(17), "Good Evening");
        assert_eq!(greeting(23), "Good Evening");
    }

    #[test]
    fn date_line_is_uppercased_short_form() {
        assert_eq!(date_line(at(9, 0, 0)), "THU, NOV 27, 2025");

        let single_digit_day = NaiveDate::from_ymd_opt(2026, 3, 4)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(date_line(single_digit_day), "WED, MAR 4, 2026");
    }

    #[test]
    fn time_line_is_zero_padded() {
        assert_eq!(time_line(at(7, 5, 9)), "07:05:09");
        assert_eq!(time_line(at(23, 59, 0)), "23:59:00");
    }
}
