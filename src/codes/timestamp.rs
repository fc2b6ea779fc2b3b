//! Generation timestamp for output headers

use chrono::{Local, NaiveDateTime, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Local wall-clock time plus the day index written into headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub local: NaiveDateTime,
    /// Whole days since the Unix epoch, shifted back by the configured offset
    pub day_index: i64,
}

impl Timestamp {
    pub fn new(local: NaiveDateTime, day_index: i64) -> Self {
        Self { local, day_index }
    }

    /// Capture the current time; `offset` is subtracted from the epoch day count
    pub fn now(offset: i64) -> Self {
        let days = Utc::now().timestamp().div_euclid(SECONDS_PER_DAY);
        Self {
            local: Local::now().naive_local(),
            day_index: days - offset,
        }
    }

    /// Second header line, e.g. `05 Mar 2025   9:07 AM   Cache`
    pub fn header_line(&self) -> String {
        self.local.format("%d %b %Y   %-I:%M %p   Cache").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 5)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .unwrap()
    }

    #[test]
    fn test_header_line_hour_is_not_padded() {
        assert_eq!(Timestamp::new(at(9, 7), 0).header_line(), "05 Mar 2025   9:07 AM   Cache");
        assert_eq!(Timestamp::new(at(21, 30), 0).header_line(), "05 Mar 2025   9:30 PM   Cache");
        assert_eq!(Timestamp::new(at(0, 5), 0).header_line(), "05 Mar 2025   12:05 AM   Cache");
    }

    #[test]
    fn test_now_applies_offset() {
        let a = Timestamp::now(0);
        let b = Timestamp::now(7182);
        // Could straddle midnight UTC between the two calls
        assert!((a.day_index - b.day_index - 7182).abs() <= 1);
        assert!(a.day_index > 19_000);
    }
}
