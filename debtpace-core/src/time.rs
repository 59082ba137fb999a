//! Date utilities for payoff estimates.

use chrono::{Months, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Today's calendar date in an IANA timezone like "America/Chicago".
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| Error::InvalidTimezone(tz.to_string()))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

/// `date` moved forward by whole months, clamped to the end of shorter months.
///
/// `None` only when the result leaves chrono's representable range.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_months_clamps_month_end() {
        let jan31 = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(
            add_months(jan31, 1),
            NaiveDate::from_ymd_opt(2026, 2, 28)
        );
        assert_eq!(
            add_months(jan31, 26),
            NaiveDate::from_ymd_opt(2028, 3, 31)
        );
        assert_eq!(add_months(jan31, 0), Some(jan31));
    }

    #[test]
    fn test_today_in_rejects_unknown_zone() {
        assert!(today_in("America/Chicago").is_ok());
        assert_eq!(
            today_in("Mars/Olympus"),
            Err(Error::InvalidTimezone("Mars/Olympus".into()))
        );
    }
}
