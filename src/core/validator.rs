//! Decides whether a calendar date, optionally with a time of day, is a legal
//! appointment moment relative to a reference "now".
//!
//! Date-only checks compare calendar days, so "today" is always accepted no
//! matter how late it is. With a time of day the full timestamp is compared,
//! which rejects a slot that already passed earlier today.

use crate::core::hours::{hours_for, BusinessHours};
use crate::domain::model::{DATE_FORMAT, TIME_FORMAT};
use crate::utils::error::{Result, TerminError};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| TerminError::InvalidDate {
        input: input.to_string(),
    })
}

pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), TIME_FORMAT).map_err(|_| TerminError::InvalidDate {
        input: input.to_string(),
    })
}

/// Validates `date` (`YYYY-MM-DD`) and an optional `time` (`HH:MM`) against
/// `reference`. An empty `time` counts as no time.
pub fn validate_at(date: &str, time: Option<&str>, reference: &DateTime<Tz>) -> Result<()> {
    let date = parse_date(date)?;
    let time = match time.map(str::trim) {
        Some(t) if !t.is_empty() => Some(parse_time(t)?),
        _ => None,
    };
    check(date, time, reference)
}

pub(crate) fn check(date: NaiveDate, time: Option<NaiveTime>, reference: &DateTime<Tz>) -> Result<()> {
    let weekday = date.weekday();
    let hours = hours_for(weekday);
    if !hours.is_open() {
        return Err(TerminError::ShopClosed {
            detail: format!("closed on {}", weekday),
        });
    }

    let Some(time) = time else {
        let today = reference.date_naive();
        if date < today {
            return Err(TerminError::DateInPast {
                target: date.to_string(),
                reference: today.to_string(),
            });
        }
        return Ok(());
    };

    let target = localize(date, time, &reference.timezone())?;
    if target < *reference {
        return Err(TerminError::DateInPast {
            target: target.to_string(),
            reference: reference.to_string(),
        });
    }

    if !hours.contains_hour(time.hour()) {
        let detail = match hours {
            BusinessHours::Open { open, close } => {
                format!("{} is outside {:02}:00-{:02}:00", target, open, close)
            }
            BusinessHours::Closed => target.to_string(),
        };
        return Err(TerminError::ShopClosed { detail });
    }

    Ok(())
}

/// Attaches the shop's zone to a wall-clock time. Times that do not exist
/// (skipped by a DST switch) are rejected.
pub fn localize(date: NaiveDate, time: NaiveTime, tz: &Tz) -> Result<DateTime<Tz>> {
    let naive = date.and_time(time);
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| TerminError::InvalidDate {
            input: naive.format("%Y-%m-%d %H:%M").to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCode;
    use chrono_tz::Europe::Berlin;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        Berlin.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn code_of(result: Result<()>) -> ErrorCode {
        result.unwrap_err().code()
    }

    #[test]
    fn test_saturday_hours() {
        let reference = at(2024, 1, 5, 8, 0);
        assert_eq!(
            code_of(validate_at("2024-01-06", Some("15:00"), &reference)),
            ErrorCode::ShopClosed
        );
        assert!(validate_at("2024-01-06", Some("11:00"), &reference).is_ok());
        assert!(validate_at("2024-01-06", Some("13:30"), &reference).is_ok());
        assert_eq!(
            code_of(validate_at("2024-01-06", Some("14:00"), &reference)),
            ErrorCode::ShopClosed
        );
    }

    #[test]
    fn test_sunday_is_closed() {
        let reference = at(2024, 1, 1, 8, 0);
        for sunday in ["2024-01-07", "2024-01-14", "2024-03-31"] {
            assert_eq!(code_of(validate_at(sunday, Some(""), &reference)), ErrorCode::ShopClosed);
            assert_eq!(code_of(validate_at(sunday, None, &reference)), ErrorCode::ShopClosed);
        }
    }

    #[test]
    fn test_weekday_range() {
        let reference = at(2024, 1, 1, 8, 0);
        assert!(validate_at("2024-01-10", Some("10:00"), &reference).is_ok());
        assert!(validate_at("2024-01-10", Some("16:30"), &reference).is_ok());
        assert_eq!(
            code_of(validate_at("2024-01-10", Some("09:30"), &reference)),
            ErrorCode::ShopClosed
        );
        assert_eq!(
            code_of(validate_at("2024-01-10", Some("17:00"), &reference)),
            ErrorCode::ShopClosed
        );
    }

    #[test]
    fn test_today_date_only_is_valid_late_in_the_day() {
        let late = at(2024, 1, 8, 23, 45);
        assert!(validate_at("2024-01-08", None, &late).is_ok());
        assert!(validate_at("2024-01-08", Some(""), &late).is_ok());
    }

    #[test]
    fn test_today_with_time() {
        let reference = at(2024, 1, 8, 12, 15);
        assert_eq!(
            code_of(validate_at("2024-01-08", Some("12:00"), &reference)),
            ErrorCode::DateInPast
        );
        assert!(validate_at("2024-01-08", Some("13:00"), &reference).is_ok());
    }

    #[test]
    fn test_past_date() {
        let reference = at(2024, 1, 8, 9, 0);
        assert_eq!(code_of(validate_at("2024-01-05", None, &reference)), ErrorCode::DateInPast);
        assert_eq!(
            code_of(validate_at("2024-01-05", Some("11:00"), &reference)),
            ErrorCode::DateInPast
        );
    }

    #[test]
    fn test_malformed_input() {
        let reference = at(2024, 1, 8, 9, 0);
        assert_eq!(code_of(validate_at("08.01.2024", None, &reference)), ErrorCode::InvalidDate);
        assert_eq!(code_of(validate_at("2024-02-30", None, &reference)), ErrorCode::InvalidDate);
        assert_eq!(
            code_of(validate_at("2024-01-09", Some("25:00"), &reference)),
            ErrorCode::InvalidDate
        );
        assert_eq!(
            code_of(validate_at("2024-01-09", Some("10"), &reference)),
            ErrorCode::InvalidDate
        );
    }

    #[test]
    fn test_localize_rejects_dst_gap() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let gap = NaiveTime::from_hms_opt(2, 30, 0).unwrap();
        assert!(localize(date, gap, &Berlin).is_err());

        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert_eq!(localize(date, noon, &Berlin).unwrap(), at(2024, 3, 31, 12, 0));
    }
}
