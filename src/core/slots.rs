//! Slot enumeration for a single day and the forward scan for bookable days.

use crate::core::hours::{hours_for, BusinessHours};
use crate::core::validator::{check, parse_date};
use crate::domain::model::{DATE_FORMAT, SLOT_FORMAT};
use crate::utils::error::Result;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime};
use chrono_tz::Tz;

pub const SLOT_MINUTES: [u32; 2] = [0, 30];
/// Upper bound for date-picker requests. Twenty open days span at most 23
/// calendar days, so every offered date still lies inside the booking horizon.
pub const MAX_AVAILABLE_DAYS: usize = 20;

/// All half-hour slots of `date` that are still bookable at `reference`, as
/// ascending `YYYY-MM-DD HH:MM` strings.
///
/// A date that fails the date-only check is an error. A valid date whose
/// slots have all passed yields an empty list.
pub fn slots_at(date: &str, reference: &DateTime<Tz>) -> Result<Vec<String>> {
    let date = parse_date(date)?;
    check(date, None, reference)?;

    // hours come from the requested day, not from the day of the call
    let BusinessHours::Open { open, close } = hours_for(date.weekday()) else {
        return Ok(Vec::new());
    };

    let slots = (open..close)
        .flat_map(|hour| SLOT_MINUTES.iter().map(move |&minute| (hour, minute)))
        .filter_map(|(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0))
        .filter(|time| match check(date, Some(*time), reference) {
            Ok(()) => true,
            Err(e) => {
                tracing::trace!("Skipping slot {} {}: {}", date, time, e);
                false
            }
        })
        .map(|time| date.and_time(time).format(SLOT_FORMAT).to_string())
        .collect();

    Ok(slots)
}

/// The next `days` bookable dates starting with the reference day.
///
/// Terminates because the weekly policy has at most one closed day.
pub fn available_dates_from(reference: &DateTime<Tz>, days: usize) -> Vec<NaiveDate> {
    reference
        .date_naive()
        .iter_days()
        .filter(|date| check(*date, None, reference).is_ok())
        .take(days)
        .collect()
}

pub fn format_dates(dates: &[NaiveDate]) -> Vec<String> {
    dates
        .iter()
        .map(|date| date.format(DATE_FORMAT).to_string())
        .collect()
}
