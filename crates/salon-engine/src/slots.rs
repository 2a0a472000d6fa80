//! Enumerate bookable start times for a service on a date.
//!
//! A cursor walks the working day on a fixed 30-minute grid, independent of the
//! service duration. A grid point is kept when the service fits before closing
//! and its span overlaps no occupied span on the same date.

use chrono::{Days, NaiveDate};

use crate::conflict::Span;
use crate::error::{EngineError, Result};
use crate::model::{BookingInterval, Slot, WorkingHours};
use crate::time::{add_minutes, TimeOfDay};

/// Step between candidate start times.
pub const GRID_MINUTES: u32 = 30;

/// Number of consecutive days, starting today, offered for booking.
pub const BOOKING_WINDOW_DAYS: u32 = 14;

/// Compute the free slots for a service of `duration_minutes` on `date`.
///
/// Bookings on other dates are ignored. The result is sorted ascending and is
/// recomputed from scratch on every call. When the service does not fit in the
/// working day the result is empty.
///
/// # Errors
/// Returns `EngineError::Range` for a zero duration or working hours that do
/// not open before they close.
pub fn available_slots(
    hours: &WorkingHours,
    duration_minutes: u32,
    date: NaiveDate,
    bookings: &[BookingInterval],
) -> Result<Vec<Slot>> {
    if duration_minutes == 0 {
        return Err(EngineError::Range(
            "service duration must be positive".to_string(),
        ));
    }
    let day = hours.span();
    if day.start >= day.end {
        return Err(EngineError::Range(format!(
            "working hours must open before they close ({}-{})",
            hours.open, hours.close
        )));
    }

    let occupied: Vec<Span> = bookings
        .iter()
        .filter(|b| b.date == date)
        .map(BookingInterval::occupied_span)
        .collect();

    let mut slots = Vec::new();
    let mut cursor = day.start;

    while cursor.saturating_add(duration_minutes) <= day.end {
        let candidate = Span::starting_at(cursor, duration_minutes);
        if !occupied.iter().any(|busy| candidate.overlaps(busy)) {
            slots.push(Slot {
                start: TimeOfDay::from_minutes(cursor)?,
            });
        }
        cursor += GRID_MINUTES;
    }

    Ok(slots)
}

/// [`available_slots`] formatted as `HH:MM` strings.
pub fn available_times(
    hours: &WorkingHours,
    duration_minutes: u32,
    date: NaiveDate,
    bookings: &[BookingInterval],
) -> Result<Vec<String>> {
    Ok(available_slots(hours, duration_minutes, date, bookings)?
        .into_iter()
        .map(|slot| slot.start.to_string())
        .collect())
}

/// End time submitted alongside a booking that starts at `start`.
///
/// Runs past midnight are not wrapped: `("23:30", 60)` yields `"24:30"`.
pub fn compute_end_time(start: &str, duration_minutes: u32) -> Result<String> {
    add_minutes(start, duration_minutes)
}

/// The `days` consecutive dates beginning with `today`.
///
/// `today` is supplied by the caller so the window never depends on a clock.
pub fn booking_dates(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..u64::from(days))
        .map_while(|offset| today.checked_add_days(Days::new(offset)))
        .collect()
}
