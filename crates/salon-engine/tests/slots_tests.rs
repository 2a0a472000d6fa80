//! Tests for slot enumeration, end times and the booking date window.

use chrono::NaiveDate;
use salon_engine::slots::{BOOKING_WINDOW_DAYS, GRID_MINUTES};
use salon_engine::{
    available_slots, available_times, booking_dates, BookingInterval, EngineError, WorkingHours,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn hours(open: &str, close: &str) -> WorkingHours {
    WorkingHours::parse(open, close).unwrap()
}

fn booking(date: NaiveDate, start: &str, end: Option<&str>) -> BookingInterval {
    BookingInterval {
        date,
        start: start.parse().unwrap(),
        end: end.map(|e| e.parse().unwrap()),
    }
}

// ── Empty day ───────────────────────────────────────────────────────────────

#[test]
fn full_day_without_bookings_has_seventeen_hourly_slots() {
    let times = available_times(&hours("09:00", "18:00"), 60, day(16), &[]).unwrap();

    assert_eq!(times.len(), 17);
    assert_eq!(times.first().unwrap(), "09:00");
    assert_eq!(times.last().unwrap(), "17:00");
    assert_eq!(&times[..3], ["09:00", "09:30", "10:00"]);
}

#[test]
fn grid_is_independent_of_service_duration() {
    // A 45-minute service still starts on the hour or half hour.
    let times = available_times(&hours("09:00", "18:00"), 45, day(16), &[]).unwrap();
    assert!(times.iter().all(|t| t.ends_with(":00") || t.ends_with(":30")));
    assert_eq!(times.last().unwrap(), "17:00");
    assert_eq!(GRID_MINUTES, 30);
}

#[test]
fn grid_starts_at_an_off_grid_opening_time() {
    let times = available_times(&hours("09:15", "11:15"), 60, day(16), &[]).unwrap();
    assert_eq!(times, ["09:15", "09:45", "10:15"]);
}

#[test]
fn service_ending_exactly_at_close_is_offered() {
    let times = available_times(&hours("09:00", "12:00"), 120, day(16), &[]).unwrap();
    assert_eq!(times, ["09:00", "09:30", "10:00"]);
}

#[test]
fn duration_longer_than_the_day_yields_nothing() {
    let slots = available_slots(&hours("09:00", "18:00"), 9 * 60 + 1, day(16), &[]).unwrap();
    assert!(slots.is_empty());

    let whole_day = available_slots(&hours("09:00", "18:00"), 9 * 60, day(16), &[]).unwrap();
    assert_eq!(whole_day.len(), 1);
}

// ── Bookings ────────────────────────────────────────────────────────────────

#[test]
fn booking_with_explicit_end_blocks_overlapping_starts() {
    let bookings = [booking(day(16), "10:00", Some("10:45"))];
    let times = available_times(&hours("09:00", "18:00"), 60, day(16), &bookings).unwrap();

    // [09:00,10:00) only touches the booking.
    assert!(times.contains(&"09:00".to_string()));
    // [09:30,10:30) and [10:00,11:00) overlap [10:00,10:45); so does [10:30,11:30).
    assert!(!times.contains(&"09:30".to_string()));
    assert!(!times.contains(&"10:00".to_string()));
    assert!(!times.contains(&"10:30".to_string()));
    // 10:45 is off-grid; the next grid point is free.
    assert!(!times.contains(&"10:45".to_string()));
    assert!(times.contains(&"11:00".to_string()));
}

#[test]
fn booking_without_end_occupies_sixty_minutes() {
    let bookings = [booking(day(16), "10:00", None)];
    let span = bookings[0].occupied_span();
    assert_eq!(span.end - span.start, 60);

    let times = available_times(&hours("09:00", "18:00"), 30, day(16), &bookings).unwrap();
    assert!(times.contains(&"09:30".to_string()));
    assert!(!times.contains(&"10:00".to_string()));
    assert!(!times.contains(&"10:30".to_string()));
    assert!(times.contains(&"11:00".to_string()));
}

#[test]
fn bookings_on_other_dates_are_ignored() {
    let bookings = [
        booking(day(15), "09:00", Some("18:00")),
        booking(day(17), "09:00", Some("18:00")),
    ];
    let times = available_times(&hours("09:00", "18:00"), 60, day(16), &bookings).unwrap();
    assert_eq!(times.len(), 17);
}

#[test]
fn fully_booked_day_yields_nothing() {
    let bookings = [booking(day(16), "09:00", Some("18:00"))];
    let slots = available_slots(&hours("09:00", "18:00"), 30, day(16), &bookings).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn unsorted_overlapping_bookings_are_all_respected() {
    let bookings = [
        booking(day(16), "14:30", None),
        booking(day(16), "10:00", Some("11:00")),
        booking(day(16), "10:30", Some("12:00")),
    ];
    let times = available_times(&hours("09:00", "18:00"), 60, day(16), &bookings).unwrap();
    assert_eq!(
        times,
        ["09:00", "12:00", "12:30", "13:00", "13:30", "15:30", "16:00", "16:30", "17:00"]
    );
}

#[test]
fn results_are_ascending_and_repeatable() {
    let bookings = [booking(day(16), "12:00", Some("13:30"))];
    let h = hours("09:00", "18:00");
    let first = available_slots(&h, 60, day(16), &bookings).unwrap();
    let second = available_slots(&h, 60, day(16), &bookings).unwrap();

    assert_eq!(first, second);
    assert!(first.windows(2).all(|w| w[0].start < w[1].start));
}

// ── Invalid input ───────────────────────────────────────────────────────────

#[test]
fn zero_duration_is_a_range_error() {
    let result = available_slots(&hours("09:00", "18:00"), 0, day(16), &[]);
    assert!(matches!(result, Err(EngineError::Range(_))));
}

#[test]
fn working_hours_must_open_before_close() {
    assert!(matches!(
        WorkingHours::parse("18:00", "09:00"),
        Err(EngineError::Range(_))
    ));
    assert!(matches!(
        WorkingHours::parse("09:00", "09:00"),
        Err(EngineError::Range(_))
    ));
    assert!(matches!(
        WorkingHours::parse("9am", "18:00"),
        Err(EngineError::Format(_))
    ));
}

// ── Date window ─────────────────────────────────────────────────────────────

#[test]
fn booking_window_is_fourteen_days_from_today() {
    let dates = booking_dates(day(25), BOOKING_WINDOW_DAYS);

    assert_eq!(dates.len(), 14);
    assert_eq!(dates[0], day(25));
    assert_eq!(dates[13], NaiveDate::from_ymd_opt(2026, 4, 7).unwrap());
    assert!(dates.windows(2).all(|w| w[1] == w[0].succ_opt().unwrap()));
}

#[test]
fn empty_window_when_zero_days() {
    assert!(booking_dates(day(1), 0).is_empty());
}
