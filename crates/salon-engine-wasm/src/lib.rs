//! WASM bindings for salon-engine.
//!
//! Exposes slot enumeration, end-time calculation, the overlap predicate and
//! the bookable date window to the booking widget via `wasm-bindgen`. Complex
//! values cross the boundary as JSON strings; times are `HH:MM` and dates are
//! `YYYY-MM-DD`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p salon-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/wasm/ \
//!   target/wasm32-unknown-unknown/release/salon_engine_wasm.wasm
//! ```

use salon_engine::time::{format_date, parse_date};
use salon_engine::{BookingInterval, WorkingHours};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Working hours as sent by the widget.
#[derive(Deserialize)]
struct HoursInput {
    open: String,
    close: String,
}

/// A booking as sent by the widget. `endTime` may be missing or null.
#[derive(Deserialize)]
struct BookingInput {
    date: String,
    #[serde(alias = "startTime")]
    time: String,
    #[serde(default, alias = "endTime", alias = "end_time")]
    end: Option<String>,
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_hours_json(json: &str) -> Result<WorkingHours, JsValue> {
    let input: HoursInput = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid working hours JSON: {}", e)))?;
    WorkingHours::parse(&input.open, &input.close).map_err(js_error)
}

/// Convert a JSON array of bookings into `Vec<BookingInterval>`.
///
/// An empty or null end time means the booking has none.
fn parse_bookings_json(json: &str) -> Result<Vec<BookingInterval>, JsValue> {
    let inputs: Vec<BookingInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid bookings JSON: {}", e)))?;

    inputs
        .into_iter()
        .map(|input| {
            let end = match input.end.as_deref() {
                None | Some("") => None,
                Some(text) => Some(text.parse().map_err(js_error)?),
            };
            Ok(BookingInterval {
                date: parse_date(&input.date).map_err(js_error)?,
                start: input.time.parse().map_err(js_error)?,
                end,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Free start times for a service on a date.
///
/// `hours_json` is `{"open":"09:00","close":"18:00"}`; `bookings_json` is an
/// array of `{date, time, endTime?}` objects (bookings on other dates are
/// ignored). Returns a JSON array of `HH:MM` strings.
#[wasm_bindgen(js_name = "availableSlots")]
pub fn available_slots(
    hours_json: &str,
    duration_minutes: u32,
    date: &str,
    bookings_json: &str,
) -> Result<String, JsValue> {
    let hours = parse_hours_json(hours_json)?;
    let date = parse_date(date).map_err(js_error)?;
    let bookings = parse_bookings_json(bookings_json)?;

    let times = salon_engine::available_times(&hours, duration_minutes, date, &bookings)
        .map_err(js_error)?;

    serde_json::to_string(&times)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// End time of a booking, as `HH:MM`. Not wrapped at midnight.
#[wasm_bindgen(js_name = "computeEndTime")]
pub fn compute_end_time(start: &str, duration_minutes: u32) -> Result<String, JsValue> {
    salon_engine::compute_end_time(start, duration_minutes).map_err(js_error)
}

/// Whether the half-open spans `[a_start, a_end)` and `[b_start, b_end)`
/// overlap. All four arguments are `HH:MM` times.
#[wasm_bindgen(js_name = "overlaps")]
pub fn overlaps(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> Result<bool, JsValue> {
    let minutes = |t: &str| salon_engine::to_minutes(t).map_err(js_error);
    Ok(salon_engine::overlaps(
        minutes(a_start)?,
        minutes(a_end)?,
        minutes(b_start)?,
        minutes(b_end)?,
    ))
}

/// The `days` bookable dates starting at `today`, as a JSON array of
/// `YYYY-MM-DD` strings.
#[wasm_bindgen(js_name = "bookingDates")]
pub fn booking_dates(today: &str, days: u32) -> Result<String, JsValue> {
    let today = parse_date(today).map_err(js_error)?;
    let dates: Vec<String> = salon_engine::booking_dates(today, days)
        .into_iter()
        .map(format_date)
        .collect();

    serde_json::to_string(&dates)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
