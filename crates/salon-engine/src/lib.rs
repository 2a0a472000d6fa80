//! # salon-engine
//!
//! Slot availability and booking flow for a salon reservation widget.
//!
//! The availability engine is pure: given working hours, a service duration and
//! the bookings already on a date, it lists every start time on the 30-minute
//! grid whose `[start, start + duration)` span fits inside the working day and
//! overlaps no occupied span. It performs no I/O and holds no state.
//!
//! Around it sit the pieces a booking widget needs: storage-record conversion,
//! collaborator traits for persistence and confirmations, simple adapters for
//! both, and a step-by-step [`flow::BookingFlow`] controller.
//!
//! ## Quick start
//!
//! ```rust
//! use salon_engine::{available_times, WorkingHours};
//!
//! let hours = WorkingHours::parse("09:00", "18:00").unwrap();
//! let date = salon_engine::time::parse_date("2026-03-16").unwrap();
//!
//! let times = available_times(&hours, 60, date, &[]).unwrap();
//! assert_eq!(times.first().map(String::as_str), Some("09:00"));
//! assert_eq!(times.last().map(String::as_str), Some("17:00"));
//! assert_eq!(times.len(), 17);
//! ```
//!
//! ## Modules
//!
//! - [`time`]: `HH:MM` / `YYYY-MM-DD` parsing and minute arithmetic
//! - [`conflict`]: half-open interval overlap
//! - [`model`]: salons, services, bookings and occupied spans
//! - [`slots`]: slot enumeration, end times and the bookable date window
//! - [`records`]: storage records and their conversion into the model
//! - [`collaborators`]: persistence and confirmation traits
//! - `store`: in-memory and JSON-file stores (feature `store`, on by default)
//! - [`notify`]: JSON-lines outbox confirmation sender
//! - [`flow`]: the booking flow controller
//! - [`error`]: error types

pub mod collaborators;
pub mod conflict;
pub mod error;
pub mod flow;
pub mod model;
pub mod notify;
pub mod records;
pub mod slots;
#[cfg(feature = "store")]
pub mod store;
pub mod time;

pub use collaborators::{BookingStore, ConfirmationDetails, ConfirmationSender, Delivery};
pub use conflict::{overlaps, Span};
pub use error::EngineError;
pub use flow::{BookingFlow, Step};
pub use model::{Booking, BookingInterval, Customer, Salon, Service, Slot, WorkingHours};
pub use slots::{available_slots, available_times, booking_dates, compute_end_time};
pub use time::{add_minutes, to_minutes, to_text, TimeOfDay};
