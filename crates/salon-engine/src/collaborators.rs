//! Boundaries to the persistence and notification collaborators.

use serde::{Deserialize, Serialize};

use crate::error::{NotifyError, StoreError};
use crate::records::{BookingRecord, NewBookingRecord, SalonRecord, ServiceRecord};

/// Supplies salon, service and booking rows and accepts new bookings.
///
/// Implementations decide whether two writes for the same slot are rejected;
/// the booking flow does not coordinate concurrent clients.
pub trait BookingStore {
    fn fetch_salon(&self, slug: &str) -> Result<Option<SalonRecord>, StoreError>;

    fn fetch_services(&self, salon_id: &str) -> Result<Vec<ServiceRecord>, StoreError>;

    fn fetch_bookings(&self, salon_id: &str) -> Result<Vec<BookingRecord>, StoreError>;

    /// Persist a booking and return the stored row.
    fn create_booking(&self, record: NewBookingRecord) -> Result<BookingRecord, StoreError>;
}

impl<T: BookingStore + ?Sized> BookingStore for &T {
    fn fetch_salon(&self, slug: &str) -> Result<Option<SalonRecord>, StoreError> {
        (**self).fetch_salon(slug)
    }

    fn fetch_services(&self, salon_id: &str) -> Result<Vec<ServiceRecord>, StoreError> {
        (**self).fetch_services(salon_id)
    }

    fn fetch_bookings(&self, salon_id: &str) -> Result<Vec<BookingRecord>, StoreError> {
        (**self).fetch_bookings(salon_id)
    }

    fn create_booking(&self, record: NewBookingRecord) -> Result<BookingRecord, StoreError> {
        (**self).create_booking(record)
    }
}

/// Outcome of a confirmation attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// The sender is not configured; nothing was sent.
    Skipped,
}

impl Delivery {
    pub fn was_sent(self) -> bool {
        self == Delivery::Sent
    }
}

/// Everything a booking confirmation message shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationDetails {
    pub to_email: String,
    pub to_name: String,
    pub salon_name: String,
    pub service_name: String,
    pub booking_date: String,
    pub booking_time: String,
    pub duration: u32,
    pub price: f64,
    pub salon_address: String,
    pub salon_phone: String,
}

/// Sends a confirmation after a booking has been persisted.
pub trait ConfirmationSender {
    fn send_confirmation(&self, details: &ConfirmationDetails) -> Result<Delivery, NotifyError>;
}

impl<T: ConfirmationSender + ?Sized> ConfirmationSender for &T {
    fn send_confirmation(&self, details: &ConfirmationDetails) -> Result<Delivery, NotifyError> {
        (**self).send_confirmation(details)
    }
}
