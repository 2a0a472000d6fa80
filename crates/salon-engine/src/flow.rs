//! Step-by-step booking flow for one salon.
//!
//! The flow walks a customer through service → date and time → contact
//! details → confirmation. It loads the salon and its bookings from a
//! [`BookingStore`], asks the availability engine for free slots, writes the
//! booking back through the store and then sends a confirmation on a
//! best-effort basis: a failed confirmation never fails the booking.
//!
//! "Today" is injected at load time; the flow never reads a clock.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use url::form_urlencoded;

use crate::collaborators::{BookingStore, ConfirmationDetails, ConfirmationSender, Delivery};
use crate::error::FlowError;
use crate::model::{Booking, BookingInterval, BookingStatus, Customer, Salon, Service, Slot};
use crate::records::{booking_from_record, salon_from_record, NewBookingRecord};
use crate::slots::{available_slots, booking_dates, compute_end_time, BOOKING_WINDOW_DAYS};
use crate::time::{format_date, TimeOfDay};

const CALENDAR_BASE_URL: &str = "https://calendar.google.com/calendar/render";

/// The screen the customer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Service,
    DateTime,
    Details,
    Confirmation,
}

/// Booking flow state for a single salon.
#[derive(Debug)]
pub struct BookingFlow<S, N> {
    store: S,
    sender: N,
    today: NaiveDate,
    salon: Salon,
    bookings: Vec<Booking>,
    step: Step,
    service_id: Option<String>,
    date: Option<NaiveDate>,
    time: Option<TimeOfDay>,
    /// Slots most recently offered for the selected service and date.
    offered: Vec<Slot>,
    confirmed: Option<Booking>,
}

impl<S: BookingStore, N: ConfirmationSender> BookingFlow<S, N> {
    /// Load the salon identified by `slug`, its services and its bookings.
    ///
    /// # Errors
    /// Returns `FlowError::SalonNotFound` if the store has no such salon, and
    /// propagates store and conversion errors.
    pub fn load(store: S, sender: N, slug: &str, today: NaiveDate) -> Result<Self, FlowError> {
        let record = store
            .fetch_salon(slug)?
            .ok_or_else(|| FlowError::SalonNotFound(slug.to_string()))?;
        let services = store.fetch_services(&record.id)?;
        let salon = salon_from_record(&record, &services)?;

        let mut flow = Self {
            store,
            sender,
            today,
            salon,
            bookings: Vec::new(),
            step: Step::Service,
            service_id: None,
            date: None,
            time: None,
            offered: Vec::new(),
            confirmed: None,
        };
        flow.reload_bookings()?;

        tracing::info!(
            salon = %flow.salon.slug,
            services = flow.salon.services.len(),
            bookings = flow.bookings.len(),
            "salon loaded"
        );
        Ok(flow)
    }

    /// Replace the in-memory bookings with the store's current rows.
    ///
    /// Offered slots are dropped; call [`available_times`](Self::available_times)
    /// before submitting again.
    pub fn reload_bookings(&mut self) -> Result<(), FlowError> {
        let rows = self.store.fetch_bookings(&self.salon.id)?;
        self.bookings = rows
            .iter()
            .map(booking_from_record)
            .collect::<Result<Vec<_>, _>>()?;
        self.offered.clear();
        Ok(())
    }

    pub fn salon(&self) -> &Salon {
        &self.salon
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn selected_service(&self) -> Option<&Service> {
        self.service_id
            .as_deref()
            .and_then(|id| self.salon.service(id))
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn selected_time(&self) -> Option<TimeOfDay> {
        self.time
    }

    /// The booking created by the last successful [`submit`](Self::submit).
    pub fn confirmed(&self) -> Option<&Booking> {
        self.confirmed.as_ref()
    }

    /// The dates a customer may pick: [`BOOKING_WINDOW_DAYS`] days from today.
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        booking_dates(self.today, BOOKING_WINDOW_DAYS)
    }

    /// Choose a service and move on to picking a date and time.
    pub fn select_service(&mut self, service_id: &str) -> Result<&Service, FlowError> {
        if self.salon.service(service_id).is_none() {
            return Err(FlowError::UnknownService(service_id.to_string()));
        }
        self.service_id = Some(service_id.to_string());
        self.date = None;
        self.time = None;
        self.offered.clear();
        self.step = Step::DateTime;

        self.selected_service()
            .ok_or_else(|| FlowError::UnknownService(service_id.to_string()))
    }

    /// Choose a date inside the booking window and return its free slots.
    ///
    /// Any previously selected time is cleared.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<&[Slot], FlowError> {
        if self.service_id.is_none() {
            return Err(FlowError::NoServiceSelected);
        }
        if !self.available_dates().contains(&date) {
            return Err(FlowError::DateOutsideWindow(format_date(date)));
        }
        self.date = Some(date);
        self.time = None;
        self.refresh_slots()?;
        Ok(&self.offered)
    }

    /// Recompute the free start times for the selected service and date.
    pub fn available_times(&mut self) -> Result<Vec<String>, FlowError> {
        self.refresh_slots()?;
        Ok(self.offered.iter().map(|s| s.start.to_string()).collect())
    }

    /// Choose a start time. It must be one of the slots last offered for the
    /// selected service and date.
    pub fn select_time(&mut self, time: &str) -> Result<(), FlowError> {
        let time: TimeOfDay = time.parse()?;
        if self.service_id.is_none() {
            return Err(FlowError::NoServiceSelected);
        }
        if self.date.is_none() {
            return Err(FlowError::NoDateSelected);
        }
        if !self.offered.iter().any(|slot| slot.start == time) {
            return Err(FlowError::SlotUnavailable(time.to_string()));
        }
        self.time = Some(time);
        Ok(())
    }

    pub fn continue_to_details(&mut self) -> Result<(), FlowError> {
        if self.time.is_none() {
            return Err(FlowError::NoTimeSelected);
        }
        self.step = Step::Details;
        Ok(())
    }

    /// Go back one step. Selections are kept.
    pub fn back(&mut self) {
        self.step = match self.step {
            Step::Details => Step::DateTime,
            Step::DateTime => Step::Service,
            other => other,
        };
    }

    /// Start over with nothing selected.
    pub fn reset(&mut self) {
        self.step = Step::Service;
        self.service_id = None;
        self.date = None;
        self.time = None;
        self.offered.clear();
        self.confirmed = None;
    }

    /// Persist a booking for the current selection and send its confirmation.
    ///
    /// The confirmation is attempted only after the store acknowledged the
    /// write; its failure is logged and does not affect the result.
    ///
    /// The selected time must still be among the slots last computed for the
    /// selected service and date. Submitting clears those slots and the time,
    /// so the same slot cannot be booked twice from one flow.
    ///
    /// # Errors
    /// Fails when a selection or customer field is missing, when the time is
    /// not among the offered slots, or when the store rejects the write. A
    /// slot taken by another client after it was offered is not detected here.
    pub fn submit(&mut self, customer: Customer) -> Result<Booking, FlowError> {
        let service = self
            .selected_service()
            .cloned()
            .ok_or(FlowError::NoServiceSelected)?;
        let date = self.date.ok_or(FlowError::NoDateSelected)?;
        let start = self.time.ok_or(FlowError::NoTimeSelected)?;
        if !self.offered.iter().any(|slot| slot.start == start) {
            return Err(FlowError::SlotUnavailable(start.to_string()));
        }
        let customer = validate_customer(customer)?;

        let end_time = compute_end_time(&start.to_string(), service.duration_minutes)?;
        let end: TimeOfDay = end_time.parse()?;

        let record = NewBookingRecord {
            salon_id: self.salon.id.clone(),
            service_id: service.id.clone(),
            date: format_date(date),
            time: start.to_string(),
            end_time,
            customer_name: customer.name.clone(),
            customer_email: customer.email.clone(),
            customer_phone: customer.phone.clone(),
        };

        let stored = self.store.create_booking(record).map_err(|err| {
            tracing::error!(salon = %self.salon.slug, error = %err, "booking write failed");
            err
        })?;

        let booking = Booking {
            id: stored.id,
            salon_id: self.salon.id.clone(),
            service_id: service.id.clone(),
            date,
            start,
            end: Some(end),
            customer,
            status: Some(BookingStatus::Confirmed),
        };
        self.bookings.push(booking.clone());
        self.offered.clear();
        self.time = None;

        tracing::info!(
            booking_id = %booking.id,
            salon = %self.salon.slug,
            date = %format_date(date),
            time = %start,
            "booking created"
        );

        let details = self.confirmation_details(&booking, &service);
        match self.sender.send_confirmation(&details) {
            Ok(Delivery::Sent) => tracing::debug!(booking_id = %booking.id, "confirmation sent"),
            Ok(Delivery::Skipped) => {
                tracing::debug!(booking_id = %booking.id, "confirmation skipped")
            }
            Err(err) => {
                tracing::warn!(booking_id = %booking.id, error = %err, "confirmation failed")
            }
        }

        self.step = Step::Confirmation;
        self.confirmed = Some(booking.clone());
        Ok(booking)
    }

    /// "Add to Google Calendar" link for the confirmed booking.
    pub fn calendar_link(&self) -> Option<String> {
        let booking = self.confirmed.as_ref()?;
        let service = self.salon.service(&booking.service_id)?;

        let start = NaiveDateTime::new(booking.date, booking.start.into());
        let end = start + Duration::minutes(i64::from(service.duration_minutes));

        let title = format!("{} - {}", service.name, self.salon.name);
        let details = format!(
            "Your visit to {}.\nService: {}\n\nContact the salon to cancel or reschedule.",
            self.salon.name, service.name
        );
        let dates = format!(
            "{}/{}",
            start.format("%Y%m%dT%H%M00"),
            end.format("%Y%m%dT%H%M00")
        );

        Some(format!(
            "{}?action=TEMPLATE&text={}&dates={}&details={}",
            CALENDAR_BASE_URL,
            encode(&title),
            dates,
            encode(&details)
        ))
    }

    fn refresh_slots(&mut self) -> Result<(), FlowError> {
        let duration = self
            .selected_service()
            .map(|s| s.duration_minutes)
            .ok_or(FlowError::NoServiceSelected)?;
        let date = self.date.ok_or(FlowError::NoDateSelected)?;

        let intervals: Vec<BookingInterval> = self.bookings.iter().map(Booking::interval).collect();
        let slots = available_slots(&self.salon.working_hours, duration, date, &intervals)?;
        self.offered = slots;
        Ok(())
    }

    fn confirmation_details(&self, booking: &Booking, service: &Service) -> ConfirmationDetails {
        ConfirmationDetails {
            to_email: booking.customer.email.clone(),
            to_name: booking.customer.name.clone(),
            salon_name: self.salon.name.clone(),
            service_name: service.name.clone(),
            booking_date: format_date(booking.date),
            booking_time: booking.start.to_string(),
            duration: service.duration_minutes,
            price: service.price,
            salon_address: self.salon.address.clone(),
            salon_phone: self.salon.phone.clone(),
        }
    }
}

/// Trim every contact field and require all three.
fn validate_customer(customer: Customer) -> Result<Customer, FlowError> {
    let customer = Customer {
        name: customer.name.trim().to_string(),
        phone: customer.phone.trim().to_string(),
        email: customer.email.trim().to_string(),
    };
    if customer.name.is_empty() {
        return Err(FlowError::MissingCustomerField("name"));
    }
    if customer.phone.is_empty() {
        return Err(FlowError::MissingCustomerField("phone"));
    }
    if customer.email.is_empty() {
        return Err(FlowError::MissingCustomerField("email"));
    }
    Ok(customer)
}

fn encode(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}
