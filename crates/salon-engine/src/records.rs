//! Storage records and their conversion into the domain model.
//!
//! Records mirror the persisted row shapes: snake_case columns, nullable text,
//! times and dates as plain strings. Every conversion covers every field and
//! spells out its defaults. Dates and times are parsed strictly; a malformed
//! value is an error, not a silently coerced one.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::model::{Booking, BookingInterval, BookingStatus, Customer, Salon, Service, WorkingHours};
use crate::time::{parse_date, TimeOfDay};

/// Logo shown for salons that have none on file.
pub const DEFAULT_LOGO_URL: &str =
    "https://images.unsplash.com/photo-1560066984-138dadb4c035?auto=format&fit=crop&q=80&w=200&h=200";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalonRecord {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub working_hours_open: String,
    pub working_hours_close: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: String,
    pub salon_id: String,
    pub name: String,
    pub duration: i64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: String,
    pub salon_id: String,
    pub service_id: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The row written when a customer submits a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookingRecord {
    pub salon_id: String,
    pub service_id: String,
    pub date: String,
    pub time: String,
    pub end_time: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
}

/// Nullable or empty text becomes `None`.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Convert a salon row and its service rows into a [`Salon`].
///
/// Missing description, address, phone and email become `""`; a missing logo
/// becomes [`DEFAULT_LOGO_URL`].
pub fn salon_from_record(record: &SalonRecord, services: &[ServiceRecord]) -> Result<Salon> {
    let working_hours =
        WorkingHours::parse(&record.working_hours_open, &record.working_hours_close)?;
    let services = services
        .iter()
        .map(service_from_record)
        .collect::<Result<Vec<_>>>()?;

    Ok(Salon {
        id: record.id.clone(),
        slug: record.slug.clone(),
        name: record.name.clone(),
        description: non_empty(&record.description).unwrap_or_default().to_string(),
        logo: non_empty(&record.logo).unwrap_or(DEFAULT_LOGO_URL).to_string(),
        address: non_empty(&record.address).unwrap_or_default().to_string(),
        phone: non_empty(&record.phone).unwrap_or_default().to_string(),
        email: non_empty(&record.email).unwrap_or_default().to_string(),
        services,
        working_hours,
    })
}

/// Convert a service row. A missing description stays `None`.
pub fn service_from_record(record: &ServiceRecord) -> Result<Service> {
    let duration_minutes = u32::try_from(record.duration)
        .ok()
        .filter(|d| *d > 0)
        .ok_or_else(|| {
            EngineError::Range(format!(
                "service '{}' has invalid duration {}",
                record.id, record.duration
            ))
        })?;

    let service = Service {
        id: record.id.clone(),
        name: record.name.clone(),
        duration_minutes,
        price: record.price,
        description: non_empty(&record.description).map(str::to_string),
    };
    service.validate()?;
    Ok(service)
}

/// Convert a booking row. A missing end time stays `None`; an unknown status
/// becomes `None`.
pub fn booking_from_record(record: &BookingRecord) -> Result<Booking> {
    Ok(Booking {
        id: record.id.clone(),
        salon_id: record.salon_id.clone(),
        service_id: record.service_id.clone(),
        date: parse_date(&record.date)?,
        start: record.time.parse()?,
        end: non_empty(&record.end_time)
            .map(str::parse::<TimeOfDay>)
            .transpose()?,
        customer: Customer {
            name: record.customer_name.clone(),
            phone: record.customer_phone.clone(),
            email: record.customer_email.clone(),
        },
        status: BookingStatus::parse(&record.status),
    })
}

/// The occupied interval of a booking row.
pub fn interval_from_record(record: &BookingRecord) -> Result<BookingInterval> {
    booking_from_record(record).map(|b| b.interval())
}
