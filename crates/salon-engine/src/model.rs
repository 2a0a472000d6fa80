//! Domain records: salons, services, bookings and the spans they occupy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::conflict::Span;
use crate::error::{EngineError, Result};
use crate::time::TimeOfDay;

/// Minutes a booking is assumed to occupy when it carries no end time.
///
/// Legacy and incomplete booking records only store a start time.
pub const DEFAULT_OCCUPIED_MINUTES: u32 = 60;

/// A salon's daily opening window, identical every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub open: TimeOfDay,
    pub close: TimeOfDay,
}

impl WorkingHours {
    /// # Errors
    /// Returns `EngineError::Range` unless `open < close`. Overnight windows
    /// are not supported.
    pub fn new(open: TimeOfDay, close: TimeOfDay) -> Result<Self> {
        if open >= close {
            return Err(EngineError::Range(format!(
                "working hours must open before they close ({}-{})",
                open, close
            )));
        }
        Ok(Self { open, close })
    }

    /// Parse `HH:MM` open and close times.
    pub fn parse(open: &str, close: &str) -> Result<Self> {
        Self::new(open.parse()?, close.parse()?)
    }

    pub fn span(&self) -> Span {
        Span::new(self.open.minutes(), self.close.minutes())
    }
}

/// A bookable service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub duration_minutes: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Service {
    /// # Errors
    /// Returns `EngineError::Range` for a zero duration or a negative (or NaN) price.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        duration_minutes: u32,
        price: f64,
    ) -> Result<Self> {
        let service = Self {
            id: id.into(),
            name: name.into(),
            duration_minutes,
            price,
            description: None,
        };
        service.validate()?;
        Ok(service)
    }

    pub fn validate(&self) -> Result<()> {
        if self.duration_minutes == 0 {
            return Err(EngineError::Range(format!(
                "service '{}' must last at least one minute",
                self.id
            )));
        }
        if self.price.is_nan() || self.price < 0.0 {
            return Err(EngineError::Range(format!(
                "service '{}' has a negative price ({})",
                self.id, self.price
            )));
        }
        Ok(())
    }
}

/// An occupied span on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInterval {
    pub date: NaiveDate,
    pub start: TimeOfDay,
    #[serde(default)]
    pub end: Option<TimeOfDay>,
}

impl BookingInterval {
    /// The `[start, end)` span this booking occupies.
    ///
    /// Without an explicit end the booking occupies
    /// [`DEFAULT_OCCUPIED_MINUTES`] from its start.
    pub fn occupied_span(&self) -> Span {
        let start = self.start.minutes();
        match self.end {
            Some(end) => Span::new(start, end.minutes()),
            None => Span::starting_at(start, DEFAULT_OCCUPIED_MINUTES),
        }
    }
}

/// A candidate start time. Query result only, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub start: TimeOfDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

/// Contact details collected from the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// A persisted booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub salon_id: String,
    pub service_id: String,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    #[serde(default)]
    pub end: Option<TimeOfDay>,
    pub customer: Customer,
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

impl Booking {
    pub fn interval(&self) -> BookingInterval {
        BookingInterval {
            date: self.date,
            start: self.start,
            end: self.end,
        }
    }
}

/// A salon with its services and working hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salon {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub services: Vec<Service>,
    pub working_hours: WorkingHours,
}

impl Salon {
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }
}
