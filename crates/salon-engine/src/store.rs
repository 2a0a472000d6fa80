//! Booking stores backed by memory or a JSON file.
//!
//! Both stores hold a [`Dataset`] of storage rows. New bookings get a v4 UUID,
//! a `created_at` timestamp and status `confirmed`. Neither store checks for
//! overlapping bookings; last write wins.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collaborators::BookingStore;
use crate::error::StoreError;
use crate::model::BookingStatus;
use crate::records::{BookingRecord, NewBookingRecord, SalonRecord, ServiceRecord};

/// All rows known to a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub salons: Vec<SalonRecord>,
    #[serde(default)]
    pub services: Vec<ServiceRecord>,
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
}

impl Dataset {
    pub fn salon_by_slug(&self, slug: &str) -> Option<SalonRecord> {
        self.salons.iter().find(|s| s.slug == slug).cloned()
    }

    pub fn services_of(&self, salon_id: &str) -> Vec<ServiceRecord> {
        self.services
            .iter()
            .filter(|s| s.salon_id == salon_id)
            .cloned()
            .collect()
    }

    pub fn bookings_of(&self, salon_id: &str) -> Vec<BookingRecord> {
        self.bookings
            .iter()
            .filter(|b| b.salon_id == salon_id)
            .cloned()
            .collect()
    }

    /// Append a booking row, rejecting references to unknown salons or services.
    pub fn insert_booking(&mut self, record: NewBookingRecord) -> Result<BookingRecord, StoreError> {
        if !self.salons.iter().any(|s| s.id == record.salon_id) {
            return Err(StoreError::Rejected(format!(
                "unknown salon '{}'",
                record.salon_id
            )));
        }
        if !self
            .services
            .iter()
            .any(|s| s.id == record.service_id && s.salon_id == record.salon_id)
        {
            return Err(StoreError::Rejected(format!(
                "unknown service '{}' for salon '{}'",
                record.service_id, record.salon_id
            )));
        }

        let stored = BookingRecord {
            id: Uuid::new_v4().to_string(),
            salon_id: record.salon_id,
            service_id: record.service_id,
            date: record.date,
            time: record.time,
            end_time: Some(record.end_time),
            customer_name: record.customer_name,
            customer_email: record.customer_email,
            customer_phone: record.customer_phone,
            notes: None,
            status: BookingStatus::Confirmed.as_str().to_string(),
            created_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        };
        self.bookings.push(stored.clone());
        Ok(stored)
    }
}

/// A store holding its rows in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Dataset>,
}

impl MemoryStore {
    pub fn new(data: Dataset) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }

    /// A copy of the current rows.
    pub fn snapshot(&self) -> Dataset {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Dataset> {
        // A poisoned lock still holds consistent rows: every write is a single push.
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl BookingStore for MemoryStore {
    fn fetch_salon(&self, slug: &str) -> Result<Option<SalonRecord>, StoreError> {
        Ok(self.lock().salon_by_slug(slug))
    }

    fn fetch_services(&self, salon_id: &str) -> Result<Vec<ServiceRecord>, StoreError> {
        Ok(self.lock().services_of(salon_id))
    }

    fn fetch_bookings(&self, salon_id: &str) -> Result<Vec<BookingRecord>, StoreError> {
        Ok(self.lock().bookings_of(salon_id))
    }

    fn create_booking(&self, record: NewBookingRecord) -> Result<BookingRecord, StoreError> {
        let stored = self.lock().insert_booking(record)?;
        tracing::debug!(booking_id = %stored.id, "booking stored in memory");
        Ok(stored)
    }
}

/// A store persisted as one pretty-printed JSON [`Dataset`] file.
///
/// The file is re-read on every call, so edits by other processes are picked
/// up, but concurrent writers are not coordinated.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the dataset; a missing file is an empty dataset.
    pub fn load(&self) -> Result<Dataset, StoreError> {
        if !self.path.exists() {
            tracing::warn!(path = %self.path.display(), "data file not found, using empty dataset");
            return Ok(Dataset::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, data: &Dataset) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl BookingStore for JsonFileStore {
    fn fetch_salon(&self, slug: &str) -> Result<Option<SalonRecord>, StoreError> {
        Ok(self.load()?.salon_by_slug(slug))
    }

    fn fetch_services(&self, salon_id: &str) -> Result<Vec<ServiceRecord>, StoreError> {
        Ok(self.load()?.services_of(salon_id))
    }

    fn fetch_bookings(&self, salon_id: &str) -> Result<Vec<BookingRecord>, StoreError> {
        Ok(self.load()?.bookings_of(salon_id))
    }

    fn create_booking(&self, record: NewBookingRecord) -> Result<BookingRecord, StoreError> {
        let mut data = self.load()?;
        let stored = data.insert_booking(record)?;
        self.save(&data)?;
        tracing::debug!(
            booking_id = %stored.id,
            path = %self.path.display(),
            "booking written to data file"
        );
        Ok(stored)
    }
}
