//! Error types for salon-engine operations.

use thiserror::Error;

/// Errors raised by the pure availability engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed time or date text.
    #[error("Format error: {0}")]
    Format(String),

    /// A numeric value outside its valid domain.
    #[error("Range error: {0}")]
    Range(String),
}

/// Convenience alias used by the engine modules.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors reported by a [`BookingStore`](crate::collaborators::BookingStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store data error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store refused the write (e.g. a referenced salon or service is missing).
    #[error("Booking rejected: {0}")]
    Rejected(String),
}

/// Errors reported by a [`ConfirmationSender`](crate::collaborators::ConfirmationSender).
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Notification encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the booking flow controller.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Salon not found: {0}")]
    SalonNotFound(String),

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("No service selected")]
    NoServiceSelected,

    #[error("No date selected")]
    NoDateSelected,

    #[error("No time selected")]
    NoTimeSelected,

    #[error("Date {0} is outside the bookable window")]
    DateOutsideWindow(String),

    #[error("Time {0} is not an available slot")]
    SlotUnavailable(String),

    #[error("Missing customer field: {0}")]
    MissingCustomerField(&'static str),
}
