//! Core error types for chairside-core.
//!
//! This module defines a comprehensive error hierarchy using thiserror
//! for better error handling and reporting across the library.

use std::path::PathBuf;
use thiserror::Error;

use crate::timeblock::BlockKind;

/// Core error type for chairside-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Booking-related errors
    #[error("Booking error: {0}")]
    Booking(#[from] BookingError),

    /// Notification dispatch errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Row not found for the given id
    #[error("No {entity} found with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Booking-specific errors.
///
/// These carry the user-facing rejection reasons: a slot can be refused
/// because another appointment occupies it, because a time block covers it,
/// or because it falls outside business hours. Each reason surfaces
/// distinctly to the caller.
#[derive(Error, Debug)]
pub enum BookingError {
    /// Destination window overlaps an existing appointment
    #[error("Slot is occupied by appointment {appointment_id}")]
    SlotOccupied { appointment_id: String },

    /// Destination window overlaps a time block
    #[error("Slot is blocked ({kind})")]
    SlotBlocked { kind: BlockKind },

    /// Requested window falls outside the configured business hours
    #[error("Requested time {start} is outside business hours")]
    OutsideBusinessHours { start: chrono::DateTime<chrono::Utc> },

    /// Requested day is not a working day
    #[error("{date} is not a working day")]
    ClosedDay { date: chrono::NaiveDate },

    /// Appointment lookup failed
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    /// Service lookup failed
    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    /// Service exists but is no longer bookable
    #[error("Service is inactive: {0}")]
    ServiceInactive(String),

    /// Client lookup failed
    #[error("Client not found: {0}")]
    ClientNotFound(String),
}

/// Notification dispatch errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// No endpoint configured
    #[error("Notification endpoint not configured")]
    NotConfigured,

    /// Endpoint URL could not be parsed
    #[error("Invalid notification endpoint: {0}")]
    InvalidEndpoint(String),

    /// Endpoint answered with a non-success status
    #[error("Notification endpoint returned HTTP {status}")]
    Http { status: u16 },

    /// Request could not be sent
    #[error("Notification request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end_time ({end}) must be greater than start_time ({start})")]
    InvalidTimeRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Invalid status transition
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

// Helper implementations for converting from other error types

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(DatabaseError::from(err))
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
