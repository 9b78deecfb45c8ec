//! # Chairside Core Library
//!
//! This library provides the core business logic for Chairside, a
//! business-management toolkit for salon and beauty professionals. It
//! implements a CLI-first philosophy where all operations are available
//! via a standalone CLI binary, with any GUI layer being a thin surface
//! over the same core library.
//!
//! ## Architecture
//!
//! - **Booking Engine**: Slot generation, half-open-interval conflict
//!   detection, and reschedule validation over a professional's calendar
//! - **Storage**: SQLite-based persistence and TOML-based configuration
//! - **Notifications**: Best-effort webhook dispatch for booking events
//! - **Stats**: Appointment, revenue, utilization, and lead analytics
//!
//! ## Key Components
//!
//! - [`BookingEngine`]: Availability computation and booking commits
//! - [`SalonDb`]: Appointment, catalog, and CRM persistence
//! - [`Config`]: Application configuration management
//! - [`Notifier`]: Booking event dispatch

pub mod appointment;
pub mod booking;
pub mod catalog;
pub mod crm;
pub mod error;
pub mod notify;
pub mod payments;
pub mod stats;
pub mod storage;
pub mod timeblock;

pub use appointment::{Appointment, AppointmentStatus, StatusTransitionError};
pub use booking::{
    BookingEngine, BookingRequest, BusyInterval, BusySource, Slot, SlotAvailability,
    SlotGenerator, SlotStatus,
};
pub use catalog::{PortfolioItem, Service};
pub use crm::{Client, Lead, LeadStatus};
pub use error::{BookingError, ConfigError, CoreError, DatabaseError, NotifyError, ValidationError};
pub use notify::{NotificationEvent, NotificationPayload, Notifier};
pub use payments::{from_minor_units, to_minor_units, DepositPolicy};
pub use storage::{Config, SalonDb};
pub use timeblock::{BlockKind, TimeBlock};
