//! Appointment booking and lifecycle commands.

use clap::Subcommand;

use chairside_core::booking::{set_appointment_status, BookingEngine, BookingRequest};
use chairside_core::{
    AppointmentStatus, Config, NotificationEvent, NotificationPayload, Notifier, SalonDb,
};

use super::parse_instant;

#[derive(Subcommand)]
pub enum AppointmentAction {
    /// Book a new appointment
    Book {
        /// Professional ID
        professional_id: String,
        /// Service ID
        service_id: String,
        /// Client ID
        client_id: String,
        /// Date (YYYY-MM-DD)
        date: String,
        /// Start time (HH:mm)
        time: String,
        /// Booking note
        #[arg(long)]
        note: Option<String>,
    },
    /// List appointments
    List,
    /// Get appointment details
    Get {
        /// Appointment ID
        id: String,
    },
    /// Cancel an appointment
    Cancel {
        /// Appointment ID
        id: String,
    },
    /// Mark an appointment completed
    Complete {
        /// Appointment ID
        id: String,
    },
    /// Mark an appointment as a no-show
    NoShow {
        /// Appointment ID
        id: String,
    },
    /// Move an appointment to a new slot
    Reschedule {
        /// Appointment ID
        id: String,
        /// New date (YYYY-MM-DD)
        date: String,
        /// New start time (HH:mm)
        time: String,
    },
}

fn notifier(config: &Config) -> Option<Notifier> {
    match Notifier::from_config(config) {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::warn!("notifications unavailable: {e}");
            None
        }
    }
}

pub fn run(action: AppointmentAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = SalonDb::open()?;
    let config = Config::load_or_default();
    let engine = BookingEngine::from_config(&config)?;

    match action {
        AppointmentAction::Book {
            professional_id,
            service_id,
            client_id,
            date,
            time,
            note,
        } => {
            let request = BookingRequest {
                professional_id,
                service_id,
                client_id,
                start_time: parse_instant(&date, &time)?,
                note,
            };
            let appointment = engine.book(&db, &request)?;

            if let Some(notifier) = notifier(&config) {
                notifier.dispatch_best_effort(&NotificationPayload::for_appointment(
                    NotificationEvent::AppointmentBooked,
                    &appointment,
                ));
            }

            println!("Appointment booked: {}", appointment.id);
            println!("{}", serde_json::to_string_pretty(&appointment)?);
        }
        AppointmentAction::List => {
            let appointments = db.list_appointments()?;
            println!("{}", serde_json::to_string_pretty(&appointments)?);
        }
        AppointmentAction::Get { id } => match db.get_appointment(&id)? {
            Some(appointment) => println!("{}", serde_json::to_string_pretty(&appointment)?),
            None => println!("Appointment not found: {id}"),
        },
        AppointmentAction::Cancel { id } => {
            let appointment = set_appointment_status(&db, &id, AppointmentStatus::Cancelled)?;

            if let Some(notifier) = notifier(&config) {
                notifier.dispatch_best_effort(&NotificationPayload::for_appointment(
                    NotificationEvent::AppointmentCancelled,
                    &appointment,
                ));
            }

            println!("Appointment cancelled: {id}");
        }
        AppointmentAction::Complete { id } => {
            set_appointment_status(&db, &id, AppointmentStatus::Completed)?;
            println!("Appointment completed: {id}");
        }
        AppointmentAction::NoShow { id } => {
            set_appointment_status(&db, &id, AppointmentStatus::NoShow)?;
            println!("Appointment marked no-show: {id}");
        }
        AppointmentAction::Reschedule { id, date, time } => {
            let new_start = parse_instant(&date, &time)?;
            let appointment = engine.reschedule(&db, &id, new_start)?;

            if let Some(notifier) = notifier(&config) {
                notifier.dispatch_best_effort(&NotificationPayload::for_appointment(
                    NotificationEvent::AppointmentRescheduled,
                    &appointment,
                ));
            }

            println!("Appointment rescheduled:");
            println!("{}", serde_json::to_string_pretty(&appointment)?);
        }
    }
    Ok(())
}
