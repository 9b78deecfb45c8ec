//! Notification dispatch -- post booking events to a configured webhook.
//!
//! Dispatch is best-effort fire-and-forget: a failed notification is
//! logged and swallowed, and never rolls back the booking that triggered
//! it. There is no retry policy and no idempotency key.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::appointment::Appointment;
use crate::error::NotifyError;
use crate::storage::Config;

/// Booking mutation that triggers a notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationEvent {
    AppointmentBooked,
    AppointmentRescheduled,
    AppointmentCancelled,
}

/// Structured payload posted to the notification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub event: NotificationEvent,
    pub appointment_id: String,
    pub professional_id: String,
    pub service_id: String,
    pub client_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub sent_at: DateTime<Utc>,
}

impl NotificationPayload {
    pub fn for_appointment(event: NotificationEvent, appointment: &Appointment) -> Self {
        Self {
            event,
            appointment_id: appointment.id.clone(),
            professional_id: appointment.professional_id.clone(),
            service_id: appointment.service_id.clone(),
            client_id: appointment.client_id.clone(),
            start_time: appointment.start_time,
            end_time: appointment.end_time,
            sent_at: Utc::now(),
        }
    }
}

/// Webhook dispatcher for booking events.
pub struct Notifier {
    endpoint: Option<Url>,
    enabled: bool,
    client: Client,
}

impl Notifier {
    /// Build a dispatcher from the application configuration.
    ///
    /// An enabled config with an unparsable endpoint is an error; a
    /// disabled one never is.
    pub fn from_config(config: &Config) -> Result<Self, NotifyError> {
        let endpoint = match &config.notifications.endpoint {
            Some(raw) => Some(
                Url::parse(raw).map_err(|_| NotifyError::InvalidEndpoint(raw.clone()))?,
            ),
            None => None,
        };

        if config.notifications.enabled && endpoint.is_none() {
            return Err(NotifyError::NotConfigured);
        }

        Ok(Self {
            endpoint,
            enabled: config.notifications.enabled,
            client: Client::new(),
        })
    }

    /// Build a dispatcher pointed at an explicit endpoint.
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint: Some(endpoint),
            enabled: true,
            client: Client::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled && self.endpoint.is_some()
    }

    /// Post a payload to the configured endpoint.
    ///
    /// # Errors
    /// Returns an error if no endpoint is configured, the request cannot
    /// be sent, or the endpoint answers with a non-success status.
    pub async fn send(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        let endpoint = self.endpoint.as_ref().ok_or(NotifyError::NotConfigured)?;

        let resp = self
            .client
            .post(endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotifyError::Http {
                status: status.as_u16(),
            })
        }
    }

    /// Fire-and-forget dispatch from synchronous callers.
    ///
    /// Failures are logged at warn level and swallowed; a disabled
    /// dispatcher is a no-op.
    pub fn dispatch_best_effort(&self, payload: &NotificationPayload) {
        if !self.is_enabled() {
            tracing::debug!(event = ?payload.event, "notifications disabled, skipping dispatch");
            return;
        }

        let result = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle.block_on(self.send(payload)),
            Err(_) => match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime.block_on(self.send(payload)),
                Err(e) => {
                    tracing::warn!("failed to start notification runtime: {e}");
                    return;
                }
            },
        };

        if let Err(e) = result {
            tracing::warn!(
                event = ?payload.event,
                appointment_id = %payload.appointment_id,
                "notification dispatch failed: {e}"
            );
        }
    }
}
