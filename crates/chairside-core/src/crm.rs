//! Clients and lead capture.
//!
//! Leads follow strict status transitions:
//!
//!   NEW ────────> CONTACTED ────────> CONVERTED
//!    |                |
//!    |                +─────────────> LOST
//!    +──────────────────────────────> LOST
//!
//! Converting a lead creates a client record and links it back to the
//! lead, so the funnel stays queryable after conversion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// An established client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Client {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            phone: phone.into(),
            email: None,
            notes: None,
            created_at: Utc::now(),
        }
    }
}

/// Lead status enumeration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    /// Captured, not yet contacted (initial state)
    New,
    /// Outreach made, awaiting outcome
    Contacted,
    /// Became a client (terminal)
    Converted,
    /// Did not convert (terminal)
    Lost,
}

impl LeadStatus {
    /// Check if a transition is valid.
    pub fn can_transition_to(&self, to: &LeadStatus) -> bool {
        match self {
            LeadStatus::New => matches!(
                to,
                LeadStatus::Contacted | LeadStatus::Converted | LeadStatus::Lost
            ),
            LeadStatus::Contacted => matches!(to, LeadStatus::Converted | LeadStatus::Lost),
            // Terminal states
            LeadStatus::Converted | LeadStatus::Lost => false,
        }
    }
}

impl Default for LeadStatus {
    fn default() -> Self {
        LeadStatus::New
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadStatus::New => write!(f, "new"),
            LeadStatus::Contacted => write!(f, "contacted"),
            LeadStatus::Converted => write!(f, "converted"),
            LeadStatus::Lost => write!(f, "lost"),
        }
    }
}

/// A prospective client captured via a form, prior to conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    /// Phone number or email, whatever the form captured.
    pub contact: String,
    pub message: Option<String>,
    /// Where the lead came from (e.g. "instagram", "referral").
    pub source: Option<String>,
    pub status: LeadStatus,
    /// Set when the lead converts.
    pub client_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        let now = Utc::now();
        Lead {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            contact: contact.into(),
            message: None,
            source: None,
            status: LeadStatus::New,
            client_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Transition to a new status.
    ///
    /// Returns an error if the transition is invalid.
    pub fn transition_to(&mut self, new_status: LeadStatus) -> Result<(), ValidationError> {
        if !self.status.can_transition_to(&new_status) {
            return Err(ValidationError::InvalidTransition {
                from: self.status.to_string(),
                to: new_status.to_string(),
            });
        }
        self.status = new_status;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Convert the lead into a client.
    ///
    /// Returns the new client; the lead is marked converted and linked.
    pub fn convert(&mut self) -> Result<Client, ValidationError> {
        self.transition_to(LeadStatus::Converted)?;

        let mut client = Client::new(self.name.clone(), self.contact.clone());
        client.notes = self.message.clone();
        self.client_id = Some(client.id.clone());
        Ok(client)
    }
}
