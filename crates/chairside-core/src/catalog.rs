//! Services catalog and portfolio showcase types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A bookable service.
///
/// The duration drives the appointment end instant at booking time;
/// the price and deposit flag drive deposit computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Service duration in minutes. Always positive.
    pub duration_min: u32,
    /// Price in currency minor units (e.g. cents).
    pub price_minor: i64,
    /// ISO 4217 currency code (e.g. "USD").
    pub currency: String,
    /// Whether a deposit is required to confirm a booking.
    pub deposit_required: bool,
    /// Inactive services stay in the catalog but cannot be booked.
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Service {
    /// Create a new active service.
    ///
    /// Returns an error for a non-positive duration or negative price.
    /// A zero-duration service would make every window trivially free
    /// under the half-open overlap rule, so it is rejected here.
    pub fn new(
        name: impl Into<String>,
        duration_min: u32,
        price_minor: i64,
        currency: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if duration_min == 0 {
            return Err(ValidationError::InvalidValue {
                field: "duration_min".to_string(),
                message: "service duration must be positive".to_string(),
            });
        }
        if price_minor < 0 {
            return Err(ValidationError::InvalidValue {
                field: "price_minor".to_string(),
                message: "price cannot be negative".to_string(),
            });
        }

        Ok(Service {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            duration_min,
            price_minor,
            currency: currency.into(),
            deposit_required: false,
            active: true,
            created_at: Utc::now(),
        })
    }

    pub fn with_deposit_required(mut self, required: bool) -> Self {
        self.deposit_required = required;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A portfolio showcase entry.
///
/// File storage is out of scope; `image_ref` holds a path or URL to the
/// underlying asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    pub caption: Option<String>,
    pub image_ref: String,
    /// Optional link to the service shown in the piece.
    pub service_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PortfolioItem {
    pub fn new(title: impl Into<String>, image_ref: impl Into<String>) -> Self {
        PortfolioItem {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            caption: None,
            image_ref: image_ref.into(),
            service_id: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_creation() {
        let svc = Service::new("Balayage", 90, 18000, "USD").unwrap();
        assert_eq!(svc.duration_min, 90);
        assert_eq!(svc.price_minor, 18000);
        assert!(svc.active);
        assert!(!svc.deposit_required);
    }

    #[test]
    fn service_rejects_zero_duration() {
        assert!(Service::new("Broken", 0, 1000, "USD").is_err());
    }

    #[test]
    fn service_rejects_negative_price() {
        assert!(Service::new("Broken", 30, -1, "USD").is_err());
    }

    #[test]
    fn service_builder_flags() {
        let svc = Service::new("Color correction", 120, 25000, "USD")
            .unwrap()
            .with_deposit_required(true)
            .with_description("Full color correction session");
        assert!(svc.deposit_required);
        assert!(svc.description.is_some());
    }

    #[test]
    fn portfolio_item_creation() {
        let item = PortfolioItem::new("Bridal updo", "portfolio/bridal-01.jpg");
        assert_eq!(item.title, "Bridal updo");
        assert!(item.service_id.is_none());
    }

    #[test]
    fn service_serialization() {
        let svc = Service::new("Cut & finish", 45, 6500, "USD").unwrap();
        let json = serde_json::to_string(&svc).unwrap();
        let decoded: Service = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.name, "Cut & finish");
        assert_eq!(decoded.duration_min, 45);
    }
}
