//! Deposit computation and minor-unit amount arithmetic.
//!
//! The external checkout flow lives outside this crate; what remains here
//! is the amount arithmetic it needs: converting between display amounts
//! and currency minor units, and computing the deposit a service requires
//! before a booking is confirmed.

use serde::{Deserialize, Serialize};

use crate::catalog::Service;
use crate::error::ValidationError;

/// Number of minor-unit digits for a currency code.
///
/// Two-decimal currencies are the default; zero-decimal currencies are
/// listed explicitly.
pub fn currency_exponent(currency: &str) -> u32 {
    match currency.to_ascii_uppercase().as_str() {
        "JPY" | "KRW" | "VND" | "XOF" | "XAF" => 0,
        "BHD" | "KWD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

/// Convert a display amount (e.g. 65.00) to minor units (e.g. 6500).
///
/// Rounds to the nearest minor unit.
pub fn to_minor_units(amount: f64, currency: &str) -> i64 {
    let factor = 10_i64.pow(currency_exponent(currency)) as f64;
    (amount * factor).round() as i64
}

/// Convert minor units back to a display amount.
pub fn from_minor_units(minor: i64, currency: &str) -> f64 {
    let factor = 10_i64.pow(currency_exponent(currency)) as f64;
    minor as f64 / factor
}

/// Deposit policy applied to services that require a pre-payment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepositPolicy {
    /// Percentage of the service price collected up front (0-100).
    pub percent: u32,
}

impl Default for DepositPolicy {
    fn default() -> Self {
        Self { percent: 20 }
    }
}

impl DepositPolicy {
    /// Create a policy, validating the percentage.
    pub fn new(percent: u32) -> Result<Self, ValidationError> {
        if percent > 100 {
            return Err(ValidationError::InvalidValue {
                field: "percent".to_string(),
                message: format!("deposit percent must be 0-100, got {percent}"),
            });
        }
        Ok(Self { percent })
    }

    /// Deposit for a service, in minor units.
    ///
    /// Returns `None` when the service does not require a deposit or the
    /// policy is zero. Rounds half-up on odd splits.
    pub fn deposit_for(&self, service: &Service) -> Option<i64> {
        if !service.deposit_required || self.percent == 0 {
            return None;
        }
        Some((service.price_minor * i64::from(self.percent) + 50) / 100)
    }
}
