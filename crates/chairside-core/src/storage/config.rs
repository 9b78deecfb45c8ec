//! TOML-based application configuration.
//!
//! Stores the business settings the booking engine runs on:
//! - Business hours and working weekdays
//! - Slot cadence for availability generation
//! - Deposit policy and display currency
//! - Notification endpoint
//!
//! Configuration is stored at `~/.config/chairside/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;

/// Business-hours configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursConfig {
    /// Opening time, HH:mm
    #[serde(default = "default_open")]
    pub open: String,
    /// Closing time, HH:mm
    #[serde(default = "default_close")]
    pub close: String,
    /// Working weekdays, 0=Mon .. 6=Sun
    #[serde(default = "default_working_days")]
    pub working_days: Vec<u8>,
}

/// Booking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    #[serde(default = "default_cadence")]
    pub slot_cadence_min: u32,
}

/// Deposit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositsConfig {
    /// Percentage of the service price collected up front (0-100)
    #[serde(default = "default_deposit_percent")]
    pub percent: u32,
    /// Display currency for new services
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Webhook endpoint receiving booking event payloads
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/chairside/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub hours: HoursConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub deposits: DepositsConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_open() -> String {
    "08:00".into()
}
fn default_close() -> String {
    "18:00".into()
}
fn default_working_days() -> Vec<u8> {
    vec![0, 1, 2, 3, 4, 5] // Mon-Sat
}
fn default_cadence() -> u32 {
    30
}
fn default_deposit_percent() -> u32 {
    20
}
fn default_currency() -> String {
    "USD".into()
}

impl Default for HoursConfig {
    fn default() -> Self {
        Self {
            open: default_open(),
            close: default_close(),
            working_days: default_working_days(),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            slot_cadence_min: default_cadence(),
        }
    }
}

impl Default for DepositsConfig {
    fn default() -> Self {
        Self {
            percent: default_deposit_percent(),
            currency: default_currency(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hours: HoursConfig::default(),
            booking: BookingConfig::default(),
            deposits: DepositsConfig::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err("config key is empty".into());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| format!("unknown config key: {key}"))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| format!("unknown config key: {key}"))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse::<bool>()?),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| format!("cannot parse '{value}' as number"))?
                        } else {
                            return Err(format!("cannot parse '{value}' as number").into());
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value)?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| format!("unknown config key: {key}"))?;
        }

        Err(format!("unknown config key: {key}").into())
    }

    fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.hours.open, "08:00");
        assert_eq!(parsed.booking.slot_cadence_min, 30);
        assert_eq!(parsed.deposits.percent, 20);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("hours.open").as_deref(), Some("08:00"));
        assert_eq!(cfg.get("booking.slot_cadence_min").as_deref(), Some("30"));
        assert!(cfg.get("hours.missing_key").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "booking.slot_cadence_min", "15").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "booking.slot_cadence_min").unwrap(),
            &serde_json::Value::Number(15.into())
        );
    }

    #[test]
    fn set_json_value_by_path_updates_nested_string() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "hours.close", "20:00").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "hours.close").unwrap(),
            &serde_json::Value::String("20:00".to_string())
        );
    }

    #[test]
    fn set_json_value_by_path_updates_nested_bool() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "notifications.enabled", "true").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "notifications.enabled").unwrap(),
            &serde_json::Value::Bool(true)
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "hours.nonexistent_key", "value");
        assert!(result.is_err());
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result =
            Config::set_json_value_by_path(&mut json, "notifications.enabled", "not_a_bool");
        assert!(result.is_err());
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.hours.open, "08:00");
        assert_eq!(cfg.hours.close, "18:00");
        assert_eq!(cfg.hours.working_days, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(cfg.booking.slot_cadence_min, 30);
        assert_eq!(cfg.deposits.percent, 20);
        assert_eq!(cfg.deposits.currency, "USD");
        assert!(!cfg.notifications.enabled);
        assert!(cfg.notifications.endpoint.is_none());
    }

    #[test]
    fn working_days_set_as_json_array() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "hours.working_days", "[1,2,3,4,5]").unwrap();
        let parsed: Config = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.hours.working_days, vec![1, 2, 3, 4, 5]);
    }
}
