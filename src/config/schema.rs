//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the throttle.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::store::{KeyScope, DEFAULT_STORAGE_KEY};

/// Lock duration applied when the configured window is not honoured.
pub const FIXED_LOCK_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Attempt throttle settings.
    pub throttle: ThrottleConfig,

    /// Where throttle records are persisted.
    pub storage: StorageConfig,

    /// Form flow settings.
    pub gate: GateConfig,

    /// Allow-list the verification oracle checks against.
    pub accounts: Vec<AccountRecord>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            throttle: ThrottleConfig::default(),
            storage: StorageConfig::default(),
            gate: GateConfig::default(),
            accounts: default_accounts(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Attempt throttle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Failures allowed before the slot locks.
    pub max_attempts: u32,

    /// Configured window in milliseconds. Only used as the lock duration
    /// when `honor_time_window` is set.
    pub time_window_ms: u64,

    /// Lock for `time_window_ms` instead of the fixed 24 hours.
    pub honor_time_window: bool,

    /// Base storage key.
    pub storage_key: String,

    /// Slot scoping (shared or per subject).
    pub key_scope: KeyScope,

    /// Allow the demo-only manual reset.
    pub manual_reset: bool,
}

impl ThrottleConfig {
    /// Duration a slot stays locked once `max_attempts` is reached.
    pub fn lock_duration(&self) -> Duration {
        if self.honor_time_window {
            Duration::from_millis(self.time_window_ms)
        } else {
            FIXED_LOCK_DURATION
        }
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            time_window_ms: 5 * 60 * 1000,
            honor_time_window: false,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            key_scope: KeyScope::Shared,
            manual_reset: true,
        }
    }
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON storage file.
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: ".attempt-throttle.json".to_string(),
        }
    }
}

/// When a submission counts against the throttle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingPolicy {
    /// Every valid submission is recorded up front; success resets.
    #[default]
    EverySubmission,
    /// Only rejected submissions are recorded.
    FailuresOnly,
}

/// Form flow configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GateConfig {
    pub counting: CountingPolicy,
}

/// One verifiable account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AccountRecord {
    pub account_number: String,
    pub invoice_number: String,

    /// Business the account belongs to, checked only when a request names one.
    #[serde(default)]
    pub business_id: Option<String>,
}

impl AccountRecord {
    pub fn new(account_number: &str, invoice_number: &str, business_id: Option<&str>) -> Self {
        Self {
            account_number: account_number.to_string(),
            invoice_number: invoice_number.to_string(),
            business_id: business_id.map(str::to_string),
        }
    }
}

fn default_accounts() -> Vec<AccountRecord> {
    vec![
        AccountRecord::new("1001", "INV-10001", Some("sales-demo")),
        AccountRecord::new("1002", "INV-10002", Some("sales-demo")),
        AccountRecord::new("2001", "INV-20001", Some("other-business")),
    ]
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable ones.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lock_duration_ignores_window() {
        let config = ThrottleConfig::default();
        assert_eq!(config.lock_duration(), FIXED_LOCK_DURATION);
    }

    #[test]
    fn test_honored_window_sets_lock_duration() {
        let config = ThrottleConfig {
            honor_time_window: true,
            time_window_ms: 90_000,
            ..ThrottleConfig::default()
        };
        assert_eq!(config.lock_duration(), Duration::from_secs(90));
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: PortalConfig = toml::from_str("").unwrap();
        assert_eq!(config.throttle.max_attempts, 5);
        assert_eq!(config.throttle.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.accounts.len(), 3);
        assert_eq!(config.gate.counting, CountingPolicy::EverySubmission);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: PortalConfig = toml::from_str(
            r#"
            [throttle]
            max_attempts = 3
            key_scope = "per_subject"

            [gate]
            counting = "failures_only"

            [[accounts]]
            account_number = "9001"
            invoice_number = "INV-90001"
            "#,
        )
        .unwrap();

        assert_eq!(config.throttle.max_attempts, 3);
        assert_eq!(config.throttle.key_scope, KeyScope::PerSubject);
        assert_eq!(config.throttle.time_window_ms, 300_000);
        assert_eq!(config.gate.counting, CountingPolicy::FailuresOnly);
        assert_eq!(config.accounts, vec![AccountRecord::new("9001", "INV-90001", None)]);
    }
}
