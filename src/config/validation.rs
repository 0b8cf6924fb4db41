//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (max_attempts > 0, non-empty window when honoured)
//! - Check the allow-list for blank and duplicate entries
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PortalConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::PortalConfig;

/// A single semantic problem in a loaded config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("throttle.max_attempts must be at least 1")]
    ZeroMaxAttempts,

    #[error("throttle.time_window_ms must be positive when honor_time_window is set")]
    ZeroTimeWindow,

    #[error("throttle.storage_key must not be empty")]
    EmptyStorageKey,

    #[error("storage.path must not be empty")]
    EmptyStoragePath,

    #[error("accounts[{index}] has a blank account or invoice number")]
    BlankAccount { index: usize },

    #[error("accounts[{index}] duplicates account {account_number} / {invoice_number}")]
    DuplicateAccount {
        index: usize,
        account_number: String,
        invoice_number: String,
    },
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &PortalConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.throttle.max_attempts == 0 {
        errors.push(ValidationError::ZeroMaxAttempts);
    }
    if config.throttle.honor_time_window && config.throttle.time_window_ms == 0 {
        errors.push(ValidationError::ZeroTimeWindow);
    }
    if config.throttle.storage_key.trim().is_empty() {
        errors.push(ValidationError::EmptyStorageKey);
    }
    if config.storage.path.trim().is_empty() {
        errors.push(ValidationError::EmptyStoragePath);
    }

    let mut seen = HashSet::new();
    for (index, account) in config.accounts.iter().enumerate() {
        if account.account_number.trim().is_empty() || account.invoice_number.trim().is_empty() {
            errors.push(ValidationError::BlankAccount { index });
            continue;
        }
        let identity = (
            account.account_number.as_str(),
            account.invoice_number.as_str(),
            account.business_id.as_deref(),
        );
        if !seen.insert(identity) {
            errors.push(ValidationError::DuplicateAccount {
                index,
                account_number: account.account_number.clone(),
                invoice_number: account.invoice_number.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
