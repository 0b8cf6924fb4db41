//! Access form input and its field checks.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

const ACCOUNT_NUMBER_LEN: RangeInclusive<usize> = 4..=10;
const INVOICE_NUMBER_LEN: RangeInclusive<usize> = 6..=15;

/// Why a submission was refused before reaching verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("Account number and invoice number are required")]
    Missing,

    #[error("Account number must be between 4 and 10 characters")]
    AccountNumberLength,

    #[error("Invoice number must be between 6 and 15 characters")]
    InvoiceNumberLength,

    #[error("Invalid email address")]
    InvalidEmail,
}

/// A one-time access / account verification submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AccessRequest {
    pub account_number: String,
    pub invoice_number: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub business_id: Option<String>,
}

impl AccessRequest {
    pub fn new(account_number: &str, invoice_number: &str) -> Self {
        Self {
            account_number: account_number.to_string(),
            invoice_number: invoice_number.to_string(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn with_business(mut self, business_id: &str) -> Self {
        self.business_id = Some(business_id.to_string());
        self
    }

    /// Field checks applied before anything is counted.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.account_number.is_empty() || self.invoice_number.is_empty() {
            return Err(CredentialError::Missing);
        }
        if !ACCOUNT_NUMBER_LEN.contains(&self.account_number.chars().count()) {
            return Err(CredentialError::AccountNumberLength);
        }
        if !INVOICE_NUMBER_LEN.contains(&self.invoice_number.chars().count()) {
            return Err(CredentialError::InvoiceNumberLength);
        }
        match self.email.as_deref() {
            Some(email) if !email.is_empty() && !valid_email(email) => {
                Err(CredentialError::InvalidEmail)
            }
            _ => Ok(()),
        }
    }
}

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}
