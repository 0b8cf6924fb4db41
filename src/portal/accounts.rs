//! Verification oracle over a static allow-list.

use crate::config::AccountRecord;
use crate::portal::credentials::AccessRequest;

/// Decides whether a submission names a real account.
pub trait VerificationOracle: Send + Sync {
    fn verify(&self, request: &AccessRequest) -> bool;
}

/// Exact-match lookup against configured accounts.
#[derive(Debug, Clone, Default)]
pub struct StaticAllowList {
    accounts: Vec<AccountRecord>,
}

impl StaticAllowList {
    pub fn new(accounts: Vec<AccountRecord>) -> Self {
        Self { accounts }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl VerificationOracle for StaticAllowList {
    fn verify(&self, request: &AccessRequest) -> bool {
        self.accounts.iter().any(|account| {
            account.account_number == request.account_number
                && account.invoice_number == request.invoice_number
                && match request.business_id.as_deref() {
                    Some(business) => account.business_id.as_deref() == Some(business),
                    None => true,
                }
        })
    }
}
