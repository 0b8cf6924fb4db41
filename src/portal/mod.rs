//! Customer portal access forms.
//!
//! # Data Flow
//! ```text
//! AccessRequest (account number, invoice number, email?, business?)
//!     → credentials.rs (field checks; refused forms are never counted)
//!     → flow.rs (AccessGate)
//!         every_submission: attempt() → locked? → verify → reset on success
//!         failures_only:    check_locked() → verify → attempt() on failure
//!     → accounts.rs (VerificationOracle over the allow-list)
//!     → AccessOutcome + AttemptWarning for the caller to render
//! ```
//!
//! # Design Decisions
//! - The oracle and the throttle never see each other
//! - A subject is the submitted account number; whether it selects its own
//!   slot is decided by the throttle's key scope

pub mod accounts;
pub mod credentials;
pub mod flow;

pub use accounts::{StaticAllowList, VerificationOracle};
pub use credentials::{AccessRequest, CredentialError};
pub use flow::{AccessGate, AccessOutcome, GateError, GateStatus};
