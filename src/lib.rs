//! Attempt throttle for the customer portal access forms.

pub mod config;
pub mod observability;
pub mod portal;
pub mod store;
pub mod throttle;

pub use config::PortalConfig;
pub use portal::{AccessGate, AccessOutcome, AccessRequest};
pub use store::{FileStore, MemoryStore, StateStore};
pub use throttle::{AttemptThrottle, ThrottleState};
