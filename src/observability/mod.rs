//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! throttle, store, portal produce:
//!     → logging.rs (structured tracing events, key/attempts/expiry fields)
//!     → metrics.rs (failure, lockout, unlock and fallback counters)
//! ```
//!
//! # Design Decisions
//! - Every state transition is logged with the slot key
//! - Metrics go through the `metrics` facade; exporting is the host's job

pub mod logging;
pub mod metrics;
