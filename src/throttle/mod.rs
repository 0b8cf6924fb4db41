//! Attempt throttling subsystem.
//!
//! # States
//! - Unlocked: failures are counted
//! - Locked: failures are ignored until the lock expires or is reset
//!
//! # State Transitions
//! ```text
//! Unlocked(k)     → Unlocked(k+1): record_failure, k+1 < max_attempts
//! Unlocked(max-1) → Locked:        record_failure, expiry = now + lock_duration
//! Locked          → Locked:        record_failure (no-op)
//! Locked          → Unlocked(0):   inspect after expiry
//! any             → Unlocked(0):   reset
//! ```
//!
//! # Design Decisions
//! - Expiry is evaluated lazily on `inspect`, never by a timer
//! - The throttle only counts; callers decide what a failure is
//! - Reads fail open: missing, malformed or unreadable records become defaults

pub mod clock;
pub mod limiter;
pub mod state;
pub mod warning;

pub use clock::{Clock, ManualClock, SystemClock};
pub use limiter::AttemptThrottle;
pub use state::ThrottleState;
pub use warning::{attempts_remaining, banner, AttemptWarning};
