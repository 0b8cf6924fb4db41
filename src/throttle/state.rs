//! Persisted throttle record.
//!
//! # Wire Format
//! ```text
//! { "attempts": 3, "locked": false }
//! { "attempts": 5, "locked": true, "timeout": 1735689600000 }
//! ```
//!
//! `timeout` is the absolute lock expiry in epoch milliseconds and is omitted
//! while unlocked.

use serde::{Deserialize, Serialize};

/// Attempt count and lock status for one storage slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThrottleState {
    /// Failures recorded since the last reset.
    pub attempts: u32,
    /// Set once `attempts` reaches the configured maximum.
    pub locked: bool,
    /// Lock expiry (epoch ms). Present only while locked.
    #[serde(rename = "timeout", default, skip_serializing_if = "Option::is_none")]
    pub lock_expires_at: Option<u64>,
}

impl ThrottleState {
    /// The unlocked, zero-attempt record.
    pub const fn fresh() -> Self {
        Self {
            attempts: 0,
            locked: false,
            lock_expires_at: None,
        }
    }

    /// Decode a stored record.
    ///
    /// Returns `None` for anything that is not a well-formed record, including
    /// records whose lock flag and expiry disagree.
    pub fn decode(raw: &str) -> Option<Self> {
        let state: Self = serde_json::from_str(raw).ok()?;
        state.is_consistent().then_some(state)
    }

    /// Encode for storage.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// `locked` and `lock_expires_at` must be set together.
    pub fn is_consistent(&self) -> bool {
        self.locked == self.lock_expires_at.is_some()
    }

    /// True when the record is locked and its expiry lies strictly before `now_ms`.
    pub fn lock_expired(&self, now_ms: u64) -> bool {
        match (self.locked, self.lock_expires_at) {
            (true, Some(expires_at)) => now_ms > expires_at,
            _ => false,
        }
    }
}
