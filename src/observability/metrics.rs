//! Throttle metrics.
//!
//! # Metrics
//! - `throttle_failures_total` (counter): failures recorded while unlocked
//! - `throttle_lockouts_total` (counter): unlocked → locked transitions
//! - `throttle_unlocks_total` (counter): locks cleared, by reason (`expired`, `reset`)
//! - `throttle_storage_fallbacks_total` (counter): reads that fell back to defaults, by reason
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the embedding application installs a recorder
//! - No recorder installed means every call is a no-op

use metrics::counter;

pub fn record_failure() {
    counter!("throttle_failures_total").increment(1);
}

pub fn record_lockout() {
    counter!("throttle_lockouts_total").increment(1);
}

pub fn record_unlock(reason: &'static str) {
    counter!("throttle_unlocks_total", "reason" => reason).increment(1);
}

pub fn record_storage_fallback(reason: &'static str) {
    counter!("throttle_storage_fallbacks_total", "reason" => reason).increment(1);
}
