//! Attempt throttle over a single storage slot.

use crate::config::ThrottleConfig;
use crate::observability::metrics;
use crate::store::{StateStore, StoreError};
use crate::throttle::clock::{Clock, SystemClock};
use crate::throttle::state::ThrottleState;

/// Counts caller-reported failures for one slot and locks it at the limit.
///
/// Every operation is a plain read-then-write against the store. Two throttles
/// sharing a slot can interleave and lose an increment.
pub struct AttemptThrottle<S, C = SystemClock> {
    config: ThrottleConfig,
    store: S,
    clock: C,
    key: String,
}

impl<S: StateStore> AttemptThrottle<S, SystemClock> {
    pub fn new(config: ThrottleConfig, store: S) -> Self {
        Self::with_clock(config, store, SystemClock)
    }
}

impl<S: StateStore, C: Clock> AttemptThrottle<S, C> {
    pub fn with_clock(config: ThrottleConfig, store: S, clock: C) -> Self {
        let key = config.storage_key.clone();
        Self {
            config,
            store,
            clock,
            key,
        }
    }

    /// Resolve the slot for `subject` according to the configured key scope.
    pub fn for_subject(mut self, subject: Option<&str>) -> Self {
        self.key = self.config.key_scope.resolve(&self.config.storage_key, subject);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    /// Current state, clearing a lock whose expiry has passed.
    pub fn inspect(&self) -> ThrottleState {
        let state = self.load();
        if state.lock_expired(self.clock.now_millis()) {
            tracing::info!(key = %self.key, expired_at = ?state.lock_expires_at, "Lock expired, clearing attempts");
            metrics::record_unlock("expired");
            let fresh = ThrottleState::fresh();
            self.save(&fresh);
            return fresh;
        }
        state
    }

    /// Record one failed verification.
    ///
    /// A locked slot is returned untouched, even if its expiry has already
    /// passed; only `inspect` clears expired locks.
    pub fn record_failure(&self) -> ThrottleState {
        let current = self.load();
        if current.locked {
            tracing::debug!(key = %self.key, attempts = current.attempts, "Failure ignored while locked");
            return current;
        }

        let attempts = current.attempts.saturating_add(1);
        let locked = attempts >= self.config.max_attempts;
        let lock_expires_at = locked.then(|| {
            let duration = self.config.lock_duration().as_millis() as u64;
            self.clock.now_millis().saturating_add(duration)
        });
        let next = ThrottleState {
            attempts,
            locked,
            lock_expires_at,
        };

        metrics::record_failure();
        if locked {
            metrics::record_lockout();
            tracing::warn!(key = %self.key, attempts, expires_at = ?lock_expires_at, "Attempt limit reached, slot locked");
        } else {
            tracing::debug!(key = %self.key, attempts, max_attempts = self.config.max_attempts, "Failure recorded");
        }

        self.save(&next);
        next
    }

    /// Clear the slot back to zero attempts, unlocked.
    pub fn reset(&self) {
        tracing::debug!(key = %self.key, "Throttle reset");
        metrics::record_unlock("reset");
        self.save(&ThrottleState::fresh());
    }

    /// Alias of [`inspect`](Self::inspect) under the form-facing name.
    pub fn check_locked(&self) -> ThrottleState {
        self.inspect()
    }

    /// Alias of [`record_failure`](Self::record_failure) under the form-facing name.
    pub fn attempt(&self) -> ThrottleState {
        self.record_failure()
    }

    /// A lock below the attempt limit counts as malformed.
    fn load(&self) -> ThrottleState {
        match self.store.get(&self.key) {
            Ok(Some(raw)) => ThrottleState::decode(&raw)
                .filter(|state| !state.locked || state.attempts >= self.config.max_attempts)
                .unwrap_or_else(|| {
                    tracing::warn!(key = %self.key, "Stored throttle record is malformed, using defaults");
                    metrics::record_storage_fallback("malformed_record");
                    ThrottleState::fresh()
                }),
            Ok(None) => ThrottleState::fresh(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Throttle read failed, using defaults");
                metrics::record_storage_fallback("read_error");
                ThrottleState::fresh()
            }
        }
    }

    fn save(&self, state: &ThrottleState) {
        let result = state
            .encode()
            .map_err(StoreError::from)
            .and_then(|raw| self.store.set(&self.key, &raw));
        if let Err(e) = result {
            tracing::error!(key = %self.key, error = %e, "Failed to persist throttle state");
        }
    }
}
