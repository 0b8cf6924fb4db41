//! Access form flows around the throttle.

use std::time::Duration;
use thiserror::Error;

use crate::config::{CountingPolicy, PortalConfig, ThrottleConfig};
use crate::portal::accounts::VerificationOracle;
use crate::portal::credentials::{AccessRequest, CredentialError};
use crate::store::StateStore;
use crate::throttle::{
    attempts_remaining, banner, AttemptThrottle, AttemptWarning, Clock, SystemClock, ThrottleState,
};

/// Errors raised by gate operations that can be refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("manual reset is disabled")]
    ManualResetDisabled,
}

/// Result of one form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessOutcome {
    /// Credentials matched; the slot was reset.
    Verified,
    /// Credentials did not match.
    Rejected {
        state: ThrottleState,
        warning: Option<AttemptWarning>,
    },
    /// The slot is locked; nothing was verified.
    Locked { state: ThrottleState },
    /// The form was refused before counting.
    Invalid(CredentialError),
}

/// Snapshot of a slot for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateStatus {
    pub key: String,
    pub state: ThrottleState,
    pub attempts_remaining: u32,
    pub banner: Option<String>,
}

/// Runs submissions through validation, the throttle and the oracle.
pub struct AccessGate<S, O, C = SystemClock> {
    throttle: ThrottleConfig,
    counting: CountingPolicy,
    store: S,
    oracle: O,
    clock: C,
}

impl<S: StateStore, O: VerificationOracle> AccessGate<S, O, SystemClock> {
    pub fn new(config: &PortalConfig, store: S, oracle: O) -> Self {
        Self::with_clock(config, store, oracle, SystemClock)
    }
}

impl<S: StateStore, O: VerificationOracle, C: Clock> AccessGate<S, O, C> {
    pub fn with_clock(config: &PortalConfig, store: S, oracle: O, clock: C) -> Self {
        Self {
            throttle: config.throttle.clone(),
            counting: config.gate.counting,
            store,
            oracle,
            clock,
        }
    }

    pub fn counting(&self) -> CountingPolicy {
        self.counting
    }

    fn throttle_for(&self, subject: Option<&str>) -> AttemptThrottle<&S, &C> {
        AttemptThrottle::with_clock(self.throttle.clone(), &self.store, &self.clock)
            .for_subject(subject)
    }

    fn lock_duration(&self) -> Duration {
        self.throttle.lock_duration()
    }

    /// Process one submission.
    ///
    /// The slot is inspected first, so an expired lock is cleared and a live
    /// one wins over field checks.
    pub fn submit(&self, request: &AccessRequest) -> AccessOutcome {
        let throttle = self.throttle_for(Some(request.account_number.as_str()));
        let max_attempts = throttle.max_attempts();

        let state = throttle.check_locked();
        if state.locked {
            return AccessOutcome::Locked { state };
        }

        if let Err(e) = request.validate() {
            tracing::debug!(error = %e, "Submission refused by field checks");
            return AccessOutcome::Invalid(e);
        }

        let counted = match self.counting {
            CountingPolicy::EverySubmission => {
                let state = throttle.attempt();
                if state.locked {
                    return AccessOutcome::Locked { state };
                }
                Some(state)
            }
            CountingPolicy::FailuresOnly => None,
        };

        tracing::info!(
            key = %throttle.key(),
            account_number = %request.account_number,
            "Verification attempt"
        );

        if self.oracle.verify(request) {
            tracing::info!(key = %throttle.key(), "Account verified");
            throttle.reset();
            return AccessOutcome::Verified;
        }

        let state = match counted {
            Some(state) => state,
            None => {
                let state = throttle.attempt();
                if state.locked {
                    return AccessOutcome::Locked { state };
                }
                state
            }
        };

        tracing::info!(key = %throttle.key(), attempts = state.attempts, "Verification failed");
        AccessOutcome::Rejected {
            state,
            warning: AttemptWarning::after_attempt(&state, max_attempts),
        }
    }

    /// Current slot status, applying lazy expiry.
    pub fn status(&self, subject: Option<&str>) -> GateStatus {
        let throttle = self.throttle_for(subject);
        let state = throttle.check_locked();
        self.render(throttle.key(), state)
    }

    /// Record a failure reported outside of `submit`.
    pub fn record_failure(&self, subject: Option<&str>) -> GateStatus {
        let throttle = self.throttle_for(subject);
        let state = throttle.attempt();
        self.render(throttle.key(), state)
    }

    /// The demo "reset limiter" control. Refused unless `manual_reset` is enabled.
    pub fn manual_reset(&self, subject: Option<&str>) -> Result<GateStatus, GateError> {
        if !self.throttle.manual_reset {
            return Err(GateError::ManualResetDisabled);
        }
        let throttle = self.throttle_for(subject);
        tracing::warn!(key = %throttle.key(), "Manual throttle reset (demo only)");
        throttle.reset();
        Ok(self.render(throttle.key(), ThrottleState::fresh()))
    }

    fn render(&self, key: &str, state: ThrottleState) -> GateStatus {
        let max_attempts = self.throttle.max_attempts;
        GateStatus {
            key: key.to_string(),
            state,
            attempts_remaining: attempts_remaining(&state, max_attempts),
            banner: banner(&state, max_attempts, self.lock_duration()),
        }
    }
}
