//! Caller-side lockout messaging.
//!
//! The throttle itself never warns; these helpers turn a returned
//! [`ThrottleState`] into the notices the access forms show.
//!
//! # Thresholds
//! ```text
//! attempts == max - 2  → AttemptsRemaining(2)
//! attempts == max - 1  → FinalAttempt
//! locked               → Locked
//! ```

use std::fmt;
use std::time::Duration;

use crate::throttle::state::ThrottleState;

/// One-off notice raised right after a recorded attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptWarning {
    /// Two attempts remain before the lock.
    AttemptsRemaining(u32),
    /// The next failure locks the slot.
    FinalAttempt,
    /// The slot is locked.
    Locked { expires_at: Option<u64> },
}

impl AttemptWarning {
    /// Warning for a state just returned by `attempt()`, if any.
    pub fn after_attempt(state: &ThrottleState, max_attempts: u32) -> Option<Self> {
        if state.locked {
            return Some(Self::Locked {
                expires_at: state.lock_expires_at,
            });
        }
        if Some(state.attempts) == max_attempts.checked_sub(1) {
            Some(Self::FinalAttempt)
        } else if Some(state.attempts) == max_attempts.checked_sub(2) {
            Some(Self::AttemptsRemaining(2))
        } else {
            None
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::AttemptsRemaining(_) => "Warning",
            Self::FinalAttempt => "Final Attempt",
            Self::Locked { .. } => "Too many attempts",
        }
    }

    pub fn message(&self, lock_duration: Duration) -> String {
        let duration = HumanDuration(lock_duration);
        match self {
            Self::AttemptsRemaining(n) => {
                format!("You have {n} more attempts before being temporarily locked out")
            }
            Self::FinalAttempt => {
                format!("This is your last attempt before being locked out for {duration}")
            }
            Self::Locked { .. } => format!("Please try again after {duration}"),
        }
    }
}

/// Attempts left before the lock. Zero while locked.
pub fn attempts_remaining(state: &ThrottleState, max_attempts: u32) -> u32 {
    if state.locked {
        0
    } else {
        max_attempts.saturating_sub(state.attempts)
    }
}

/// Persistent banner shown under the form.
///
/// Locked slots get the lockout notice; unlocked slots only get a banner once
/// one or two attempts remain.
pub fn banner(state: &ThrottleState, max_attempts: u32, lock_duration: Duration) -> Option<String> {
    let duration = HumanDuration(lock_duration);
    if state.locked {
        return Some(format!(
            "Your access has been temporarily locked due to too many failed attempts. \
             Please try again after {duration} or contact customer support."
        ));
    }
    match attempts_remaining(state, max_attempts) {
        1 => Some(format!(
            "This is your final attempt before being locked out for {duration}."
        )),
        2 => Some("You have 2 more attempts before being temporarily locked out.".to_string()),
        _ => None,
    }
}

/// Coarse rendering for lockout messages: "24 hours", "5 minutes", "1 second".
struct HumanDuration(Duration);

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        let (value, unit) = if secs >= 3600 && secs % 3600 == 0 {
            (secs / 3600, "hour")
        } else if secs >= 60 && secs % 60 == 0 {
            (secs / 60, "minute")
        } else {
            (secs, "second")
        };
        let plural = if value == 1 { "" } else { "s" };
        write!(f, "{value} {unit}{plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FIXED_LOCK_DURATION;

    fn unlocked(attempts: u32) -> ThrottleState {
        ThrottleState {
            attempts,
            ..ThrottleState::fresh()
        }
    }

    #[test]
    fn test_warning_thresholds() {
        assert_eq!(AttemptWarning::after_attempt(&unlocked(1), 5), None);
        assert_eq!(AttemptWarning::after_attempt(&unlocked(2), 5), None);
        assert_eq!(
            AttemptWarning::after_attempt(&unlocked(3), 5),
            Some(AttemptWarning::AttemptsRemaining(2))
        );
        assert_eq!(
            AttemptWarning::after_attempt(&unlocked(4), 5),
            Some(AttemptWarning::FinalAttempt)
        );

        let locked = ThrottleState {
            attempts: 5,
            locked: true,
            lock_expires_at: Some(42),
        };
        assert_eq!(
            AttemptWarning::after_attempt(&locked, 5),
            Some(AttemptWarning::Locked { expires_at: Some(42) })
        );
    }

    #[test]
    fn test_small_limits_do_not_underflow() {
        assert_eq!(AttemptWarning::after_attempt(&unlocked(0), 1), Some(AttemptWarning::FinalAttempt));
        assert_eq!(
            AttemptWarning::after_attempt(&unlocked(0), 2),
            Some(AttemptWarning::AttemptsRemaining(2))
        );
        assert_eq!(AttemptWarning::after_attempt(&unlocked(1), 0), None);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AttemptWarning::FinalAttempt.message(FIXED_LOCK_DURATION),
            "This is your last attempt before being locked out for 24 hours"
        );
        assert_eq!(
            AttemptWarning::AttemptsRemaining(2).message(FIXED_LOCK_DURATION),
            "You have 2 more attempts before being temporarily locked out"
        );
        assert_eq!(
            AttemptWarning::Locked { expires_at: None }.message(Duration::from_secs(300)),
            "Please try again after 5 minutes"
        );
    }

    #[test]
    fn test_banner() {
        assert_eq!(banner(&unlocked(0), 5, FIXED_LOCK_DURATION), None);
        assert_eq!(banner(&unlocked(2), 5, FIXED_LOCK_DURATION), None);
        assert_eq!(
            banner(&unlocked(3), 5, FIXED_LOCK_DURATION).as_deref(),
            Some("You have 2 more attempts before being temporarily locked out.")
        );
        assert_eq!(
            banner(&unlocked(4), 5, FIXED_LOCK_DURATION).as_deref(),
            Some("This is your final attempt before being locked out for 24 hours.")
        );

        let locked = ThrottleState {
            attempts: 5,
            locked: true,
            lock_expires_at: Some(1),
        };
        assert!(banner(&locked, 5, FIXED_LOCK_DURATION)
            .unwrap()
            .starts_with("Your access has been temporarily locked"));
        assert_eq!(attempts_remaining(&locked, 5), 0);
    }

    #[test]
    fn test_human_duration() {
        assert_eq!(HumanDuration(Duration::from_secs(3600)).to_string(), "1 hour");
        assert_eq!(HumanDuration(Duration::from_secs(90)).to_string(), "90 seconds");
        assert_eq!(HumanDuration(Duration::from_secs(120)).to_string(), "2 minutes");
    }
}
