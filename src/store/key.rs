//! Storage slot naming.

use serde::{Deserialize, Serialize};

/// Slot used when every caller shares one throttle.
pub const DEFAULT_STORAGE_KEY: &str = "hauler-hero-rate-limiter";

/// How callers are mapped onto storage slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyScope {
    /// Every subject shares the base key.
    #[default]
    Shared,
    /// Each subject gets `<base>:<subject>`.
    PerSubject,
}

impl KeyScope {
    /// Resolve the slot for `subject` under `base`.
    ///
    /// A missing or blank subject always maps to the base key.
    pub fn resolve(self, base: &str, subject: Option<&str>) -> String {
        match (self, subject.map(normalize_subject)) {
            (KeyScope::PerSubject, Some(subject)) if !subject.is_empty() => {
                format!("{base}:{subject}")
            }
            _ => base.to_string(),
        }
    }
}

fn normalize_subject(subject: &str) -> String {
    subject.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_scope_ignores_subject() {
        let key = KeyScope::Shared.resolve(DEFAULT_STORAGE_KEY, Some("1001"));
        assert_eq!(key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_per_subject_scope_normalizes() {
        let key = KeyScope::PerSubject.resolve("limiter", Some("  ACCT-1001 "));
        assert_eq!(key, "limiter:acct-1001");
    }

    #[test]
    fn test_per_subject_blank_falls_back_to_base() {
        assert_eq!(KeyScope::PerSubject.resolve("limiter", Some("   ")), "limiter");
        assert_eq!(KeyScope::PerSubject.resolve("limiter", None), "limiter");
    }
}
