//! Shared utilities for integration tests.

use std::path::PathBuf;
use std::sync::{Arc, Barrier};

use attempt_throttle::config::ThrottleConfig;
use attempt_throttle::store::{MemoryStore, StateStore, StoreError};
use attempt_throttle::throttle::{AttemptThrottle, ManualClock, ThrottleState};

pub const START: u64 = 1_700_000_000_000;
#[allow(dead_code)]
pub const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// A unique storage file under the system temp dir.
pub fn temp_store_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("attempt-throttle-{}-{}.json", name, uuid::Uuid::new_v4()))
}

/// Seed `key` with a record directly, bypassing the throttle.
#[allow(dead_code)]
pub fn seed<S: StateStore>(store: &S, key: &str, state: ThrottleState) {
    store.set(key, &state.encode().unwrap()).unwrap();
}

/// Throttle with default config and a shared manual clock.
pub fn throttle<S: StateStore>(
    store: S,
    clock: &Arc<ManualClock>,
) -> AttemptThrottle<S, Arc<ManualClock>> {
    AttemptThrottle::with_clock(ThrottleConfig::default(), store, clock.clone())
}

/// A store whose reads block until every participant has read.
///
/// Lets two throttles perform their read before either writes, which is the
/// interleaving two browser tabs can hit.
#[allow(dead_code)]
pub struct InterleavingStore {
    inner: MemoryStore,
    barrier: Barrier,
}

#[allow(dead_code)]
impl InterleavingStore {
    pub fn new(inner: MemoryStore, participants: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(participants),
        }
    }
}

impl StateStore for InterleavingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self.inner.get(key)?;
        self.barrier.wait();
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set(key, value)
    }
}
