//! In-process feature cache with a single shared expiry window.
//!
//! All entries share one `initialized_at` timestamp set by the first write
//! after the cache was last cleared. Once that window exceeds the TTL the
//! whole cache is dropped on the next access; there is no background sweep.

use chrono::{DateTime, Utc};
use sigmet_core::{CacheKey, Feature};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::clock::Clock;

#[derive(Debug, Default)]
struct CacheState {
    initialized_at: Option<DateTime<Utc>>,
    entries: HashMap<CacheKey, Vec<Feature>>,
}

impl CacheState {
    fn clear(&mut self) {
        self.initialized_at = None;
        self.entries.clear();
    }
}

pub struct FeatureCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    state: Mutex<CacheState>,
}

impl FeatureCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            state: Mutex::new(CacheState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_expired(&self, initialized_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        // A clock that moved backwards yields a negative age, which never expires.
        (now - initialized_at)
            .to_std()
            .map(|age| age > self.ttl)
            .unwrap_or(false)
    }

    /// Cached features for `key`, or `None` on a miss or an expired window.
    pub fn get(&self, key: &CacheKey) -> Option<Vec<Feature>> {
        let now = self.clock.now();
        let mut state = self.lock();

        let initialized_at = state.initialized_at?;
        if self.is_expired(initialized_at, now) {
            tracing::debug!(entries = state.entries.len(), "Feature cache expired, clearing");
            state.clear();
            return None;
        }

        state.entries.get(key).cloned()
    }

    /// Store `features` under `key`, opening a new window if none is live.
    pub fn put(&self, key: CacheKey, features: Vec<Feature>) {
        let now = self.clock.now();
        let mut state = self.lock();

        match state.initialized_at {
            Some(initialized_at) if !self.is_expired(initialized_at, now) => {}
            _ => {
                state.clear();
                state.initialized_at = Some(now);
            }
        }

        state.entries.insert(key, features);
    }

    /// Start of the current window, if any entry is live.
    pub fn initialized_at(&self) -> Option<DateTime<Utc>> {
        self.lock().initialized_at
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
