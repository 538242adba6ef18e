//! Fixed-window request counter with request-driven expiry

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tracing::debug;

use crate::config::RateLimitConfig;

use super::identity::IdentityKey;

/// Outcome of an admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The request may proceed
    Allowed,
    /// The identity exhausted its window
    Denied,
}

impl Admission {
    /// Whether the request may proceed
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Counter state for one identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    /// Requests admitted in the current window
    pub count: u32,
    /// When the current window opened
    pub window_start: DateTime<Utc>,
}

impl RateLimitEntry {
    fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            count: 1,
            window_start: now,
        }
    }

    fn is_expired(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now - self.window_start > window
    }
}

/// Fixed-window rate limiter keyed by hashed client identity
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    entries: Mutex<HashMap<IdentityKey, RateLimitEntry>>,
}

impl RateLimiter {
    /// Create a limiter from configuration
    pub fn new(config: RateLimitConfig) -> Self {
        let window_ms = i64::try_from(config.window_ms).unwrap_or(i64::MAX);
        Self {
            window: Duration::milliseconds(window_ms),
            max_requests: config.max_requests,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Admit or deny one request for `key` at `now`.
    ///
    /// Expired entries for every identity are swept first, so the sweep and
    /// the per-key update happen under one lock acquisition.
    pub fn admit(&self, key: &IdentityKey, now: DateTime<Utc>) -> Admission {
        let mut entries = self.entries.lock();
        sweep_expired(&mut entries, now, self.window);

        match entries.get_mut(key) {
            None => {
                entries.insert(key.clone(), RateLimitEntry::fresh(now));
                Admission::Allowed
            }
            Some(entry) if entry.is_expired(now, self.window) => {
                *entry = RateLimitEntry::fresh(now);
                Admission::Allowed
            }
            Some(entry) if entry.count >= self.max_requests => {
                debug!(identity = %key, count = entry.count, "Rate limit exceeded");
                Admission::Denied
            }
            Some(entry) => {
                entry.count += 1;
                Admission::Allowed
            }
        }
    }

    /// Drop every entry whose window elapsed before `now`
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        sweep_expired(&mut self.entries.lock(), now, self.window)
    }

    /// Current state for `key`, if tracked
    pub fn entry(&self, key: &IdentityKey) -> Option<RateLimitEntry> {
        self.entries.lock().get(key).copied()
    }

    /// Number of tracked identities
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether no identity is tracked
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Requests admitted per identity within one window
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

fn sweep_expired(
    entries: &mut HashMap<IdentityKey, RateLimitEntry>,
    now: DateTime<Utc>,
    window: Duration,
) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| !entry.is_expired(now, window));
    let swept = before - entries.len();

    if swept > 0 {
        debug!(swept, remaining = entries.len(), "Swept expired rate-limit entries");
    }
    swept
}
