//! Per-user sliding window rate limiting.
//!
//! Each user gets an ordered list of recent request timestamps. A check
//! prunes stamps older than the window, rejects with a retry delay when the
//! window is full, and records the new stamp otherwise. Entries are mutated
//! under the map's entry guard, so two overlapping checks for the same user
//! cannot both slip past the limit.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Configuration for the sliding window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests allowed inside one window.
    #[serde(default = "RateLimitConfig::default_max_requests")]
    pub max_requests: u32,
    /// Window length in seconds.
    #[serde(default = "RateLimitConfig::default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: Self::default_max_requests(),
            window_secs: Self::default_window_secs(),
        }
    }
}

impl RateLimitConfig {
    pub(crate) fn default_max_requests() -> u32 {
        6
    }

    pub(crate) fn default_window_secs() -> u64 {
        60
    }

    pub fn with_max_requests(mut self, max_requests: u32) -> Self {
        self.max_requests = max_requests;
        self
    }

    pub fn with_window_secs(mut self, window_secs: u64) -> Self {
        self.window_secs = window_secs;
        self
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn validate(&self) -> Result<(), RateLimitError> {
        if self.max_requests == 0 {
            return Err(RateLimitError::InvalidConfig(
                "max_requests must be greater than zero".into(),
            ));
        }
        if self.window_secs == 0 {
            return Err(RateLimitError::InvalidConfig(
                "window_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateLimitError {
    #[error("invalid rate limit configuration: {0}")]
    InvalidConfig(String),
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    /// Rejected; retry after the given number of whole seconds (>= 1).
    Limited { retry_after_secs: u64 },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed)
    }
}

/// Aggregate limiter counters, for stats reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitStats {
    pub total_checks: u64,
    pub total_limited: u64,
    pub tracked_users: u64,
}

/// Sliding window limiter keyed by user id.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    config: RateLimitConfig,
    windows: DashMap<u64, Vec<Instant>>,
    total_checks: AtomicU64,
    total_limited: AtomicU64,
}

impl SlidingWindowLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: DashMap::new(),
            total_checks: AtomicU64::new(0),
            total_limited: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Check whether `user_id` may make a request right now, recording the
    /// request if allowed.
    pub fn check(&self, user_id: u64) -> RateDecision {
        self.check_at(user_id, Instant::now())
    }

    fn check_at(&self, user_id: u64, now: Instant) -> RateDecision {
        self.total_checks.fetch_add(1, Ordering::Relaxed);
        let window = self.config.window();

        let mut entry = self.windows.entry(user_id).or_default();
        let stamps = entry.value_mut();
        stamps.retain(|t| now.duration_since(*t) < window);

        if stamps.len() as u32 >= self.config.max_requests {
            // Oldest stamp is first; the caller may retry once it ages out.
            let remaining = window.saturating_sub(now.duration_since(stamps[0]));
            let retry_after_secs = (remaining.as_secs_f64().ceil() as u64).max(1);
            self.total_limited.fetch_add(1, Ordering::Relaxed);
            debug!(user_id, retry_after_secs, "rate_limited");
            return RateDecision::Limited { retry_after_secs };
        }

        stamps.push(now);
        RateDecision::Allowed
    }

    /// Drop users whose windows have fully aged out. Keeps the map bounded
    /// by recent callers rather than every user ever seen. Returns the
    /// number of users evicted.
    pub fn evict_idle(&self) -> usize {
        self.evict_idle_at(Instant::now())
    }

    fn evict_idle_at(&self, now: Instant) -> usize {
        let window = self.config.window();
        // Count removals inside the sweep; diffing map lengths taken
        // before and after races with concurrent check() insertions.
        let mut evicted = 0usize;
        self.windows.retain(|_, stamps| {
            let live = stamps.iter().any(|t| now.duration_since(*t) < window);
            if !live {
                evicted += 1;
            }
            live
        });
        if evicted > 0 {
            debug!(evicted, "rate_limiter_evicted_idle_users");
        }
        evicted
    }

    pub fn stats(&self) -> RateLimitStats {
        RateLimitStats {
            total_checks: self.total_checks.load(Ordering::Relaxed),
            total_limited: self.total_limited.load(Ordering::Relaxed),
            tracked_users: self.windows.len() as u64,
        }
    }
}

impl Default for SlidingWindowLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
