//! Admission gate: per-identity fixed-window request counting
//!
//! Each identity gets a bucket `{count, window_start}`. On every call the
//! bucket is reset if the window has elapsed, then incremented, and the call
//! is admitted while `count <= max_requests`. Rejected calls still consume a
//! slot. Buckets are never evicted.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::Clock;

/// Admission gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Maximum admitted requests per identity per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

// chrono::Duration holds milliseconds in an i64
const MAX_WINDOW_SECS: u64 = (i64::MAX / 1000) as u64;

fn default_window_secs() -> u64 { 10 * 60 }
fn default_max_requests() -> u32 { 5 }

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_requests: default_max_requests(),
        }
    }
}

/// Request count for one identity in its current window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateBucket {
    pub count: u32,
    pub window_start: DateTime<Utc>,
}

/// Per-identity admission gate.
///
/// The `DashMap` entry guard holds the shard lock for the whole
/// reset-increment-compare step, so concurrent calls for one identity are
/// counted exactly once each.
pub struct AdmissionGate {
    buckets: DashMap<String, RateBucket>,
    window: Duration,
    max_requests: u32,
    clock: Arc<dyn Clock>,
}

impl AdmissionGate {
    pub fn new(config: &RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            buckets: DashMap::new(),
            window: Duration::seconds(config.window_secs.min(MAX_WINDOW_SECS) as i64),
            max_requests: config.max_requests,
            clock,
        }
    }

    /// Record a request from `identity` and decide whether it may proceed.
    pub fn admit(&self, identity: &str) -> bool {
        let now = self.clock.now();

        let mut bucket = self
            .buckets
            .entry(identity.to_string())
            .or_insert(RateBucket {
                count: 0,
                window_start: now,
            });

        if now - bucket.window_start > self.window {
            bucket.count = 0;
            bucket.window_start = now;
        }

        bucket.count = bucket.count.saturating_add(1);
        let admitted = bucket.count <= self.max_requests;

        if admitted {
            debug!(identity, count = bucket.count, "Request admitted");
        } else {
            warn!(
                identity,
                count = bucket.count,
                max = self.max_requests,
                "Request rejected by admission gate"
            );
        }

        admitted
    }

    /// Current bucket for an identity, if it has ever made a request.
    pub fn bucket(&self, identity: &str) -> Option<RateBucket> {
        self.buckets.get(identity).map(|b| *b)
    }

    /// Number of identities holding a bucket. Grows without bound.
    pub fn tracked_identities(&self) -> usize {
        self.buckets.len()
    }
}
