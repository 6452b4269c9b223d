// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sliding-window rate limiter for lead submissions.
//!
//! Each client keeps the instants of its recent accepted submissions. A
//! request is allowed while fewer than `max_requests` of those instants fall
//! inside the trailing window; blocked attempts are not recorded.
//!
//! State lives in process memory, so limits are per instance and reset on
//! restart. Callers go through [`AbuseGate`] so a shared store can replace
//! the in-memory map without touching the handlers.

use crate::config::RateLimitConfig;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Request is allowed
    Allowed {
        /// Remaining requests in current window
        remaining: usize,
        /// Time until the oldest counted request leaves the window
        reset_in: Duration,
    },
    /// Request is rate limited
    Limited {
        /// Time until the client is allowed again
        retry_after: Duration,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }
}

/// Decides whether a client may submit right now.
#[async_trait]
pub trait AbuseGate: Send + Sync {
    /// Check and record a submission attempt for `client` at `now`.
    async fn check(&self, client: &str, now: Instant) -> RateLimitResult;

    /// Convenience form of [`AbuseGate::check`].
    async fn allow(&self, client: &str, now: Instant) -> bool {
        self.check(client, now).await.is_allowed()
    }
}

/// Accepted request instants for one client, oldest first.
#[derive(Debug, Default)]
struct RequestWindow {
    timestamps: VecDeque<Instant>,
}

impl RequestWindow {
    /// Drop every timestamp at or before `window_start`.
    fn prune(&mut self, window_start: Option<Instant>) {
        let Some(start) = window_start else {
            return;
        };
        while self.timestamps.front().is_some_and(|t| *t <= start) {
            self.timestamps.pop_front();
        }
    }

    fn last_seen(&self) -> Option<Instant> {
        self.timestamps.back().copied()
    }

    fn is_idle(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Thread-safe in-memory sliding-window rate limiter.
pub struct RateLimiter {
    /// Configuration
    config: RateLimitConfig,
    /// Per-client request windows
    windows: Arc<RwLock<HashMap<String, RequestWindow>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn window_start(&self, now: Instant) -> Option<Instant> {
        now.checked_sub(self.config.window_duration())
    }

    /// Check the rate limit for a client, recording the attempt if allowed.
    pub async fn check_client(&self, client: &str, now: Instant) -> RateLimitResult {
        let window = self.config.window_duration();
        let window_start = self.window_start(now);
        let max = self.config.max_requests;

        // Read, prune and append under one guard
        let mut windows = self.windows.write().await;

        if !windows.contains_key(client) && windows.len() >= self.config.max_tracked_clients {
            make_room(&mut windows, window_start);
        }

        let entry = windows.entry(client.to_string()).or_default();
        entry.prune(window_start);

        if entry.timestamps.len() >= max {
            let retry_after = entry
                .timestamps
                .front()
                .map(|oldest| (*oldest + window).saturating_duration_since(now))
                .unwrap_or(window);
            debug!(client, ?retry_after, "Client rate limit exceeded");
            return RateLimitResult::Limited { retry_after };
        }

        entry.timestamps.push_back(now);
        let remaining = max - entry.timestamps.len();
        let reset_in = entry
            .timestamps
            .front()
            .map(|oldest| (*oldest + window).saturating_duration_since(now))
            .unwrap_or(window);

        RateLimitResult::Allowed { remaining, reset_in }
    }

    /// Remove clients with no timestamps left inside the window.
    pub async fn cleanup(&self, now: Instant) -> usize {
        let window_start = self.window_start(now);
        let mut windows = self.windows.write().await;
        let before = windows.len();

        windows.retain(|_, w| {
            w.prune(window_start);
            !w.is_idle()
        });

        let removed = before - windows.len();
        if removed > 0 {
            debug!(removed, tracked = windows.len(), "Swept idle rate limit entries");
        }
        removed
    }

    /// Number of clients currently tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.windows.read().await.len()
    }
}

/// Free one slot in a full map: drop idle clients, then if still full evict
/// the client seen least recently.
fn make_room(windows: &mut HashMap<String, RequestWindow>, window_start: Option<Instant>) {
    windows.retain(|_, w| {
        w.prune(window_start);
        !w.is_idle()
    });

    if windows.is_empty() {
        return;
    }

    let stalest = windows
        .iter()
        .min_by_key(|(_, w)| w.last_seen())
        .map(|(client, _)| client.clone());

    if let Some(client) = stalest {
        warn!(evicted = %client, "Rate limit table full, evicting least recent client");
        windows.remove(&client);
    }
}

#[async_trait]
impl AbuseGate for RateLimiter {
    async fn check(&self, client: &str, now: Instant) -> RateLimitResult {
        self.check_client(client, now).await
    }
}
