// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Attack simulation patterns for security testing.

use std::time::Duration;

/// What each simulated request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Well-formed lead
    Valid,
    /// Well-formed lead with the honeypot field filled
    Honeypot,
    /// Missing or malformed required fields
    Invalid,
    /// Markup injection in every field
    Markup,
}

/// Attack pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of requests to send
    pub total_requests: usize,
    /// Simulated gap between consecutive requests
    pub interval: Duration,
    /// Number of distinct client addresses, used round-robin
    pub unique_clients: usize,
    /// Request body kind
    pub payload: Payload,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_requests: 100,
            interval: Duration::from_millis(100),
            unique_clients: 1,
            payload: Payload::Valid,
        }
    }
}

/// Predefined attack patterns.
impl AttackConfig {
    /// Single client flooding the form.
    pub fn single_client_flood() -> Self {
        Self {
            total_requests: 200,
            interval: Duration::from_millis(10),
            ..Default::default()
        }
    }

    /// Many clients, each sending a short burst.
    pub fn distributed_burst() -> Self {
        Self {
            total_requests: 500,
            interval: Duration::from_millis(20),
            unique_clients: 100,
            ..Default::default()
        }
    }

    /// Form-filling bots that also fill the hidden field.
    pub fn honeypot_bots() -> Self {
        Self {
            total_requests: 50,
            interval: Duration::from_millis(50),
            unique_clients: 10,
            payload: Payload::Honeypot,
        }
    }

    /// Junk submissions probing the validator.
    pub fn junk_submissions() -> Self {
        Self {
            total_requests: 60,
            interval: Duration::from_millis(50),
            unique_clients: 20,
            payload: Payload::Invalid,
        }
    }

    /// Script and markup injection through every field.
    pub fn markup_injection() -> Self {
        Self {
            total_requests: 30,
            interval: Duration::from_millis(50),
            unique_clients: 30,
            payload: Payload::Markup,
        }
    }

    /// One client staying just under the limit.
    pub fn slow_drip() -> Self {
        Self {
            total_requests: 30,
            interval: Duration::from_secs(21),
            ..Default::default()
        }
    }

    /// Simulated time the attack spans.
    pub fn simulated_duration(&self) -> Duration {
        self.interval * self.total_requests as u32
    }
}
