// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus metrics for the relay.

use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Service metrics, registered on a private registry.
#[derive(Clone)]
pub struct LeadMetrics {
    registry: Registry,
    submissions: IntCounterVec,
    tracked_clients: IntGauge,
}

impl LeadMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let submissions = IntCounterVec::new(
            Opts::new("lead_submissions_total", "Lead form requests by outcome"),
            &["outcome"],
        )?;
        let tracked_clients = IntGauge::new(
            "lead_rate_limit_tracked_clients",
            "Client addresses currently held by the rate limiter",
        )?;

        registry.register(Box::new(submissions.clone()))?;
        registry.register(Box::new(tracked_clients.clone()))?;

        Ok(Self {
            registry,
            submissions,
            tracked_clients,
        })
    }

    pub fn record(&self, outcome: &str) {
        self.submissions.with_label_values(&[outcome]).inc();
    }

    pub fn submissions(&self, outcome: &str) -> u64 {
        self.submissions.with_label_values(&[outcome]).get()
    }

    pub fn set_tracked_clients(&self, count: usize) {
        self.tracked_clients.set(count as i64);
    }

    /// Encode all metrics in the Prometheus text format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
