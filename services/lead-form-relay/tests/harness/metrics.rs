// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Metrics collection for attack simulation results.

use std::collections::HashMap;
use std::time::Duration;

/// Collects metrics during attack simulation.
#[derive(Debug, Default)]
pub struct AttackMetrics {
    /// Count of requests by outcome
    outcomes: HashMap<Outcome, usize>,
    /// Count of requests by client
    requests_per_client: HashMap<String, usize>,
    /// Latency samples (microseconds)
    latencies: Vec<u64>,
}

/// Possible outcomes for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Delivered,
    Trapped,
    RateLimited,
    Invalid,
    Failed,
}

impl AttackMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request outcome.
    pub fn record(&mut self, outcome: Outcome, client: &str, latency: Duration) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        *self.requests_per_client.entry(client.to_string()).or_insert(0) += 1;
        self.latencies.push(latency.as_micros() as u64);
    }

    pub fn total_requests(&self) -> usize {
        self.outcomes.values().sum()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Ratio of requests that did not result in a delivered lead.
    pub fn block_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            return 0.0;
        }
        (total - self.count(Outcome::Delivered)) as f64 / total as f64
    }

    pub fn median_latency_us(&self) -> u64 {
        if self.latencies.is_empty() {
            return 0;
        }
        let mut sorted = self.latencies.clone();
        sorted.sort_unstable();
        sorted[sorted.len() / 2]
    }

    pub fn unique_clients(&self) -> usize {
        self.requests_per_client.len()
    }

    /// Generate a summary report.
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            total_requests: self.total_requests(),
            delivered: self.count(Outcome::Delivered),
            trapped: self.count(Outcome::Trapped),
            rate_limited: self.count(Outcome::RateLimited),
            invalid: self.count(Outcome::Invalid),
            failed: self.count(Outcome::Failed),
            block_rate: self.block_rate(),
            median_latency_us: self.median_latency_us(),
            unique_clients: self.unique_clients(),
        }
    }
}

/// Summary report of attack metrics.
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub total_requests: usize,
    pub delivered: usize,
    pub trapped: usize,
    pub rate_limited: usize,
    pub invalid: usize,
    pub failed: usize,
    pub block_rate: f64,
    pub median_latency_us: u64,
    pub unique_clients: usize,
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Attack Metrics Report ===")?;
        writeln!(f, "Total Requests:    {}", self.total_requests)?;
        writeln!(f, "Unique Clients:    {}", self.unique_clients)?;
        writeln!(f)?;
        writeln!(f, "--- Outcomes ---")?;
        writeln!(f, "Delivered:         {}", self.delivered)?;
        writeln!(f, "Trapped:           {}", self.trapped)?;
        writeln!(f, "Rate Limited:      {}", self.rate_limited)?;
        writeln!(f, "Invalid:           {}", self.invalid)?;
        writeln!(f, "Failed:            {}", self.failed)?;
        writeln!(f, "Block Rate:        {:.1}%", self.block_rate * 100.0)?;
        writeln!(f, "Median Latency:    {} us", self.median_latency_us)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_rate() {
        let mut metrics = AttackMetrics::new();
        for _ in 0..3 {
            metrics.record(Outcome::Delivered, "10.0.0.1", Duration::ZERO);
        }
        for _ in 0..7 {
            metrics.record(Outcome::RateLimited, "10.0.0.1", Duration::ZERO);
        }

        assert_eq!(metrics.total_requests(), 10);
        assert_eq!(metrics.unique_clients(), 1);
        assert!((metrics.block_rate() - 0.7).abs() < 0.01);
    }
}
