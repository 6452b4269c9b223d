// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the lead form relay.
//!
//! Every setting has a default matching the recruitment site's deployment,
//! except the SMTP credentials, which must come from the environment.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Configuration for the lead form relay service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Outbound mail configuration
    #[serde(default)]
    pub mail: MailConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Sliding-window rate limiting per client address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum submissions per window per client (default: 3)
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,

    /// Window length in seconds (default: 60)
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Interval between sweeps of idle clients in seconds (default: 60)
    #[serde(default = "default_sweep_secs")]
    pub sweep_interval_secs: u64,

    /// Upper bound on tracked client keys (default: 10000)
    #[serde(default = "default_max_tracked_clients")]
    pub max_tracked_clients: usize,
}

/// Cross-origin configuration for the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Origins whose requests get `Access-Control-Allow-Origin` echoed back
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

/// SMTP relay and notification addressing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default)]
    pub smtp_host: Option<String>,

    /// SMTP port; 465 means implicit TLS, anything else STARTTLS (default: 587)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub smtp_user: Option<String>,

    #[serde(default)]
    pub smtp_pass: Option<String>,

    /// Upper bound on a single send in seconds (default: 15)
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,

    /// Notification recipient
    #[serde(default = "default_lead_to")]
    pub to: String,

    /// Carbon copy recipient; empty disables
    #[serde(default = "default_lead_cc")]
    pub cc: Option<String>,

    /// Display name on the From header
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

/// Configuration that prevents mail from being sent at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing SMTP settings: {}", .0.join(", "))]
    MissingSmtpSettings(Vec<&'static str>),

    #[error("unusable SMTP settings: {0}")]
    InvalidSmtpSettings(String),
}

/// Complete SMTP connection settings, only obtainable from a [`MailConfig`]
/// that has every required value.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_requests() -> usize {
    3
}

fn default_window_secs() -> u64 {
    60
}

fn default_sweep_secs() -> u64 {
    60
}

fn default_max_tracked_clients() -> usize {
    10_000
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "https://sakeenajacobsrecruitment.com".to_string(),
        "https://www.sakeenajacobsrecruitment.com".to_string(),
    ]
}

fn default_smtp_port() -> u16 {
    587
}

fn default_send_timeout_secs() -> u64 {
    15
}

fn default_lead_to() -> String {
    "info@sakeenajacobsrecruitment.com".to_string()
}

fn default_lead_cc() -> Option<String> {
    Some("recruitment@sakeenajacobsrecruitment.com".to_string())
}

fn default_sender_name() -> String {
    "Sakeena Jacobs Recruitment — Lead Form".to_string()
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimitConfig::default(),
            cors: CorsConfig::default(),
            mail: MailConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
            sweep_interval_secs: default_sweep_secs(),
            max_tracked_clients: default_max_tracked_clients(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: default_smtp_port(),
            smtp_user: None,
            smtp_pass: None,
            send_timeout_secs: default_send_timeout_secs(),
            to: default_lead_to(),
            cc: default_lead_cc(),
            sender_name: default_sender_name(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    /// Get the rate window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Get the idle sweep interval
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

impl MailConfig {
    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }

    /// Resolve the SMTP settings, naming every missing value on failure.
    pub fn smtp_settings(&self) -> Result<SmtpSettings, ConfigError> {
        let host = non_empty(&self.smtp_host);
        let user = non_empty(&self.smtp_user);
        let pass = non_empty(&self.smtp_pass);

        match (host, user, pass) {
            (Some(host), Some(user), Some(pass)) => Ok(SmtpSettings {
                host: host.to_string(),
                port: self.smtp_port,
                user: user.to_string(),
                pass: pass.to_string(),
                timeout: self.send_timeout(),
            }),
            (host, user, pass) => {
                let mut missing = Vec::new();
                if host.is_none() {
                    missing.push("SMTP_HOST");
                }
                if user.is_none() {
                    missing.push("SMTP_USER");
                }
                if pass.is_none() {
                    missing.push("SMTP_PASS");
                }
                Err(ConfigError::MissingSmtpSettings(missing))
            }
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Config {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            rate_limit: RateLimitConfig {
                max_requests: parse_var(&lookup, "RATE_LIMIT_MAX")
                    .unwrap_or(defaults.rate_limit.max_requests),
                window_secs: parse_var(&lookup, "RATE_LIMIT_WINDOW_SECS")
                    .unwrap_or(defaults.rate_limit.window_secs),
                sweep_interval_secs: parse_var(&lookup, "RATE_LIMIT_SWEEP_SECS")
                    .unwrap_or(defaults.rate_limit.sweep_interval_secs),
                max_tracked_clients: parse_var(&lookup, "RATE_LIMIT_MAX_CLIENTS")
                    .unwrap_or(defaults.rate_limit.max_tracked_clients),
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|v| {
                        v.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or(defaults.cors.allowed_origins),
            },
            mail: MailConfig {
                smtp_host: lookup("SMTP_HOST"),
                smtp_port: parse_var(&lookup, "SMTP_PORT").unwrap_or(defaults.mail.smtp_port),
                smtp_user: lookup("SMTP_USER"),
                smtp_pass: lookup("SMTP_PASS"),
                send_timeout_secs: parse_var(&lookup, "SMTP_TIMEOUT_SECS")
                    .unwrap_or(defaults.mail.send_timeout_secs),
                to: lookup("LEAD_TO").unwrap_or(defaults.mail.to),
                cc: match lookup("LEAD_CC") {
                    Some(cc) if cc.trim().is_empty() => None,
                    Some(cc) => Some(cc),
                    None => defaults.mail.cc,
                },
                sender_name: lookup("LEAD_SENDER_NAME").unwrap_or(defaults.mail.sender_name),
            },
            metrics: MetricsConfig {
                enabled: parse_var(&lookup, "METRICS_ENABLED")
                    .unwrap_or(defaults.metrics.enabled),
                path: lookup("METRICS_PATH").unwrap_or(defaults.metrics.path),
            },
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
