// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test harness for lead form abuse simulation.
//!
//! Drives the rate limiter and submission pipeline directly with a
//! simulated clock, so a minute of traffic runs in milliseconds.

pub mod attacks;
pub mod generators;
pub mod metrics;

use async_trait::async_trait;
use lead_form_relay::{
    mailer::{LeadMailer, MailError},
    notify::LeadNotification,
};
use std::sync::Mutex;

/// Mailer that keeps every notification it is handed.
#[derive(Default)]
pub struct SinkMailer {
    pub sent: Mutex<Vec<LeadNotification>>,
}

impl SinkMailer {
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl LeadMailer for SinkMailer {
    async fn send(&self, notification: &LeadNotification) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}
