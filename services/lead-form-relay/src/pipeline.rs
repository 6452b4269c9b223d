// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Submission pipeline: honeypot, sanitize, validate, dispatch.
//!
//! Runs after the abuse gate has admitted the request. No rate-limiter
//! state is held while the mail send is awaited.

use crate::config::{ConfigError, MailConfig};
use crate::error::SubmissionError;
use crate::lead::RawLead;
use crate::mailer::{LeadMailer, MailError};
use crate::notify;
use crate::validator::{LeadValidator, ValidationResult};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

/// What happened to an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Notification handed to the relay
    Delivered,
    /// Honeypot filled; answered as success, nothing sent
    Trapped,
}

impl SubmissionOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::Trapped => "trapped",
        }
    }
}

/// Mail collaborator, or the reason there is none.
pub type MailerSlot = Result<Arc<dyn LeadMailer>, ConfigError>;

pub struct SubmissionPipeline {
    validator: LeadValidator,
    mailer: MailerSlot,
    mail: MailConfig,
}

impl SubmissionPipeline {
    pub fn new(mailer: MailerSlot, mail: MailConfig) -> Self {
        Self {
            validator: LeadValidator::new(),
            mailer,
            mail,
        }
    }

    /// Process one admitted submission from `client`.
    pub async fn process(
        &self,
        raw: &RawLead,
        client: &str,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        if raw.is_honeypot_filled() {
            info!(client, "Honeypot field filled, discarding submission");
            return Ok(SubmissionOutcome::Trapped);
        }

        let lead = match self.validator.validate(raw.sanitize()) {
            ValidationResult::Valid(lead) => lead,
            ValidationResult::Invalid(err) => {
                info!(client, field = err.field(), error = %err, "Submission rejected");
                return Err(err.into());
            }
        };

        let mailer = match &self.mailer {
            Ok(mailer) => mailer,
            Err(err) => {
                error!(error = %err, "Mail relay not configured, cannot deliver lead");
                return Err(err.clone().into());
            }
        };

        let received_at = Utc::now();
        let notification = notify::compose(&lead, &self.mail, received_at);
        let timeout = self.mail.send_timeout();

        let sent = match tokio::time::timeout(timeout, mailer.send(&notification)).await {
            Ok(result) => result,
            Err(_) => Err(MailError::Timeout(timeout)),
        };

        if let Err(err) = sent {
            error!(client, error = %err, "Email send error");
            return Err(err.into());
        }

        info!(
            name = %lead.name,
            company = %lead.company,
            role = %lead.role,
            received_at = %received_at.to_rfc3339(),
            "Lead submitted"
        );
        Ok(SubmissionOutcome::Delivered)
    }
}
