// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outbound mail delivery.
//!
//! [`LeadMailer`] is the seam between the submission pipeline and the SMTP
//! relay. [`SmtpMailer`] wraps lettre's async SMTP transport; tests swap in
//! their own implementation.

use crate::config::SmtpSettings;
use crate::notify::LeadNotification;
use crate::sanitize::unescape;
use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::{debug, warn};

/// Port on which the relay expects implicit TLS rather than STARTTLS.
const SMTPS_PORT: u16 = 465;

/// Mail delivery failures. None of these are shown to the submitter.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid {field} address {value:?}: {reason}")]
    InvalidAddress {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),

    #[error("send timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Sends lead notifications.
#[async_trait]
pub trait LeadMailer: Send + Sync {
    async fn send(&self, notification: &LeadNotification) -> Result<(), MailError>;
}

/// SMTP relay mailer.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    /// Envelope sender; relays only accept the authenticated account
    from: Address,
}

impl SmtpMailer {
    /// Build a mailer for the relay. No connection is opened until the first
    /// send.
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let builder = match settings.port {
            SMTPS_PORT => AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host),
            _ => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host),
        };
        let builder = builder
            .map_err(|e| MailError::Transport(format!("TLS setup for {}: {e}", settings.host)))?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.user.clone(),
                settings.pass.clone(),
            ))
            .timeout(Some(settings.timeout))
            .build();

        let from = parse_address("from", &settings.user)?;

        debug!(host = %settings.host, port = settings.port, "SMTP mailer configured");
        Ok(Self { transport, from })
    }
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, MailError> {
    value.parse().map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_mailbox(field: &'static str, value: &str) -> Result<Mailbox, MailError> {
    value.parse().map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Mailbox for the submitter's address, which arrives HTML-escaped.
/// Addresses the form accepts but SMTP does not are dropped so the lead
/// still goes out.
fn reply_to_mailbox(escaped: &str) -> Option<Mailbox> {
    let raw = unescape(escaped);
    match parse_address("reply-to", &raw) {
        Ok(address) => Some(Mailbox::new(None, address)),
        Err(err) => {
            warn!(error = %err, "Sending lead without Reply-To");
            None
        }
    }
}

/// Turn a notification into a multipart text + HTML message sent from
/// `from` under the notification's display name.
pub fn build_message(
    from: Address,
    notification: &LeadNotification,
) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(Mailbox::new(Some(notification.from_name.clone()), from))
        .to(parse_mailbox("to", &notification.to)?)
        .subject(notification.subject.clone());

    if let Some(reply_to) = reply_to_mailbox(&notification.reply_to) {
        builder = builder.reply_to(reply_to);
    }

    if let Some(cc) = &notification.cc {
        builder = builder.cc(parse_mailbox("cc", cc)?);
    }

    builder
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(notification.text_body.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(notification.html_body.clone()),
                ),
        )
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl LeadMailer for SmtpMailer {
    async fn send(&self, notification: &LeadNotification) -> Result<(), MailError> {
        let message = build_message(self.from.clone(), notification)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(())
    }
}
