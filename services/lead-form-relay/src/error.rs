// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for lead submissions.
//!
//! Client errors carry their own safe message. Configuration and delivery
//! errors are logged where they happen and answered with a fixed generic
//! message, so internals never reach the caller.

use crate::config::ConfigError;
use crate::mailer::MailError;
use crate::validator::ValidationError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

pub const MSG_METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
pub const MSG_RATE_LIMITED: &str = "Too many requests. Please wait and try again.";
pub const MSG_CONFIGURATION: &str = "Server configuration error. Please contact us directly.";
pub const MSG_SEND_FAILED: &str = "Failed to send. Please try again or contact us directly.";
pub const MSG_THANK_YOU: &str = "Thank you! We will be in touch shortly.";

/// JSON body of every submission response.
#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LeadResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn ok_with(message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Submission error types
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("validation failed: {0}")]
    Invalid(#[from] ValidationError),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("delivery failed: {0}")]
    Delivery(#[from] MailError),
}

impl SubmissionError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Invalid(_) => StatusCode::BAD_REQUEST,
            Self::Configuration(_) | Self::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the submitter.
    pub fn public_message(&self) -> String {
        match self {
            Self::MethodNotAllowed => MSG_METHOD_NOT_ALLOWED.to_string(),
            Self::RateLimited { .. } => MSG_RATE_LIMITED.to_string(),
            Self::Invalid(err) => err.to_string(),
            Self::Configuration(_) => MSG_CONFIGURATION.to_string(),
            Self::Delivery(_) => MSG_SEND_FAILED.to_string(),
        }
    }

    /// Metrics label for this outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "method_not_allowed",
            Self::RateLimited { .. } => "rate_limited",
            Self::Invalid(_) => "invalid",
            Self::Configuration(_) => "config_error",
            Self::Delivery(_) => "send_failed",
        }
    }
}

impl IntoResponse for SubmissionError {
    fn into_response(self) -> Response {
        let body = Json(LeadResponse::failure(self.public_message()));

        match self {
            Self::RateLimited { retry_after } => {
                // Round up so clients never retry a moment too early
                let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, secs.to_string())],
                    body,
                )
                    .into_response()
            }
            other => (other.status(), body).into_response(),
        }
    }
}
