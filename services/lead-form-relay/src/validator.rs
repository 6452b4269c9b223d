// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lead form validator.
//!
//! Checks the sanitized fields in a fixed order and reports the first
//! failure:
//! - name, at least 2 characters
//! - company, at least 2 characters
//! - email, `local@domain.tld` shape
//! - role, present
//!
//! The message field is optional and never fails.

use crate::lead::SanitizedLead;
use crate::sanitize::SanitizedText;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Validation error types. The display text is shown to the submitter.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required.")]
    NameRequired,

    #[error("Company name is required.")]
    CompanyRequired,

    #[error("Valid email is required.")]
    InvalidEmail,

    #[error("Role is required.")]
    RoleRequired,
}

impl ValidationError {
    /// Form field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameRequired => "name",
            Self::CompanyRequired => "company",
            Self::InvalidEmail => "email",
            Self::RoleRequired => "role",
        }
    }
}

/// A lead that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLead {
    pub name: SanitizedText,
    pub company: SanitizedText,
    pub email: SanitizedText,
    pub role: SanitizedText,
    pub message: SanitizedText,
}

/// Result of validation.
#[derive(Debug, Clone)]
pub enum ValidationResult {
    /// Lead is valid
    Valid(ValidLead),
    /// Lead is invalid
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid(_) => None,
            ValidationResult::Invalid(e) => Some(e),
        }
    }

    pub fn into_result(self) -> Result<ValidLead, ValidationError> {
        match self {
            ValidationResult::Valid(lead) => Ok(lead),
            ValidationResult::Invalid(e) => Err(e),
        }
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Check the email shape used by the contact form.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Lead form validator.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeadValidator;

impl LeadValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a sanitized lead; the first failing field wins.
    pub fn validate(&self, lead: SanitizedLead) -> ValidationResult {
        if let Err(err) = Self::check(&lead) {
            debug!(field = err.field(), error = %err, "Lead validation failed");
            return ValidationResult::Invalid(err);
        }

        ValidationResult::Valid(ValidLead {
            name: lead.name,
            company: lead.company,
            email: lead.email,
            role: lead.role,
            message: lead.message,
        })
    }

    fn check(lead: &SanitizedLead) -> Result<(), ValidationError> {
        if lead.name.char_len() < 2 {
            return Err(ValidationError::NameRequired);
        }
        if lead.company.char_len() < 2 {
            return Err(ValidationError::CompanyRequired);
        }
        if lead.email.is_empty() || !is_valid_email(lead.email.as_str()) {
            return Err(ValidationError::InvalidEmail);
        }
        if lead.role.is_empty() {
            return Err(ValidationError::RoleRequired);
        }
        Ok(())
    }
}
