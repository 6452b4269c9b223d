// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lead submission payloads, raw and sanitized.

use crate::sanitize::{sanitize, SanitizedText};
use serde_json::{Map, Value};

/// Untrusted form payload as received.
///
/// Fields are kept as loose JSON so a missing field, `null` or a number in
/// place of a string never fails parsing.
#[derive(Debug, Clone, Default)]
pub struct RawLead {
    fields: Map<String, Value>,
}

/// Honeypot field name. Humans never see it; bots fill it in.
pub const HONEYPOT_FIELD: &str = "website";

impl RawLead {
    /// Parse a request body.
    ///
    /// Accepts a JSON object, or a JSON string holding a serialized object.
    /// Anything else, malformed input included, becomes an empty payload.
    pub fn from_body(body: &[u8]) -> Self {
        let value = match serde_json::from_slice::<Value>(body) {
            Ok(Value::String(inner)) => serde_json::from_str(&inner).unwrap_or(Value::Null),
            Ok(value) => value,
            Err(_) => Value::Null,
        };

        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// True when the honeypot field holds anything truthy.
    pub fn is_honeypot_filled(&self) -> bool {
        match self.get(HONEYPOT_FIELD) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }

    /// Sanitize every lead field once.
    pub fn sanitize(&self) -> SanitizedLead {
        SanitizedLead {
            name: sanitize(self.get("name")),
            company: sanitize(self.get("company")),
            email: sanitize(self.get("email")),
            role: sanitize(self.get("role")),
            message: sanitize(self.get("message")),
        }
    }
}

/// Lead fields after sanitization, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedLead {
    pub name: SanitizedText,
    pub company: SanitizedText,
    pub email: SanitizedText,
    pub role: SanitizedText,
    pub message: SanitizedText,
}
