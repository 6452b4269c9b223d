// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTML-escaping sanitizer for untrusted form fields.
//!
//! [`SanitizedText`] can only be built by [`sanitize`], so anything holding
//! one is safe to interpolate into HTML without further escaping. Escaping
//! is not idempotent (`&amp;` becomes `&amp;amp;`), so each raw field must
//! pass through here exactly once.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Maximum length of a sanitized field, in characters.
pub const MAX_FIELD_CHARS: usize = 2000;

/// Text that has been HTML-escaped, trimmed and length capped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SanitizedText(String);

impl SanitizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Text before the first space.
    pub fn first_word(&self) -> &str {
        self.0.split(' ').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for SanitizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sanitize an optional JSON value. Anything other than a string yields
/// empty text.
pub fn sanitize(value: Option<&Value>) -> SanitizedText {
    match value {
        Some(Value::String(s)) => sanitize_str(s),
        _ => SanitizedText::default(),
    }
}

/// Escape, trim, then truncate a raw string.
pub fn sanitize_str(raw: &str) -> SanitizedText {
    // `&` first so entities introduced below are not escaped again
    let escaped = raw
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;");

    SanitizedText(truncate(escaped.trim()).to_string())
}

/// Reverse the escapes applied by [`sanitize_str`], for text leaving HTML
/// context such as a mail header.
pub fn unescape(text: &str) -> String {
    // `&amp;` last so `&amp;lt;` decodes to `&lt;`, not `<`
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Cap `s` at [`MAX_FIELD_CHARS`] without leaving half an entity behind.
fn truncate(s: &str) -> &str {
    let cut = match s.char_indices().nth(MAX_FIELD_CHARS) {
        Some((idx, _)) => idx,
        None => return s,
    };
    let head = &s[..cut];

    match head.rfind('&') {
        Some(amp) if !head[amp..].contains(';') => &head[..amp],
        _ => head,
    }
}
