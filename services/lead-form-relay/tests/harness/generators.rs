// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test data generators for abuse simulation.

use super::attacks::Payload;
use lead_form_relay::lead::RawLead;
use serde_json::json;
use std::net::{IpAddr, Ipv4Addr};

/// Generate a pool of client addresses as they appear in `X-Forwarded-For`.
pub fn generate_clients(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            // Use 10.x.x.x private range
            let a = ((i >> 16) & 0xFF) as u8;
            let b = ((i >> 8) & 0xFF) as u8;
            let c = (i & 0xFF) as u8;
            IpAddr::V4(Ipv4Addr::new(10, a, b, c)).to_string()
        })
        .collect()
}

/// Markup payloads that must never reach the notification unescaped.
pub fn markup_payloads() -> Vec<&'static str> {
    vec![
        "<script>alert(1)</script>",
        "<img src=x onerror=alert(1)>",
        "\"><svg onload=alert(1)>",
        "'><iframe src=javascript:alert(1)>",
        "</td></tr></table><h1>owned</h1>",
        "&lt;script&gt; pre-escaped",
    ]
}

/// Submissions that fail validation, one per rule plus malformed shapes.
pub fn invalid_bodies() -> Vec<serde_json::Value> {
    vec![
        json!({}),
        json!({ "name": "J", "company": "Acme", "email": "jo@acme.com", "role": "CTO" }),
        json!({ "name": "Jo", "company": "A", "email": "jo@acme.com", "role": "CTO" }),
        json!({ "name": "Jo", "company": "Acme", "email": "jo@acme", "role": "CTO" }),
        json!({ "name": "Jo", "company": "Acme", "email": "jo@acme.com", "role": "   " }),
        json!({ "name": 42, "company": ["Acme"], "email": null, "role": true }),
        json!(["not", "an", "object"]),
    ]
}

/// Build the request body for the `index`-th request of an attack.
pub fn payload(kind: Payload, index: usize) -> RawLead {
    match kind {
        Payload::Valid => RawLead::from_value(json!({
            "name": format!("Lead {index}"),
            "company": "Acme Ltd",
            "email": format!("lead{index}@acme.com"),
            "role": "Recruiter",
            "message": "Interested in your services",
        })),
        Payload::Honeypot => RawLead::from_value(json!({
            "name": "Bot Person",
            "company": "Bot Co",
            "email": "bot@bots.example",
            "role": "Bot",
            "website": format!("http://spam-{index}.example"),
        })),
        Payload::Invalid => {
            let bodies = invalid_bodies();
            RawLead::from_value(bodies[index % bodies.len()].clone())
        }
        Payload::Markup => {
            let payloads = markup_payloads();
            let p = payloads[index % payloads.len()];
            RawLead::from_value(json!({
                "name": format!("Jo {p}"),
                "company": format!("Acme {p}"),
                "email": "jo@acme.com",
                "role": format!("Role {p}"),
                "message": p,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_clients() {
        let clients = generate_clients(256);
        assert_eq!(clients.len(), 256);
        // All should be unique
        let unique: std::collections::HashSet<_> = clients.iter().collect();
        assert_eq!(unique.len(), 256);
    }

    #[test]
    fn test_valid_payload_passes_honeypot() {
        assert!(!payload(Payload::Valid, 0).is_honeypot_filled());
        assert!(payload(Payload::Honeypot, 0).is_honeypot_filled());
    }
}
