// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lead notification composition.
//!
//! Rendering takes only [`ValidLead`], whose fields are already
//! HTML-escaped, so the template interpolates them verbatim.

use crate::config::MailConfig;
use crate::validator::ValidLead;
use chrono::{DateTime, FixedOffset, Utc};

/// South Africa Standard Time, UTC+02:00, no daylight saving.
const SAST_OFFSET_SECS: i32 = 2 * 3600;

/// Everything the mail transport needs to deliver one lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadNotification {
    pub from_name: String,
    pub to: String,
    pub cc: Option<String>,
    pub reply_to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Convert an instant to the agency's local time.
pub fn to_local_time(at: DateTime<Utc>) -> DateTime<FixedOffset> {
    match FixedOffset::east_opt(SAST_OFFSET_SECS) {
        Some(sast) => at.with_timezone(&sast),
        None => at.fixed_offset(),
    }
}

/// Format a received timestamp, e.g. `Monday, 19 October 2026 at 14:05`.
pub fn format_received(at: DateTime<FixedOffset>) -> String {
    at.format("%A, %-d %B %Y at %H:%M").to_string()
}

/// Build the notification for a validated lead.
pub fn compose(
    lead: &ValidLead,
    mail: &MailConfig,
    received_at: DateTime<Utc>,
) -> LeadNotification {
    LeadNotification {
        from_name: mail.sender_name.clone(),
        to: mail.to.clone(),
        cc: mail.cc.clone().filter(|cc| !cc.trim().is_empty()),
        reply_to: lead.email.to_string(),
        subject: subject_line(lead),
        html_body: render_html(lead, to_local_time(received_at)),
        text_body: render_text(lead),
    }
}

pub fn subject_line(lead: &ValidLead) -> String {
    format!("New Recruitment Lead: {} — {}", lead.role, lead.company)
}

pub fn render_text(lead: &ValidLead) -> String {
    format!(
        "New lead from {} ({})\nEmail: {}\nRole: {}\nMessage: {}",
        lead.name, lead.company, lead.email, lead.role, lead.message
    )
}

const STYLE: &str = r#"
    body { margin: 0; padding: 0; font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif; background: #F2F2F2; }
    .wrapper { max-width: 600px; margin: 0 auto; padding: 32px 16px; }
    .card { background: #fff; border-radius: 6px; overflow: hidden; box-shadow: 0 2px 12px rgba(0,0,0,0.08); }
    .header { background: linear-gradient(135deg, #2B2B2B 0%, #5C3D3D 60%, #A56A6A 100%); padding: 36px 40px; }
    .header h1 { margin: 0; font-size: 22px; color: #fff; font-weight: 600; letter-spacing: 0.02em; }
    .header p { margin: 6px 0 0; font-size: 13px; color: rgba(255,255,255,0.6); letter-spacing: 0.05em; text-transform: uppercase; }
    .body { padding: 36px 40px; }
    .alert { background: #FFF5F5; border-left: 3px solid #A56A6A; padding: 12px 16px; margin-bottom: 28px; border-radius: 0 4px 4px 0; }
    .alert p { margin: 0; font-size: 13px; color: #6E3F3F; font-weight: 500; }
    .field { margin-bottom: 20px; }
    .field label { display: block; font-size: 10px; font-weight: 700; letter-spacing: 0.15em; text-transform: uppercase; color: #B8B0AE; margin-bottom: 6px; }
    .field .value { font-size: 15px; color: #2B2B2B; font-weight: 500; }
    .field .message-value { font-size: 14px; color: #4A4A4A; line-height: 1.7; background: #F9F7F7; border-radius: 4px; padding: 14px 16px; border: 1px solid #E2D8D8; }
    .divider { border: none; border-top: 1px solid #E8D6D6; margin: 24px 0; }
    .footer-bar { background: #F9F7F7; padding: 20px 40px; border-top: 1px solid #E8D6D6; }
    .footer-bar p { margin: 0; font-size: 11px; color: #B8B0AE; }
    .badge { display: inline-block; background: #E8D6D6; color: #6E3F3F; font-size: 10px; font-weight: 700; letter-spacing: 0.1em; text-transform: uppercase; padding: 3px 8px; border-radius: 100px; margin-left: 6px; }
    .reply-btn { display: inline-block; margin-top: 20px; padding: 12px 24px; background: #A56A6A; color: #fff; text-decoration: none; border-radius: 3px; font-size: 13px; font-weight: 600; letter-spacing: 0.05em; text-transform: uppercase; }
"#;

const NO_MESSAGE: &str = r#"<em style="color:#B8B0AE;">No message provided.</em>"#;

/// Render the branded HTML notification body.
pub fn render_html(lead: &ValidLead, received_at: DateTime<FixedOffset>) -> String {
    let message = if lead.message.is_empty() {
        NO_MESSAGE
    } else {
        lead.message.as_str()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>New Lead — Sakeena Jacobs Recruitment</title>
  <style>{style}  </style>
</head>
<body>
  <div class="wrapper">
    <div class="card">
      <div class="header">
        <h1>New Recruitment Lead</h1>
        <p>Sakeena Jacobs Recruitment &bull; Lead Notification</p>
      </div>
      <div class="body">
        <div class="alert">
          <p>⚡ A new lead has been submitted via the website contact form. Please respond within 48 hours.</p>
        </div>

        <div class="field">
          <label>Full Name</label>
          <div class="value">{name}</div>
        </div>

        <div class="field">
          <label>Company</label>
          <div class="value">{company}</div>
        </div>

        <div class="field">
          <label>Email Address</label>
          <div class="value"><a href="mailto:{email}" style="color:#A56A6A;">{email}</a></div>
        </div>

        <div class="field">
          <label>Role Required <span class="badge">Priority</span></label>
          <div class="value">{role}</div>
        </div>

        <hr class="divider" />

        <div class="field">
          <label>Message / Requirements</label>
          <div class="message-value">{message}</div>
        </div>

        <a href="mailto:{email}?subject=Re: Your Recruitment Enquiry — Sakeena Jacobs Recruitment" class="reply-btn">
          Reply to {first_name}
        </a>
      </div>
      <div class="footer-bar">
        <p><strong>Received:</strong> {received}</p>
        <p style="margin-top:4px;">SAKEENA JACOBS RECRUITMENT (Pty) Ltd &bull; Reg. No: 2018/341619/07</p>
        <p style="margin-top:4px;">This is an automated notification. Do not reply to this email directly.</p>
      </div>
    </div>
  </div>
</body>
</html>"#,
        style = STYLE,
        name = lead.name,
        company = lead.company,
        email = lead.email,
        role = lead.role,
        message = message,
        first_name = lead.name.first_word(),
        received = format_received(received_at),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::RawLead;
    use crate::validator::LeadValidator;
    use chrono::TimeZone;
    use serde_json::json;

    fn lead(value: serde_json::Value) -> ValidLead {
        LeadValidator::new()
            .validate(RawLead::from_value(value).sanitize())
            .into_result()
            .unwrap()
    }

    fn jo() -> ValidLead {
        lead(json!({
            "name": "Jo Soap",
            "company": "Acme Ltd",
            "email": "jo@acme.com",
            "role": "Recruiter",
        }))
    }

    fn received() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 5, 0).unwrap()
    }

    #[test]
    fn test_compose_addresses_and_subject() {
        let notification = compose(&jo(), &MailConfig::default(), received());

        assert_eq!(notification.reply_to, "jo@acme.com");
        assert_eq!(notification.to, "info@sakeenajacobsrecruitment.com");
        assert_eq!(
            notification.cc.as_deref(),
            Some("recruitment@sakeenajacobsrecruitment.com")
        );
        assert_eq!(notification.subject, "New Recruitment Lead: Recruiter — Acme Ltd");
        assert_eq!(notification.from_name, "Sakeena Jacobs Recruitment — Lead Form");
    }

    #[test]
    fn test_blank_cc_is_dropped() {
        let mail = MailConfig {
            cc: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(compose(&jo(), &mail, received()).cc, None);
    }

    #[test]
    fn test_text_body() {
        assert_eq!(
            render_text(&jo()),
            "New lead from Jo Soap (Acme Ltd)\nEmail: jo@acme.com\nRole: Recruiter\nMessage: "
        );
    }

    #[test]
    fn test_html_body_contains_fields() {
        let html = render_html(&jo(), to_local_time(received()));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<div class="value">Jo Soap</div>"#));
        assert!(html.contains(r#"href="mailto:jo@acme.com""#));
        assert!(html.contains("Reply to Jo"));
        assert!(html.contains("No message provided."));
        assert!(html.contains("Monday, 19 October 2026 at 14:05"));
    }

    #[test]
    fn test_html_body_uses_escaped_message() {
        let html = render_html(
            &lead(json!({
                "name": "Jo Soap",
                "company": "Acme Ltd",
                "email": "jo@acme.com",
                "role": "Recruiter",
                "message": "<img src=x onerror=alert(1)>",
            })),
            to_local_time(received()),
        );

        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("No message provided."));
    }

    #[test]
    fn test_local_time_is_two_hours_ahead() {
        let local = to_local_time(received());
        assert_eq!(format_received(local), "Monday, 19 October 2026 at 14:05");
        assert_eq!(local.offset().local_minus_utc(), 7200);
    }
}
