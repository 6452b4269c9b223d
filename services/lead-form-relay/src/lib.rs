// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lead Form Relay
//!
//! Intake for the recruitment site's contact form. Each submission passes:
//!
//! - Per-client sliding-window rate limiting (3 per minute default)
//! - Honeypot bot trap
//! - HTML-escaping sanitization of every field
//! - Field validation (name, company, email, role)
//! - Email notification through an SMTP relay

pub mod config;
pub mod error;
pub mod handlers;
pub mod lead;
pub mod limiter;
pub mod mailer;
pub mod metrics;
pub mod notify;
pub mod pipeline;
pub mod sanitize;
pub mod validator;

pub use config::Config;
pub use limiter::{AbuseGate, RateLimitResult, RateLimiter};
pub use validator::{LeadValidator, ValidationResult};

use axum::{
    http::{header, HeaderValue, Method},
    routing::{any, get},
    Router,
};
use handlers::AppState;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Path of the lead form endpoint.
pub const SUBMIT_PATH: &str = "/api/submit-lead";

/// Routes the metrics endpoint may not shadow.
const BUILTIN_ROUTES: [&str; 3] = [SUBMIT_PATH, "/health", "/healthz"];

/// Normalized metrics path, or `None` when it would collide with a
/// built-in route.
fn metrics_route(path: &str) -> Option<String> {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    if BUILTIN_ROUTES.contains(&path.as_str()) {
        warn!(path = %path, "Metrics path collides with a built-in route, not serving metrics");
        return None;
    }
    Some(path)
}

/// Build the service router with CORS and security headers applied to
/// every response.
pub fn router(state: Arc<AppState>) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unusable CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let mut app = Router::new()
        .route(SUBMIT_PATH, any(handlers::submit_lead))
        .route("/health", get(handlers::health))
        .route("/healthz", get(handlers::health));

    if state.config.metrics.enabled {
        if let Some(path) = metrics_route(&state.config.metrics.path) {
            app = app.route(&path, get(handlers::metrics));
        }
    }

    // Preflights carry the CORS layer's values; other responses get the same
    app.layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_route_normalized() {
        assert_eq!(metrics_route("/metrics").as_deref(), Some("/metrics"));
        assert_eq!(metrics_route("stats").as_deref(), Some("/stats"));
    }

    #[test]
    fn test_metrics_route_rejects_builtin_paths() {
        for path in ["/health", "healthz", "/api/submit-lead"] {
            assert_eq!(metrics_route(path), None, "{path} accepted");
        }
    }
}
