// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lead Form Relay Service
//!
//! Receives the recruitment site's contact form at `/api/submit-lead` and
//! relays accepted leads by email.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables, with a `.env` file
//! honoured when present:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `RATE_LIMIT_MAX`: Submissions per window per client (default: 3)
//! - `RATE_LIMIT_WINDOW_SECS`: Window length (default: 60)
//! - `RATE_LIMIT_SWEEP_SECS`: Idle client sweep interval (default: 60)
//! - `RATE_LIMIT_MAX_CLIENTS`: Tracked client cap (default: 10000)
//! - `CORS_ALLOWED_ORIGINS`: Comma-separated origins
//! - `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASS`: Relay settings
//! - `SMTP_TIMEOUT_SECS`: Send timeout (default: 15)
//! - `LEAD_TO`, `LEAD_CC`, `LEAD_SENDER_NAME`: Notification addressing
//! - `METRICS_ENABLED`, `METRICS_PATH`: Prometheus endpoint

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lead_form_relay::{
    config::{Config, ConfigError},
    handlers::AppState,
    limiter::{AbuseGate, RateLimiter},
    mailer::{LeadMailer, SmtpMailer},
    metrics::LeadMetrics,
    pipeline::MailerSlot,
    router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = Config::from_env();
    info!(
        bind_addr = %config.bind_addr,
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        allowed_origins = ?config.cors.allowed_origins,
        "Starting lead form relay"
    );

    let mailer = build_mailer(&config);
    let limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
    let metrics = LeadMetrics::new()?;

    let gate: Arc<dyn AbuseGate> = limiter.clone();
    let state = Arc::new(AppState::new(config.clone(), gate, mailer, metrics.clone()));

    // Spawn cleanup task
    let sweep_every = config.rate_limit.sweep_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_every);
        loop {
            interval.tick().await;
            limiter.cleanup(Instant::now()).await;
            metrics.set_tracked_clients(limiter.tracked_clients().await);
        }
    });

    let app = router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Build the SMTP mailer, or record why submissions cannot be delivered.
/// The service still starts so the form gets a proper error response.
fn build_mailer(config: &Config) -> MailerSlot {
    let settings = match config.mail.smtp_settings() {
        Ok(settings) => settings,
        Err(err) => {
            error!(error = %err, "Missing SMTP environment variables");
            return Err(err);
        }
    };

    match SmtpMailer::new(&settings) {
        Ok(mailer) => {
            info!(host = %settings.host, port = settings.port, "SMTP relay configured");
            Ok(Arc::new(mailer) as Arc<dyn LeadMailer>)
        }
        Err(err) => {
            error!(error = %err, "SMTP relay settings unusable");
            Err(ConfigError::InvalidSmtpSettings(err.to_string()))
        }
    }
}
