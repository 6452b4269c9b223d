// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the lead form relay.

use crate::config::Config;
use crate::error::{LeadResponse, SubmissionError, MSG_THANK_YOU};
use crate::lead::RawLead;
use crate::limiter::{AbuseGate, RateLimitResult};
use crate::metrics::LeadMetrics;
use crate::pipeline::{MailerSlot, SubmissionOutcome, SubmissionPipeline};
use axum::{
    body::{to_bytes, Body},
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Largest request body read; anything bigger is treated as empty.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared application state.
pub struct AppState {
    pub gate: Arc<dyn AbuseGate>,
    pub pipeline: SubmissionPipeline,
    pub metrics: LeadMetrics,
    pub config: Config,
}

impl AppState {
    pub fn new(
        config: Config,
        gate: Arc<dyn AbuseGate>,
        mailer: MailerSlot,
        metrics: LeadMetrics,
    ) -> Self {
        Self {
            gate,
            pipeline: SubmissionPipeline::new(mailer, config.mail.clone()),
            metrics,
            config,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "lead-form-relay",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Rate-limit key for a request: first `X-Forwarded-For` entry, then the
/// peer address, then `"unknown"`.
pub fn client_id(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match (forwarded, peer) {
        (Some(ip), _) => ip.to_string(),
        (None, Some(addr)) => addr.ip().to_string(),
        (None, None) => "unknown".to_string(),
    }
}

/// Lead form endpoint. Accepts every method so preflight and wrong-method
/// requests get the same JSON contract as submissions.
pub async fn submit_lead(State(state): State<Arc<AppState>>, request: Request<Body>) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    if request.method() != Method::POST {
        debug!(method = %request.method(), "Rejecting non-POST request");
        return reject(&state, SubmissionError::MethodNotAllowed);
    }

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_id(request.headers(), peer);

    let decision = state.gate.check(&client, Instant::now()).await;
    if let RateLimitResult::Limited { retry_after } = decision {
        info!(
            client = %client,
            retry_after_secs = retry_after.as_secs(),
            "Submission rate limited"
        );
        return reject(&state, SubmissionError::RateLimited { retry_after });
    }

    let body = match to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(client = %client, error = %e, "Unreadable body, treating as empty");
            Default::default()
        }
    };
    let raw = RawLead::from_body(&body);

    match state.pipeline.process(&raw, &client).await {
        Ok(outcome) => {
            state.metrics.record(outcome.label());
            let body = match outcome {
                SubmissionOutcome::Delivered => LeadResponse::ok_with(MSG_THANK_YOU),
                SubmissionOutcome::Trapped => LeadResponse::ok(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => reject(&state, err),
    }
}

fn reject(state: &AppState, err: SubmissionError) -> Response {
    state.metrics.record(err.outcome());
    err.into_response()
}
