// ABOUTME: Rate limiting middleware for HTTP requests
// ABOUTME: Fixed one-minute windows per client with separate public and admin budgets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! # Rate Limiting Middleware with HTTP Headers
//!
//! Each route group carries its own [`RateLimiter`]. Clients are keyed by the
//! first `x-forwarded-for` entry, then the peer address, then `anonymous`.
//! Successful responses carry the standard `X-RateLimit-*` headers; exhausted
//! budgets answer `429` with `retry_after_seconds`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use http::{HeaderMap, HeaderValue};
use tracing::warn;

use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;

/// HTTP header names for rate limiting
pub mod headers {
    /// HTTP header name for maximum requests allowed in the current window
    pub const X_RATE_LIMIT_LIMIT: &str = "X-RateLimit-Limit";
    /// HTTP header name for remaining requests in the current window
    pub const X_RATE_LIMIT_REMAINING: &str = "X-RateLimit-Remaining";
    /// HTTP header name for seconds until the window resets
    pub const X_RATE_LIMIT_RESET: &str = "X-RateLimit-Reset";
    /// HTTP header name for retry-after duration in seconds
    pub const RETRY_AFTER: &str = "Retry-After";
}

/// Fallback client key when no address is known
const ANONYMOUS_CLIENT: &str = "anonymous";

/// Outcome of a successful budget check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests allowed per window
    pub limit: u32,
    /// Requests left in the current window
    pub remaining: u32,
    /// Seconds until the window resets
    pub reset_after_secs: u64,
}

#[derive(Debug, Clone, Copy)]
struct WindowState {
    started: Instant,
    count: u32,
}

/// Fixed-window request counter keyed by client
#[derive(Debug)]
pub struct RateLimiter {
    name: &'static str,
    enabled: bool,
    limit: u32,
    window: Duration,
    windows: DashMap<String, WindowState>,
}

impl RateLimiter {
    /// Create a limiter with an arbitrary window
    #[must_use]
    pub fn new(name: &'static str, enabled: bool, limit: u32, window: Duration) -> Self {
        Self {
            name,
            enabled,
            limit,
            window,
            windows: DashMap::new(),
        }
    }

    /// Create a limiter with a one-minute window
    #[must_use]
    pub fn per_minute(name: &'static str, enabled: bool, limit: u32) -> Self {
        Self::new(name, enabled, limit, Duration::from_secs(60))
    }

    /// Count one request for `client`
    ///
    /// # Errors
    ///
    /// Returns a `429` error when the client has used up the current window
    pub fn check(&self, client: &str) -> AppResult<RateLimitInfo> {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> AppResult<RateLimitInfo> {
        if !self.enabled {
            return Ok(RateLimitInfo {
                limit: self.limit,
                remaining: self.limit,
                reset_after_secs: 0,
            });
        }

        let mut state = self.windows.entry(client.to_owned()).or_insert(WindowState {
            started: now,
            count: 0,
        });
        if now.duration_since(state.started) >= self.window {
            state.started = now;
            state.count = 0;
        }

        let elapsed = now.duration_since(state.started);
        let reset_after_secs = self.window.saturating_sub(elapsed).as_secs().max(1);

        if state.count >= self.limit {
            warn!(
                limiter = self.name,
                client = %client,
                limit = self.limit,
                "Rate limit exceeded"
            );
            return Err(AppError::rate_limit_exceeded(self.limit, reset_after_secs));
        }

        state.count += 1;
        Ok(RateLimitInfo {
            limit: self.limit,
            remaining: self.limit - state.count,
            reset_after_secs,
        })
    }

    /// Drop windows that have fully elapsed
    pub fn prune(&self) {
        let now = Instant::now();
        self.windows
            .retain(|_, state| now.duration_since(state.started) < self.window);
    }
}

/// Client address: first `x-forwarded-for` entry, else the peer address
#[must_use]
pub fn client_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

/// Identify the client behind a request
#[must_use]
pub fn client_key(request: &Request) -> String {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);
    client_address(request.headers(), peer).unwrap_or_else(|| ANONYMOUS_CLIENT.to_owned())
}

/// Create a `HeaderMap` with rate limit headers
#[must_use]
pub fn create_rate_limit_headers(info: &RateLimitInfo) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in [
        (headers::X_RATE_LIMIT_LIMIT, u64::from(info.limit)),
        (headers::X_RATE_LIMIT_REMAINING, u64::from(info.remaining)),
        (headers::X_RATE_LIMIT_RESET, info.reset_after_secs),
    ] {
        if let Ok(header_value) = HeaderValue::from_str(&value.to_string()) {
            headers.insert(name, header_value);
        }
    }
    headers
}

async fn enforce(limiter: &RateLimiter, request: Request, next: Next) -> Response {
    let client = client_key(&request);
    match limiter.check(&client) {
        Ok(info) => {
            let mut response = next.run(request).await;
            if limiter.enabled {
                response.headers_mut().extend(create_rate_limit_headers(&info));
            }
            response
        }
        Err(error) => {
            let retry_after = error
                .details
                .as_ref()
                .and_then(|d| d.get("retry_after_seconds"))
                .and_then(serde_json::Value::as_u64)
                .unwrap_or(60);
            let mut response = error.into_response();
            if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
                response.headers_mut().insert(headers::RETRY_AFTER, value);
            }
            response
        }
    }
}

/// Middleware applying the public budget
pub async fn public_rate_limit(
    State(resources): State<Arc<ServerResources>>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&resources.public_rate_limiter, request, next).await
}

/// Middleware applying the admin budget
pub async fn admin_rate_limit(
    State(resources): State<Arc<ServerResources>>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&resources.admin_rate_limiter, request, next).await
}
