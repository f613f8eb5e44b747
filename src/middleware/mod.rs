// ABOUTME: HTTP middleware for request tracing, authentication and rate limiting
// ABOUTME: Provides caller extractors, admin guard, CORS setup and per-client request budgets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

/// Caller identification from bearer tokens and cookies
pub mod auth;
/// Admin capability extractor
pub mod admin_guard;
/// Cross-origin configuration
pub mod cors;
/// Fixed-window request budgets
pub mod rate_limiting;
/// Request ids and HTTP spans
pub mod tracing;

pub use admin_guard::{require_admin, AdminContext};
pub use auth::AuthContext;
pub use cors::setup_cors;
pub use rate_limiting::{admin_rate_limit, public_rate_limit, RateLimiter};
pub use tracing::{create_request_span, request_id_layers};
