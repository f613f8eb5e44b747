// ABOUTME: Centralized resource container shared by every route handler
// ABOUTME: Holds the database, token manager, configuration and rate limiters behind Arcs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! # Server Resources
//!
//! Built once at startup (or per test) and handed to every router as
//! `State<Arc<ServerResources>>`.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::middleware::rate_limiting::RateLimiter;

/// Shared resources for request handlers
#[derive(Clone)]
pub struct ServerResources {
    /// Catalog database
    pub database: Arc<Database>,
    /// Token issuing and validation
    pub auth_manager: Arc<AuthManager>,
    /// Effective server configuration
    pub config: Arc<ServerConfig>,
    /// Budget for anonymous and shopper routes
    pub public_rate_limiter: Arc<RateLimiter>,
    /// Budget for admin routes
    pub admin_rate_limiter: Arc<RateLimiter>,
}

impl ServerResources {
    /// Assemble resources from an opened database and a signing secret
    #[must_use]
    pub fn new(database: Database, jwt_secret: &str, config: ServerConfig) -> Self {
        let auth_manager = AuthManager::new(jwt_secret.as_bytes(), config.auth.jwt_expiry_hours);
        let limits = config.security.rate_limit;

        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            public_rate_limiter: Arc::new(RateLimiter::per_minute(
                "public",
                limits.enabled,
                limits.public_per_minute,
            )),
            admin_rate_limiter: Arc::new(RateLimiter::per_minute(
                "admin",
                limits.enabled,
                limits.admin_per_minute,
            )),
            config: Arc::new(config),
        }
    }
}
