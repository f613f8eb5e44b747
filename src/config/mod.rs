// ABOUTME: Configuration management module for the catalog server
// ABOUTME: Loads server, database, auth, security and rate limit settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! Configuration module
//!
//! All settings come from environment variables; see
//! [`environment::ServerConfig::from_env`].

/// Environment and server configuration
pub mod environment;

pub use environment::{AuthConfig, DatabaseUrl, RateLimitConfig, SecurityConfig, ServerConfig};
