// ABOUTME: Main library entry point for the Dovana gift catalog service
// ABOUTME: REST API over vendors, items, attributes, wishlists and the featured carousel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

#![deny(unsafe_code)]

//! # Dovana
//!
//! A gift catalog service. Vendors publish items, shoppers browse, search
//! and keep wishlists, and administrators curate a carousel of at most five
//! featured items whose positions always stay dense (`1..=n`).
//!
//! ## Architecture
//!
//! - **Database**: `SQLite` through sqlx, one manager per table group
//! - **Services**: Catalog rules and admin mutations over the database
//! - **Routes**: axum routers per domain, merged by [`server::build_router`]
//! - **Middleware**: Token authentication, admin guard, rate limiting, tracing
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use dovana::config::ServerConfig;
//! use dovana::server::{bootstrap, CatalogServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = bootstrap(config).await?;
//!     CatalogServer::new(resources).run().await
//! }
//! ```

/// Token issuing and validation
pub mod auth;

/// Configuration loaded from the environment
pub mod config;

/// Application constants and defaults
pub mod constants;

/// `SQLite` storage and entity managers
pub mod database;

/// Unified error handling with HTTP status mapping
pub mod errors;

/// Structured logging setup and audit events
pub mod logging;

/// Authentication, authorization, rate limiting and tracing middleware
pub mod middleware;

/// Catalog domain models
pub mod models;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Catalog business operations
pub mod services;
