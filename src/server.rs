// ABOUTME: HTTP server assembly: router composition, middleware layers and graceful shutdown
// ABOUTME: Opens the database, resolves the token secret and serves the catalog API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! # Catalog Server
//!
//! [`build_router`] composes every domain router with request ids, tracing,
//! CORS and a request timeout. [`CatalogServer`] binds a listener and serves
//! the router until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::database::Database;
use crate::middleware::{create_request_span, request_id_layers, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{
    AttributeRoutes, FeaturedRoutes, HealthRoutes, ImportRoutes, ItemRoutes, VendorRoutes,
    WishlistRoutes,
};

/// How often expired rate-limit windows are dropped
const RATE_LIMIT_PRUNE_INTERVAL: Duration = Duration::from_secs(300);

/// Compose all routes and middleware
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let (set_request_id, propagate_request_id) = request_id_layers();
    let timeout = Duration::from_secs(resources.config.security.request_timeout_secs);

    Router::new()
        .merge(HealthRoutes::routes(resources))
        .merge(FeaturedRoutes::routes(resources))
        .merge(ItemRoutes::routes(resources))
        .merge(VendorRoutes::routes(resources))
        .merge(WishlistRoutes::routes(resources))
        .merge(AttributeRoutes::routes(resources))
        .merge(ImportRoutes::routes(resources))
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id)
                .layer(TraceLayer::new_for_http().make_span_with(create_request_span))
                .layer(TimeoutLayer::new(timeout))
                .layer(propagate_request_id),
        )
        .layer(setup_cors(&resources.config))
}

/// Open the database and assemble resources for a configuration
///
/// The token secret comes from `JWT_SECRET` when set, otherwise from the
/// value generated on first start and kept in `system_settings`.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated
pub async fn bootstrap(config: ServerConfig) -> Result<Arc<ServerResources>> {
    let database = Database::new(&config.database_url)
        .await
        .context("Failed to open catalog database")?;

    let secret = match config.auth.jwt_secret.clone() {
        Some(secret) => secret,
        None => database
            .get_or_create_jwt_secret()
            .await
            .context("Failed to load token secret")?,
    };

    Ok(Arc::new(ServerResources::new(database, &secret, config)))
}

/// The catalog HTTP server
pub struct CatalogServer {
    resources: Arc<ServerResources>,
}

impl CatalogServer {
    /// Create a server over prepared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Bind the configured address and serve until a shutdown signal
    ///
    /// # Errors
    ///
    /// Returns an error if binding or serving fails
    pub async fn run(self) -> Result<()> {
        let config = &self.resources.config;
        let address = format!("{}:{}", config.host, config.http_port);
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {address}"))?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    ///
    /// # Errors
    ///
    /// Returns an error if the server stops abnormally
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let local = listener.local_addr()?;
        let app = build_router(&self.resources);

        let pruning = {
            let resources = self.resources.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(RATE_LIMIT_PRUNE_INTERVAL);
                loop {
                    interval.tick().await;
                    resources.public_rate_limiter.prune();
                    resources.admin_rate_limiter.prune();
                }
            })
        };

        info!(address = %local, "Dovana catalog server listening");
        let result = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error");

        pruning.abort();
        info!("Server shut down");
        result
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
