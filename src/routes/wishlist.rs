// ABOUTME: Route handlers for the authenticated user's wishlist
// ABOUTME: List wished items, toggle an item and check membership
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use super::{with_public_limit, IdPath};
use crate::errors::AppError;
use crate::middleware::AuthContext;
use crate::resources::ServerResources;
use crate::services::wishlist;

/// Wishlist routes handler
pub struct WishlistRoutes;

impl WishlistRoutes {
    /// Create all wishlist routes
    pub fn routes(resources: &Arc<ServerResources>) -> Router {
        let router = Router::new()
            .route("/wishlist", get(Self::handle_list))
            .route("/wishlist/toggle/:id", post(Self::handle_toggle))
            .route("/wishlist/check/:id", get(Self::handle_check));

        with_public_limit(router, resources)
    }

    /// Handle GET /wishlist
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthContext,
    ) -> Result<Response, AppError> {
        let items = wishlist::list_wishlist(&resources.database, &auth).await?;
        Ok((StatusCode::OK, Json(items)).into_response())
    }

    /// Handle POST /wishlist/toggle/:id
    async fn handle_toggle(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthContext,
        IdPath(item_id): IdPath,
    ) -> Result<Response, AppError> {
        let status = wishlist::toggle_wishlist(&resources.database, &auth, item_id).await?;
        Ok((StatusCode::OK, Json(status)).into_response())
    }

    /// Handle GET /wishlist/check/:id
    async fn handle_check(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthContext,
        IdPath(item_id): IdPath,
    ) -> Result<Response, AppError> {
        let status = wishlist::check_wishlist(&resources.database, &auth, item_id).await?;
        Ok((StatusCode::OK, Json(status)).into_response())
    }
}
