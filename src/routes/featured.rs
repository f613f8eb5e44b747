// ABOUTME: Route handlers for the featured items carousel
// ABOUTME: Public ordered listing plus admin create, delete and adjacent reorder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use dovana_core::lineup::PositionChange;
use serde::Serialize;

use super::{with_admin_limit, with_public_limit, IdPath, JsonBody};
use crate::errors::AppError;
use crate::middleware::AdminContext;
use crate::models::{CreateFeaturedItemRequest, ReorderFeaturedItemRequest};
use crate::resources::ServerResources;
use crate::services::featured;

/// Response for a successful reorder
#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    /// Confirmation text
    pub message: &'static str,
    /// The two rows whose positions were exchanged
    pub changes: [PositionChange; 2],
}

/// Featured carousel routes handler
pub struct FeaturedRoutes;

impl FeaturedRoutes {
    /// Create all featured item routes
    pub fn routes(resources: &Arc<ServerResources>) -> Router {
        let public = Router::new().route("/featured-items", get(Self::handle_list));

        let admin = Router::new()
            .route("/featured-items", post(Self::handle_create))
            .route("/featured-items/reorder", post(Self::handle_reorder))
            .route("/featured-items/:id", delete(Self::handle_delete));

        with_public_limit(public, resources).merge(with_admin_limit(admin, resources))
    }

    /// Handle GET /featured-items - Carousel in display order
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let items = featured::list_featured(&resources.database).await?;
        Ok((StatusCode::OK, Json(items)).into_response())
    }

    /// Handle POST /featured-items - Append an item to the carousel
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        JsonBody(body): JsonBody<CreateFeaturedItemRequest>,
    ) -> Result<Response, AppError> {
        let created = featured::create_featured(&resources.database, &admin, &body).await?;
        Ok((StatusCode::CREATED, Json(created)).into_response())
    }

    /// Handle DELETE /featured-items/:id - Remove and compact
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        IdPath(id): IdPath,
    ) -> Result<Response, AppError> {
        featured::delete_featured(&resources.database, &admin, id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle POST /featured-items/reorder - Swap with a neighbour
    async fn handle_reorder(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        JsonBody(body): JsonBody<ReorderFeaturedItemRequest>,
    ) -> Result<Response, AppError> {
        let changes = featured::reorder_featured(&resources.database, &admin, &body).await?;
        let response = ReorderResponse {
            message: "Featured item moved successfully",
            changes,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
