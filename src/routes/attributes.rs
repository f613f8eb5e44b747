// ABOUTME: Route handlers for attribute groups, attributes and item attribute assignments
// ABOUTME: Every endpoint is admin-only and runs under the admin request budget
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;

use super::{with_admin_limit, IdPath, JsonBody};
use crate::errors::AppError;
use crate::middleware::AdminContext;
use crate::models::{AttributeGroupRequest, AttributeRequest, ItemAttributeRequest};
use crate::resources::ServerResources;
use crate::services::attributes;

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

/// Attribute routes handler
pub struct AttributeRoutes;

impl AttributeRoutes {
    /// Create all attribute routes
    pub fn routes(resources: &Arc<ServerResources>) -> Router {
        let router = Router::new()
            .route(
                "/api/attributes/groups",
                get(Self::handle_list_groups).post(Self::handle_create_group),
            )
            .route(
                "/api/attributes/groups/:id",
                put(Self::handle_update_group).delete(Self::handle_delete_group),
            )
            .route(
                "/api/attributes",
                get(Self::handle_list_attributes).post(Self::handle_create_attribute),
            )
            .route(
                "/api/attributes/group/:id",
                get(Self::handle_list_attributes_in_group),
            )
            .route(
                "/api/attributes/:id",
                put(Self::handle_update_attribute).delete(Self::handle_delete_attribute),
            )
            .route("/item-attributes", post(Self::handle_assign))
            // GET takes an item id, DELETE an assignment id
            .route(
                "/item-attributes/:id",
                get(Self::handle_item_attributes).delete(Self::handle_unassign),
            );

        with_admin_limit(router, resources)
    }

    /// Handle GET /api/attributes/groups
    async fn handle_list_groups(
        State(resources): State<Arc<ServerResources>>,
        _admin: AdminContext,
    ) -> Result<Response, AppError> {
        let groups = resources.database.attributes().list_groups().await?;
        Ok((StatusCode::OK, Json(groups)).into_response())
    }

    /// Handle POST /api/attributes/groups
    async fn handle_create_group(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        JsonBody(body): JsonBody<AttributeGroupRequest>,
    ) -> Result<Response, AppError> {
        let group = attributes::create_group(&resources.database, &admin, &body).await?;
        Ok((StatusCode::CREATED, Json(group)).into_response())
    }

    /// Handle PUT /api/attributes/groups/:id
    async fn handle_update_group(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        IdPath(id): IdPath,
        JsonBody(body): JsonBody<AttributeGroupRequest>,
    ) -> Result<Response, AppError> {
        let group = attributes::update_group(&resources.database, &admin, id, &body).await?;
        Ok((StatusCode::OK, Json(group)).into_response())
    }

    /// Handle DELETE /api/attributes/groups/:id
    async fn handle_delete_group(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        IdPath(id): IdPath,
    ) -> Result<Response, AppError> {
        attributes::delete_group(&resources.database, &admin, id).await?;
        Ok(message(StatusCode::OK, "Group deleted successfully"))
    }

    /// Handle GET /api/attributes
    async fn handle_list_attributes(
        State(resources): State<Arc<ServerResources>>,
        _admin: AdminContext,
    ) -> Result<Response, AppError> {
        let list = resources.database.attributes().list_attributes().await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle GET /api/attributes/group/:id
    async fn handle_list_attributes_in_group(
        State(resources): State<Arc<ServerResources>>,
        _admin: AdminContext,
        IdPath(group_id): IdPath,
    ) -> Result<Response, AppError> {
        let list = resources
            .database
            .attributes()
            .list_attributes_in_group(group_id)
            .await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle POST /api/attributes
    async fn handle_create_attribute(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        JsonBody(body): JsonBody<AttributeRequest>,
    ) -> Result<Response, AppError> {
        let attribute = attributes::create_attribute(&resources.database, &admin, &body).await?;
        Ok((StatusCode::CREATED, Json(attribute)).into_response())
    }

    /// Handle PUT /api/attributes/:id
    async fn handle_update_attribute(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        IdPath(id): IdPath,
        JsonBody(body): JsonBody<AttributeRequest>,
    ) -> Result<Response, AppError> {
        let attribute =
            attributes::update_attribute(&resources.database, &admin, id, &body).await?;
        Ok((StatusCode::OK, Json(attribute)).into_response())
    }

    /// Handle DELETE /api/attributes/:id
    async fn handle_delete_attribute(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        IdPath(id): IdPath,
    ) -> Result<Response, AppError> {
        attributes::delete_attribute(&resources.database, &admin, id).await?;
        Ok(message(StatusCode::OK, "Attribute deleted successfully"))
    }

    /// Handle POST /item-attributes
    async fn handle_assign(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        JsonBody(body): JsonBody<ItemAttributeRequest>,
    ) -> Result<Response, AppError> {
        let assignment = attributes::assign_attribute(&resources.database, &admin, &body).await?;
        Ok((StatusCode::CREATED, Json(assignment)).into_response())
    }

    /// Handle GET /item-attributes/:id - Attributes of an item
    async fn handle_item_attributes(
        State(resources): State<Arc<ServerResources>>,
        _admin: AdminContext,
        IdPath(item_id): IdPath,
    ) -> Result<Response, AppError> {
        let list = resources
            .database
            .attributes()
            .item_attributes(item_id)
            .await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle DELETE /item-attributes/:id - Remove an assignment
    async fn handle_unassign(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        IdPath(id): IdPath,
    ) -> Result<Response, AppError> {
        attributes::unassign_attribute(&resources.database, &admin, id).await?;
        Ok(message(StatusCode::OK, "Attribute removed successfully"))
    }
}
