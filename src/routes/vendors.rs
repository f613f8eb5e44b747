// ABOUTME: Route handlers for vendor management
// ABOUTME: Authenticated users may read vendors; admins create, update and delete them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;

use super::{with_admin_limit, with_public_limit, IdPath, JsonBody};
use crate::errors::AppError;
use crate::middleware::{AdminContext, AuthContext};
use crate::models::{CreateVendorRequest, UpdateVendorRequest, Vendor};
use crate::resources::ServerResources;
use crate::services::catalog;

/// Response for listing vendors
#[derive(Debug, Serialize)]
pub struct ListVendorsResponse {
    /// All vendors
    pub data: Vec<Vendor>,
}

/// Vendor routes handler
pub struct VendorRoutes;

impl VendorRoutes {
    /// Create all vendor routes
    pub fn routes(resources: &Arc<ServerResources>) -> Router {
        let reads = Router::new()
            .route("/vendors", get(Self::handle_list))
            .route("/vendors/:id", get(Self::handle_get));

        let admin = Router::new()
            .route("/vendors", post(Self::handle_create))
            .route(
                "/vendors/:id",
                put(Self::handle_update).delete(Self::handle_delete),
            );

        with_public_limit(reads, resources).merge(with_admin_limit(admin, resources))
    }

    /// Handle GET /vendors - List vendors
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        _auth: AuthContext,
    ) -> Result<Response, AppError> {
        let vendors = resources.database.vendors().list().await?;
        Ok((StatusCode::OK, Json(ListVendorsResponse { data: vendors })).into_response())
    }

    /// Handle GET /vendors/:id - One vendor
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        _auth: AuthContext,
        IdPath(id): IdPath,
    ) -> Result<Response, AppError> {
        let vendor = catalog::get_vendor(&resources.database, id).await?;
        Ok((StatusCode::OK, Json(vendor)).into_response())
    }

    /// Handle POST /vendors - Create a vendor
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        JsonBody(body): JsonBody<CreateVendorRequest>,
    ) -> Result<Response, AppError> {
        let vendor = catalog::create_vendor(&resources.database, &admin, &body).await?;
        Ok((StatusCode::CREATED, Json(vendor)).into_response())
    }

    /// Handle PUT /vendors/:id - Partial update
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        IdPath(id): IdPath,
        JsonBody(body): JsonBody<UpdateVendorRequest>,
    ) -> Result<Response, AppError> {
        let vendor = catalog::update_vendor(&resources.database, &admin, id, &body).await?;
        Ok((StatusCode::OK, Json(vendor)).into_response())
    }

    /// Handle DELETE /vendors/:id - Delete a vendor and its items
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        IdPath(id): IdPath,
    ) -> Result<Response, AppError> {
        catalog::delete_vendor(&resources.database, &admin, id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
