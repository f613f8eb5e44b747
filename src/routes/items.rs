// ABOUTME: Route handlers for catalog items, item search and product redirects
// ABOUTME: Public browse, search and click-through plus admin create, update and delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{with_admin_limit, with_public_limit, IdPath, JsonBody};
use crate::database::RedirectClick;
use crate::errors::AppError;
use crate::middleware::rate_limiting::client_address;
use crate::middleware::AdminContext;
use crate::models::{CreateItemRequest, UpdateItemRequest};
use crate::resources::ServerResources;
use crate::services::{catalog, redirects};

/// `{"success": true, "data": ...}` envelope used by the storefront
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    /// Always `true`
    pub success: bool,
    /// Payload
    pub data: T,
}

impl<T> DataResponse<T> {
    fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Query parameters for item search
#[derive(Debug, Deserialize, Default)]
pub struct SearchQuery {
    /// Substring of the item name
    pub q: Option<String>,
}

/// Items routes handler
pub struct ItemRoutes;

impl ItemRoutes {
    /// Create all item routes
    pub fn routes(resources: &Arc<ServerResources>) -> Router {
        let public = Router::new()
            .route("/items", get(Self::handle_list))
            .route("/items/:id", get(Self::handle_get))
            .route("/api/search", get(Self::handle_search))
            .route("/redirect/:id", get(Self::handle_redirect));

        let admin = Router::new()
            .route("/items", post(Self::handle_create))
            .route(
                "/items/:id",
                put(Self::handle_update).delete(Self::handle_delete),
            );

        with_public_limit(public, resources).merge(with_admin_limit(admin, resources))
    }

    /// Handle GET /items - All items with vendor names
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let items = resources.database.items().list().await?;
        Ok((StatusCode::OK, Json(DataResponse::new(items))).into_response())
    }

    /// Handle GET /items/:id - One item
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        IdPath(id): IdPath,
    ) -> Result<Response, AppError> {
        let item = catalog::get_item(&resources.database, id).await?;
        Ok((StatusCode::OK, Json(DataResponse::new(item))).into_response())
    }

    /// Handle GET /api/search?q= - Name search
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<SearchQuery>,
    ) -> Result<Response, AppError> {
        let items = catalog::search_items(&resources.database, query.q.as_deref()).await?;
        Ok((StatusCode::OK, Json(items)).into_response())
    }

    /// Handle POST /items - Create an item
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        JsonBody(body): JsonBody<CreateItemRequest>,
    ) -> Result<Response, AppError> {
        let item = catalog::create_item(&resources.database, &admin, &body).await?;
        Ok((StatusCode::CREATED, Json(item)).into_response())
    }

    /// Handle PUT /items/:id - Partial update
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        IdPath(id): IdPath,
        JsonBody(body): JsonBody<UpdateItemRequest>,
    ) -> Result<Response, AppError> {
        let item = catalog::update_item(&resources.database, &admin, id, &body).await?;
        Ok((StatusCode::OK, Json(item)).into_response())
    }

    /// Handle DELETE /items/:id - Delete with cascades
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        IdPath(id): IdPath,
    ) -> Result<Response, AppError> {
        catalog::delete_item(&resources.database, &admin, id).await?;
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Item deleted successfully" })),
        )
            .into_response())
    }

    /// Handle GET /redirect/:id - Log a click-through
    async fn handle_redirect(
        State(resources): State<Arc<ServerResources>>,
        IdPath(item_id): IdPath,
        peer: Option<ConnectInfo<SocketAddr>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let header_value = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        let click = RedirectClick {
            ip_address: client_address(&headers, peer.map(|info| info.0)),
            user_agent: header_value(header::USER_AGENT),
            referrer: header_value(header::REFERER),
        };

        let outcome =
            redirects::record_redirect(&resources.database, item_id, click, Utc::now()).await?;
        Ok((StatusCode::OK, Json(outcome)).into_response())
    }
}
