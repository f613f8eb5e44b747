// ABOUTME: Route handler for uploading a vendor's XML product feed
// ABOUTME: Enforces the upload size limit and answers with the created items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::with_admin_limit;
use crate::errors::AppError;
use crate::middleware::AdminContext;
use crate::models::Item;
use crate::resources::ServerResources;
use crate::services::xml_import::{self, INVALID_XML_MESSAGE};

/// Query parameters of the upload
#[derive(Debug, Deserialize, Default)]
pub struct UploadQuery {
    /// Vendor the products belong to
    pub vendor_id: Option<String>,
}

/// Response for a successful import
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Confirmation text
    pub message: &'static str,
    /// Created items
    pub data: Vec<Item>,
}

/// XML import routes handler
pub struct ImportRoutes;

impl ImportRoutes {
    /// Create the upload route with its body limit
    pub fn routes(resources: &Arc<ServerResources>) -> Router {
        let router = Router::new()
            .route("/upload-xml", post(Self::handle_upload))
            .layer(DefaultBodyLimit::max(resources.config.security.max_upload_bytes));

        with_admin_limit(router, resources)
    }

    /// Handle POST /upload-xml?vendor_id=N
    async fn handle_upload(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminContext,
        Query(query): Query<UploadQuery>,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let vendor_id = query
            .vendor_id
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::validation("The vendor_id field is required"))?
            .parse::<i64>()
            .map_err(|_| AppError::validation("The vendor_id must be an integer"))?;

        let xml = std::str::from_utf8(&body)
            .map_err(|_| AppError::invalid_format(INVALID_XML_MESSAGE))?;

        let items = xml_import::import_products(&resources.database, &admin, vendor_id, xml).await?;
        let response = UploadResponse {
            message: "Products uploaded successfully",
            data: items,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }
}
