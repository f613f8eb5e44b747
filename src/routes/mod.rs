// ABOUTME: Route module organization for the Dovana HTTP API
// ABOUTME: Domain routers plus JSON body and path extractors that answer with the error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! Route module for the catalog API
//!
//! Each domain module exposes a `XRoutes::routes(resources)` builder and thin
//! handlers that authenticate, parse and delegate to `crate::services`.
//! Public reads run under the public rate-limit budget, admin mutations under
//! the admin budget.

/// Attribute groups, attributes and item attributes
pub mod attributes;
/// Featured carousel routes
pub mod featured;
/// Health check and readiness routes
pub mod health;
/// XML product feed upload
pub mod imports;
/// Items, search and redirects
pub mod items;
/// Vendor routes
pub mod vendors;
/// Wishlist routes
pub mod wishlist;

pub use attributes::AttributeRoutes;
pub use featured::FeaturedRoutes;
pub use health::HealthRoutes;
pub use imports::ImportRoutes;
pub use items::ItemRoutes;
pub use vendors::VendorRoutes;
pub use wishlist::WishlistRoutes;

use std::sync::Arc;

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::{middleware, Json, Router};
use serde::de::DeserializeOwned;

use crate::errors::AppError;
use crate::middleware::{admin_rate_limit, public_rate_limit};
use crate::resources::ServerResources;

/// JSON request body whose rejections use the API error envelope
///
/// Unparseable JSON is `400`; well-formed JSON with wrongly typed fields is
/// a `422` validation error.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::JsonDataError(e)) => Err(AppError::validation(e.body_text())),
            Err(rejection) => Err(AppError::invalid_format(rejection.body_text())),
        }
    }
}

/// Numeric `:id` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i64>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| Self(id))
            .map_err(|_| AppError::invalid_format("Identifier in the path must be an integer"))
    }
}

/// Attach the public request budget to a router
pub(crate) fn with_public_limit(
    router: Router<Arc<ServerResources>>,
    resources: &Arc<ServerResources>,
) -> Router {
    router
        .route_layer(middleware::from_fn_with_state(
            resources.clone(),
            public_rate_limit,
        ))
        .with_state(resources.clone())
}

/// Attach the admin request budget to a router
pub(crate) fn with_admin_limit(
    router: Router<Arc<ServerResources>>,
    resources: &Arc<ServerResources>,
) -> Router {
    router
        .route_layer(middleware::from_fn_with_state(
            resources.clone(),
            admin_rate_limit,
        ))
        .with_state(resources.clone())
}
