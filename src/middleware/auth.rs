// ABOUTME: Caller authentication from bearer tokens or the auth_token cookie
// ABOUTME: Resolves a validated JWT to a stored user and exposes it as an axum extractor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tracing::debug;
use uuid::Uuid;

use crate::auth::Claims;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::User;
use crate::resources::ServerResources;

/// Name of the cookie web clients carry the token in
pub const AUTH_COOKIE: &str = "auth_token";

/// An authenticated caller
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Stored user the token belongs to
    pub user: User,
    /// Validated token claims
    pub claims: Claims,
}

impl AuthContext {
    /// Id of the authenticated user
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.user.id
    }
}

/// Read a single cookie value from the `Cookie` headers
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(axum::http::header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_owned())
        .filter(|value| !value.is_empty())
}

/// Token from `Authorization: Bearer`, falling back to the auth cookie
#[must_use]
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(header) = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        return header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_owned);
    }
    get_cookie_value(headers, AUTH_COOKIE)
}

/// Authenticate a request from its headers
///
/// # Errors
///
/// Returns `401` when no credentials are present, the token is invalid or
/// expired, or the user no longer exists
pub async fn authenticate(
    headers: &HeaderMap,
    resources: &ServerResources,
) -> AppResult<AuthContext> {
    let token = token_from_headers(headers).ok_or_else(AppError::auth_required)?;

    let claims = resources.auth_manager.validate_token(&token).map_err(|e| {
        AppLogger::log_security_event("invalid_token", &e.to_string(), None);
        AppError::from(e)
    })?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::auth_invalid("Token subject is not a user id"))?;

    let user = resources
        .database
        .users()
        .get(user_id)
        .await?
        .ok_or_else(|| {
            AppLogger::log_security_event("unknown_user", "Token for missing user", Some(&claims.sub));
            AppError::auth_invalid("User for this token no longer exists")
        })?;

    debug!(user.id = %user.id, "Request authenticated");
    Ok(AuthContext { user, claims })
}

#[async_trait]
impl FromRequestParts<Arc<ServerResources>> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        resources: &Arc<ServerResources>,
    ) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, resources).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));
        headers.insert("cookie", HeaderValue::from_static("auth_token=xyz"));
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn test_cookie_is_used_without_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_static("theme=dark; auth_token=xyz; lang=lt"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_non_bearer_scheme_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert_eq!(token_from_headers(&headers), None);
    }
}
