// ABOUTME: Central admin authorization guard for routes that mutate the catalog
// ABOUTME: Verifies the caller is an admin and returns 403 Forbidden otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! Admin Authorization Guard
//!
//! [`AdminContext`] can only be obtained by extracting it from a request whose
//! caller is an authenticated admin. Services that mutate catalog data take
//! `&AdminContext` as a parameter, so the check cannot be skipped.
//!
//! ```rust,ignore
//! async fn handle_delete(admin: AdminContext, ...) -> Result<Response, AppError> {
//!     FeaturedService::new(&resources.database).delete(&admin, id).await?;
//! }
//! ```

use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::{authenticate, AuthContext};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::User;
use crate::resources::ServerResources;

/// Proof that the current caller is an admin
#[derive(Debug, Clone)]
pub struct AdminContext {
    user: User,
}

impl AdminContext {
    /// The admin user
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Admin user id as a string, for audit logs
    #[must_use]
    pub fn actor(&self) -> String {
        self.user.id.to_string()
    }
}

/// Require admin privileges for an authenticated caller
///
/// # Errors
///
/// Returns `403` when the user is not an admin
pub fn require_admin(auth: AuthContext) -> AppResult<AdminContext> {
    if !auth.user.is_admin {
        let user_id = auth.user.id.to_string();
        AppLogger::log_security_event(
            "admin_access_denied",
            "Non-admin user attempted an admin operation",
            Some(&user_id),
        );
        return Err(AppError::permission_denied("Admin privileges required"));
    }
    Ok(AdminContext { user: auth.user })
}

#[async_trait]
impl FromRequestParts<Arc<ServerResources>> for AdminContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        resources: &Arc<ServerResources>,
    ) -> Result<Self, Self::Rejection> {
        require_admin(authenticate(&parts.headers, resources).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Claims;
    use crate::errors::ErrorCode;

    fn context(is_admin: bool) -> AuthContext {
        let user = User::new("someone@dovana.lt".into(), "Someone".into(), is_admin);
        AuthContext {
            claims: Claims {
                sub: user.id.to_string(),
                email: user.email.clone(),
                iat: 0,
                exp: 0,
                aud: "dovana".into(),
            },
            user,
        }
    }

    #[test]
    fn test_admin_passes() {
        let admin = require_admin(context(true)).unwrap();
        assert!(admin.user().is_admin);
    }

    #[test]
    fn test_shopper_is_forbidden() {
        let err = require_admin(context(false)).unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert_eq!(err.http_status(), 403);
    }
}
