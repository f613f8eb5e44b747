// ABOUTME: Token command for dovana-cli
// ABOUTME: Signs a bearer token for an existing user with the server's secret
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use anyhow::{anyhow, Result};
use dovana::resources::ServerResources;
use tracing::info;

use crate::helpers::display::display_issued_token;

/// Issue a token for the user with this email
pub async fn issue(resources: &ServerResources, email: &str) -> Result<()> {
    let email = email.trim().to_lowercase();
    let user = resources
        .database
        .users()
        .get_by_email(&email)
        .await?
        .ok_or_else(|| anyhow!("No user with email {email}; create it with `dovana-cli user create`"))?;

    let token = resources.auth_manager.generate_token(&user)?;
    info!(user_id = %user.id, "Token issued");

    display_issued_token(&user, &token, resources.auth_manager.token_expiry_hours());
    Ok(())
}
