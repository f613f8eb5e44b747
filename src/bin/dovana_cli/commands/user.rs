// ABOUTME: User management command for dovana-cli
// ABOUTME: Creates shopper or administrator accounts that tokens can be issued for
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use anyhow::{bail, Result};
use dovana::{database::Database, models::User};
use tracing::info;

use crate::helpers::display::display_user;

/// Create a user, refusing duplicates by email
pub async fn create(
    database: &Database,
    email: String,
    name: Option<String>,
    admin: bool,
) -> Result<()> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        bail!("A valid email address is required");
    }

    if database.users().get_by_email(&email).await?.is_some() {
        bail!("A user with email {email} already exists");
    }

    let display_name = name
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_owned());

    let user = User::new(email, display_name, admin);
    database.users().create(&user).await?;
    info!(user_id = %user.id, admin, "User created");

    display_user(&user);
    Ok(())
}
