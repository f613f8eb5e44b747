// ABOUTME: User account model
// ABOUTME: Users authenticate with a JWT; the admin flag gates catalog mutations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Primary key
    pub id: Uuid,
    /// Unique email
    pub email: String,
    /// Display name
    pub display_name: String,
    /// Elevated privileges for catalog management
    pub is_admin: bool,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new user with a fresh id
    #[must_use]
    pub fn new(email: String, display_name: String, is_admin: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            is_admin,
            created_at: Utc::now(),
        }
    }
}
