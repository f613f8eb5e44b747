// ABOUTME: System settings storage for generated server secrets
// ABOUTME: Persists the JWT signing secret when none is configured in the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use super::Database;
use crate::constants::system_settings::JWT_SECRET;
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use rand::RngCore;
use sqlx::Row;
use tracing::info;

/// Length in bytes of a generated signing secret
const GENERATED_SECRET_BYTES: usize = 64;

impl Database {
    /// Get a system setting by key
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_system_setting(&self, key: &str) -> AppResult<Option<String>> {
        let row = sqlx::query("SELECT value FROM system_settings WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get system setting: {e}")))?;

        Ok(row.map(|row| row.get("value")))
    }

    /// Insert a setting unless it already exists
    async fn insert_system_setting_if_absent(&self, key: &str, value: &str) -> AppResult<()> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r"
            INSERT INTO system_settings (key, value, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            ON CONFLICT(key) DO NOTHING
            ",
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to set system setting: {e}")))?;
        Ok(())
    }

    /// Return the persisted JWT secret, generating it on first use
    ///
    /// Concurrent first calls converge on whichever secret was inserted first.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings table cannot be read or written
    pub async fn get_or_create_jwt_secret(&self) -> AppResult<String> {
        if let Some(secret) = self.get_system_setting(JWT_SECRET).await? {
            return Ok(secret);
        }

        let mut bytes = [0_u8; GENERATED_SECRET_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        self.insert_system_setting_if_absent(JWT_SECRET, &hex::encode(bytes))
            .await?;
        info!("Generated and persisted a new JWT signing secret");

        self.get_system_setting(JWT_SECRET)
            .await?
            .ok_or_else(|| AppError::internal("JWT secret missing after creation"))
    }
}
