// ABOUTME: Redirect click log database operations
// ABOUTME: Records click-throughs and detects repeats of the same fingerprint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use super::parse_timestamp;
use crate::errors::{AppError, AppResult};

/// Click attributes captured from the request
#[derive(Debug, Clone, Default)]
pub struct RedirectClick {
    /// Client address
    pub ip_address: Option<String>,
    /// Client user agent
    pub user_agent: Option<String>,
    /// Referring page
    pub referrer: Option<String>,
}

/// Redirect log database operations manager
pub struct RedirectManager {
    pool: SqlitePool,
}

impl RedirectManager {
    /// Create a new redirect manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// When a click with this fingerprint was last logged
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn logged_at(&self, unique_hash: &str) -> AppResult<Option<DateTime<Utc>>> {
        let row = sqlx::query("SELECT timestamp FROM redirect_logs WHERE unique_hash = $1")
            .bind(unique_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up redirect: {e}")))?;

        Ok(row.map(|row| {
            let timestamp: String = row.get("timestamp");
            parse_timestamp(&timestamp)
        }))
    }

    /// Record a click; returns `false` when the fingerprint was already logged
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails for another reason
    pub async fn record(
        &self,
        item_id: i64,
        unique_hash: &str,
        click: &RedirectClick,
        at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO redirect_logs (item_id, timestamp, ip_address, user_agent, referrer, unique_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT(unique_hash) DO NOTHING
            ",
        )
        .bind(item_id)
        .bind(at.to_rfc3339())
        .bind(&click.ip_address)
        .bind(&click.user_agent)
        .bind(&click.referrer)
        .bind(unique_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to log redirect: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of clicks logged for an item
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_for_item(&self, item_id: i64) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM redirect_logs WHERE item_id = $1")
            .bind(item_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count redirects: {e}")))
    }
}
