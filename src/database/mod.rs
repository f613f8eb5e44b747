// ABOUTME: SQLite connection pool, schema migrations and entity managers for the catalog
// ABOUTME: Hands out one manager per table group, each wrapping a clone of the shared pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! # Database Management
//!
//! [`Database`] owns the `SQLite` pool and the schema. Each table group is
//! accessed through a manager (`VendorManager`, `ItemManager`, ...) built on a
//! clone of the pool, so route handlers never write SQL directly.

mod attributes;
mod featured;
mod items;
mod redirects;
mod system_settings;
/// Transaction guard and retry helpers
pub mod transactions;
mod users;
mod vendors;
mod wishlists;

pub use attributes::AttributeManager;
pub use featured::FeaturedItemManager;
pub use items::ItemManager;
pub use redirects::{RedirectClick, RedirectManager};
pub use users::UserManager;
pub use vendors::VendorManager;
pub use wishlists::WishlistManager;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};

/// Pool size for file-backed databases
const FILE_POOL_SIZE: u32 = 5;

/// Database handle shared by the server and the CLI
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect, creating the file if needed, and run migrations
    ///
    /// In-memory databases use a single long-lived connection, since every
    /// `SQLite` connection to `:memory:` opens its own empty database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        if let DatabaseUrl::SQLite { path } = url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::config(format!(
                        "Cannot create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let options = SqliteConnectOptions::from_str(&url.to_connection_string())
            .map_err(|e| AppError::config(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(FILE_POOL_SIZE)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Vendor operations
    #[must_use]
    pub fn vendors(&self) -> VendorManager {
        VendorManager::new(self.pool.clone())
    }

    /// Item operations
    #[must_use]
    pub fn items(&self) -> ItemManager {
        ItemManager::new(self.pool.clone())
    }

    /// Featured carousel operations
    #[must_use]
    pub fn featured(&self) -> FeaturedItemManager {
        FeaturedItemManager::new(self.pool.clone())
    }

    /// Attribute, group and item-attribute operations
    #[must_use]
    pub fn attributes(&self) -> AttributeManager {
        AttributeManager::new(self.pool.clone())
    }

    /// Wishlist operations
    #[must_use]
    pub fn wishlists(&self) -> WishlistManager {
        WishlistManager::new(self.pool.clone())
    }

    /// Redirect log operations
    #[must_use]
    pub fn redirects(&self) -> RedirectManager {
        RedirectManager::new(self.pool.clone())
    }

    /// User operations
    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.pool.clone())
    }

    /// Check the database answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the ping query fails
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_accounts().await?;
        self.migrate_catalog().await?;
        self.migrate_featured().await?;
        self.migrate_engagement().await?;
        self.migrate_attributes().await?;
        debug!("Database migrations complete");
        Ok(())
    }

    async fn run_statements(&self, statements: &[&str]) -> AppResult<()> {
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        }
        Ok(())
    }

    async fn migrate_accounts(&self) -> AppResult<()> {
        self.run_statements(&[
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                display_name TEXT NOT NULL,
                is_admin BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS system_settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        ])
        .await
    }

    async fn migrate_catalog(&self) -> AppResult<()> {
        self.run_statements(&[
            r"
            CREATE TABLE IF NOT EXISTS vendors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                contact_details TEXT NOT NULL,
                website TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                name_folded TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL CHECK (price >= 0),
                image_url TEXT,
                vendor_id INTEGER NOT NULL REFERENCES vendors(id) ON DELETE CASCADE,
                product_url TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_items_vendor_id ON items(vendor_id)",
            "CREATE INDEX IF NOT EXISTS idx_items_name ON items(name)",
        ])
        .await
    }

    // Featured rows are not cascaded from items: removing one must compact
    // the remaining positions, which only the lineup code does.
    async fn migrate_featured(&self) -> AppResult<()> {
        self.run_statements(&[
            r"
            CREATE TABLE IF NOT EXISTS featured_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_id INTEGER NOT NULL REFERENCES items(id),
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                position INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_featured_items_position ON featured_items(position)",
            "CREATE INDEX IF NOT EXISTS idx_featured_items_item_id ON featured_items(item_id)",
        ])
        .await
    }

    async fn migrate_engagement(&self) -> AppResult<()> {
        self.run_statements(&[
            r"
            CREATE TABLE IF NOT EXISTS redirect_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_id INTEGER NOT NULL REFERENCES items(id) ON DELETE CASCADE,
                timestamp TEXT NOT NULL,
                ip_address TEXT,
                user_agent TEXT,
                referrer TEXT,
                unique_hash TEXT UNIQUE NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_redirect_logs_item_id ON redirect_logs(item_id)",
            r"
            CREATE TABLE IF NOT EXISTS wishlists (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                item_id INTEGER NOT NULL REFERENCES items(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                UNIQUE (user_id, item_id)
            )
            ",
        ])
        .await
    }

    async fn migrate_attributes(&self) -> AppResult<()> {
        self.run_statements(&[
            r"
            CREATE TABLE IF NOT EXISTS attribute_groups (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS attributes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                attribute_group_id INTEGER NOT NULL REFERENCES attribute_groups(id)
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_attributes_group_id ON attributes(attribute_group_id)",
            r"
            CREATE TABLE IF NOT EXISTS item_attributes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_id INTEGER NOT NULL REFERENCES items(id) ON DELETE CASCADE,
                attribute_id INTEGER NOT NULL REFERENCES attributes(id) ON DELETE CASCADE,
                UNIQUE (item_id, attribute_id)
            )
            ",
        ])
        .await
    }
}

/// Parse an RFC 3339 timestamp column, falling back to now for legacy rows
pub(crate) fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}

/// Map a write failure, turning unique-key collisions into `409`
pub(crate) fn map_write_error(context: &str, error: &sqlx::Error) -> AppError {
    match error {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::already_exists(format!("{context}: a record with this value already exists"))
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::validation(format!("{context}: referenced record does not exist"))
        }
        other => AppError::database(format!("{context}: {other}")),
    }
}
