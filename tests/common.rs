// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: In-memory database resources, users with tokens and catalog fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `dovana`

use std::sync::{Arc, Once};

use anyhow::Result;
use axum::Router;
use dovana::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    middleware::{require_admin, AdminContext, AuthContext},
    models::{Item, NewItem, NewVendor, User, Vendor},
    resources::ServerResources,
    server::build_router,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    create_test_resources_with(ServerConfig::for_testing()).await
}

/// Resources over a fresh in-memory database with a custom configuration
pub async fn create_test_resources_with(config: ServerConfig) -> Result<Arc<ServerResources>> {
    init_test_logging();
    let database = Database::new(&DatabaseUrl::Memory).await?;
    let secret = config
        .auth
        .jwt_secret
        .clone()
        .unwrap_or_else(|| "fallback-test-secret".to_owned());
    Ok(Arc::new(ServerResources::new(database, &secret, config)))
}

/// Resources plus the full application router
pub async fn create_test_app() -> Result<(Arc<ServerResources>, Router)> {
    let resources = create_test_resources().await?;
    let app = build_router(&resources);
    Ok((resources, app))
}

/// A persisted user and a valid bearer token for it
pub struct TestUser {
    pub user: User,
    pub token: String,
}

/// Create a user and sign a token for it
pub async fn create_user(
    resources: &ServerResources,
    email: &str,
    is_admin: bool,
) -> Result<TestUser> {
    let user = User::new(email.to_owned(), email.to_owned(), is_admin);
    resources.database.users().create(&user).await?;
    let token = resources.auth_manager.generate_token(&user)?;
    Ok(TestUser { user, token })
}

/// Create an administrator
pub async fn create_admin(resources: &ServerResources) -> Result<TestUser> {
    create_user(resources, "admin@dovana.test", true).await
}

/// Create a shopper without admin rights
pub async fn create_shopper(resources: &ServerResources) -> Result<TestUser> {
    create_user(resources, "shopper@dovana.test", false).await
}

/// Authentication context for calling services directly
pub fn auth_context(resources: &ServerResources, test_user: &TestUser) -> AuthContext {
    let claims = resources
        .auth_manager
        .validate_token(&test_user.token)
        .expect("test token must validate");
    AuthContext {
        user: test_user.user.clone(),
        claims,
    }
}

/// Admin proof for calling services directly
pub fn admin_context(resources: &ServerResources, admin: &TestUser) -> AdminContext {
    require_admin(auth_context(resources, admin)).expect("test user must be an admin")
}

/// Insert a vendor
pub async fn create_vendor(database: &Database, name: &str) -> Result<Vendor> {
    let vendor = database
        .vendors()
        .create(&NewVendor {
            name: name.to_owned(),
            contact_details: format!("{name} contacts"),
            website: format!("https://{}.example", name.to_lowercase()),
        })
        .await?;
    Ok(vendor)
}

/// Insert an item for a vendor
pub async fn create_item(database: &Database, vendor_id: i64, name: &str) -> Result<Item> {
    let item = database
        .items()
        .create(&NewItem {
            name: name.to_owned(),
            description: format!("{name} description"),
            price: 19.99,
            image_url: None,
            vendor_id,
            product_url: format!("https://shop.example/{}", name.to_lowercase()),
        })
        .await?;
    Ok(item)
}

/// Insert `count` items for a fresh vendor
pub async fn create_items(database: &Database, count: usize) -> Result<Vec<Item>> {
    let vendor = create_vendor(database, "Vendor").await?;
    let mut items = Vec::with_capacity(count);
    for index in 0..count {
        items.push(create_item(database, vendor.id, &format!("Item{index}")).await?);
    }
    Ok(items)
}

/// JSON body for creating a featured row
pub fn featured_body(item_id: i64) -> serde_json::Value {
    serde_json::json!({
        "item_id": item_id,
        "start_date": "2025-01-01",
        "end_date": "2025-02-01"
    })
}
