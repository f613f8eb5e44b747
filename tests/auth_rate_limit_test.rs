// ABOUTME: Integration tests for token authentication, the admin guard and request budgets
// ABOUTME: Expired, foreign and orphaned tokens are rejected; budgets answer 429 with Retry-After
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use dovana::{
    auth::AuthManager,
    config::{RateLimitConfig, ServerConfig},
    models::User,
    server::build_router,
};
use serde_json::Value;

use common::{create_admin, create_shopper, create_test_app, create_test_resources_with};
use helpers::axum_test::AxumTestRequest;

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let (resources, app) = create_test_app().await.unwrap();
    let admin = create_admin(&resources).await.unwrap();

    let foreign = AuthManager::new(b"some-other-secret", 24)
        .generate_token(&admin.user)
        .unwrap();

    let body: Value = AxumTestRequest::get("/wishlist")
        .bearer(&foreign)
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .json();
    assert_eq!(body["error"]["code"], "AUTH_INVALID");
}

#[tokio::test]
async fn test_token_for_unknown_user_is_rejected() {
    let (resources, app) = create_test_app().await.unwrap();
    let ghost = User::new("ghost@dovana.test".into(), "Ghost".into(), true);
    let token = resources.auth_manager.generate_token(&ghost).unwrap();

    AxumTestRequest::post("/featured-items")
        .bearer(&token)
        .json(&common::featured_body(1))
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let (_resources, app) = create_test_app().await.unwrap();

    AxumTestRequest::get("/wishlist")
        .bearer("not.a.jwt")
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = AxumTestRequest::get("/wishlist")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .json();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_public_budget_is_enforced_per_client() {
    let mut config = ServerConfig::for_testing();
    config.security.rate_limit = RateLimitConfig {
        enabled: true,
        public_per_minute: 2,
        admin_per_minute: 5,
    };
    let resources = create_test_resources_with(config).await.unwrap();
    let app = build_router(&resources);

    for remaining in ["1", "0"] {
        let response = AxumTestRequest::get("/items")
            .header("x-forwarded-for", "198.51.100.1")
            .send(app.clone())
            .await;
        assert_eq!(response.header("x-ratelimit-limit").as_deref(), Some("2"));
        assert_eq!(
            response.header("x-ratelimit-remaining").as_deref(),
            Some(remaining)
        );
        response.assert_status(StatusCode::OK);
    }

    let limited = AxumTestRequest::get("/featured-items")
        .header("x-forwarded-for", "198.51.100.1")
        .send(app.clone())
        .await;
    assert!(limited.header("retry-after").is_some());
    let body: Value = limited
        .assert_status(StatusCode::TOO_MANY_REQUESTS)
        .json();
    assert_eq!(body["error"]["code"], "RATE_LIMIT_EXCEEDED");
    assert!(body["error"]["details"]["retry_after_seconds"].is_u64());

    // Another client has its own window
    AxumTestRequest::get("/items")
        .header("x-forwarded-for", "198.51.100.2")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK);

    // Health checks are outside the budgets
    AxumTestRequest::get("/health")
        .header("x-forwarded-for", "198.51.100.1")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_admin_budget_is_separate() {
    let mut config = ServerConfig::for_testing();
    config.security.rate_limit = RateLimitConfig {
        enabled: true,
        public_per_minute: 1,
        admin_per_minute: 3,
    };
    let resources = create_test_resources_with(config).await.unwrap();
    let app = build_router(&resources);
    let admin = create_admin(&resources).await.unwrap();
    let shopper = create_shopper(&resources).await.unwrap();

    AxumTestRequest::get("/items")
        .header("x-forwarded-for", "192.0.2.9")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK);
    AxumTestRequest::get("/items")
        .header("x-forwarded-for", "192.0.2.9")
        .send(app.clone())
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    for _ in 0..3 {
        AxumTestRequest::get("/api/attributes")
            .header("x-forwarded-for", "192.0.2.9")
            .bearer(&admin.token)
            .send(app.clone())
            .await
            .assert_status(StatusCode::OK);
    }

    // Rejected callers still spend budget
    AxumTestRequest::get("/api/attributes")
        .header("x-forwarded-for", "192.0.2.9")
        .bearer(&shopper.token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}
