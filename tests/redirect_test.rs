// ABOUTME: Tests for click-through redirect logging
// ABOUTME: Duplicate suppression inside the window, distinct fingerprints and the HTTP envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};
use dovana::{
    database::RedirectClick,
    errors::ErrorCode,
    models::RedirectOutcome,
    services::redirects::{self, DUPLICATE_MESSAGE},
};
use serde_json::Value;

use common::{create_item, create_test_app, create_test_resources, create_vendor};
use helpers::axum_test::AxumTestRequest;

fn click(ip: &str) -> RedirectClick {
    RedirectClick {
        ip_address: Some(ip.to_owned()),
        user_agent: Some("Mozilla/5.0".to_owned()),
        referrer: Some("https://dovana.example/items".to_owned()),
    }
}

#[tokio::test]
async fn test_same_click_within_window_is_logged_once() {
    let resources = create_test_resources().await.unwrap();
    let database = &resources.database;
    let vendor = create_vendor(database, "Acme").await.unwrap();
    let item = create_item(database, vendor.id, "Mug").await.unwrap();
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

    let first = redirects::record_redirect(database, item.id, click("10.0.0.1"), at)
        .await
        .unwrap();
    match first {
        RedirectOutcome::Logged {
            unique_hash,
            product_url,
        } => {
            assert_eq!(unique_hash.len(), 64);
            assert_eq!(product_url, item.product_url);
        }
        RedirectOutcome::Duplicate { .. } => panic!("first click must be logged"),
    }

    let again = redirects::record_redirect(database, item.id, click("10.0.0.1"), at)
        .await
        .unwrap();
    assert_eq!(
        again,
        RedirectOutcome::Duplicate {
            message: DUPLICATE_MESSAGE.to_owned()
        }
    );
    assert_eq!(database.redirects().count_for_item(item.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_distinct_clicks_are_logged_separately() {
    let resources = create_test_resources().await.unwrap();
    let database = &resources.database;
    let vendor = create_vendor(database, "Acme").await.unwrap();
    let item = create_item(database, vendor.id, "Mug").await.unwrap();
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

    for (ip, offset) in [("10.0.0.1", 0), ("10.0.0.2", 0), ("10.0.0.1", 1), ("10.0.0.1", 30)] {
        let outcome = redirects::record_redirect(
            database,
            item.id,
            click(ip),
            at + Duration::seconds(offset),
        )
        .await
        .unwrap();
        assert!(
            matches!(outcome, RedirectOutcome::Logged { .. }),
            "{ip} at +{offset}s should be logged"
        );
    }
    assert_eq!(database.redirects().count_for_item(item.id).await.unwrap(), 4);
}

#[tokio::test]
async fn test_unknown_item_is_not_found() {
    let resources = create_test_resources().await.unwrap();
    let err = redirects::record_redirect(&resources.database, 404, click("10.0.0.1"), Utc::now())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_redirect_route_returns_product_url() {
    let (resources, app) = create_test_app().await.unwrap();
    let vendor = create_vendor(&resources.database, "Acme").await.unwrap();
    let item = create_item(&resources.database, vendor.id, "Mug").await.unwrap();

    let body: Value = AxumTestRequest::get(&format!("/redirect/{}", item.id))
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .header("user-agent", "integration-test")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["product_url"], item.product_url);
    assert!(body["unique_hash"].is_string());

    AxumTestRequest::get("/redirect/999")
        .send(app.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
