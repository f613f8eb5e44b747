// ABOUTME: Integration tests for the featured carousel HTTP routes
// ABOUTME: Covers create, capacity, reorder boundaries, delete compaction and access control
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{create_admin, create_items, create_shopper, create_test_app, featured_body};
use helpers::axum_test::AxumTestRequest;

async fn list_featured(app: &axum::Router) -> Vec<Value> {
    AxumTestRequest::get("/featured-items")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json()
}

fn item_ids(rows: &[Value]) -> Vec<i64> {
    rows.iter().map(|r| r["item_id"].as_i64().unwrap()).collect()
}

fn positions(rows: &[Value]) -> Vec<i64> {
    rows.iter().map(|r| r["position"].as_i64().unwrap()).collect()
}

async fn feature(app: &axum::Router, token: &str, item_id: i64) -> Value {
    AxumTestRequest::post("/featured-items")
        .bearer(token)
        .json(&featured_body(item_id))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json()
}

#[tokio::test]
async fn test_create_appends_at_next_position() {
    let (resources, app) = create_test_app().await.unwrap();
    let admin = create_admin(&resources).await.unwrap();
    let items = create_items(&resources.database, 3).await.unwrap();

    let first = feature(&app, &admin.token, items[0].id).await;
    let second = feature(&app, &admin.token, items[1].id).await;
    assert_eq!(first["position"], 0);
    assert_eq!(second["position"], 1);

    let rows = list_featured(&app).await;
    assert_eq!(item_ids(&rows), vec![items[0].id, items[1].id]);
    assert_eq!(rows[0]["name"], "Item0");
    assert_eq!(rows[0]["vendor_name"], "Vendor");
    assert_eq!(rows[0]["start_date"], "2025-01-01");
    assert_eq!(rows[0]["product_url"], "https://shop.example/item0");
}

#[tokio::test]
async fn test_sixth_create_fails_with_capacity_error() {
    let (resources, app) = create_test_app().await.unwrap();
    let admin = create_admin(&resources).await.unwrap();
    let items = create_items(&resources.database, 6).await.unwrap();

    for item in &items[..5] {
        feature(&app, &admin.token, item.id).await;
    }

    let body: Value = AxumTestRequest::post("/featured-items")
        .bearer(&admin.token)
        .json(&featured_body(items[5].id))
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .json();
    assert_eq!(body["error"]["code"], "CAPACITY_EXCEEDED");
    assert_eq!(
        body["error"]["message"],
        "Maximum number of featured items reached"
    );

    let rows = list_featured(&app).await;
    assert_eq!(positions(&rows), vec![0, 1, 2, 3, 4]);
    assert_eq!(
        item_ids(&rows),
        items[..5].iter().map(|i| i.id).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_create_validation_errors() {
    let (resources, app) = create_test_app().await.unwrap();
    let admin = create_admin(&resources).await.unwrap();
    let items = create_items(&resources.database, 1).await.unwrap();

    let cases = [
        json!({"start_date": "2025-01-01", "end_date": "2025-02-01"}),
        json!({"item_id": items[0].id, "start_date": "01/01/2025", "end_date": "2025-02-01"}),
        json!({"item_id": items[0].id, "start_date": "2025-02-01", "end_date": "2025-02-01"}),
        json!({"item_id": items[0].id, "start_date": "2025-03-01", "end_date": "2025-02-01"}),
        json!({"item_id": 9999, "start_date": "2025-01-01", "end_date": "2025-02-01"}),
    ];

    for case in cases {
        let body: Value = AxumTestRequest::post("/featured-items")
            .bearer(&admin.token)
            .json(&case)
            .send(app.clone())
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
            .json();
        assert_eq!(body["error"]["code"], "VALIDATION_FAILED", "case {case}");
    }

    assert!(list_featured(&app).await.is_empty());
}

#[tokio::test]
async fn test_reorder_swaps_neighbours_and_rejects_boundaries() {
    let (resources, app) = create_test_app().await.unwrap();
    let admin = create_admin(&resources).await.unwrap();
    let items = create_items(&resources.database, 3).await.unwrap();

    let a = feature(&app, &admin.token, items[0].id).await;
    let b = feature(&app, &admin.token, items[1].id).await;
    feature(&app, &admin.token, items[2].id).await;

    // [A,B,C]; B down -> [A,C,B]
    let body: Value = AxumTestRequest::post("/featured-items/reorder")
        .bearer(&admin.token)
        .json(&json!({"id": b["id"], "direction": "down"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["message"], "Featured item moved successfully");
    assert_eq!(body["changes"].as_array().unwrap().len(), 2);

    let rows = list_featured(&app).await;
    assert_eq!(item_ids(&rows), vec![items[0].id, items[2].id, items[1].id]);
    assert_eq!(positions(&rows), vec![0, 1, 2]);

    // A up -> boundary error, nothing changes
    let body: Value = AxumTestRequest::post("/featured-items/reorder")
        .bearer(&admin.token)
        .json(&json!({"id": a["id"], "direction": "up"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .json();
    assert_eq!(body["error"]["code"], "BOUNDARY_REACHED");
    assert_eq!(body["error"]["message"], "Cannot move item in that direction");

    // B is now last; moving it down is also a boundary error
    AxumTestRequest::post("/featured-items/reorder")
        .bearer(&admin.token)
        .json(&json!({"id": b["id"], "direction": "down"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let rows = list_featured(&app).await;
    assert_eq!(item_ids(&rows), vec![items[0].id, items[2].id, items[1].id]);
}

#[tokio::test]
async fn test_reorder_rejects_bad_input() {
    let (resources, app) = create_test_app().await.unwrap();
    let admin = create_admin(&resources).await.unwrap();
    let items = create_items(&resources.database, 1).await.unwrap();
    let a = feature(&app, &admin.token, items[0].id).await;

    AxumTestRequest::post("/featured-items/reorder")
        .bearer(&admin.token)
        .json(&json!({"id": a["id"], "direction": "sideways"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    AxumTestRequest::post("/featured-items/reorder")
        .bearer(&admin.token)
        .json(&json!({"id": 424_242, "direction": "up"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    AxumTestRequest::post("/featured-items/reorder")
        .bearer(&admin.token)
        .raw("application/json", "{not json")
        .send(app.clone())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_compacts_later_positions() {
    let (resources, app) = create_test_app().await.unwrap();
    let admin = create_admin(&resources).await.unwrap();
    let items = create_items(&resources.database, 4).await.unwrap();

    let mut rows = Vec::new();
    for item in &items {
        rows.push(feature(&app, &admin.token, item.id).await);
    }

    AxumTestRequest::delete(&format!("/featured-items/{}", rows[1]["id"]))
        .bearer(&admin.token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let listed = list_featured(&app).await;
    assert_eq!(positions(&listed), vec![0, 1, 2]);
    assert_eq!(
        item_ids(&listed),
        vec![items[0].id, items[2].id, items[3].id]
    );

    AxumTestRequest::delete(&format!("/featured-items/{}", rows[1]["id"]))
        .bearer(&admin.token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    AxumTestRequest::delete("/featured-items/abc")
        .bearer(&admin.token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mutations_require_admin() {
    let (resources, app) = create_test_app().await.unwrap();
    let shopper = create_shopper(&resources).await.unwrap();
    let items = create_items(&resources.database, 1).await.unwrap();

    let body: Value = AxumTestRequest::post("/featured-items")
        .json(&featured_body(items[0].id))
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .json();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");

    let body: Value = AxumTestRequest::post("/featured-items")
        .bearer(&shopper.token)
        .json(&featured_body(items[0].id))
        .send(app.clone())
        .await
        .assert_status(StatusCode::FORBIDDEN)
        .json();
    assert_eq!(body["error"]["code"], "PERMISSION_DENIED");

    AxumTestRequest::delete("/featured-items/1")
        .bearer(&shopper.token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::FORBIDDEN);

    AxumTestRequest::post("/featured-items/reorder")
        .header("cookie", "theme=dark; auth_token=not-a-token")
        .json(&json!({"id": 1, "direction": "up"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert!(list_featured(&app).await.is_empty());
}
