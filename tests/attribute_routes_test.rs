// ABOUTME: Integration tests for attribute groups, attributes and item attribute assignments
// ABOUTME: Also checks the idempotent occasion seed used by the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use dovana::{constants::seeds, services::attributes};
use serde_json::{json, Value};

use common::{
    create_admin, create_item, create_shopper, create_test_app, create_test_resources,
    create_vendor,
};
use helpers::axum_test::AxumTestRequest;

#[tokio::test]
async fn test_group_and_attribute_lifecycle() {
    let (resources, app) = create_test_app().await.unwrap();
    let admin = create_admin(&resources).await.unwrap();

    let group: Value = AxumTestRequest::post("/api/attributes/groups")
        .bearer(&admin.token)
        .json(&json!({"name": "Recipient"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let group_id = group["id"].as_i64().unwrap();

    let body: Value = AxumTestRequest::post("/api/attributes/groups")
        .bearer(&admin.token)
        .json(&json!({"name": "Recipient"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CONFLICT)
        .json();
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    let attribute: Value = AxumTestRequest::post("/api/attributes")
        .bearer(&admin.token)
        .json(&json!({"name": "Grandma", "attribute_group_id": group_id}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let attribute_id = attribute["id"].as_i64().unwrap();

    AxumTestRequest::post("/api/attributes")
        .bearer(&admin.token)
        .json(&json!({"name": "Orphan", "attribute_group_id": 999}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let in_group: Vec<Value> = AxumTestRequest::get(&format!("/api/attributes/group/{group_id}"))
        .bearer(&admin.token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(in_group.len(), 1);

    // A group with attributes cannot be deleted
    let body: Value = AxumTestRequest::delete(&format!("/api/attributes/groups/{group_id}"))
        .bearer(&admin.token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .json();
    assert_eq!(body["error"]["details"]["attribute_count"], 1);

    let renamed: Value = AxumTestRequest::put(&format!("/api/attributes/{attribute_id}"))
        .bearer(&admin.token)
        .json(&json!({"name": "Grandpa", "attribute_group_id": group_id}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(renamed["name"], "Grandpa");

    let body: Value = AxumTestRequest::delete(&format!("/api/attributes/{attribute_id}"))
        .bearer(&admin.token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["message"], "Attribute deleted successfully");

    let body: Value = AxumTestRequest::delete(&format!("/api/attributes/groups/{group_id}"))
        .bearer(&admin.token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["message"], "Group deleted successfully");

    let groups: Vec<Value> = AxumTestRequest::get("/api/attributes/groups")
        .bearer(&admin.token)
        .send(app.clone())
        .await
        .json();
    assert!(groups.is_empty());
}

#[tokio::test]
async fn test_item_attribute_assignment() {
    let (resources, app) = create_test_app().await.unwrap();
    let admin = create_admin(&resources).await.unwrap();
    let vendor = create_vendor(&resources.database, "Acme").await.unwrap();
    let item = create_item(&resources.database, vendor.id, "Mug").await.unwrap();
    let report = attributes::seed_occasions(&resources.database).await.unwrap();
    let occasions = resources
        .database
        .attributes()
        .list_attributes_in_group(report.group.id)
        .await
        .unwrap();

    let assignment: Value = AxumTestRequest::post("/item-attributes")
        .bearer(&admin.token)
        .json(&json!({"item_id": item.id, "attribute_id": occasions[0].id}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    AxumTestRequest::post("/item-attributes")
        .bearer(&admin.token)
        .json(&json!({"item_id": item.id, "attribute_id": occasions[0].id}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CONFLICT);

    AxumTestRequest::post("/item-attributes")
        .bearer(&admin.token)
        .json(&json!({"item_id": 999, "attribute_id": occasions[0].id}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let details: Vec<Value> = AxumTestRequest::get(&format!("/item-attributes/{}", item.id))
        .bearer(&admin.token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["group_name"], seeds::OCCASION_GROUP);
    assert_eq!(details[0]["attribute_name"], occasions[0].name);

    let body: Value = AxumTestRequest::delete(&format!("/item-attributes/{}", assignment["id"]))
        .bearer(&admin.token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["message"], "Attribute removed successfully");

    let details: Vec<Value> = AxumTestRequest::get(&format!("/item-attributes/{}", item.id))
        .bearer(&admin.token)
        .send(app.clone())
        .await
        .json();
    assert!(details.is_empty());
}

#[tokio::test]
async fn test_attribute_routes_are_admin_only() {
    let (resources, app) = create_test_app().await.unwrap();
    let shopper = create_shopper(&resources).await.unwrap();

    AxumTestRequest::get("/api/attributes")
        .bearer(&shopper.token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::FORBIDDEN);

    AxumTestRequest::get("/api/attributes/groups")
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_seed_occasions_is_idempotent() {
    let resources = create_test_resources().await.unwrap();

    let first = attributes::seed_occasions(&resources.database).await.unwrap();
    assert_eq!(first.group.name, seeds::OCCASION_GROUP);
    assert_eq!(first.created, seeds::OCCASIONS.len());

    let second = attributes::seed_occasions(&resources.database).await.unwrap();
    assert_eq!(second.group.id, first.group.id);
    assert_eq!(second.created, 0);

    let names: Vec<String> = resources
        .database
        .attributes()
        .list_attributes_in_group(first.group.id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    for occasion in seeds::OCCASIONS {
        assert!(names.iter().any(|n| n == occasion), "missing {occasion}");
    }
}
