//! HTTP tests for the incoming-trucks workspace.

mod common;

use common::{get, post, seed_po_with_line, test_app};
use serde_json::json;

#[tokio::test]
async fn create_incoming_truck_with_lines() {
    let (app, store) = test_app().await;
    let (po_id, po_line_id, item_id) = seed_po_with_line(&store).await;

    let payload = json!({
        "po_id": po_id,
        "reference": "TRUCK-100",
        "carrier": "Acme Freight",
        "status": "scheduled",
        "lines": [
            { "po_line_id": po_line_id, "item_id": item_id, "qty_expected": 10.0 }
        ]
    });
    let (status, body) = post(&app, "/incoming-trucks", payload).await;

    assert_eq!(status, 200);
    assert_eq!(body["po_id"], po_id);
    assert_eq!(body["reference"], "TRUCK-100");
    assert_eq!(body["carrier"], "Acme Freight");
    assert_eq!(body["lines"][0]["po_line_id"], po_line_id);
    assert_eq!(body["updates"]["history"], json!([]));

    let lines = store
        .truck_lines(body["truck_id"].as_i64().unwrap())
        .await
        .unwrap();
    assert_eq!(lines[0].qty_expected, Some(10.0));
}

#[tokio::test]
async fn post_update_validates_item_linkage() {
    let (app, store) = test_app().await;
    let (po_id, po_line_id, item_id) = seed_po_with_line(&store).await;
    let other_item = store
        .create_item(&stockroom_store::NewItem {
            sku: "SKU-OTHER".to_string(),
            upc: None,
            description: "Other".to_string(),
            category: None,
            subcategory: None,
            vendor_model: None,
            unit_cost: 3.0,
            price: 6.0,
            tax_code: None,
            short_code: "OTR1".to_string(),
        })
        .await
        .unwrap();

    let (_, created) = post(
        &app,
        "/incoming-trucks",
        json!({
            "po_id": po_id,
            "reference": "TRUCK-200",
            "lines": [
                { "po_line_id": po_line_id, "item_id": item_id, "qty_expected": 5.0 }
            ]
        }),
    )
    .await;
    let truck_id = created["truck_id"].as_i64().unwrap();

    let (status, body) = post(
        &app,
        &format!("/incoming-trucks/{truck_id}/updates"),
        json!({
            "update_type": "line_progress",
            "po_line_id": po_line_id,
            "item_id": other_item.item_id,
            "quantity": 2.0
        }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["detail"], "item_mismatch");

    let (status, body) = post(
        &app,
        &format!("/incoming-trucks/{truck_id}/updates"),
        json!({
            "update_type": "line_progress",
            "po_line_id": po_line_id,
            "item_id": item_id,
            "quantity": 2.5
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["quantity"], 2.5);
    assert_eq!(body["truck_id"], truck_id);

    let updates = store.truck_updates(truck_id).await.unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].quantity, Some(2.5));
}

#[tokio::test]
async fn list_incoming_trucks_includes_aggregates() {
    let (app, store) = test_app().await;
    let (po_id, po_line_id, item_id) = seed_po_with_line(&store).await;

    let (_, created) = post(
        &app,
        "/incoming-trucks",
        json!({
            "po_id": po_id,
            "reference": "TRUCK-300",
            "lines": [
                { "po_line_id": po_line_id, "item_id": item_id, "qty_expected": 7.0 }
            ]
        }),
    )
    .await;
    let truck_id = created["truck_id"].as_i64().unwrap();
    let updates_uri = format!("/incoming-trucks/{truck_id}/updates");

    post(&app, &updates_uri, json!({ "update_type": "status", "status": "arrived" })).await;
    post(
        &app,
        &updates_uri,
        json!({ "update_type": "note", "message": "Waiting for dock" }),
    )
    .await;
    post(
        &app,
        &updates_uri,
        json!({
            "update_type": "line_progress",
            "po_line_id": po_line_id,
            "item_id": item_id,
            "quantity": 1.5
        }),
    )
    .await;
    post(
        &app,
        &updates_uri,
        json!({
            "update_type": "line_progress",
            "po_line_id": po_line_id,
            "item_id": item_id,
            "quantity": 2.0
        }),
    )
    .await;

    let (status, body) = get(&app, "/incoming-trucks").await;
    assert_eq!(status, 200);
    let trucks = body.as_array().unwrap();
    assert!(!trucks.is_empty());
    let truck = &trucks[0];
    assert_eq!(truck["status"], "arrived");
    assert_eq!(truck["updates"]["latest_status"], "arrived");
    assert_eq!(truck["updates"]["note_count"], 1);
    assert_eq!(truck["updates"]["history"].as_array().unwrap().len(), 4);
    let progress = truck["updates"]["line_progress"].as_array().unwrap();
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0]["po_line_id"], po_line_id);
    assert!((progress[0]["total_quantity"].as_f64().unwrap() - 3.5).abs() < 1e-9);
}

#[tokio::test]
async fn create_against_missing_po_is_404() {
    let (app, _store) = test_app().await;
    let (status, body) = post(
        &app,
        "/incoming-trucks",
        json!({ "po_id": 999, "reference": "TRUCK-404" }),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "po_not_found");
}
