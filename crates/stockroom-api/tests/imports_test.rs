//! HTTP tests for spreadsheet import.

mod common;

use axum::body::Body;
use axum::http::Request;
use common::test_app;
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "stockroom-test-boundary";

fn multipart_csv(csv: &str, filename: &str) -> (String, Body) {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{BOUNDARY}--\r\n"
    );
    (
        format!("multipart/form-data; boundary={BOUNDARY}"),
        Body::from(body),
    )
}

async fn upload(app: &axum::Router, uri: &str, csv: &str, filename: &str) -> (u16, Value) {
    let (content_type, body) = multipart_csv(csv, filename);
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(body)
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn product_upload_reports_counters_and_message() {
    let (app, store) = test_app().await;
    let csv = "sku,description,cost,price,barcode,qty_on_hand,location,vendor\n\
               WID-001,Walnut Widget,5.00,12.50,012345678905,12,Backroom,Widget Co\n";

    let (status, body) =
        upload(&app, "/imports/spreadsheet?dataset=products", csv, "catalog.csv").await;

    assert_eq!(status, 200);
    assert_eq!(body["counters"]["items"], 1);
    assert_eq!(body["counters"]["inventoryRecords"], 1);
    assert_eq!(body["counters"]["vendors"], 1);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Imported 1 item(s)"));
    assert!(message.contains("Updated 1 inventory record(s)"));
    assert!(body["importedAt"].is_string());

    let item = store.find_item_by_sku("WID-001").await.unwrap().unwrap();
    assert_eq!(item.description, "Walnut Widget");
}

#[tokio::test]
async fn warnings_surface_in_detail() {
    let (app, _store) = test_app().await;
    let csv = "po_number,vendor,sku,qty_ordered,cost\n\
               PO-7,Widget Co,GHOST-1,2,3.0\n";

    let (status, body) = upload(
        &app,
        "/imports/spreadsheet?dataset=purchase_orders",
        csv,
        "po.csv",
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["counters"]["purchaseOrders"], 1);
    assert!(body["detail"].as_str().unwrap().contains("GHOST-1"));
}

#[tokio::test]
async fn unknown_extension_is_rejected() {
    let (app, _store) = test_app().await;
    let (status, body) = upload(&app, "/imports/spreadsheet", "a,b\n1,2\n", "items.xls").await;
    assert_eq!(status, 400);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Unsupported file type"));
}

#[tokio::test]
async fn unmatched_headers_warn_instead_of_importing() {
    let (app, _store) = test_app().await;
    let (status, body) = upload(&app, "/imports/spreadsheet", "alpha,beta\n1,2\n", "x.csv").await;
    assert_eq!(status, 200);
    assert_eq!(
        body["message"],
        "No importable rows were found in the spreadsheet."
    );
}
