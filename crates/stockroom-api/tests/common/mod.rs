//! Shared harness for the HTTP-level tests: an app wired to a fresh
//! in-memory database, plus request helpers that round-trip JSON.

// Each integration test binary compiles this module; not all of them
// use every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use stockroom_api::{AppState, router};
use stockroom_app::{Config, LogSink};
use stockroom_store::{NewItem, NewPoLine, Store};
use tower::ServiceExt;

pub async fn test_app() -> (Router, Store) {
    let store = Store::in_memory().await.expect("in-memory store");
    let state = AppState {
        store: store.clone(),
        config: Arc::new(Config::default()),
        events: Arc::new(LogSink),
    };
    (router(state), store)
}

pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            builder
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, "POST", uri, Some(body)).await
}

/// Vendor + item + open PO with one 10-unit line.
/// Returns `(po_id, po_line_id, item_id)`.
pub async fn seed_po_with_line(store: &Store) -> (i64, i64, i64) {
    let (vendor, _) = store.get_or_create_vendor("Acme Logistics").await.unwrap();
    let item = store
        .create_item(&NewItem {
            sku: "SKU-TRUCK".to_string(),
            upc: None,
            description: "Incoming Widget".to_string(),
            category: None,
            subcategory: None,
            vendor_model: None,
            unit_cost: 5.0,
            price: 10.0,
            tax_code: None,
            short_code: "TRK1".to_string(),
        })
        .await
        .unwrap();
    let po = store
        .create_po(
            vendor.vendor_id,
            &[NewPoLine {
                item_id: item.item_id,
                description: "Widget".to_string(),
                qty_ordered: 10.0,
                unit_cost: 5.0,
            }],
            None,
            "tester",
        )
        .await
        .unwrap();
    let lines = store.po_lines(po.po_id).await.unwrap();
    (po.po_id, lines[0].po_line_id, item.item_id)
}
