//! HTTP tests for the operations dashboard.

mod common;

use common::{get, test_app};

#[tokio::test]
async fn summary_includes_metrics_activity_and_drilldowns() {
    let (app, store) = test_app().await;
    stockroom_app::seed::apply(&store).await.unwrap();

    let (status, body) = get(&app, "/dashboard/summary").await;
    assert_eq!(status, 200);

    let metrics = body["metrics"].as_array().unwrap();
    assert_eq!(metrics.len(), 4);
    assert_eq!(metrics[0]["label"], "Open Sales");
    assert!(metrics[0]["value"].as_i64().unwrap() > 0);
    assert!(metrics[2]["change"]
        .as_str()
        .unwrap()
        .contains("receipts logged in last 24h"));

    let activity = body["activity"].as_array().unwrap();
    assert!(!activity.is_empty() && activity.len() <= 5);
    assert!(activity[0]["time"].is_string());

    assert_eq!(body["system_status"].as_array().unwrap().len(), 3);
    assert_eq!(body["system_status"][0]["label"], "Worker Health");
    assert_eq!(body["system_status"][0]["tone"], "ok");

    let drilldowns = &body["drilldowns"];
    let open_sales = drilldowns["openSales"].as_array().unwrap();
    assert!(!open_sales.is_empty());
    assert!(open_sales[0]["title"].as_str().unwrap().starts_with("Sale "));
    assert!(!drilldowns["inboundPos"].as_array().unwrap().is_empty());
    assert!(!drilldowns["activeReceivers"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn empty_database_reports_idle_status() {
    let (app, _store) = test_app().await;

    let (status, body) = get(&app, "/dashboard/summary").await;
    assert_eq!(status, 200);
    assert_eq!(body["metrics"][0]["value"], 0);
    assert_eq!(body["system_status"][0]["state"], "Idle");
    assert!(body["activity"].as_array().unwrap().is_empty());
}
