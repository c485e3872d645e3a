//! Operations dashboard assembly
//!
//! One endpoint feeds the landing page: headline metrics with a 24h
//! change line, a merged recent-activity feed, coarse system status, and
//! the drill-down lists behind each metric tile.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use stockroom_store::Store;
use stockroom_types::{PoStatus, Result, SaleStatus};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetric {
    pub label: String,
    pub value: i64,
    pub change: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardActivity {
    pub title: String,
    pub description: String,
    pub time: String,
}

/// Coarse subsystem indicator. `tone` is semantic (`ok` / `busy` /
/// `idle`); presentation is the client's concern.
#[derive(Debug, Clone, Serialize)]
pub struct SystemStatus {
    pub label: String,
    pub state: String,
    pub tone: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrilldownEntry {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Drilldowns {
    pub open_sales: Vec<DrilldownEntry>,
    pub draft_tickets: Vec<DrilldownEntry>,
    pub inbound_pos: Vec<DrilldownEntry>,
    pub active_receivers: Vec<DrilldownEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub metrics: Vec<DashboardMetric>,
    pub activity: Vec<DashboardActivity>,
    pub system_status: Vec<SystemStatus>,
    pub drilldowns: Drilldowns,
}

/// Render a timestamp as "Just now" / "N minutes ago" / ... for the
/// activity feed.
pub fn humanize_delta(now: DateTime<Utc>, past: DateTime<Utc>) -> String {
    let seconds = (now - past).num_seconds().max(0);
    if seconds < 60 {
        return "Just now".to_string();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{} minute{} ago", minutes, plural(minutes));
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{} hour{} ago", hours, plural(hours));
    }
    let days = hours / 24;
    format!("{} day{} ago", days, plural(days))
}

fn plural(count: i64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

pub async fn build_summary(store: &Store) -> Result<DashboardSummary> {
    let now = Utc::now();
    let last_24h = now - Duration::hours(24);
    let worker_window = now - Duration::hours(4);

    let open_sales = store.count_sales(SaleStatus::Open, None, None).await?;
    let open_sales_today = store
        .count_sales(SaleStatus::Open, None, Some(last_24h))
        .await?;
    let draft_ocr = store
        .count_sales(SaleStatus::Draft, Some("ocr_ticket"), None)
        .await?;
    let draft_ocr_new = store
        .count_sales(SaleStatus::Draft, Some("ocr_ticket"), Some(last_24h))
        .await?;
    let inbound = store.count_inbound_pos().await?;
    let recent_receipts = store.count_receivings_since(last_24h).await?;
    let active_workers = store.count_active_receivers(worker_window).await?;

    let metrics = vec![
        DashboardMetric {
            label: "Open Sales".to_string(),
            value: open_sales,
            change: format!("{open_sales_today} created in last 24h"),
            status: "awaiting fulfillment".to_string(),
        },
        DashboardMetric {
            label: "Draft OCR Tickets".to_string(),
            value: draft_ocr,
            change: format!("{draft_ocr_new} new in last 24h"),
            status: "needs review".to_string(),
        },
        DashboardMetric {
            label: "Inbound Purchase Orders".to_string(),
            value: inbound,
            change: format!("{recent_receipts} receipts logged in last 24h"),
            status: "receiving queue".to_string(),
        },
        DashboardMetric {
            label: "Active Receivers".to_string(),
            value: active_workers,
            change: format!("{recent_receipts} dock events in last 24h"),
            status: "worker health".to_string(),
        },
    ];

    let mut activity: Vec<(DateTime<Utc>, DashboardActivity)> = Vec::new();
    for sale in store.recent_sales(2).await? {
        activity.push((
            sale.created_at,
            DashboardActivity {
                title: format!("Sale #{} {}", sale.sale_id, sale.status),
                description: format!("Total ${:.2}", sale.total),
                time: humanize_delta(now, sale.created_at),
            },
        ));
    }
    for receiving in store.recent_receivings(2).await? {
        activity.push((
            receiving.received_at,
            DashboardActivity {
                title: format!("PO #{} received", receiving.po_id),
                description: format!("Checked in by {}", receiving.received_by),
                time: humanize_delta(now, receiving.received_at),
            },
        ));
    }
    for po in store.recent_pos(2).await? {
        activity.push((
            po.created_at,
            DashboardActivity {
                title: format!("PO #{} {}", po.po_id, po.status),
                description: format!("Vendor #{}", po.vendor_id),
                time: humanize_delta(now, po.created_at),
            },
        ));
    }
    activity.sort_by(|a, b| b.0.cmp(&a.0));
    let activity: Vec<DashboardActivity> =
        activity.into_iter().take(5).map(|(_, entry)| entry).collect();

    let system_status = vec![
        SystemStatus {
            label: "Worker Health".to_string(),
            state: if active_workers > 0 { "Operational" } else { "Idle" }.to_string(),
            tone: if active_workers > 0 { "ok" } else { "idle" }.to_string(),
            description: if active_workers > 0 {
                format!("{active_workers} associates checked in over last 4h")
            } else {
                "No recent receiving scans.".to_string()
            },
        },
        SystemStatus {
            label: "OCR Pipeline".to_string(),
            state: if draft_ocr > 0 { "Reviewing" } else { "Clear" }.to_string(),
            tone: if draft_ocr > 0 { "busy" } else { "ok" }.to_string(),
            description: format!("{draft_ocr} tickets awaiting review."),
        },
        SystemStatus {
            label: "Sales Pipeline".to_string(),
            state: if open_sales > 0 { "Active" } else { "Quiet" }.to_string(),
            tone: if open_sales > 0 { "busy" } else { "idle" }.to_string(),
            description: format!("{open_sales} open sales ready for fulfillment."),
        },
    ];

    let mut drilldowns = Drilldowns::default();
    for sale in store.list_sales_by_status(SaleStatus::Open, 5).await? {
        drilldowns.open_sales.push(DrilldownEntry {
            title: format!("Sale #{}", sale.sale_id),
            description: format!("Total ${:.2}", sale.total),
        });
    }
    for sale in store.list_sales_by_status(SaleStatus::Draft, 5).await? {
        drilldowns.draft_tickets.push(DrilldownEntry {
            title: format!("Sale #{}", sale.sale_id),
            description: match sale.ocr_confidence {
                Some(confidence) => format!("OCR confidence {:.0}%", confidence * 100.0),
                None => "Manual draft".to_string(),
            },
        });
    }
    for summary in store.list_po_summaries().await? {
        if drilldowns.inbound_pos.len() >= 5 {
            break;
        }
        if matches!(summary.status, PoStatus::Open | PoStatus::Partial) {
            drilldowns.inbound_pos.push(DrilldownEntry {
                title: format!("PO #{}", summary.po_id),
                description: format!(
                    "{} · {} of {} lines open",
                    summary.vendor_name.as_deref().unwrap_or("Unknown vendor"),
                    summary.open_lines,
                    summary.total_lines
                ),
            });
        }
    }
    for receiver in store.receivers_since(worker_window).await? {
        if drilldowns.active_receivers.len() >= 5 {
            break;
        }
        drilldowns.active_receivers.push(DrilldownEntry {
            title: receiver.received_by.clone(),
            description: format!(
                "{} receipt{} · last {}",
                receiver.receipts,
                plural(receiver.receipts),
                humanize_delta(now, receiver.last_received_at)
            ),
        });
    }

    Ok(DashboardSummary {
        metrics,
        activity,
        system_status,
        drilldowns,
    })
}
