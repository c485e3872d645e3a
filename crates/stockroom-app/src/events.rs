//! Outbound domain events
//!
//! Downstream automations care about three moments: a ticket being
//! finalized, a PO receipt being posted, and a delivery completing.
//! [`EventSink`] is the seam those notifications go through; the shipped
//! implementation logs them, and an HTTP-backed sink can slot in behind
//! the same trait.

use serde::Serialize;
use stockroom_domain::{Sale, SaleLine};

#[derive(Debug, Clone, Serialize)]
pub struct TicketFinalized {
    pub sale_id: i64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub delivery_requested: bool,
    pub line_count: usize,
}

impl TicketFinalized {
    pub fn from_sale(sale: &Sale, lines: &[SaleLine]) -> Self {
        Self {
            sale_id: sale.sale_id,
            subtotal: sale.subtotal,
            tax: sale.tax,
            total: sale.total,
            delivery_requested: sale.delivery_requested,
            line_count: lines.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PoReceived {
    pub po_id: i64,
    pub receipt_id: i64,
    pub bill_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeliveryCompleted {
    pub sale_id: i64,
}

pub trait EventSink: Send + Sync {
    fn ticket_finalized(&self, event: TicketFinalized);
    fn po_received(&self, event: PoReceived);
    fn delivery_completed(&self, event: DeliveryCompleted);
}

/// Default sink: structured log lines only.
#[derive(Debug, Default, Clone)]
pub struct LogSink;

impl EventSink for LogSink {
    fn ticket_finalized(&self, event: TicketFinalized) {
        tracing::info!(
            sale_id = event.sale_id,
            total = event.total,
            lines = event.line_count,
            "ticket finalized"
        );
    }

    fn po_received(&self, event: PoReceived) {
        tracing::info!(
            po_id = event.po_id,
            receipt_id = event.receipt_id,
            bill_id = event.bill_id,
            "po received"
        );
    }

    fn delivery_completed(&self, event: DeliveryCompleted) {
        tracing::info!(sale_id = event.sale_id, "delivery completed");
    }
}
