//! Aggregation of a truck's update stream.
//!
//! The dock UI shows each truck with a digest of its updates: the latest
//! reported status, how many free-text notes were logged, and how much of
//! each PO line has been unloaded so far. The digest is derived here from
//! the raw stream so every reader agrees on it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stockroom_types::{TruckStatus, TruckUpdateType};

use crate::model::TruckUpdate;

/// Accumulated unloading progress for one PO line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineProgress {
    pub po_line_id: i64,
    pub item_id: Option<i64>,
    pub total_quantity: f64,
}

/// Digest of an update stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TruckActivity {
    pub latest_status: Option<TruckStatus>,
    pub note_count: usize,
    pub line_progress: Vec<LineProgress>,
}

/// Summarize updates into a [`TruckActivity`].
///
/// Updates are processed in `created_at` order regardless of input order;
/// `line_progress` entries come back sorted by `po_line_id`.
pub fn summarize_updates(updates: &[TruckUpdate]) -> TruckActivity {
    let mut ordered: Vec<&TruckUpdate> = updates.iter().collect();
    ordered.sort_by_key(|update| update.created_at);

    let mut latest_status = None;
    let mut note_count = 0;
    let mut progress: BTreeMap<i64, LineProgress> = BTreeMap::new();

    for update in ordered {
        match update.update_type {
            TruckUpdateType::Status => {
                if update.status.is_some() {
                    latest_status = update.status;
                }
            }
            TruckUpdateType::Note => note_count += 1,
            TruckUpdateType::LineProgress => {
                let Some(po_line_id) = update.po_line_id else {
                    continue;
                };
                let quantity = update.quantity.unwrap_or(0.0);
                progress
                    .entry(po_line_id)
                    .and_modify(|entry| entry.total_quantity += quantity)
                    .or_insert(LineProgress {
                        po_line_id,
                        item_id: update.item_id,
                        total_quantity: quantity,
                    });
            }
        }
    }

    TruckActivity {
        latest_status,
        note_count,
        line_progress: progress.into_values().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn update(
        seconds: i64,
        update_type: TruckUpdateType,
        status: Option<TruckStatus>,
        po_line_id: Option<i64>,
        quantity: Option<f64>,
    ) -> TruckUpdate {
        TruckUpdate {
            update_id: seconds,
            truck_id: 1,
            update_type,
            message: None,
            status,
            po_line_id,
            item_id: po_line_id.map(|id| id + 100),
            quantity,
            created_by: Some("dock".to_string()),
            created_at: Utc::now() + Duration::seconds(seconds),
        }
    }

    #[test]
    fn latest_status_wins_by_time_not_input_order() {
        let newer = update(20, TruckUpdateType::Status, Some(TruckStatus::Unloading), None, None);
        let older = update(10, TruckUpdateType::Status, Some(TruckStatus::Arrived), None, None);
        let activity = summarize_updates(&[newer, older]);
        assert_eq!(activity.latest_status, Some(TruckStatus::Unloading));
    }

    #[test]
    fn sums_line_progress_per_line() {
        let updates = vec![
            update(1, TruckUpdateType::LineProgress, None, Some(7), Some(1.5)),
            update(2, TruckUpdateType::Note, None, None, None),
            update(3, TruckUpdateType::LineProgress, None, Some(7), Some(2.0)),
            update(4, TruckUpdateType::LineProgress, None, Some(3), Some(4.0)),
        ];
        let activity = summarize_updates(&updates);
        assert_eq!(activity.note_count, 1);
        assert_eq!(activity.line_progress.len(), 2);
        // Sorted by po_line_id
        assert_eq!(activity.line_progress[0].po_line_id, 3);
        assert_eq!(activity.line_progress[1].po_line_id, 7);
        assert!((activity.line_progress[1].total_quantity - 3.5).abs() < 1e-9);
    }

    #[test]
    fn ignores_progress_without_a_line() {
        let updates = vec![update(1, TruckUpdateType::LineProgress, None, None, Some(2.0))];
        let activity = summarize_updates(&updates);
        assert!(activity.line_progress.is_empty());
    }
}
