//! Pure domain services

pub mod labels;
pub mod short_code;
pub mod truck_activity;

pub use labels::{prepare_label_context, render_label, upcharge_code};
pub use short_code::short_code_for_sku;
pub use truck_activity::{summarize_updates, LineProgress, TruckActivity};
