//! Config and station PIN endpoints

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use stockroom_app::station;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub labels_enabled: bool,
    pub short_code_length: usize,
    pub station_pin_rotate_minutes: i64,
}

pub async fn config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        labels_enabled: state.config.labels_enabled,
        short_code_length: state.config.short_code_length,
        station_pin_rotate_minutes: state.config.station_pin_rotate_minutes,
    })
}

#[derive(Debug, Serialize)]
pub struct StationPinResponse {
    pub pin: String,
    pub expires_at: DateTime<Utc>,
}

pub async fn station_pin(State(state): State<AppState>) -> Json<StationPinResponse> {
    let (pin, expires_at) = station::station_pin(
        &state.config.station_secret,
        state.config.station_pin_rotate_minutes,
        Utc::now(),
    );
    Json(StationPinResponse { pin, expires_at })
}
