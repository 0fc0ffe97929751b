//! Internal notification endpoints.

use axum::{extract::State, http::StatusCode};
use tracing::info;

use crate::state::AppState;

/// POST /internal/notify - Broadcast a pulse on behalf of another process.
pub async fn notify(State(state): State<AppState>) -> StatusCode {
    let delivered = state.broadcast();
    info!(delivered, "Received internal notification, pulsed WebSocket clients");
    StatusCode::OK
}
