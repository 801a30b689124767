use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use super::AppState;
use crate::models::{HospitalError, HospitalTableSummary};

/// Summary of the cached hospital table, loading it if needed
pub async fn hospital_summary(State(state): State<AppState>) -> Response {
    match state.hospitals.get_or_load().await {
        Ok(table) => Json(HospitalTableSummary::from(table.as_ref())).into_response(),
        Err(e) => load_failure(&state, e),
    }
}

/// Re-read the hospital source
pub async fn reload_hospitals(State(state): State<AppState>) -> Response {
    match state.hospitals.reload().await {
        Ok(table) => {
            info!("Reloaded {} hospitals", table.len());
            Json(HospitalTableSummary::from(table.as_ref())).into_response()
        }
        Err(e) => load_failure(&state, e),
    }
}

fn load_failure(state: &AppState, e: HospitalError) -> Response {
    error!(
        "Failed to load hospital data from {}: {}",
        state.hospitals.path().display(),
        e
    );
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(serde_json::json!({ "error": e.user_message() })),
    )
        .into_response()
}
