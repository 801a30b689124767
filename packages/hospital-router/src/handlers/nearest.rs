use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, error, info, warn};

use super::AppState;
use crate::{
    libraries::interaction::process_interaction,
    models::{NearestHospitalRequest, NearestHospitalResponse},
};

/// Handle a click on the map
///
/// 1. Loads the hospital table on first use
/// 2. Finds the nearest hospital by straight-line distance
/// 3. Asks the routing service for the driving route to it
pub async fn nearest_hospital(
    State(state): State<AppState>,
    Json(request): Json<NearestHospitalRequest>,
) -> Result<Json<NearestHospitalResponse>, StatusCode> {
    debug!("Map interaction: {:?}", request.last_clicked);

    let table = match state.hospitals.get_or_load().await {
        Ok(table) => table,
        Err(e) => {
            error!("Failed to load hospital data: {}", e);
            return Ok(Json(NearestHospitalResponse::error(e.user_message())));
        }
    };

    match process_interaction(&request, &table, &state.routes).await {
        Ok(Some(interaction)) => {
            info!(
                "Nearest hospital to ({:.4}, {:.4}) is {} ({:.2} km)",
                interaction.location.latitude,
                interaction.location.longitude,
                interaction.hospital.name,
                interaction.hospital.distance_km
            );
            if !interaction.route.is_found() {
                warn!("Returning {} without a driving route", interaction.hospital.name);
            }
            Ok(Json(NearestHospitalResponse::from(interaction)))
        }
        Ok(None) => Ok(Json(NearestHospitalResponse::no_selection())),
        Err(e) => {
            warn!("Interaction failed: {}", e);
            Ok(Json(NearestHospitalResponse::error(e.user_message())))
        }
    }
}
