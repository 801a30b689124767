pub mod hospitals;
pub mod nearest;

use std::sync::Arc;

use axum::{response::IntoResponse, Json};

use crate::services::{hospital_data::HospitalStore, routing::RouteClient};

pub use hospitals::{hospital_summary, reload_hospitals};
pub use nearest::nearest_hospital;

/// Shared by every request: the cached hospital table and the routing client
#[derive(Clone)]
pub struct AppState {
    pub hospitals: Arc<HospitalStore>,
    pub routes: RouteClient,
}

impl AppState {
    pub fn new(hospitals: HospitalStore, routes: RouteClient) -> Self {
        Self {
            hospitals: Arc::new(hospitals),
            routes,
        }
    }
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "hospital-router",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
