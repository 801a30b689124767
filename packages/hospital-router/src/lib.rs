//! Nearest hospital lookup and driving routes for map clicks.
//!
//! A click is answered with the closest hospital by great-circle distance and
//! the driving route to it from an external directions service.

pub mod config;
pub mod handlers;
pub mod libraries;
pub mod models;
pub mod services;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use handlers::AppState;

/// HTTP routes for the map UI
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/health", get(handlers::health))
        .route("/api/nearest", post(handlers::nearest_hospital))
        .route("/api/hospitals", get(handlers::hospital_summary))
        .route("/api/hospitals/reload", post(handlers::reload_hospitals))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
