use std::error::Error as _;
use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::{header, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::models::{Diagnostic, LocationPoint, RouteGeometry, RouteOutcome, RouteResult};

pub const DEFAULT_USER_AGENT: &str = concat!("hospital-router/", env!("CARGO_PKG_VERSION"));

const NO_ROUTE_MESSAGE: &str = "No route found. Please verify locations or API key.";
const MISSING_SEGMENTS_MESSAGE: &str = "Route found but no detailed segment properties available.";

#[derive(Debug, Clone)]
pub struct RouteClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub profile: String,
    pub timeout: Duration,
}

impl Default for RouteClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openrouteservice.org".to_string(),
            api_key: String::new(),
            profile: "driving-car".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// Directions request body; coordinates are `[longitude, latitude]`
#[derive(Debug, Serialize)]
struct DirectionsRequest {
    coordinates: [[f64; 2]; 2],
}

/// GeoJSON directions response
#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<RouteFeature>,
}

#[derive(Debug, Deserialize)]
struct RouteFeature {
    geometry: RouteGeometry,
    #[serde(default)]
    properties: RouteProperties,
}

#[derive(Debug, Default, Deserialize)]
struct RouteProperties {
    #[serde(default)]
    segments: Vec<RouteSegment>,
}

#[derive(Debug, Deserialize)]
struct RouteSegment {
    /// meters
    distance: Option<f64>,
    /// seconds
    duration: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
enum RouteError {
    #[error("{0}")]
    Transport(String),

    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("malformed directions response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Client for the external directions service
#[derive(Debug, Clone)]
pub struct RouteClient {
    inner: reqwest::Client,
    directions_url: Url,
    api_key: String,
}

impl RouteClient {
    pub fn new(config: RouteClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        let raw = format!(
            "{}/v2/directions/{}/geojson",
            config.base_url.trim_end_matches('/'),
            config.profile
        );
        let directions_url = raw
            .parse::<Url>()
            .map_err(|e| anyhow!("{} is not a valid url: {}", raw, e))?;

        Ok(Self {
            inner,
            directions_url,
            api_key: config.api_key,
        })
    }

    pub fn directions_url(&self) -> &Url {
        &self.directions_url
    }

    /// Look up the driving route between two points.
    ///
    /// Never fails: any problem yields [`RouteResult::not_found`] plus
    /// diagnostics describing what went wrong.
    pub async fn best_route(
        &self,
        origin: &LocationPoint,
        destination: &LocationPoint,
    ) -> RouteOutcome {
        tracing::info!(
            "🚑 Requesting route ({}, {}) -> ({}, {})",
            origin.latitude,
            origin.longitude,
            destination.latitude,
            destination.longitude
        );

        match self.request_directions(origin, destination).await {
            Ok(response) => extract_route(response),
            Err(RouteError::Api { status, message }) => {
                tracing::warn!("Routing service returned HTTP {}: {}", status, message);
                RouteOutcome::failed(vec![
                    Diagnostic::error(format!("OpenRouteService API Error: {}: {}", status, message)),
                    Diagnostic::error("Please verify your API key and network connection."),
                ])
            }
            Err(RouteError::Malformed(e)) => {
                tracing::warn!("Failed to parse routing response: {}", e);
                RouteOutcome::failed(vec![Diagnostic::error(NO_ROUTE_MESSAGE)])
            }
            Err(e @ RouteError::Transport(_)) => {
                tracing::warn!("{}", e);
                RouteOutcome::failed(vec![Diagnostic::error(format!(
                    "Unexpected error while calculating route: {}",
                    e
                ))])
            }
        }
    }

    async fn request_directions(
        &self,
        origin: &LocationPoint,
        destination: &LocationPoint,
    ) -> Result<DirectionsResponse, RouteError> {
        let body = DirectionsRequest {
            coordinates: [origin.to_lon_lat(), destination.to_lon_lat()],
        };

        let mut request = self
            .inner
            .post(self.directions_url.clone())
            .header(header::ACCEPT, "application/json, application/geo+json")
            .json(&body);
        if !self.api_key.is_empty() {
            request = request.header(header::AUTHORIZATION, self.api_key.as_str());
        }

        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(RouteError::Api {
                status,
                message: api_error_message(&text),
            });
        }

        tracing::debug!("✅ Routing service responded successfully");

        Ok(serde_json::from_str(&text)?)
    }
}

fn transport_error(e: reqwest::Error) -> RouteError {
    // Keep the whole chain, reqwest's top-level message is rarely enough
    let mut message = format!("Routing request failed: {}", e);
    let mut source = e.source();
    while let Some(err) = source {
        message.push_str(&format!("\n  Caused by: {}", err));
        source = err.source();
    }
    RouteError::Transport(message)
}

/// Pull a readable message out of an error body like `{"error": {"message": ".."}}`
fn api_error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|value| {
        let error = value.get("error")?;
        error
            .get("message")
            .and_then(|m| m.as_str())
            .or_else(|| error.as_str())
            .map(str::to_string)
    });

    match message {
        Some(message) => message,
        None if body.trim().is_empty() => "empty response body".to_string(),
        None => body.trim().to_string(),
    }
}

fn extract_route(response: DirectionsResponse) -> RouteOutcome {
    let Some(feature) = response.features.into_iter().next() else {
        tracing::warn!("Routing service returned no route candidates");
        return RouteOutcome::failed(vec![Diagnostic::error(NO_ROUTE_MESSAGE)]);
    };

    let segment = feature.properties.segments.first();
    let distance_m = segment.and_then(|s| s.distance);
    let duration_s = segment.and_then(|s| s.duration);

    let mut outcome = RouteOutcome::found(RouteResult {
        geometry: Some(feature.geometry),
        distance_km: distance_m.unwrap_or(0.0) / 1000.0,
        duration_min: duration_s.unwrap_or(0.0) / 60.0,
    });

    if distance_m.is_none() && duration_s.is_none() {
        tracing::warn!("Route has no segment properties");
        outcome.diagnostics.push(Diagnostic::warning(MISSING_SEGMENTS_MESSAGE));
    }

    outcome
}
