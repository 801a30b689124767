use serde::{Deserialize, Serialize};

use super::location::LocationPoint;

/// GeoJSON LineString as returned by the routing service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    /// `[longitude, latitude]` positions, optionally followed by elevation
    pub coordinates: Vec<Vec<f64>>,
}

impl RouteGeometry {
    /// Positions as points; entries with fewer than two values are skipped
    pub fn points(&self) -> impl Iterator<Item = LocationPoint> + '_ {
        self.coordinates.iter().filter_map(|position| match position.as_slice() {
            [lon, lat, ..] => Some(LocationPoint::new(*lat, *lon)),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub geometry: Option<RouteGeometry>,
    pub distance_km: f64,
    pub duration_min: f64,
}

impl RouteResult {
    /// Sentinel for a failed lookup: no geometry, zero distance and duration
    pub fn not_found() -> Self {
        Self {
            geometry: None,
            distance_km: 0.0,
            duration_min: 0.0,
        }
    }

    pub fn is_found(&self) -> bool {
        self.geometry.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

/// User-visible message attached to an otherwise successful response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            message: message.into(),
        }
    }
}

/// Route lookup result plus whatever went wrong getting it
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutcome {
    pub result: RouteResult,
    pub diagnostics: Vec<Diagnostic>,
}

impl RouteOutcome {
    pub fn found(result: RouteResult) -> Self {
        Self {
            result,
            diagnostics: Vec::new(),
        }
    }

    pub fn failed(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            result: RouteResult::not_found(),
            diagnostics,
        }
    }
}
