use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::hospital::{HospitalTable, NearestHospital};
use super::location::{ClickedPoint, LocationPoint};
use super::route::{Diagnostic, RouteResult};

/// Map interaction state, as posted by the map widget
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearestHospitalRequest {
    #[serde(default)]
    pub last_clicked: Option<ClickedPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: LocationPoint,
    pub north_east: LocationPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestHospitalResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital: Option<NearestHospital>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,

    // Rendered text for the map UI
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NearestHospitalResponse {
    pub fn no_selection() -> Self {
        Self {
            success: true,
            location: None,
            hospital: None,
            route: None,
            bounds: None,
            messages: vec!["Click on the map to select your starting location.".to_string()],
            diagnostics: Vec::new(),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            location: None,
            hospital: None,
            route: None,
            bounds: None,
            messages: Vec::new(),
            diagnostics: Vec::new(),
            error: Some(message),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalTableSummary {
    pub count: usize,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

impl From<&HospitalTable> for HospitalTableSummary {
    fn from(table: &HospitalTable) -> Self {
        Self {
            count: table.len(),
            source: table.source.display().to_string(),
            loaded_at: table.loaded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_click() {
        let request: NearestHospitalRequest = serde_json::from_str("{}").unwrap();
        assert!(request.last_clicked.is_none());

        let request: NearestHospitalRequest =
            serde_json::from_str(r#"{"last_clicked": null}"#).unwrap();
        assert!(request.last_clicked.is_none());
    }

    #[test]
    fn test_error_response_omits_empty_fields() {
        let json = serde_json::to_value(NearestHospitalResponse::error("boom".to_string())).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
        assert!(json.get("hospital").is_none());
        assert!(json.get("route").is_none());
    }
}
