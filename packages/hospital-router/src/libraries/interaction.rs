use geo::{BoundingRect, MultiPoint, Point};

use crate::models::{
    Bounds, Diagnostic, HospitalError, HospitalTable, LocationPoint, NearestHospital,
    NearestHospitalRequest, NearestHospitalResponse, RouteResult,
};
use crate::services::routing::RouteClient;

use super::nearest::find_nearest_hospital;

/// Everything produced by one map click
#[derive(Debug, Clone)]
pub struct Interaction {
    pub location: LocationPoint,
    pub hospital: NearestHospital,
    pub route: RouteResult,
    pub diagnostics: Vec<Diagnostic>,
}

impl Interaction {
    /// Text lines describing the result, in display order
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Selected location: Latitude {:.4}, Longitude {:.4}",
                self.location.latitude, self.location.longitude
            ),
            format!("Nearest hospital: {}", self.hospital.name),
            format!("Straight-line distance: {:.2} km", self.hospital.distance_km),
        ];

        if self.route.is_found() {
            lines.push(format!("Driving distance: {:.2} km", self.route.distance_km));
            lines.push(format!("Estimated time: {:.1} min", self.route.duration_min));
        } else {
            lines.push("Could not retrieve driving route information.".to_string());
        }

        lines
    }

    /// Box covering the user, the hospital and the route
    pub fn bounds(&self) -> Option<Bounds> {
        let route_points = self
            .route
            .geometry
            .iter()
            .flat_map(|geometry| geometry.points());

        let points: MultiPoint<f64> = [self.location, self.hospital.location]
            .into_iter()
            .chain(route_points)
            .map(|p| Point::new(p.longitude, p.latitude))
            .collect();

        let rect = points.bounding_rect()?;
        Some(Bounds {
            south_west: LocationPoint::new(rect.min().y, rect.min().x),
            north_east: LocationPoint::new(rect.max().y, rect.max().x),
        })
    }
}

impl From<Interaction> for NearestHospitalResponse {
    fn from(interaction: Interaction) -> Self {
        let messages = interaction.summary_lines();
        let bounds = interaction.bounds();

        Self {
            success: true,
            location: Some(interaction.location),
            hospital: Some(interaction.hospital),
            route: Some(interaction.route),
            bounds,
            messages,
            diagnostics: interaction.diagnostics,
            error: None,
        }
    }
}

/// Handle a map click: nearest hospital by straight line, then the driving route to it.
///
/// Returns `Ok(None)` when nothing has been clicked yet. Routing problems do not
/// fail the interaction; they show up as a route without geometry plus diagnostics.
pub async fn process_interaction(
    request: &NearestHospitalRequest,
    hospitals: &HospitalTable,
    routes: &RouteClient,
) -> Result<Option<Interaction>, HospitalError> {
    let Some(click) = request.last_clicked else {
        return Ok(None);
    };

    let location = LocationPoint::from(click);
    if !location.is_valid() {
        return Err(HospitalError::InvalidCoordinates);
    }

    let hospital = find_nearest_hospital(&location, &hospitals.hospitals)?;
    tracing::debug!(
        "Nearest hospital to ({}, {}) is {} at {:.2} km",
        location.latitude,
        location.longitude,
        hospital.name,
        hospital.distance_km
    );

    let outcome = routes.best_route(&location, &hospital.location).await;

    Ok(Some(Interaction {
        location,
        hospital,
        route: outcome.result,
        diagnostics: outcome.diagnostics,
    }))
}
