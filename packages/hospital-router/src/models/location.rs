use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationPoint {
    /// Create a new location point
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Validate that coordinates are within valid GPS ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Calculate the great-circle distance to another point in kilometers
    pub fn distance_to(&self, other: &LocationPoint) -> f64 {
        crate::libraries::distance::haversine_km(self, other)
    }

    /// Longitude-first pair, the order GeoJSON and the routing service expect
    pub fn to_lon_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// Click payload emitted by the map widget
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClickedPoint {
    pub lat: f64,
    pub lng: f64,
}

impl From<ClickedPoint> for LocationPoint {
    fn from(click: ClickedPoint) -> Self {
        LocationPoint::new(click.lat, click.lng)
    }
}
