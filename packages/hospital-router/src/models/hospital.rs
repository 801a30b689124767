use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::LocationPoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub name: String,
    pub location: LocationPoint,
}

impl Hospital {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            location: LocationPoint::new(latitude, longitude),
        }
    }
}

/// Hospitals in dataset order, immutable once loaded
#[derive(Debug, Clone)]
pub struct HospitalTable {
    pub hospitals: Vec<Hospital>,
    pub source: PathBuf,
    pub loaded_at: DateTime<Utc>,
}

impl HospitalTable {
    pub fn new(hospitals: Vec<Hospital>, source: impl Into<PathBuf>) -> Self {
        Self {
            hospitals,
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.hospitals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hospitals.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestHospital {
    pub name: String,
    /// Straight-line distance in kilometers
    pub distance_km: f64,
    pub location: LocationPoint,
}

#[derive(Debug, thiserror::Error)]
pub enum HospitalError {
    #[error("hospital data file not found at {}", .path.display())]
    DataNotFound { path: PathBuf },

    #[error("hospital data is missing the {column} column")]
    MissingColumn { column: &'static str },

    #[error("hospital data file is empty or contains no valid data")]
    EmptyDataset,

    #[error("invalid hospital table: {0}")]
    InvalidTable(String),

    #[error("Invalid coordinates provided.")]
    InvalidCoordinates,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HospitalError {
    /// Data-load failures end the interaction; everything else is bad input
    pub fn is_data_load(&self) -> bool {
        matches!(
            self,
            HospitalError::DataNotFound { .. }
                | HospitalError::MissingColumn { .. }
                | HospitalError::EmptyDataset
                | HospitalError::Csv(_)
                | HospitalError::Io(_)
        )
    }

    /// Message shown to the user when an interaction fails
    pub fn user_message(&self) -> String {
        match self {
            HospitalError::InvalidCoordinates => self.to_string(),
            e if e.is_data_load() => format!("Failed to load hospital data: {}", e),
            e => format!("Error finding nearest hospital: {}", e),
        }
    }
}
