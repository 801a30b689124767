use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::StringRecord;
use tokio::sync::RwLock;

use crate::models::{Hospital, HospitalError, HospitalTable, LocationPoint};

pub const NAME_COLUMN: &str = "NAME";
pub const LATITUDE_COLUMN: &str = "LATITUDE";
pub const LONGITUDE_COLUMN: &str = "LONGITUDE";

struct ColumnIndex {
    name: usize,
    latitude: usize,
    longitude: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, HospitalError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(column))
                .ok_or(HospitalError::MissingColumn { column })
        };

        Ok(Self {
            name: find(NAME_COLUMN)?,
            latitude: find(LATITUDE_COLUMN)?,
            longitude: find(LONGITUDE_COLUMN)?,
        })
    }

    /// `None` when any field is missing or unusable
    fn hospital(&self, record: &StringRecord) -> Option<Hospital> {
        let name = record.get(self.name)?.trim();
        if name.is_empty() {
            return None;
        }
        let latitude: f64 = record.get(self.latitude)?.trim().parse().ok()?;
        let longitude: f64 = record.get(self.longitude)?.trim().parse().ok()?;

        let location = LocationPoint::new(latitude, longitude);
        if !location.is_valid() {
            return None;
        }

        Some(Hospital {
            name: name.to_string(),
            location,
        })
    }
}

/// Read hospital records from any CSV source with NAME, LATITUDE and LONGITUDE columns.
///
/// Rows missing any of the three fields are dropped.
pub fn read_hospitals<R: std::io::Read>(reader: R) -> Result<Vec<Hospital>, HospitalError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(rdr.headers()?)?;

    let mut hospitals = Vec::new();
    let mut dropped = 0usize;
    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        match columns.hospital(&record) {
            Some(hospital) => hospitals.push(hospital),
            None => {
                tracing::debug!("Dropping incomplete hospital row {}", row + 1);
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        tracing::info!("Dropped {} incomplete hospital rows", dropped);
    }

    if hospitals.is_empty() {
        return Err(HospitalError::EmptyDataset);
    }

    Ok(hospitals)
}

/// Load and clean the hospital table from a local CSV file
pub fn load_hospitals(path: &Path) -> Result<HospitalTable, HospitalError> {
    if !path.exists() {
        return Err(HospitalError::DataNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path)?;
    let hospitals = read_hospitals(file)?;

    tracing::info!("🏥 Loaded {} hospitals from {}", hospitals.len(), path.display());

    Ok(HospitalTable::new(hospitals, path))
}

/// Process-wide copy of the hospital table, loaded on first use
pub struct HospitalStore {
    path: PathBuf,
    cache: RwLock<Option<Arc<HospitalTable>>>,
}

impl HospitalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    /// Store that is already populated, for callers that build the table themselves
    pub fn with_table(table: HospitalTable) -> Self {
        Self {
            path: table.source.clone(),
            cache: RwLock::new(Some(Arc::new(table))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached table, loading it if this is the first use.
    ///
    /// Failed loads are not cached; the next call tries again.
    pub async fn get_or_load(&self) -> Result<Arc<HospitalTable>, HospitalError> {
        if let Some(table) = self.cache.read().await.as_ref() {
            return Ok(table.clone());
        }

        let mut cache = self.cache.write().await;
        // Another caller may have loaded it while we waited for the lock
        if let Some(table) = cache.as_ref() {
            return Ok(table.clone());
        }

        let table = Arc::new(self.load().await?);
        *cache = Some(table.clone());
        Ok(table)
    }

    /// Re-read the source; the cached table is replaced only on success
    pub async fn reload(&self) -> Result<Arc<HospitalTable>, HospitalError> {
        let table = Arc::new(self.load().await?);
        *self.cache.write().await = Some(table.clone());
        Ok(table)
    }

    pub async fn is_loaded(&self) -> bool {
        self.cache.read().await.is_some()
    }

    async fn load(&self) -> Result<HospitalTable, HospitalError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || load_hospitals(&path))
            .await
            .map_err(|e| HospitalError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
    }
}
