use crate::models::{Hospital, HospitalError, LocationPoint, NearestHospital};

use super::distance::haversine_km;

/// Find the hospital closest to `user` by straight-line distance.
///
/// Ties go to the hospital that appears first in `hospitals`.
pub fn find_nearest_hospital(
    user: &LocationPoint,
    hospitals: &[Hospital],
) -> Result<NearestHospital, HospitalError> {
    if hospitals.is_empty() {
        return Err(HospitalError::InvalidTable(
            "table is empty".to_string(),
        ));
    }

    let mut nearest: Option<(&Hospital, f64)> = None;

    for hospital in hospitals {
        if hospital.name.trim().is_empty() {
            return Err(HospitalError::InvalidTable(
                "every hospital needs a name".to_string(),
            ));
        }
        if !hospital.location.is_valid() {
            return Err(HospitalError::InvalidTable(
                "every hospital needs valid coordinates".to_string(),
            ));
        }

        let distance = haversine_km(user, &hospital.location);
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((hospital, distance)),
        }
    }

    // Non-empty table always yields a candidate
    let (hospital, distance_km) = nearest.ok_or_else(|| {
        HospitalError::InvalidTable("no hospital could be measured".to_string())
    })?;

    Ok(NearestHospital {
        name: hospital.name.clone(),
        distance_km,
        location: hospital.location,
    })
}
