pub mod hospital;
pub mod location;
pub mod requests;
pub mod route;

// Re-export commonly used types
pub use hospital::{Hospital, HospitalError, HospitalTable, NearestHospital};
pub use location::{ClickedPoint, LocationPoint};
pub use requests::{
    Bounds, HospitalTableSummary, NearestHospitalRequest, NearestHospitalResponse,
};
pub use route::{Diagnostic, DiagnosticLevel, RouteGeometry, RouteOutcome, RouteResult};
