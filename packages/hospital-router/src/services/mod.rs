pub mod hospital_data;
pub mod routing;

pub use hospital_data::{load_hospitals, HospitalStore};
pub use routing::{RouteClient, RouteClientConfig};
