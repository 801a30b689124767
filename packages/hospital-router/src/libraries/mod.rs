pub mod distance;
pub mod interaction;
pub mod nearest;

pub use distance::haversine_km;
pub use interaction::{process_interaction, Interaction};
pub use nearest::find_nearest_hospital;
