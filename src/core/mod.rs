// Core algorithm exports
pub mod distance;
pub mod proximity;

pub use distance::distance_meters;
pub use proximity::{count_free_within_radius, ProximityQuery, RadiusCount};
