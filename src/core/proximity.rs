use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::distance::distance_meters;
use crate::models::{Coordinate, Point};
use crate::services::{PointRegistry, RegistryError};

/// Aggregate result of a radius query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiusCount {
    pub total_in_radius: usize,
    pub free_in_radius: usize,
}

/// Count the points within `radius_meters` of `center`, and how many of
/// those are free
///
/// The boundary is inclusive: a point at exactly `radius_meters` counts, so
/// a radius of zero still matches coincident coordinates. Linear scan over
/// the collection, which stays in the tens to low hundreds of points.
pub fn count_free_within_radius(
    points: &[Point],
    center: Coordinate,
    radius_meters: f64,
) -> RadiusCount {
    let mut total_in_radius = 0;
    let mut free_in_radius = 0;

    for point in points {
        if distance_meters(center, point.coordinate()) <= radius_meters {
            total_in_radius += 1;
            if point.is_free() {
                free_in_radius += 1;
            }
        }
    }

    RadiusCount {
        total_in_radius,
        free_in_radius,
    }
}

/// Radius query facade over the durable registry
///
/// Loads the full collection on every call and delegates to
/// [`count_free_within_radius`]. Deterministic and side-effect free; it owns
/// no state of its own.
#[derive(Clone)]
pub struct ProximityQuery {
    registry: Arc<PointRegistry>,
}

impl ProximityQuery {
    pub fn new(registry: Arc<PointRegistry>) -> Self {
        Self { registry }
    }

    pub async fn count_free_within_radius(
        &self,
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<RadiusCount, RegistryError> {
        let points = self.registry.load_all().await?;
        let count = count_free_within_radius(&points, center, radius_meters);

        tracing::debug!(
            total = count.total_in_radius,
            free = count.free_in_radius,
            radius_meters,
            "Radius query complete"
        );

        Ok(count)
    }
}
