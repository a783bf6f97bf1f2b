use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Occupancy status of a point of interest
///
/// This core never produces `Occupied` itself, but the variant is kept so a
/// collaborator can flip a point without a format change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointStatus {
    #[default]
    Free,
    Occupied,
}

/// Validation failures for a point of interest
#[derive(Debug, Error)]
pub enum InvalidPoint {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("name is empty after trimming")]
    EmptyName,
}

/// A named point of interest tracked by the registry
///
/// Persisted with exactly the field names `latitude`, `longitude`, `name`
/// and `status`. Immutable once created in this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    #[serde(default)]
    pub status: PointStatus,
}

impl Point {
    /// Build a validated point. The stored name is trimmed and the status
    /// defaults to `Free`.
    pub fn new(latitude: f64, longitude: f64, name: &str) -> Result<Self, InvalidPoint> {
        let point = Self {
            latitude,
            longitude,
            name: name.trim().to_string(),
            status: PointStatus::default(),
        };
        point.validate()?;
        Ok(point)
    }

    /// Check the range and non-empty-name invariants
    ///
    /// Exposed separately so the registry can re-validate points that were
    /// built by hand or deserialized from an external source.
    pub fn validate(&self) -> Result<(), InvalidPoint> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(InvalidPoint::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(InvalidPoint::LongitudeOutOfRange(self.longitude));
        }
        if self.name.trim().is_empty() {
            return Err(InvalidPoint::EmptyName);
        }
        Ok(())
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn is_free(&self) -> bool {
        self.status == PointStatus::Free
    }
}
