//! Pontos BH - offline-first point-of-interest engine
//!
//! This library provides the core of the Pontos BH app: a durable
//! point-of-interest registry, great-circle proximity queries over it, and a
//! versioned cache-first offline worker that keeps the app usable without
//! network access. The host application wires it to a map view, geocoding
//! and the platform's geolocation; none of those live here.

pub mod config;
pub mod core;
pub mod models;
pub mod offline;
pub mod services;
pub mod telemetry;

// Re-export commonly used types
pub use crate::config::Settings;
pub use crate::core::{count_free_within_radius, distance_meters, ProximityQuery, RadiusCount};
pub use crate::models::{Coordinate, InvalidPoint, Point, PointStatus};
pub use crate::offline::{
    CacheConfig, InterceptedResponse, OfflineCache, OfflineCacheError, ResponseSource, WorkerState,
};
pub use crate::services::{
    FileStore, KeyValueStore, MemoryStore, PointRegistry, RegistryError, StoreError,
};
