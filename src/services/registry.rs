use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{InvalidPoint, Point, PointStatus};
use crate::services::store::{KeyValueStore, StoreError};

/// Errors surfaced by the point registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid point: {0}")]
    InvalidPoint(#[from] InvalidPoint),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),

    #[error("stored collection is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable point-of-interest registry over a key-value substrate
///
/// The whole collection lives under one storage key as a JSON array, read in
/// full on every query and rewritten in full on every append. That keeps the
/// substrate contract to atomic whole-value read/write, acceptable at the
/// expected scale of tens to low hundreds of points.
pub struct PointRegistry {
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    seed: Vec<Point>,
}

impl PointRegistry {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        storage_key: impl Into<String>,
        seed: Vec<Point>,
    ) -> Self {
        Self {
            store,
            storage_key: storage_key.into(),
            seed,
        }
    }

    /// The fixed first-run seed set used by the Pontos BH app, all free
    pub fn default_seed() -> Vec<Point> {
        [
            (-19.9329, -43.9391, "Praça da Liberdade"),
            (-19.9230, -43.9387, "Mercado Central"),
            (-19.9208, -43.9355, "Praça Sete de Setembro"),
            (-19.8651, -43.9664, "Estádio Mineirão"),
        ]
        .into_iter()
        .map(|(latitude, longitude, name)| Point {
            latitude,
            longitude,
            name: name.to_string(),
            status: PointStatus::Free,
        })
        .collect()
    }

    /// Write the seed collection if and only if no collection exists yet
    ///
    /// Idempotent: a second call, or a call against a store that already
    /// holds user data, is a no-op.
    pub async fn ensure_seeded(&self) -> Result<(), RegistryError> {
        if self.store.get(&self.storage_key).await?.is_some() {
            debug!(key = %self.storage_key, "Registry already has data, skipping seed");
            return Ok(());
        }

        let encoded = serde_json::to_string(&self.seed)?;
        self.store.set(&self.storage_key, &encoded).await?;

        info!(points = self.seed.len(), key = %self.storage_key, "Seeded point registry");
        Ok(())
    }

    /// Load the full collection in insertion order
    ///
    /// An absent key is an empty collection, not an error; only a failing
    /// substrate surfaces as `StorageUnavailable`.
    pub async fn load_all(&self) -> Result<Vec<Point>, RegistryError> {
        match self.store.get(&self.storage_key).await? {
            Some(encoded) => Ok(serde_json::from_str(&encoded)?),
            None => Ok(Vec::new()),
        }
    }

    /// Validate and append one point
    ///
    /// The current collection is read, extended, and rewritten as one atomic
    /// whole-value write; this returns only after the store has durably
    /// acknowledged it. On a validation failure nothing is written.
    pub async fn append(&self, point: Point) -> Result<(), RegistryError> {
        point.validate()?;

        let mut points = self.load_all().await?;
        points.push(point);

        let encoded = serde_json::to_string(&points)?;
        self.store.set(&self.storage_key, &encoded).await?;

        debug!(total = points.len(), "Appended point to registry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MemoryStore;

    fn registry(store: Arc<dyn KeyValueStore>) -> PointRegistry {
        PointRegistry::new(store, "pontosDeInteresseBH", PointRegistry::default_seed())
    }

    #[tokio::test]
    async fn test_load_all_on_fresh_store_is_empty() {
        let registry = registry(Arc::new(MemoryStore::new()));
        assert!(registry.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ensure_seeded_writes_default_set() {
        let registry = registry(Arc::new(MemoryStore::new()));
        registry.ensure_seeded().await.unwrap();

        let points = registry.load_all().await.unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].name, "Praça da Liberdade");
        assert!(points.iter().all(Point::is_free));
    }

    #[tokio::test]
    async fn test_ensure_seeded_does_not_overwrite_user_data() {
        let registry = registry(Arc::new(MemoryStore::new()));
        registry.ensure_seeded().await.unwrap();
        registry
            .append(Point::new(-19.95, -43.95, "Novo Ponto").unwrap())
            .await
            .unwrap();

        registry.ensure_seeded().await.unwrap();

        let points = registry.load_all().await.unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points[4].name, "Novo Ponto");
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_a_serialization_error() {
        let store = Arc::new(MemoryStore::new());
        store.set("pontosDeInteresseBH", "not json").await.unwrap();

        let registry = registry(store);
        assert!(matches!(
            registry.load_all().await.unwrap_err(),
            RegistryError::Serialization(_)
        ));
    }
}
