use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// One cached response body with its content type
#[derive(Debug, Clone)]
pub struct CachedBody {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

/// Immutable, versioned set of request-key to response-body entries
///
/// A snapshot is only ever built whole during an install; there is no way to
/// add or remove individual entries once it is committed.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    version: String,
    installed_at: DateTime<Utc>,
    entries: HashMap<String, CachedBody>,
}

impl CacheSnapshot {
    pub fn new(version: impl Into<String>, entries: HashMap<String, CachedBody>) -> Self {
        Self {
            version: version.into(),
            installed_at: Utc::now(),
            entries,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn installed_at(&self) -> DateTime<Utc> {
        self.installed_at
    }

    /// Exact request-key lookup
    pub fn get(&self, request_key: &str) -> Option<&CachedBody> {
        self.entries.get(request_key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Committed snapshots keyed by version, at most one of them active
#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshots: HashMap<String, CacheSnapshot>,
    active_version: Option<String>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a fully populated snapshot without changing the active version
    pub fn commit(&mut self, snapshot: CacheSnapshot) {
        self.snapshots
            .insert(snapshot.version().to_string(), snapshot);
    }

    /// Make `version` active and drop every superseded snapshot
    ///
    /// Pruning bounds storage growth; requests only ever reach the active
    /// snapshot, so the old versions were already unreachable.
    pub fn activate(&mut self, version: &str) {
        self.active_version = Some(version.to_string());
        self.snapshots.retain(|v, _| v == version);
    }

    pub fn active(&self) -> Option<&CacheSnapshot> {
        self.active_version
            .as_deref()
            .and_then(|v| self.snapshots.get(v))
    }

    pub fn active_version(&self) -> Option<&str> {
        self.active_version.as_deref()
    }

    pub fn contains_version(&self, version: &str) -> bool {
        self.snapshots.contains_key(version)
    }
}
