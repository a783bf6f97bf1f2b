// Offline worker exports
pub mod snapshot;
pub mod worker;

pub use snapshot::{CacheSnapshot, CachedBody, SnapshotStore};
pub use worker::{
    CacheConfig, InterceptedResponse, OfflineCache, OfflineCacheError, ResponseSource, WorkerState,
};
