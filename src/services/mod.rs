// Service exports
pub mod registry;
pub mod store;

pub use registry::{PointRegistry, RegistryError};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
