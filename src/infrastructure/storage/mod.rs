//! Storage infrastructure - Storage implementations

mod factory;
mod in_memory;
mod postgres;
mod records;
mod repository;

pub use factory::{StorageBackend, StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryStorage;
pub use postgres::{PostgresConfig, PostgresStorage};
pub use records::RecordStore;
pub use repository::StorageRepository;
