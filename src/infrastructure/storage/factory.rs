//! Backend selection and per-kind table creation

use std::str::FromStr;
use std::sync::Arc;

use sqlx::PgPool;
use tracing::debug;

use crate::domain::DomainError;
use crate::domain::storage::{Storage, StorageEntity};

use super::in_memory::InMemoryStorage;
use super::postgres::{PostgresConfig, PostgresStorage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// Process-local tables, lost on exit
    InMemory,
    Postgres,
}

impl FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}', expected 'memory' or 'postgres'",
                other
            ))),
        }
    }
}

/// Which backend to open, with its settings
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// An opened backend from which per-kind tables are created.
///
/// For PostgreSQL the pool is opened once and shared by every table.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    Postgres(PgPool),
}

#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    pub async fn connect(config: &StorageConfig) -> Result<StorageBackend, DomainError> {
        match config {
            StorageConfig::InMemory => Ok(StorageBackend::InMemory),
            StorageConfig::Postgres(pg) => pg.connect().await.map(StorageBackend::Postgres),
        }
    }

    /// Storage of one entity kind; in PostgreSQL the table is created if missing
    pub async fn create<E>(
        backend: &StorageBackend,
        table: &str,
    ) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        debug!(kind = E::KIND, table, "Creating storage");

        let storage: Arc<dyn Storage<E>> = match backend {
            StorageBackend::InMemory => Arc::new(InMemoryStorage::<E>::new()),
            StorageBackend::Postgres(pool) => {
                let storage = PostgresStorage::<E>::new(pool.clone(), table);
                storage.ensure_table().await?;
                Arc::new(storage)
            }
        };

        Ok(storage)
    }
}
