//! In-memory storage implementation

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::entity::EntityId;
use crate::domain::storage::{Storage, StorageEntity};

#[derive(Debug)]
struct Table<E> {
    next_id: i64,
    rows: BTreeMap<EntityId, E>,
}

/// Thread-safe in-memory storage implementation
///
/// Ids are handed out from a counter starting at 0 and never reused.
/// Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    table: RwLock<Table<E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: 0,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Creates storage pre-populated with entities.
    ///
    /// Persisted ids are kept, the others receive fresh ids.
    pub fn with_entities(entities: Vec<E>) -> Self {
        let (persisted, fresh): (Vec<E>, Vec<E>) =
            entities.into_iter().partition(|e| e.id().is_persisted());

        let mut rows = BTreeMap::new();
        for entity in persisted {
            rows.insert(entity.id(), entity);
        }

        let mut next_id = rows.keys().last().map(|id| id.value() + 1).unwrap_or(0);
        for mut entity in fresh {
            let id = EntityId::new(next_id);
            next_id += 1;
            entity.set_id(id);
            rows.insert(id, entity);
        }

        Self {
            table: RwLock::new(Table { next_id, rows }),
        }
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, id: EntityId) -> Result<Option<E>, DomainError> {
        let table = self.table.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(table.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let table = self.table.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(table.rows.values().cloned().collect())
    }

    async fn create(&self, mut entity: E) -> Result<E, DomainError> {
        let mut table = self.table.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let id = EntityId::new(table.next_id);
        table.next_id += 1;

        entity.set_id(id);
        table.rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let mut table = self.table.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let id = entity.id();
        if !table.rows.contains_key(&id) {
            return Err(DomainError::identity(format!(
                "{} '{}' not found",
                E::KIND,
                id
            )));
        }

        table.rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: EntityId) -> Result<bool, DomainError> {
        let mut table = self.table.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(table.rows.remove(&id).is_some())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut table = self.table.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        table.rows.clear();
        Ok(())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let table = self.table.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(table.rows.len())
    }

    async fn exists(&self, id: EntityId) -> Result<bool, DomainError> {
        let table = self.table.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(table.rows.contains_key(&id))
    }
}
