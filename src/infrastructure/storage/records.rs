//! Uniqueness-checked record access shared by every persistence port

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::DomainError;
use crate::domain::entity::{EntityId, Unique};
use crate::domain::storage::{Storage, StorageEntity};

/// Wraps the storage of one entity kind and enforces the port rules:
/// duplicate rejection on save, identity checks on update, silent deletes.
///
/// Writes are serialized so a duplicate check and its insert cannot
/// interleave with another save of the same kind.
#[derive(Debug)]
pub struct RecordStore<E>
where
    E: StorageEntity + Unique + 'static,
{
    storage: Arc<dyn Storage<E>>,
    write_lock: Mutex<()>,
}

impl<E> RecordStore<E>
where
    E: StorageEntity + Unique + 'static,
{
    pub fn new(storage: Arc<dyn Storage<E>>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn get(&self, id: EntityId) -> Result<Option<E>, DomainError> {
        if !id.is_persisted() {
            return Ok(None);
        }

        self.storage.get(id).await
    }

    pub async fn get_all(&self) -> Result<Vec<E>, DomainError> {
        self.storage.list().await
    }

    /// First record matching the predicate, in id order
    pub async fn find(
        &self,
        predicate: impl Fn(&E) -> bool + Send,
    ) -> Result<Option<E>, DomainError> {
        Ok(self.storage.list().await?.into_iter().find(|e| predicate(e)))
    }

    pub async fn save(&self, entity: E) -> Result<E, DomainError> {
        let _guard = self.write_lock.lock().await;

        if entity.id().is_persisted() && self.storage.exists(entity.id()).await? {
            return Err(DomainError::duplicate(format!(
                "{} is already persisted with id {}",
                entity.describe(),
                entity.id()
            )));
        }

        let existing = self.storage.list().await?;
        if existing.iter().any(|e| e.duplicates(&entity)) {
            return Err(DomainError::duplicate(format!(
                "{} already exists",
                entity.describe()
            )));
        }

        let saved = self.storage.create(entity).await?;
        info!(kind = E::KIND, id = %saved.id(), "Saved record");

        Ok(saved)
    }

    pub async fn update(&self, entity: &E) -> Result<(), DomainError> {
        let id = entity.id();
        if !id.is_persisted() {
            return Err(DomainError::identity(format!(
                "{} has no persisted id ({})",
                entity.describe(),
                id
            )));
        }

        let _guard = self.write_lock.lock().await;

        let existing = self.storage.list().await?;
        if !existing.iter().any(|e| e.id() == id) {
            return Err(DomainError::identity(format!(
                "{} '{}' not found",
                E::KIND,
                id
            )));
        }

        if existing.iter().any(|e| e.id() != id && e.duplicates(entity)) {
            return Err(DomainError::duplicate(format!(
                "{} already exists",
                entity.describe()
            )));
        }

        self.storage.update(entity.clone()).await?;
        debug!(kind = E::KIND, id = %id, "Updated record");

        Ok(())
    }

    /// Returns whether a record was removed
    pub async fn delete(&self, entity: &E) -> Result<bool, DomainError> {
        let id = entity.id();
        if !id.is_persisted() {
            return Ok(false);
        }

        let _guard = self.write_lock.lock().await;
        let removed = self.storage.delete(id).await?;

        if removed {
            debug!(kind = E::KIND, id = %id, "Deleted record");
        }

        Ok(removed)
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }
}
