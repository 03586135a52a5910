//! Storage-backed implementation of the generic reference-entity port

use async_trait::async_trait;
use std::sync::Arc;

use super::records::RecordStore;
use crate::domain::entity::{EntityId, Unique};
use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::traits::Repository;
use crate::domain::DomainError;

/// Storage-backed implementation of [`Repository`]
#[derive(Debug)]
pub struct StorageRepository<E>
where
    E: StorageEntity + Unique + 'static,
{
    records: RecordStore<E>,
}

impl<E> StorageRepository<E>
where
    E: StorageEntity + Unique + 'static,
{
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<E>>) -> Self {
        Self {
            records: RecordStore::new(storage),
        }
    }
}

#[async_trait]
impl<E> Repository<E> for StorageRepository<E>
where
    E: StorageEntity + Unique + 'static,
{
    async fn get(&self, id: EntityId) -> Result<Option<E>, DomainError> {
        self.records.get(id).await
    }

    async fn get_all(&self) -> Result<Vec<E>, DomainError> {
        self.records.get_all().await
    }

    async fn save(&self, entity: E) -> Result<E, DomainError> {
        self.records.save(entity).await
    }

    async fn update(&self, entity: &E) -> Result<(), DomainError> {
        self.records.update(entity).await
    }

    async fn delete(&self, entity: &E) -> Result<(), DomainError> {
        self.records.delete(entity).await.map(|_| ())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.records.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Group, Subject};
    use crate::infrastructure::storage::InMemoryStorage;

    fn subjects() -> StorageRepository<Subject> {
        StorageRepository::new(Arc::new(InMemoryStorage::<Subject>::new()))
    }

    #[tokio::test]
    async fn test_save_and_get_subject() {
        let repo = subjects();

        let saved = repo.save(Subject::of("Algorithms", 30)).await.unwrap();
        let found = repo.get(saved.id()).await.unwrap();

        assert_eq!(found, Some(saved));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let repo = subjects();
        assert!(repo.get(EntityId::new(12)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_same_subject_twice_is_duplicate() {
        let repo = subjects();
        repo.save(Subject::of("Algorithms", 30)).await.unwrap();
        let before = repo.count().await.unwrap();

        let result = repo.save(Subject::of("Algorithms", 45)).await;

        assert!(matches!(result, Err(DomainError::Duplicate { .. })));
        assert_eq!(repo.count().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_groups_with_same_name_are_both_saved() {
        let repo: StorageRepository<Group> =
            StorageRepository::new(Arc::new(InMemoryStorage::<Group>::new()));

        repo.save(Group::of("L3 Info", &[])).await.unwrap();
        repo.save(Group::of("L3 Info", &[])).await.unwrap();

        assert_eq!(repo.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_absent_keeps_count() {
        let repo = subjects();
        let saved = repo.save(Subject::of("Algorithms", 30)).await.unwrap();
        repo.delete(&saved).await.unwrap();
        let before = repo.count().await.unwrap();

        repo.delete(&saved).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), before);
    }
}
