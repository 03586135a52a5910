//! Storage trait and its test double

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::entity::EntityId;

use super::entity::StorageEntity;

/// Generic keyed record store for one entity kind
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// `None` when no record has this id
    async fn get(&self, id: EntityId) -> Result<Option<E>, DomainError>;

    /// Retrieves all entities ordered by id
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Inserts the entity under a freshly assigned id and returns it
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Replaces the record with the entity's id, returns an identity error if absent
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Whether a record was removed
    async fn delete(&self, id: EntityId) -> Result<bool, DomainError>;

    /// Whether a record has this id
    async fn exists(&self, id: EntityId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Number of stored records
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }

    /// Removes every record of the kind
    async fn clear(&self) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Mock storage for testing, with switchable fault injection
    #[derive(Debug)]
    pub struct MockStorage<E>
    where
        E: StorageEntity,
    {
        entities: Mutex<BTreeMap<EntityId, E>>,
        next_id: Mutex<i64>,
        error: Mutex<Option<String>>,
    }

    impl<E> Default for MockStorage<E>
    where
        E: StorageEntity,
    {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<E> MockStorage<E>
    where
        E: StorageEntity,
    {
        pub fn new() -> Self {
            Self {
                entities: Mutex::new(BTreeMap::new()),
                next_id: Mutex::new(0),
                error: Mutex::new(None),
            }
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            self.set_error(Some(error.into()));
            self
        }

        /// Turns fault injection on or off after the storage was seeded
        pub fn set_error(&self, error: Option<String>) {
            *self.error.lock().unwrap() = error;
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::storage(error));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl<E> Storage<E> for MockStorage<E>
    where
        E: StorageEntity + 'static,
    {
        async fn get(&self, id: EntityId) -> Result<Option<E>, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().get(&id).cloned())
        }

        async fn list(&self) -> Result<Vec<E>, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().values().cloned().collect())
        }

        async fn create(&self, mut entity: E) -> Result<E, DomainError> {
            self.check_error()?;
            let mut next_id = self.next_id.lock().unwrap();
            let id = EntityId::new(*next_id);
            *next_id += 1;

            entity.set_id(id);
            self.entities.lock().unwrap().insert(id, entity.clone());
            Ok(entity)
        }

        async fn update(&self, entity: E) -> Result<E, DomainError> {
            self.check_error()?;
            let mut entities = self.entities.lock().unwrap();

            if !entities.contains_key(&entity.id()) {
                return Err(DomainError::identity(format!(
                    "{} '{}' not found",
                    E::KIND,
                    entity.id()
                )));
            }

            entities.insert(entity.id(), entity.clone());
            Ok(entity)
        }

        async fn delete(&self, id: EntityId) -> Result<bool, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().remove(&id).is_some())
        }

        async fn clear(&self) -> Result<(), DomainError> {
            self.check_error()?;
            self.entities.lock().unwrap().clear();
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use serde::{Deserialize, Serialize};

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        struct TestEntity {
            id: EntityId,
            name: String,
        }

        impl StorageEntity for TestEntity {
            const KIND: &'static str = "Test";

            fn id(&self) -> EntityId {
                self.id
            }

            fn set_id(&mut self, id: EntityId) {
                self.id = id;
            }
        }

        fn create_test_entity(name: &str) -> TestEntity {
            TestEntity {
                id: EntityId::UNPERSISTED,
                name: name.to_string(),
            }
        }

        #[tokio::test]
        async fn test_mock_storage_create_assigns_ids() {
            let storage: MockStorage<TestEntity> = MockStorage::new();

            let first = storage.create(create_test_entity("a")).await.unwrap();
            let second = storage.create(create_test_entity("b")).await.unwrap();

            assert_eq!(first.id, EntityId::new(0));
            assert_eq!(second.id, EntityId::new(1));
            assert_eq!(storage.count().await.unwrap(), 2);
        }

        #[tokio::test]
        async fn test_mock_storage_update_not_found() {
            let storage: MockStorage<TestEntity> = MockStorage::new();
            let mut entity = create_test_entity("a");
            entity.id = EntityId::new(9);

            let result = storage.update(entity).await;
            assert!(matches!(result, Err(DomainError::Identity { .. })));
        }

        #[tokio::test]
        async fn test_mock_storage_error() {
            let storage: MockStorage<TestEntity> = MockStorage::new().with_error("Test error");

            let result = storage.get(EntityId::new(0)).await;
            assert!(result.is_err());

            storage.set_error(None);
            assert!(storage.get(EntityId::new(0)).await.unwrap().is_none());
        }
    }
}
