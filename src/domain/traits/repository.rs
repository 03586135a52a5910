use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;
use crate::domain::entity::EntityId;

/// Persistence port for reference entities (groups, classrooms, subjects)
#[async_trait]
pub trait Repository<E>: Send + Sync + Debug
where
    E: Send + Sync,
{
    /// Returns `None` when no record has this id
    async fn get(&self, id: EntityId) -> Result<Option<E>, DomainError>;

    async fn get_all(&self) -> Result<Vec<E>, DomainError>;

    /// Persists a new record and returns it with its assigned id
    async fn save(&self, entity: E) -> Result<E, DomainError>;

    /// Replaces the record with the entity's id
    async fn update(&self, entity: &E) -> Result<(), DomainError>;

    /// Removes the record with the entity's id; absent records are ignored
    async fn delete(&self, entity: &E) -> Result<(), DomainError>;

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.get_all().await?.len())
    }
}
