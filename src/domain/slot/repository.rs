//! Slot repository trait

use async_trait::async_trait;

use super::entity::{Group, Slot};
use crate::domain::DomainError;
use crate::domain::entity::EntityId;

#[cfg(test)]
use mockall::automock;

/// Repository trait for slot storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Get a slot by its id
    async fn get(&self, id: EntityId) -> Result<Option<Slot>, DomainError>;

    /// List every slot
    async fn get_all(&self) -> Result<Vec<Slot>, DomainError>;

    /// Persist a new slot, rejecting one with the same type, room, subject and time range
    async fn save(&self, slot: Slot) -> Result<Slot, DomainError>;

    /// Replace an existing slot
    async fn update(&self, slot: &Slot) -> Result<(), DomainError>;

    /// Delete a slot; deleting an absent slot is not an error
    async fn delete(&self, slot: &Slot) -> Result<(), DomainError>;

    /// Every slot attended by the group, empty for an unpersisted group
    async fn get_slots_of_group(&self, group: &Group) -> Result<Vec<Slot>, DomainError>;
}
