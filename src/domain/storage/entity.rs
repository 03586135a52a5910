//! Storage entity trait

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

use crate::domain::entity::EntityId;

/// Trait for types that can be stored under a server-assigned integer id
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// Name of the entity kind, used in messages
    const KIND: &'static str;

    /// Returns the entity's id
    fn id(&self) -> EntityId;

    /// Assigns the id chosen by the storage backend
    fn set_id(&mut self, id: EntityId);
}
