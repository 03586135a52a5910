//! Entity identifiers and logical-key comparison

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a persisted entity.
///
/// Negative values mean the entity has not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// Id carried by every entity before its first save
    pub const UNPERSISTED: Self = Self(-1);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Whether this id can reference a stored record
    pub fn is_persisted(&self) -> bool {
        self.0 >= 0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::UNPERSISTED
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind-specific rule deciding whether two records are the same logical entry.
///
/// Used by `save` to reject duplicates independently of the assigned id.
pub trait Unique {
    fn duplicates(&self, other: &Self) -> bool;

    /// Human readable key used in conflict messages
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unpersisted() {
        let id = EntityId::default();
        assert_eq!(id, EntityId::UNPERSISTED);
        assert_eq!(id.value(), -1);
        assert!(!id.is_persisted());
    }

    #[test]
    fn test_zero_is_persisted() {
        assert!(EntityId::new(0).is_persisted());
        assert!(EntityId::from(17).is_persisted());
        assert!(!EntityId::new(-5).is_persisted());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&EntityId::new(12)).unwrap();
        assert_eq!(json, "12");

        let id: EntityId = serde_json::from_str("-1").unwrap();
        assert_eq!(id, EntityId::UNPERSISTED);
    }
}
