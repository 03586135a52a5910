//! Schedule results that tolerate per-group storage faults

use serde::Serialize;

use crate::domain::entity::EntityId;
use crate::domain::slot::Slot;

/// A storage fault suppressed while fetching one group's slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupFault {
    pub group_id: EntityId,
    pub message: String,
}

/// Slots found for a query, plus the groups whose slots could not be read
#[derive(Debug, Clone, Default, Serialize)]
pub struct PartialSchedule {
    pub slots: Vec<Slot>,
    pub faults: Vec<GroupFault>,
}

impl PartialSchedule {
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when every group was read successfully
    pub fn is_complete(&self) -> bool {
        self.faults.is_empty()
    }

    pub fn into_slots(self) -> Vec<Slot> {
        self.slots
    }
}
