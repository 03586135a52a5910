//! Slots and the reference entities they are built from

mod entity;
mod repository;

pub use entity::{Classroom, Group, Slot, SlotType, Subject};
pub use repository::SlotRepository;

#[cfg(test)]
pub use repository::MockSlotRepository;
