//! Domain layer - Timetable entities, persistence ports and interval logic

pub mod entity;
pub mod error;
pub mod schedule;
pub mod slot;
pub mod storage;
pub mod traits;
pub mod user;

pub use entity::{EntityId, Unique};
pub use error::DomainError;
pub use schedule::{GroupFault, Interval, PartialSchedule, interval_of};
pub use slot::{Classroom, Group, Slot, SlotRepository, SlotType, Subject};
pub use storage::{Storage, StorageEntity};
pub use traits::Repository;
pub use user::{
    Account, AccountRepository, Admin, Credential, Identity, Professor, Profile, Student, User,
};
