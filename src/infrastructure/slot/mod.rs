//! Slot infrastructure - storage-backed slot and reference-entity repositories

mod repository;

pub use repository::StorageSlotRepository;

use crate::domain::slot::{Classroom, Group, Subject};
use crate::infrastructure::storage::StorageRepository;

pub type StorageGroupRepository = StorageRepository<Group>;
pub type StorageClassroomRepository = StorageRepository<Classroom>;
pub type StorageSubjectRepository = StorageRepository<Subject>;
