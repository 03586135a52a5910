//! Storage-backed slot repository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::entity::EntityId;
use crate::domain::slot::{Group, Slot, SlotRepository};
use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;
use crate::infrastructure::storage::RecordStore;

#[derive(Debug)]
pub struct StorageSlotRepository {
    records: RecordStore<Slot>,
}

impl StorageSlotRepository {
    pub fn new(storage: Arc<dyn Storage<Slot>>) -> Self {
        Self {
            records: RecordStore::new(storage),
        }
    }
}

#[async_trait]
impl SlotRepository for StorageSlotRepository {
    async fn get(&self, id: EntityId) -> Result<Option<Slot>, DomainError> {
        self.records.get(id).await
    }

    async fn get_all(&self) -> Result<Vec<Slot>, DomainError> {
        self.records.get_all().await
    }

    async fn save(&self, slot: Slot) -> Result<Slot, DomainError> {
        self.records.save(slot).await
    }

    async fn update(&self, slot: &Slot) -> Result<(), DomainError> {
        self.records.update(slot).await
    }

    async fn delete(&self, slot: &Slot) -> Result<(), DomainError> {
        self.records.delete(slot).await.map(|_| ())
    }

    async fn get_slots_of_group(&self, group: &Group) -> Result<Vec<Slot>, DomainError> {
        if !group.id().is_persisted() {
            return Ok(Vec::new());
        }

        let slots: Vec<Slot> = self
            .records
            .get_all()
            .await?
            .into_iter()
            .filter(|slot| slot.involves_group(group.id()))
            .collect();

        debug!(group_id = %group.id(), count = slots.len(), "Loaded slots of group");
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::domain::schedule::Interval;
    use crate::domain::slot::{Classroom, SlotType, Subject};
    use crate::domain::storage::mock::MockStorage;
    use crate::infrastructure::storage::InMemoryStorage;

    fn repository() -> StorageSlotRepository {
        StorageSlotRepository::new(Arc::new(InMemoryStorage::<Slot>::new()))
    }

    fn group(id: i64) -> Group {
        let mut group = Group::of(format!("G{}", id), &[]);
        group.set_id(EntityId::new(id));
        group
    }

    fn slot(day: u32, groups: Vec<Group>) -> Slot {
        slot_in(Classroom::of("U-001", 40), day, groups)
    }

    fn slot_in(classroom: Classroom, day: u32, groups: Vec<Group>) -> Slot {
        Slot::of(
            SlotType::Lecture,
            classroom,
            Subject::of("Algorithms", 30),
            groups,
            vec![],
            Interval::new(
                Utc.with_ymd_and_hms(2024, 1, day, 8, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).unwrap(),
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_slots_of_group() {
        let repo = repository();
        let first = repo.save(slot(5, vec![group(1)])).await.unwrap();
        let both = repo.save(slot(6, vec![group(1), group(2)])).await.unwrap();
        repo.save(slot(7, vec![group(2)])).await.unwrap();

        let slots = repo.get_slots_of_group(&group(1)).await.unwrap();
        assert_eq!(slots, vec![first, both]);
    }

    #[tokio::test]
    async fn test_unpersisted_group_has_no_slots() {
        let repo = repository();
        repo.save(slot(5, vec![group(1)])).await.unwrap();

        let slots = repo
            .get_slots_of_group(&Group::of("G1", &[]))
            .await
            .unwrap();
        assert!(slots.is_empty());
    }

    #[tokio::test]
    async fn test_unpersisted_group_skips_storage() {
        let repo = StorageSlotRepository::new(Arc::new(
            MockStorage::<Slot>::new().with_error("unreachable"),
        ));

        let slots = repo
            .get_slots_of_group(&Group::of("G1", &[]))
            .await
            .unwrap();
        assert!(slots.is_empty());
    }

    #[tokio::test]
    async fn test_same_slot_for_other_groups_is_duplicate() {
        let repo = repository();
        repo.save(slot(5, vec![group(1)])).await.unwrap();

        let result = repo.save(slot(5, vec![group(2)])).await;
        assert!(matches!(result, Err(DomainError::Duplicate { .. })));
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_slot() {
        let repo = repository();
        let saved = repo.save(slot(5, vec![group(1)])).await.unwrap();

        let mut moved = slot(5, vec![group(2)]);
        moved.set_id(saved.id());
        repo.update(&moved).await.unwrap();

        assert!(repo.get_slots_of_group(&group(1)).await.unwrap().is_empty());
        assert_eq!(repo.get_slots_of_group(&group(2)).await.unwrap(), vec![moved.clone()]);

        repo.delete(&moved).await.unwrap();
        repo.delete(&moved).await.unwrap();
        assert!(repo.get(saved.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_edited_classroom_still_collides() {
        let repo = repository();
        let mut room = Classroom::of("U-001", 40);
        room.set_id(EntityId::new(7));
        repo.save(slot_in(room, 5, vec![group(1)])).await.unwrap();

        let mut enlarged = Classroom::of("U-001", 60);
        enlarged.set_id(EntityId::new(7));
        let result = repo.save(slot_in(enlarged, 5, vec![group(2)])).await;
        assert!(matches!(result, Err(DomainError::Duplicate { .. })));

        let unsaved_copy = Classroom::of("U-001", 12);
        let result = repo.save(slot_in(unsaved_copy, 5, vec![group(3)])).await;
        assert!(matches!(result, Err(DomainError::Duplicate { .. })));

        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }
}
