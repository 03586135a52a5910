//! Slot entity and the reference entities it points to

use serde::{Deserialize, Serialize};

use crate::domain::entity::{EntityId, Unique};
use crate::domain::schedule::Interval;
use crate::domain::storage::StorageEntity;
use crate::domain::user::{Account, Identity, Professor, Student};

macro_rules! impl_storage_entity {
    ($($ty:ty => $kind:literal),+ $(,)?) => {
        $(
            impl StorageEntity for $ty {
                const KIND: &'static str = $kind;

                fn id(&self) -> EntityId {
                    self.id
                }

                fn set_id(&mut self, id: EntityId) {
                    self.id = id;
                }
            }
        )+
    };
}

fn same_reference(id: EntityId, name: &str, other_id: EntityId, other_name: &str) -> bool {
    if id.is_persisted() && other_id.is_persisted() {
        id == other_id
    } else {
        name == other_name
    }
}

/// Kind of course occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotType {
    /// Cours magistral
    Lecture,
    /// Travaux dirigés
    Tutorial,
    /// Travaux pratiques
    Lab,
}

impl SlotType {
    /// Short code printed on timetables
    pub fn code(&self) -> &'static str {
        match self {
            Self::Lecture => "CM",
            Self::Tutorial => "TD",
            Self::Lab => "TP",
        }
    }
}

impl std::fmt::Display for SlotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    #[serde(default)]
    id: EntityId,
    name: String,
    capacity: u32,
}

impl Classroom {
    pub fn of(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: EntityId::UNPERSISTED,
            name: name.into(),
            capacity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Whether both values denote the same room: by id once persisted,
    /// otherwise by name
    pub fn same_classroom(&self, other: &Classroom) -> bool {
        same_reference(self.id, &self.name, other.id, &other.name)
    }
}

impl Unique for Classroom {
    fn duplicates(&self, other: &Self) -> bool {
        self.name == other.name
    }

    fn describe(&self) -> String {
        format!("Classroom '{}'", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default)]
    id: EntityId,
    name: String,
    /// Maximum number of teaching hours over the term
    hour_count_max: u32,
}

impl Subject {
    pub fn of(name: impl Into<String>, hour_count_max: u32) -> Self {
        Self {
            id: EntityId::UNPERSISTED,
            name: name.into(),
            hour_count_max,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hour_count_max(&self) -> u32 {
        self.hour_count_max
    }

    pub fn same_subject(&self, other: &Subject) -> bool {
        same_reference(self.id, &self.name, other.id, &other.name)
    }
}

impl Unique for Subject {
    fn duplicates(&self, other: &Self) -> bool {
        self.name == other.name
    }

    fn describe(&self) -> String {
        format!("Subject '{}'", self.name)
    }
}

/// A cohort of students sharing slots.
///
/// Members are referenced by identity; two groups may share a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    id: EntityId,
    name: String,
    students: Vec<Identity>,
}

impl Group {
    /// Create a group; a student listed twice is kept once
    pub fn of(name: impl Into<String>, students: &[Student]) -> Self {
        let mut members: Vec<Identity> = Vec::with_capacity(students.len());

        for student in students {
            if !members.contains(student.identity()) {
                members.push(student.identity().clone());
            }
        }

        Self {
            id: EntityId::UNPERSISTED,
            name: name.into(),
            students: members,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn students(&self) -> &[Identity] {
        &self.students
    }

    pub fn has_member(&self, student: &Student) -> bool {
        self.students.contains(student.identity())
    }

    /// Whether both values denote the same group: by id once persisted,
    /// otherwise by content
    pub fn same_group(&self, other: &Group) -> bool {
        if self.id.is_persisted() && other.id.is_persisted() {
            self.id == other.id
        } else {
            self == other
        }
    }
}

impl Unique for Group {
    fn duplicates(&self, _other: &Self) -> bool {
        false
    }

    fn describe(&self) -> String {
        format!("Group '{}'", self.name)
    }
}

/// A single scheduled course occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default)]
    id: EntityId,
    slot_type: SlotType,
    classroom: Classroom,
    subject: Subject,
    groups: Vec<Group>,
    professors: Vec<Professor>,
    time_range: Interval,
}

impl Slot {
    pub fn of(
        slot_type: SlotType,
        classroom: Classroom,
        subject: Subject,
        groups: Vec<Group>,
        professors: Vec<Professor>,
        time_range: Interval,
    ) -> Self {
        Self {
            id: EntityId::UNPERSISTED,
            slot_type,
            classroom,
            subject,
            groups,
            professors,
            time_range,
        }
    }

    pub fn slot_type(&self) -> SlotType {
        self.slot_type
    }

    pub fn classroom(&self) -> &Classroom {
        &self.classroom
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn professors(&self) -> &[Professor] {
        &self.professors
    }

    pub fn time_range(&self) -> &Interval {
        &self.time_range
    }

    /// Whether the slot is attended by the group with this id
    pub fn involves_group(&self, group_id: EntityId) -> bool {
        self.groups.iter().any(|g| g.id == group_id)
    }
}

impl Unique for Slot {
    fn duplicates(&self, other: &Self) -> bool {
        self.slot_type == other.slot_type
            && self.classroom.same_classroom(&other.classroom)
            && self.subject.same_subject(&other.subject)
            && self.time_range == other.time_range
    }

    fn describe(&self) -> String {
        format!(
            "Slot {} of '{}' in '{}' from {} to {}",
            self.slot_type,
            self.subject.name,
            self.classroom.name,
            self.time_range.start(),
            self.time_range.end()
        )
    }
}

impl_storage_entity!(
    Classroom => "Classroom",
    Subject => "Subject",
    Group => "Group",
    Slot => "Slot",
);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn students() -> Vec<Student> {
        vec![Student::of("Name", "FName", "Mail", vec![])]
    }

    fn range(start_hour: u32, end_hour: u32) -> Interval {
        Interval::new(
            Utc.with_ymd_and_hms(2024, 1, 5, start_hour, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 5, end_hour, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn slot(slot_type: SlotType, groups: Vec<Group>) -> Slot {
        Slot::of(
            slot_type,
            Classroom::of("U-001", 40),
            Subject::of("Algorithms", 30),
            groups,
            vec![Professor::of("Turing", "Alan", "alan@univ.fr", "Dr")],
            range(9, 11),
        )
    }

    #[test]
    fn test_group_holds_its_students() {
        let group = Group::of("Name", &students());

        assert_eq!(group.name(), "Name");
        assert_eq!(group.students().len(), 1);
        assert_eq!(group.id(), EntityId::UNPERSISTED);
        assert!(group.has_member(&students()[0]));
    }

    #[test]
    fn test_group_members_are_unique() {
        let student = Student::of("Name", "FName", "Mail", vec![]);
        let same_email = Student::of("Other", "Other", "Mail", vec![]);

        let group = Group::of("Name", &[student, same_email]);
        assert_eq!(group.students().len(), 1);
    }

    #[test]
    fn test_same_group_uses_id_once_persisted() {
        let mut a = Group::of("L3", &[]);
        let mut b = Group::of("L3 renamed", &[]);
        assert!(!a.same_group(&b));

        a.set_id(EntityId::new(2));
        b.set_id(EntityId::new(2));
        assert!(a.same_group(&b));
    }

    #[test]
    fn test_groups_never_duplicate_by_name() {
        let a = Group::of("L3", &[]);
        let b = Group::of("L3", &[]);
        assert!(!a.duplicates(&b));
    }

    #[test]
    fn test_slot_duplicate_rule() {
        let mut g = Group::of("L3", &[]);
        g.set_id(EntityId::new(1));

        let lecture = slot(SlotType::Lecture, vec![]);
        let lecture_other_groups = slot(SlotType::Lecture, vec![g]);
        let tutorial = slot(SlotType::Tutorial, vec![]);

        assert!(lecture.duplicates(&lecture_other_groups));
        assert!(!lecture.duplicates(&tutorial));
    }

    #[test]
    fn test_slot_involves_group() {
        let mut g = Group::of("L3", &[]);
        g.set_id(EntityId::new(1));
        let slot = slot(SlotType::Lab, vec![g]);

        assert!(slot.involves_group(EntityId::new(1)));
        assert!(!slot.involves_group(EntityId::new(2)));
    }

    #[test]
    fn test_slot_type_codes() {
        assert_eq!(SlotType::Lecture.code(), "CM");
        assert_eq!(SlotType::Tutorial.to_string(), "TD");
        assert_eq!(SlotType::Lab.code(), "TP");
    }

    #[test]
    fn test_reference_entity_duplicates_by_name() {
        assert!(Classroom::of("U-001", 40).duplicates(&Classroom::of("U-001", 12)));
        assert!(!Subject::of("Algorithms", 30).duplicates(&Subject::of("Databases", 30)));
    }

    #[test]
    fn test_slot_duplicate_ignores_reference_details() {
        let lecture = slot(SlotType::Lecture, vec![]);

        let mut resized = lecture.clone();
        resized.classroom = Classroom::of("U-001", 120);
        assert!(lecture.duplicates(&resized));

        let mut moved = lecture.clone();
        moved.classroom = Classroom::of("U-002", 40);
        assert!(!lecture.duplicates(&moved));
    }

    #[test]
    fn test_same_classroom_uses_id_once_persisted() {
        let mut a = Classroom::of("U-001", 40);
        let mut b = Classroom::of("U-001 (annex)", 40);
        assert!(!a.same_classroom(&b));

        a.set_id(EntityId::new(3));
        b.set_id(EntityId::new(3));
        assert!(a.same_classroom(&b));

        let mut c = Subject::of("Algorithms", 30);
        let mut d = Subject::of("Algorithms", 30);
        c.set_id(EntityId::new(1));
        d.set_id(EntityId::new(2));
        assert!(!c.same_subject(&d));
    }
}
