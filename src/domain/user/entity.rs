//! User entities: students, professors and admins
//!
//! Every kind embeds a [`Profile`] and compares by its [`Identity`] alone, so
//! two records with the same email are equal whatever their other fields.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::identity::{Identity, Profile};
use crate::domain::entity::{EntityId, Unique};
use crate::domain::slot::Group;
use crate::domain::storage::StorageEntity;

/// A persisted user kind that logs in with a password
pub trait Account: StorageEntity + Unique {
    fn profile(&self) -> &Profile;

    fn identity(&self) -> &Identity {
        self.profile().identity()
    }

    fn email(&self) -> &str {
        self.profile().email()
    }
}

macro_rules! impl_identity_eq {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    self.identity() == other.identity()
                }
            }

            impl Eq for $ty {}

            impl Hash for $ty {
                fn hash<H: Hasher>(&self, state: &mut H) {
                    self.identity().hash(state);
                }
            }
        )+
    };
}

macro_rules! impl_account {
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

            impl Unique for $ty {
                fn duplicates(&self, other: &Self) -> bool {
                    self.identity() == other.identity()
                }

                fn describe(&self) -> String {
                    format!("{} '{}'", $kind, self.email())
                }
            }

            impl Account for $ty {
                fn profile(&self) -> &Profile {
                    &self.profile
                }
            }
        )+
    };
}

/// A student and the groups it belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    #[serde(default)]
    id: EntityId,
    #[serde(flatten)]
    profile: Profile,
    groups: Vec<Group>,
}

impl Student {
    /// Create a student; repeated groups are kept once
    pub fn of(
        name: impl Into<String>,
        first_name: impl Into<String>,
        email: impl Into<String>,
        groups: Vec<Group>,
    ) -> Self {
        let mut unique: Vec<Group> = Vec::with_capacity(groups.len());

        for group in groups {
            if !unique.iter().any(|g| g.same_group(&group)) {
                unique.push(group);
            }
        }

        Self {
            id: EntityId::UNPERSISTED,
            profile: Profile::new(name, first_name, email),
            groups: unique,
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }
}

/// A lecturer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professor {
    #[serde(default)]
    id: EntityId,
    #[serde(flatten)]
    profile: Profile,
    title: String,
}

impl Professor {
    pub fn of(
        name: impl Into<String>,
        first_name: impl Into<String>,
        email: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::UNPERSISTED,
            profile: Profile::new(name, first_name, email),
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Short form shown on timetables, e.g. `ADA L.`
    pub fn display_name(&self) -> String {
        let initial = self
            .profile
            .name()
            .chars()
            .next()
            .map(|c| format!(" {}.", c))
            .unwrap_or_default();

        format!("{}{}", self.profile.first_name().to_uppercase(), initial)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    #[serde(default)]
    id: EntityId,
    #[serde(flatten)]
    profile: Profile,
    faculty: String,
}

impl Admin {
    pub fn of(
        name: impl Into<String>,
        first_name: impl Into<String>,
        email: impl Into<String>,
        faculty: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::UNPERSISTED,
            profile: Profile::new(name, first_name, email),
            faculty: faculty.into(),
        }
    }

    pub fn faculty(&self) -> &str {
        &self.faculty
    }
}

impl_account!(Student => "Student", Professor => "Professor", Admin => "Admin");

/// Any user, tagged by kind
#[derive(Debug, Clone)]
pub enum User {
    Student(Student),
    Professor(Professor),
    Admin(Admin),
}

impl User {
    pub fn profile(&self) -> &Profile {
        match self {
            Self::Student(s) => s.profile(),
            Self::Professor(p) => p.profile(),
            Self::Admin(a) => a.profile(),
        }
    }

    pub fn identity(&self) -> &Identity {
        self.profile().identity()
    }

    pub fn id(&self) -> EntityId {
        match self {
            Self::Student(s) => s.id(),
            Self::Professor(p) => p.id(),
            Self::Admin(a) => a.id(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Student(_) => Student::KIND,
            Self::Professor(_) => Professor::KIND,
            Self::Admin(_) => Admin::KIND,
        }
    }
}

impl From<Student> for User {
    fn from(student: Student) -> Self {
        Self::Student(student)
    }
}

impl From<Professor> for User {
    fn from(professor: Professor) -> Self {
        Self::Professor(professor)
    }
}

impl From<Admin> for User {
    fn from(admin: Admin) -> Self {
        Self::Admin(admin)
    }
}

impl_identity_eq!(Student, Professor, Admin, User);
