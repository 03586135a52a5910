//! Identity shared by every user kind

use serde::{Deserialize, Serialize};

/// The identity key of a user: its email, compared exactly
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity {
    email: String,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.email)
    }
}

/// Fields common to students, professors and admins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    name: String,
    first_name: String,
    #[serde(rename = "email")]
    identity: Identity,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        first_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            first_name: first_name.into(),
            identity: Identity::new(email),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn email(&self) -> &str {
        self.identity.email()
    }
}
