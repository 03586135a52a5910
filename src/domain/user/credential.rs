//! Stored password credential, kept apart from the account it belongs to

use serde::{Deserialize, Serialize};

use crate::domain::entity::EntityId;
use crate::domain::storage::StorageEntity;

/// Password hash of one account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    #[serde(default)]
    id: EntityId,
    /// Id of the student, professor or admin record
    account_id: EntityId,
    password_hash: String,
}

impl Credential {
    pub fn of(account_id: EntityId, password_hash: impl Into<String>) -> Self {
        Self {
            id: EntityId::UNPERSISTED,
            account_id,
            password_hash: password_hash.into(),
        }
    }

    pub fn account_id(&self) -> EntityId {
        self.account_id
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl StorageEntity for Credential {
    const KIND: &'static str = "Credential";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
