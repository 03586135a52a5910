//! Storage-backed account repository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use super::password::PasswordHasher;
use crate::domain::entity::EntityId;
use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::user::{Account, AccountRepository, Credential};
use crate::domain::DomainError;
use crate::infrastructure::storage::RecordStore;

const DECOY_PASSWORD: &str = "decoy password for unknown accounts";

/// Account repository over two tables: the account records and their
/// password credentials, linked by account id.
#[derive(Debug)]
pub struct StorageAccountRepository<A>
where
    A: Account + 'static,
{
    records: RecordStore<A>,
    credentials: Arc<dyn Storage<Credential>>,
    hasher: Arc<dyn PasswordHasher>,
    /// Verified instead of a real hash when the email has no credential,
    /// so unknown emails cost as much as wrong passwords
    decoy_hash: Option<String>,
}

impl<A> StorageAccountRepository<A>
where
    A: Account + 'static,
{
    pub fn new(
        accounts: Arc<dyn Storage<A>>,
        credentials: Arc<dyn Storage<Credential>>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        let decoy_hash = match hasher.hash(DECOY_PASSWORD) {
            Ok(hash) => Some(hash),
            Err(e) => {
                warn!(kind = A::KIND, error = %e, "Cannot prepare decoy password hash");
                None
            }
        };

        Self {
            records: RecordStore::new(accounts),
            credentials,
            hasher,
            decoy_hash,
        }
    }

    fn verify_decoy(&self, password: &str) {
        if let Some(hash) = &self.decoy_hash {
            let _ = self.hasher.verify(password, hash);
        }
    }

    async fn credential_of(&self, account_id: EntityId) -> Result<Option<Credential>, DomainError> {
        Ok(self
            .credentials
            .list()
            .await?
            .into_iter()
            .find(|c| c.account_id() == account_id))
    }
}

#[async_trait]
impl<A> AccountRepository<A> for StorageAccountRepository<A>
where
    A: Account + 'static,
{
    async fn get(&self, id: EntityId) -> Result<Option<A>, DomainError> {
        self.records.get(id).await
    }

    async fn get_all(&self) -> Result<Vec<A>, DomainError> {
        self.records.get_all().await
    }

    async fn save(&self, account: A, password: &str) -> Result<A, DomainError> {
        let hash = self.hasher.hash(password)?;
        let saved = self.records.save(account).await?;

        if let Err(e) = self
            .credentials
            .create(Credential::of(saved.id(), hash))
            .await
        {
            warn!(
                kind = A::KIND,
                id = %saved.id(),
                error = %e,
                "Failed to store credential, removing account"
            );
            self.records.delete(&saved).await?;
            return Err(e);
        }

        Ok(saved)
    }

    async fn update(&self, account: &A) -> Result<(), DomainError> {
        self.records.update(account).await
    }

    async fn delete(&self, account: &A) -> Result<(), DomainError> {
        if !self.records.delete(account).await? {
            return Ok(());
        }

        if let Some(credential) = self.credential_of(account.id()).await? {
            self.credentials.delete(credential.id()).await?;
        }

        Ok(())
    }

    async fn get_by_credential(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<A>, DomainError> {
        let Some(account) = self.records.find(|a| a.email() == email).await? else {
            debug!(kind = A::KIND, "No account for email");
            self.verify_decoy(password);
            return Ok(None);
        };

        let Some(credential) = self.credential_of(account.id()).await? else {
            warn!(kind = A::KIND, id = %account.id(), "Account has no credential");
            self.verify_decoy(password);
            return Ok(None);
        };

        if self.hasher.verify(password, credential.password_hash())? {
            Ok(Some(account))
        } else {
            debug!(kind = A::KIND, id = %account.id(), "Password mismatch");
            Ok(None)
        }
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.records.count().await
    }
}
