//! Account repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::Account;
use crate::domain::DomainError;
use crate::domain::entity::EntityId;

/// Repository trait for accounts that carry a password (students, professors, admins)
#[async_trait]
pub trait AccountRepository<A>: Send + Sync + Debug
where
    A: Account + 'static,
{
    /// Get an account by its id
    async fn get(&self, id: EntityId) -> Result<Option<A>, DomainError>;

    /// List every account of this kind
    async fn get_all(&self) -> Result<Vec<A>, DomainError>;

    /// Persist a new account together with its password credential
    async fn save(&self, account: A, password: &str) -> Result<A, DomainError>;

    /// Replace an existing account, the credential is left untouched
    async fn update(&self, account: &A) -> Result<(), DomainError>;

    /// Delete an account and its credential; absent accounts are ignored
    async fn delete(&self, account: &A) -> Result<(), DomainError>;

    /// Find the account with this email if the password matches.
    ///
    /// An unknown email and a wrong password both give `None`.
    async fn get_by_credential(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<A>, DomainError>;

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.get_all().await?.len())
    }
}
