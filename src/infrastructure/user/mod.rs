//! User infrastructure module
//!
//! Account repositories for students, professors and admins, with
//! password credentials hashed by Argon2.

mod password;
mod repository;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::StorageAccountRepository;
