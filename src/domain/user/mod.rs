//! User domain - students, professors, admins and their credentials

mod credential;
mod entity;
mod identity;
mod repository;

pub use credential::Credential;
pub use entity::{Account, Admin, Professor, Student, User};
pub use identity::{Identity, Profile};
pub use repository::AccountRepository;
