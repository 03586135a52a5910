//! Shared domain traits

mod repository;

pub use repository::Repository;
