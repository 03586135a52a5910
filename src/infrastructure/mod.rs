//! Infrastructure layer - Storage backends, repositories and services

pub mod logging;
pub mod services;
pub mod slot;
pub mod storage;
pub mod user;
