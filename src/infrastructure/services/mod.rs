//! Infrastructure services

mod schedule_service;

pub use schedule_service::ScheduleService;
