//! CLI module for the timetable
//!
//! Provides subcommands that print schedules as JSON:
//! - `group`: slots of a group between two dates
//! - `student`: slots of a student, after logging in

pub mod group;
pub mod student;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::AppConfig;
use crate::domain::PartialSchedule;
use crate::infrastructure::logging;
use crate::{create_app_services_with_config, AppServices};

/// Timetable - read university schedules
#[derive(Parser)]
#[command(name = "timetable")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the schedule of a group
    Group(group::GroupArgs),

    /// Log in as a student and print its schedule
    Student(student::StudentArgs),
}

/// Loads configuration, installs logging and builds the services
async fn bootstrap() -> anyhow::Result<AppServices> {
    dotenvy::dotenv().ok();

    let (config, load_error) = config_or_default(AppConfig::load());
    logging::init_logging(&config.logging);

    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load configuration, using defaults");
    }

    create_app_services_with_config(&config).await
}

/// Falls back to the default configuration, keeping the error for logging
/// once a subscriber is installed
fn config_or_default<E>(loaded: Result<AppConfig, E>) -> (AppConfig, Option<E>) {
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    }
}

fn print_schedule(schedule: &PartialSchedule) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(schedule)?);
    Ok(())
}
