//! University timetable core
//!
//! Students, professors, admins, groups, classrooms, subjects and slots,
//! with persistence ports over swappable storage backends and a schedule
//! service that answers "what does this student or group have between
//! these dates".

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use domain::{
    AccountRepository, Admin, Classroom, Credential, Group, Professor, Repository, SlotRepository,
    Student, Subject,
};
use infrastructure::{
    services::ScheduleService,
    slot::{
        StorageClassroomRepository, StorageGroupRepository, StorageSlotRepository,
        StorageSubjectRepository,
    },
    storage::{StorageBackend, StorageFactory},
    user::{Argon2Hasher, PasswordHasher, StorageAccountRepository},
};
use tracing::info;

/// Every port of the application, built once at startup and shared
#[derive(Clone)]
pub struct AppServices {
    pub students: Arc<dyn AccountRepository<Student>>,
    pub professors: Arc<dyn AccountRepository<Professor>>,
    pub admins: Arc<dyn AccountRepository<Admin>>,
    pub groups: Arc<dyn Repository<Group>>,
    pub classrooms: Arc<dyn Repository<Classroom>>,
    pub subjects: Arc<dyn Repository<Subject>>,
    pub slots: Arc<dyn SlotRepository>,
    pub schedule: ScheduleService,
}

impl std::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppServices")
            .field("schedule", &self.schedule)
            .finish_non_exhaustive()
    }
}

/// Create the application services with the default configuration
pub async fn create_app_services() -> anyhow::Result<AppServices> {
    create_app_services_with_config(&AppConfig::default()).await
}

/// Create the application services on the configured storage backend
pub async fn create_app_services_with_config(config: &AppConfig) -> anyhow::Result<AppServices> {
    let storage_config = config.storage.to_storage_config()?;
    let zone = config.schedule.zone()?;

    info!(backend = ?storage_config.storage_type(), "Opening storage");
    let backend = StorageFactory::connect(&storage_config).await?;
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new());

    let students: Arc<dyn AccountRepository<Student>> =
        Arc::new(account_repository::<Student>(&backend, "students", &hasher).await?);
    let professors: Arc<dyn AccountRepository<Professor>> =
        Arc::new(account_repository::<Professor>(&backend, "professors", &hasher).await?);
    let admins: Arc<dyn AccountRepository<Admin>> =
        Arc::new(account_repository::<Admin>(&backend, "admins", &hasher).await?);

    let groups: Arc<dyn Repository<Group>> = Arc::new(StorageGroupRepository::new(
        StorageFactory::create::<Group>(&backend, "groups").await?,
    ));
    let classrooms: Arc<dyn Repository<Classroom>> = Arc::new(StorageClassroomRepository::new(
        StorageFactory::create::<Classroom>(&backend, "classrooms").await?,
    ));
    let subjects: Arc<dyn Repository<Subject>> = Arc::new(StorageSubjectRepository::new(
        StorageFactory::create::<Subject>(&backend, "subjects").await?,
    ));
    let slots: Arc<dyn SlotRepository> = Arc::new(StorageSlotRepository::new(
        StorageFactory::create(&backend, "slots").await?,
    ));

    let schedule = ScheduleService::new(
        Arc::clone(&slots),
        Arc::clone(&students),
        Arc::clone(&professors),
        Arc::clone(&admins),
        zone,
    );

    Ok(AppServices {
        students,
        professors,
        admins,
        groups,
        classrooms,
        subjects,
        slots,
        schedule,
    })
}

async fn account_repository<A>(
    backend: &StorageBackend,
    table: &str,
    hasher: &Arc<dyn PasswordHasher>,
) -> anyhow::Result<StorageAccountRepository<A>>
where
    A: domain::Account + 'static,
{
    let accounts = StorageFactory::create::<A>(backend, table).await?;
    let credentials =
        StorageFactory::create::<Credential>(backend, &format!("{}_credentials", table)).await?;

    Ok(StorageAccountRepository::new(
        accounts,
        credentials,
        Arc::clone(hasher),
    ))
}
