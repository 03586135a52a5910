//! Schedule service - timetable reads and login lookups

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate};
use tracing::{debug, error, info, instrument, warn};

use crate::domain::entity::EntityId;
use crate::domain::schedule::{interval_of, GroupFault, Interval, PartialSchedule};
use crate::domain::slot::{Group, Slot, SlotRepository};
use crate::domain::storage::StorageEntity;
use crate::domain::user::{Account, AccountRepository, Admin, Professor, Student};
use crate::domain::DomainError;

/// Entry point used by the presentation layer to read timetables and
/// resolve logins
#[derive(Clone)]
pub struct ScheduleService {
    slots: Arc<dyn SlotRepository>,
    students: Arc<dyn AccountRepository<Student>>,
    professors: Arc<dyn AccountRepository<Professor>>,
    admins: Arc<dyn AccountRepository<Admin>>,
    zone: FixedOffset,
}

impl std::fmt::Debug for ScheduleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleService")
            .field("zone", &self.zone)
            .finish_non_exhaustive()
    }
}

impl ScheduleService {
    pub fn new(
        slots: Arc<dyn SlotRepository>,
        students: Arc<dyn AccountRepository<Student>>,
        professors: Arc<dyn AccountRepository<Professor>>,
        admins: Arc<dyn AccountRepository<Admin>>,
        zone: FixedOffset,
    ) -> Self {
        info!(zone = %zone, "Schedule service ready");

        Self {
            slots,
            students,
            professors,
            admins,
            zone,
        }
    }

    /// Reference zone in which calendar dates are read
    pub fn zone(&self) -> FixedOffset {
        self.zone
    }

    /// Slots of the student's groups between two calendar dates, both included
    pub async fn student_schedule(
        &self,
        student: &Student,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PartialSchedule, DomainError> {
        let interval = interval_of(start_date, end_date, &self.zone)?;
        Ok(self.student_schedule_in(student, &interval).await)
    }

    #[instrument(skip(self, student), fields(student_id = %student.id()))]
    pub async fn student_schedule_in(
        &self,
        student: &Student,
        interval: &Interval,
    ) -> PartialSchedule {
        if !student.id().is_persisted() {
            debug!("Unpersisted student has no schedule");
            return PartialSchedule::empty();
        }

        self.collect(student.groups(), interval).await
    }

    /// Slots of one group between two calendar dates, both included
    pub async fn group_schedule(
        &self,
        group: &Group,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PartialSchedule, DomainError> {
        let interval = interval_of(start_date, end_date, &self.zone)?;
        Ok(self.group_schedule_in(group, &interval).await)
    }

    #[instrument(skip(self, group), fields(group_id = %group.id()))]
    pub async fn group_schedule_in(&self, group: &Group, interval: &Interval) -> PartialSchedule {
        if !group.id().is_persisted() {
            debug!("Unpersisted group has no schedule");
            return PartialSchedule::empty();
        }

        self.collect(std::slice::from_ref(group), interval).await
    }

    #[instrument(skip(self, password))]
    pub async fn student_from_auth(&self, email: &str, password: &str) -> Option<Student> {
        authenticate(self.students.as_ref(), email, password).await
    }

    #[instrument(skip(self, password))]
    pub async fn professor_from_auth(&self, email: &str, password: &str) -> Option<Professor> {
        authenticate(self.professors.as_ref(), email, password).await
    }

    #[instrument(skip(self, password))]
    pub async fn admin_from_auth(&self, email: &str, password: &str) -> Option<Admin> {
        authenticate(self.admins.as_ref(), email, password).await
    }

    /// Enclosed slots of every group, each slot once, ordered by start.
    /// A group whose slots cannot be read is recorded as a fault.
    async fn collect(&self, groups: &[Group], interval: &Interval) -> PartialSchedule {
        let mut schedule = PartialSchedule::empty();
        let mut seen: HashSet<EntityId> = HashSet::new();

        for group in groups {
            if !group.id().is_persisted() {
                continue;
            }

            match self.slots.get_slots_of_group(group).await {
                Ok(slots) => {
                    schedule.slots.extend(
                        slots
                            .into_iter()
                            .filter(|slot| interval.encloses(slot.time_range()))
                            .filter(|slot| seen.insert(slot.id())),
                    );
                }
                Err(e) => {
                    error!(group_id = %group.id(), error = %e, "Failed to load slots of group");
                    schedule.faults.push(GroupFault {
                        group_id: group.id(),
                        message: e.to_string(),
                    });
                }
            }
        }

        schedule
            .slots
            .sort_by_key(|slot: &Slot| (slot.time_range().start(), slot.id()));

        debug!(
            slots = schedule.slots.len(),
            faults = schedule.faults.len(),
            "Collected schedule"
        );
        schedule
    }
}

async fn authenticate<A>(
    accounts: &dyn AccountRepository<A>,
    email: &str,
    password: &str,
) -> Option<A>
where
    A: Account + 'static,
{
    match accounts.get_by_credential(email, password).await {
        Ok(Some(account)) => {
            debug!(kind = A::KIND, id = %account.id(), "Authenticated");
            Some(account)
        }
        Ok(None) => {
            warn!(kind = A::KIND, "Authentication failed");
            None
        }
        Err(e) if e.is_storage() => {
            error!(kind = A::KIND, error = %e, "Storage fault during authentication");
            None
        }
        Err(e) => {
            warn!(kind = A::KIND, error = %e, "Authentication rejected");
            None
        }
    }
}
