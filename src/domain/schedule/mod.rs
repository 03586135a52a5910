//! Schedule domain - time intervals and schedule query results

mod interval;
mod partial;

pub use interval::{Interval, interval_of};
pub use partial::{GroupFault, PartialSchedule};
