//! Group command - prints the slots of one group

use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use tracing::info;

use crate::domain::EntityId;

/// Arguments for the group command
#[derive(Args, Clone, Debug)]
pub struct GroupArgs {
    /// Id of the group
    #[arg(long)]
    pub id: i64,

    /// First day, as YYYY-MM-DD
    #[arg(long)]
    pub from: NaiveDate,

    /// Last day, included
    #[arg(long)]
    pub to: NaiveDate,
}

pub async fn run(args: GroupArgs) -> anyhow::Result<()> {
    let services = super::bootstrap().await?;

    let group = services
        .groups
        .get(EntityId::new(args.id))
        .await?
        .with_context(|| format!("Group {} not found", args.id))?;

    info!(group_id = args.id, from = %args.from, to = %args.to, "Reading group schedule");
    let schedule = services
        .schedule
        .group_schedule(&group, args.from, args.to)
        .await?;

    super::print_schedule(&schedule)
}
