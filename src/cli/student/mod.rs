//! Student command - logs in and prints the student's slots

use chrono::NaiveDate;
use clap::Args;

/// Arguments for the student command
#[derive(Args, Clone)]
pub struct StudentArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "TIMETABLE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// First day, as YYYY-MM-DD
    #[arg(long)]
    pub from: NaiveDate,

    /// Last day, included
    #[arg(long)]
    pub to: NaiveDate,
}

pub async fn run(args: StudentArgs) -> anyhow::Result<()> {
    let services = super::bootstrap().await?;

    let Some(student) = services
        .schedule
        .student_from_auth(&args.email, &args.password)
        .await
    else {
        anyhow::bail!("Invalid credentials for {}", args.email);
    };

    let schedule = services
        .schedule
        .student_schedule(&student, args.from, args.to)
        .await?;

    super::print_schedule(&schedule)
}
