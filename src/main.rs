use clap::Parser;
use timetable::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Group(args) => cli::group::run(args).await,
        Command::Student(args) => cli::student::run(args).await,
    }
}
