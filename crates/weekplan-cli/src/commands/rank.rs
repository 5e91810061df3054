use std::path::PathBuf;

use clap::Args;
use weekplan_core::storage::load_tasks;
use weekplan_core::{prioritize_tasks, Config};

use super::resolve_file;

#[derive(Args)]
pub struct RankArgs {
    /// Task list (JSON array)
    #[arg(long)]
    tasks: Option<PathBuf>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: RankArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let path = resolve_file(args.tasks, config.files.tasks.clone(), "tasks")?;
    let ranked = prioritize_tasks(&load_tasks(&path)?);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    for (i, task) in ranked.iter().enumerate() {
        println!(
            "{:>3}. [{}] {} ({}min, due {})",
            i + 1,
            task.priority,
            task.title,
            task.estimated_minutes,
            task.deadline.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
