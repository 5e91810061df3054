use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use weekplan_core::storage::load_routine;
use weekplan_core::time::day_label;
use weekplan_core::{week_availability_with_grid, Config};

use super::{resolve_file, resolve_week};

#[derive(Args)]
pub struct AvailabilityArgs {
    /// Weekly routine (JSON array of fixed blocks)
    #[arg(long)]
    routine: Option<PathBuf>,
    /// Any date in the week (YYYY-MM-DD); defaults to today
    #[arg(long)]
    week: Option<NaiveDate>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: AvailabilityArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let routine_path = resolve_file(args.routine, config.files.routine.clone(), "routine")?;
    let blocks = load_routine(&routine_path, &config.grid)?;

    let stats = week_availability_with_grid(config.grid, &blocks, resolve_week(args.week))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Week of {}", stats.week_start);
    println!(
        "{} of {} slots occupied ({}%), {} free minutes",
        stats.occupied_slots, stats.total_slots, stats.occupancy_percentage, stats.free_minutes
    );
    for day in &stats.days {
        println!(
            "  {} {}  free {:>4}min  longest {:>4}min",
            day_label(day.day_of_week),
            day.date,
            day.free_minutes,
            day.longest_free_minutes
        );
    }
    Ok(())
}
