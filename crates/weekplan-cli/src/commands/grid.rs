use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use weekplan_core::storage::load_routine;
use weekplan_core::time::{check_day, date_for_day, day_label, week_start};
use weekplan_core::{mark_fixed_blocks, Config, WeekGrid, DAYS_IN_WEEK};

use super::resolve_week;

#[derive(Args)]
pub struct GridArgs {
    /// Weekly routine whose blocks are removed from the grid
    #[arg(long)]
    routine: Option<PathBuf>,
    /// Any date in the week (YYYY-MM-DD); defaults to today
    #[arg(long)]
    week: Option<NaiveDate>,
    /// Only show one day (0 = Sunday ... 6 = Saturday)
    #[arg(long)]
    day: Option<u8>,
}

pub fn run(args: GridArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let anchor = resolve_week(args.week);
    let start = week_start(anchor);

    let mut grid = WeekGrid::with_config(config.grid)?;
    // Without a routine this prints the empty grid.
    if let Some(path) = args.routine.or(config.files.routine.clone()) {
        let blocks = load_routine(&path, &config.grid)?;
        mark_fixed_blocks(&mut grid, &blocks, anchor)?;
    }

    let days = match args.day {
        Some(day) => vec![check_day(day)?],
        None => (0..DAYS_IN_WEEK).collect(),
    };

    for day in days {
        let slots = grid.day(day)?;
        let times: Vec<String> = slots.iter().map(ToString::to_string).collect();
        println!(
            "{} {} ({} free): {}",
            day_label(day),
            date_for_day(start, day),
            slots.len(),
            times.join(" ")
        );
    }
    Ok(())
}
