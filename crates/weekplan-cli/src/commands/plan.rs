use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use weekplan_core::storage::{load_routine, load_tasks, save_plan};
use weekplan_core::time::day_label;
use weekplan_core::{Config, WeekAllocator, DAYS_IN_WEEK};

use super::{resolve_file, resolve_week};

#[derive(Args)]
pub struct PlanArgs {
    /// Task list (JSON array)
    #[arg(long)]
    tasks: Option<PathBuf>,
    /// Weekly routine (JSON array of fixed blocks)
    #[arg(long)]
    routine: Option<PathBuf>,
    /// Any date in the week to plan (YYYY-MM-DD); defaults to today
    #[arg(long)]
    week: Option<NaiveDate>,
    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
    /// Also write the plan as JSON to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let tasks_path = resolve_file(args.tasks, config.files.tasks.clone(), "tasks")?;
    let routine_path = resolve_file(args.routine, config.files.routine.clone(), "routine")?;

    let blocks = load_routine(&routine_path, &config.grid)?;
    let tasks = load_tasks(&tasks_path)?;

    let mut allocator = WeekAllocator::with_grid(config.grid)?;
    let plan = allocator.plan_week(&blocks, &tasks, resolve_week(args.week))?;

    if let Some(path) = &args.output {
        save_plan(path, &plan)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("Week of {}", plan.week_start);
    for day in 0..DAYS_IN_WEEK {
        let placements = plan.for_day(day);
        if placements.is_empty() {
            continue;
        }
        println!();
        println!("{} {}", day_label(day), placements[0].date);
        for placed in placements {
            println!(
                "  {}-{}  {} ({}min)",
                placed.start_time, placed.end_time, placed.task.title, placed.task.estimated_minutes
            );
        }
    }

    println!();
    println!(
        "{} scheduled, {} unplaced, {} minutes booked",
        plan.scheduled.len(),
        plan.unplaced.len(),
        plan.scheduled_minutes()
    );
    for unplaced in &plan.unplaced {
        println!(
            "  unplaced: {} ({}min = {} slots)",
            unplaced.title, unplaced.estimated_minutes, unplaced.slots_needed
        );
    }
    Ok(())
}
