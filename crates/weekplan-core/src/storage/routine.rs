//! JSON files for the weekly routine, the task list and plan output.
//!
//! The routine file is a JSON array of fixed blocks, the task file a JSON
//! array of tasks, both in the camelCase layout the rest of the app writes.

use std::path::Path;

use crate::allocator::WeekPlan;
use crate::block::FixedBlock;
use crate::error::{CoreError, Result};
use crate::grid::GridConfig;
use crate::task::Task;

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CoreError::File {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a routine file, validating every block against `grid`.
///
/// A missing file is an error; an empty array is a valid empty routine.
pub fn load_routine(path: &Path, grid: &GridConfig) -> Result<Vec<FixedBlock>> {
    let blocks: Vec<FixedBlock> = serde_json::from_str(&read(path)?)?;
    for block in &blocks {
        block.validate(grid)?;
    }
    Ok(blocks)
}

/// Load a task file.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    Ok(serde_json::from_str(&read(path)?)?)
}

/// Write a plan as pretty-printed JSON.
pub fn save_plan(path: &Path, plan: &WeekPlan) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    std::fs::write(path, json).map_err(|source| CoreError::File {
        path: path.to_path_buf(),
        source,
    })
}
