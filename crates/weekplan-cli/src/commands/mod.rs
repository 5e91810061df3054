pub mod availability;
pub mod config;
pub mod grid;
pub mod plan;
pub mod rank;

use std::path::PathBuf;

use chrono::NaiveDate;

/// Week to plan: the given date, or today in local time.
pub(crate) fn resolve_week(week: Option<NaiveDate>) -> NaiveDate {
    week.unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Pick the explicit path, falling back to the configured `files.<key>`.
pub(crate) fn resolve_file(
    explicit: Option<PathBuf>,
    configured: Option<PathBuf>,
    key: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    explicit
        .or(configured)
        .ok_or_else(|| format!("no {key} file given; pass --{key} or run `weekplan config set files.{key} <path>`").into())
}
