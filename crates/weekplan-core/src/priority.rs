//! Task eligibility and scheduling order.
//!
//! Schedulable tasks are ordered by:
//! - priority, highest first
//! - deadline, earliest first
//! - estimated duration, shortest first (quick wins)
//!
//! The sort is stable, so tasks equal on all three keys keep their input order.

use std::cmp::Ordering;

use crate::task::Task;

/// Compare two tasks by scheduling precedence. `Less` means "schedule first".
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| a.deadline.cmp(&b.deadline))
        .then_with(|| a.estimated_minutes.cmp(&b.estimated_minutes))
}

/// Filter out completed, cancelled and zero-length tasks and sort the rest.
///
/// Returns copies; the input is left untouched.
pub fn prioritize_tasks(tasks: &[Task]) -> Vec<Task> {
    let mut eligible: Vec<Task> = tasks
        .iter()
        .filter(|task| task.is_schedulable())
        .cloned()
        .collect();
    eligible.sort_by(compare_tasks);
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskPriority, TaskStatus};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 18, 12, 0, 0).unwrap()
    }

    fn task(id: &str, priority: TaskPriority, deadline_days: i64, minutes: i32) -> Task {
        Task::new(id, format!("Task {id}"), minutes, priority, base() + Duration::days(deadline_days))
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn priority_beats_deadline() {
        let tasks = vec![
            task("A", TaskPriority::High, 5, 60),
            task("B", TaskPriority::High, 2, 60),
            task("C", TaskPriority::Low, 1, 60),
        ];
        assert_eq!(ids(&prioritize_tasks(&tasks)), ["B", "A", "C"]);
    }

    #[test]
    fn shorter_task_wins_tie() {
        let tasks = vec![
            task("low", TaskPriority::Low, 7, 30),
            task("long", TaskPriority::High, 2, 60),
            task("short", TaskPriority::High, 2, 30),
        ];
        assert_eq!(ids(&prioritize_tasks(&tasks)), ["short", "long", "low"]);
    }

    #[test]
    fn deadline_compares_full_timestamp() {
        let mut morning = task("morning", TaskPriority::Medium, 1, 60);
        let mut evening = task("evening", TaskPriority::Medium, 1, 30);
        morning.deadline = base() + Duration::hours(20);
        evening.deadline = base() + Duration::hours(30);
        let sorted = prioritize_tasks(&[evening, morning]);
        assert_eq!(ids(&sorted), ["morning", "evening"]);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let tasks = vec![
            task("first", TaskPriority::Medium, 3, 45),
            task("second", TaskPriority::Medium, 3, 45),
            task("third", TaskPriority::Medium, 3, 45),
        ];
        assert_eq!(ids(&prioritize_tasks(&tasks)), ["first", "second", "third"]);
    }

    #[test]
    fn ineligible_tasks_are_dropped() {
        let tasks = vec![
            task("done", TaskPriority::High, 1, 60).with_status(TaskStatus::Completed),
            task("cancelled", TaskPriority::High, 1, 60).with_status(TaskStatus::Cancelled),
            task("zero", TaskPriority::High, 1, 0),
            task("running", TaskPriority::Low, 1, 30).with_status(TaskStatus::InProgress),
            task("todo", TaskPriority::Medium, 1, 30),
        ];
        assert_eq!(ids(&prioritize_tasks(&tasks)), ["todo", "running"]);
    }

    #[test]
    fn empty_when_nothing_is_eligible() {
        assert!(prioritize_tasks(&[]).is_empty());
        let tasks = vec![task("done", TaskPriority::High, 1, 60).with_status(TaskStatus::Completed)];
        assert!(prioritize_tasks(&tasks).is_empty());
    }
}
