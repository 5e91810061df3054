//! Consecutive free-slot search within one day.
//!
//! Free lists lose entries as blocks and tasks are placed, so neighbours in the
//! list are not necessarily neighbours in time. A run only counts when every
//! step between its slots is exactly one slot length.

use crate::grid::SLOT_DURATION_MINUTES;
use crate::time::ClockTime;

/// Index of the first run of `needed` time-consecutive slots in `free`.
///
/// `step` is the slot length in minutes. Returns `None` when no such run
/// exists or `needed` is zero.
pub fn find_consecutive_run(free: &[ClockTime], needed: usize, step: u16) -> Option<usize> {
    if needed == 0 || free.len() < needed {
        return None;
    }

    (0..=free.len() - needed).find(|&start| {
        free[start..start + needed]
            .windows(2)
            .all(|pair| pair[1].minutes().checked_sub(pair[0].minutes()) == Some(step))
    })
}

/// First run of `needed` consecutive 30-minute slots, or `None`.
///
/// `["06:00", "06:30", "08:00", "08:30", "09:00"]` with `needed = 3` yields
/// `["08:00", "08:30", "09:00"]`.
pub fn find_consecutive_slots(free: &[ClockTime], needed: usize) -> Option<&[ClockTime]> {
    find_consecutive_run(free, needed, SLOT_DURATION_MINUTES).map(|start| &free[start..start + needed])
}
