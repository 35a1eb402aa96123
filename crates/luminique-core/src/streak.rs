//! Consecutive-day streak calculation.
//!
//! A streak is the run of calendar days with at least one completed section,
//! ending today or yesterday. Yesterday still counts so the streak survives
//! until the user has had the whole of today to keep it going.

use std::collections::BTreeSet;

use crate::date::CalendarDate;
use crate::routine::HistoryEntry;

/// Compute the current streak from `history` as seen on `today`.
///
/// Entries without activity are treated the same as a missing entry, so an
/// empty entry dated today does not hide a chain that ended yesterday.
/// Entries that share a date are merged.
pub fn compute_streak(history: &[HistoryEntry], today: CalendarDate) -> u32 {
    let active: BTreeSet<CalendarDate> = history
        .iter()
        .filter(|entry| entry.has_activity())
        .map(|entry| entry.date)
        .collect();

    let Some(&latest) = active.last() else {
        return 0;
    };

    if latest != today && latest != today.previous() {
        return 0;
    }

    let mut streak = 0;
    let mut cursor = latest;
    while active.contains(&cursor) {
        streak += 1;
        let previous = cursor.previous();
        if previous == cursor {
            break;
        }
        cursor = previous;
    }
    streak
}
