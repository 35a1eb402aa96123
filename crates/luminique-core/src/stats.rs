//! Read-only summaries over routine history.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::routine::{HistoryEntry, RoutineState};

/// Trailing window used for completion rates.
pub const COMPLETION_WINDOW_DAYS: u64 = 30;

/// One day of the weekly activity chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    pub date: CalendarDate,
    /// 2 = both sections, 1 = one section, 0 = none.
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineStats {
    pub current_streak: u32,
    pub best_streak: u32,
    /// Days in history with any activity.
    pub active_days: u32,
    /// Percent of the last 30 days with the morning routine done.
    pub morning_rate: u32,
    /// Percent of the last 30 days with the evening routine done.
    pub evening_rate: u32,
    pub last_7_days: Vec<DayActivity>,
}

impl RoutineStats {
    pub fn compute(state: &RoutineState, today: CalendarDate) -> Self {
        let (morning_rate, evening_rate) = completion_rates(&state.history, today);
        Self {
            current_streak: state.current_streak,
            best_streak: state.best_streak,
            active_days: state
                .history
                .iter()
                .filter(|e| e.has_activity())
                .map(|e| e.date)
                .collect::<BTreeSet<_>>()
                .len() as u32,
            morning_rate,
            evening_rate,
            last_7_days: weekly_activity(&state.history, today),
        }
    }
}

/// Morning and evening completion percentages over the trailing 30 days,
/// today inclusive.
pub fn completion_rates(history: &[HistoryEntry], today: CalendarDate) -> (u32, u32) {
    let window_start = today.days_before(COMPLETION_WINDOW_DAYS - 1);

    // Duplicate dates merge their flags.
    let mut days: BTreeMap<CalendarDate, (bool, bool)> = BTreeMap::new();
    for entry in history
        .iter()
        .filter(|e| e.date >= window_start && e.date <= today)
    {
        let day = days.entry(entry.date).or_default();
        day.0 |= entry.morning;
        day.1 |= entry.evening;
    }

    let (mut morning, mut evening) = (0u32, 0u32);
    for &(m, e) in days.values() {
        morning += u32::from(m);
        evening += u32::from(e);
    }

    let rate = |count: u32| (f64::from(count) / COMPLETION_WINDOW_DAYS as f64 * 100.0).round() as u32;
    (rate(morning), rate(evening))
}

/// Activity for the last seven days, oldest first.
pub fn weekly_activity(history: &[HistoryEntry], today: CalendarDate) -> Vec<DayActivity> {
    (0..7u64)
        .rev()
        .map(|offset| {
            let date = today.days_before(offset);
            let value = history
                .iter()
                .find(|e| e.date == date)
                .map(HistoryEntry::score)
                .unwrap_or(0);
            DayActivity { date, value }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn weekly_activity_is_oldest_first() {
        let history = vec![
            HistoryEntry::new(date("2024-01-10"), true, true),
            HistoryEntry::new(date("2024-01-08"), false, true),
            HistoryEntry::new(date("2023-12-01"), true, true),
        ];
        let week = weekly_activity(&history, date("2024-01-10"));
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, date("2024-01-04"));
        let values: Vec<u8> = week.iter().map(|d| d.value).collect();
        assert_eq!(values, vec![0, 0, 0, 0, 1, 0, 2]);
    }

    #[test]
    fn completion_rates_ignore_entries_outside_window() {
        let today = date("2024-01-30");
        let history = vec![
            HistoryEntry::new(date("2024-01-30"), true, false),
            HistoryEntry::new(date("2024-01-01"), true, true),
            HistoryEntry::new(date("2023-12-31"), true, true),
        ];
        // 2 of 30 mornings, 1 of 30 evenings.
        assert_eq!(completion_rates(&history, today), (7, 3));
    }

    #[test]
    fn duplicate_dates_count_once() {
        let today = date("2024-01-30");
        let history: Vec<HistoryEntry> = (0..40)
            .map(|i| HistoryEntry::new(today.days_before(i % 2), true, i % 4 == 1))
            .collect();
        assert_eq!(completion_rates(&history, today), (7, 3));

        let full: Vec<HistoryEntry> = (0..30u64)
            .flat_map(|i| {
                let d = today.days_before(i);
                [HistoryEntry::new(d, true, true), HistoryEntry::new(d, true, false)]
            })
            .collect();
        assert_eq!(completion_rates(&full, today), (100, 100));
    }

    #[test]
    fn stats_summarise_state() {
        let mut state = RoutineState::default();
        state.history = vec![
            HistoryEntry::new(date("2024-01-01"), true, false),
            HistoryEntry::new(date("2024-01-01"), false, true),
            HistoryEntry::new(date("2024-01-02"), false, false),
        ];
        state.current_streak = 1;
        state.best_streak = 4;
        let stats = RoutineStats::compute(&state, date("2024-01-02"));
        assert_eq!(stats.active_days, 1);
        assert_eq!(stats.best_streak, 4);
        assert_eq!(stats.morning_rate, 3);
        assert_eq!(stats.evening_rate, 3);
    }
}
