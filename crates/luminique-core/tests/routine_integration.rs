//! Integration tests for the routine tracker and streak engine.

use luminique_core::{
    compute_streak, CalendarDate, GrowthState, HistoryEntry, NextTierInfo, RoutineTracker,
    Section, Tier,
};
use proptest::prelude::*;

fn date(s: &str) -> CalendarDate {
    s.parse().unwrap()
}

#[test]
fn consecutive_days_with_mixed_sections() {
    let history = vec![
        HistoryEntry::new(date("2024-01-01"), true, false),
        HistoryEntry::new(date("2024-01-02"), true, true),
        HistoryEntry::new(date("2024-01-03"), true, false),
    ];
    assert_eq!(compute_streak(&history, date("2024-01-03")), 3);
}

#[test]
fn missing_day_breaks_chain() {
    let history = vec![
        HistoryEntry::new(date("2024-01-01"), true, true),
        HistoryEntry::new(date("2024-01-03"), true, true),
    ];
    assert_eq!(compute_streak(&history, date("2024-01-03")), 1);
}

#[test]
fn rollover_after_two_missed_days() {
    let tracker = RoutineTracker::default();
    let mut state = tracker.fresh_state();
    for day in ["2024-03-01", "2024-03-02", "2024-03-03"] {
        tracker.check_and_reset_for_new_day(&mut state, date(day));
        tracker.complete_section(&mut state, Section::Morning, date(day));
    }
    tracker.complete_step(&mut state, Section::Evening, "e1");
    assert_eq!(state.current_streak, 3);

    tracker.check_and_reset_for_new_day(&mut state, date("2024-03-06"));
    assert_eq!(state.current_streak, 0);
    assert_eq!(state.best_streak, 3);
    assert_eq!(state.step_progress(Section::Morning), (0, 5));
    assert_eq!(state.step_progress(Section::Evening), (0, 5));
    assert!(!state.morning_completed_today);

    tracker.complete_section(&mut state, Section::Evening, date("2024-03-06"));
    assert_eq!(state.current_streak, 1);
    assert_eq!(state.best_streak, 3);
}

#[test]
fn double_completion_matches_single() {
    let tracker = RoutineTracker::default();
    let today = date("2024-05-10");

    let mut once = tracker.fresh_state();
    tracker.complete_section(&mut once, Section::Morning, today);

    let mut twice = tracker.fresh_state();
    tracker.complete_section(&mut twice, Section::Morning, today);
    tracker.complete_section(&mut twice, Section::Morning, today);

    assert_eq!(once, twice);
}

#[test]
fn completed_flags_follow_todays_entry() {
    let tracker = RoutineTracker::default();
    let mut state = tracker.fresh_state();
    let today = date("2024-05-10");
    tracker.complete_section(&mut state, Section::Evening, today);

    let entry = state.entry_for(today).unwrap();
    assert_eq!(state.morning_completed_today, entry.morning);
    assert_eq!(state.evening_completed_today, entry.evening);
}

#[test]
fn classifier_examples() {
    assert_eq!(Tier::classify(499), Tier::Starter);
    assert_eq!(Tier::classify(500), Tier::GlowUp);
    assert_eq!(Tier::classify(1499), Tier::GlowUp);
    assert_eq!(Tier::classify(1500), Tier::GlowPro);

    assert_eq!(GrowthState::from_streak(0, 5), GrowthState::Withered);
    assert_eq!(GrowthState::from_streak(0, 0), GrowthState::Seed);
    assert_eq!(GrowthState::from_streak(6, 0), GrowthState::Bud);
    assert_eq!(GrowthState::from_streak(7, 0), GrowthState::Bloom);

    let start = NextTierInfo::for_points(0);
    assert_eq!((start.name, start.threshold, start.progress), (Tier::GlowUp, 500, 0.0));
    let top = NextTierInfo::for_points(1500);
    assert_eq!((top.name, top.threshold, top.progress), (Tier::GlowPro, 1500, 100.0));
}

#[derive(Debug, Clone)]
enum Action {
    NextDay(u64),
    Morning,
    Evening,
    Step(Section, usize),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (1u64..4).prop_map(Action::NextDay),
        Just(Action::Morning),
        Just(Action::Evening),
        (prop_oneof![Just(Section::Morning), Just(Section::Evening)], 0usize..6)
            .prop_map(|(s, i)| Action::Step(s, i)),
    ]
}

proptest! {
    #[test]
    fn best_streak_never_below_current(actions in proptest::collection::vec(action(), 1..80)) {
        let tracker = RoutineTracker::default();
        let mut state = tracker.fresh_state();
        let mut today = date("2024-01-01");

        for action in actions {
            match action {
                Action::NextDay(n) => {
                    today = CalendarDate::new(today.naive() + chrono::Days::new(n));
                    tracker.check_and_reset_for_new_day(&mut state, today);
                }
                Action::Morning => {
                    tracker.complete_section(&mut state, Section::Morning, today);
                }
                Action::Evening => {
                    tracker.complete_section(&mut state, Section::Evening, today);
                }
                Action::Step(section, i) => {
                    let id = format!("{}{}", &section.as_str()[..1], i);
                    tracker.complete_step(&mut state, section, &id);
                }
            }
            prop_assert!(state.best_streak >= state.current_streak);

            let mut dates: Vec<_> = state.history.iter().map(|e| e.date).collect();
            let total = dates.len();
            dates.sort();
            dates.dedup();
            prop_assert_eq!(dates.len(), total);
        }
    }
}
