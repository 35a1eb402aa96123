//! Per-day routine state and the transitions that mutate it.
//!
//! Every compound transition is built on a copy of [`RoutineState`] and then
//! assigned back in one step, so a caller never observes a half-applied
//! update (history written but streak stale, and so on).

use serde::{Deserialize, Serialize};

use super::{HistoryEntry, RoutineStep, RoutineTemplate, Section};
use crate::date::CalendarDate;
use crate::streak::compute_streak;

/// Persisted routine state for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutineState {
    pub today_morning_steps: Vec<RoutineStep>,
    pub today_evening_steps: Vec<RoutineStep>,
    pub history: Vec<HistoryEntry>,
    pub current_streak: u32,
    pub best_streak: u32,
    pub last_completed_date: Option<CalendarDate>,
    pub morning_completed_today: bool,
    pub evening_completed_today: bool,
    /// Day the step lists were last reset or completed for.
    pub steps_date: Option<CalendarDate>,
    /// Streak dropped by the last missed day; cleared by the next completion.
    pub lost_streak: u32,
}

impl RoutineState {
    /// Empty history, zero streaks, fresh steps from `template`.
    pub fn new(template: &RoutineTemplate) -> Self {
        Self {
            today_morning_steps: template.fresh_steps(Section::Morning),
            today_evening_steps: template.fresh_steps(Section::Evening),
            history: Vec::new(),
            current_streak: 0,
            best_streak: 0,
            last_completed_date: None,
            morning_completed_today: false,
            evening_completed_today: false,
            steps_date: None,
            lost_streak: 0,
        }
    }

    pub fn steps(&self, section: Section) -> &[RoutineStep] {
        match section {
            Section::Morning => &self.today_morning_steps,
            Section::Evening => &self.today_evening_steps,
        }
    }

    fn steps_mut(&mut self, section: Section) -> &mut Vec<RoutineStep> {
        match section {
            Section::Morning => &mut self.today_morning_steps,
            Section::Evening => &mut self.today_evening_steps,
        }
    }

    pub fn completed_today(&self, section: Section) -> bool {
        match section {
            Section::Morning => self.morning_completed_today,
            Section::Evening => self.evening_completed_today,
        }
    }

    fn set_completed_today(&mut self, section: Section, done: bool) {
        match section {
            Section::Morning => self.morning_completed_today = done,
            Section::Evening => self.evening_completed_today = done,
        }
    }

    /// `(completed, total)` step counts for `section`.
    pub fn step_progress(&self, section: Section) -> (usize, usize) {
        let steps = self.steps(section);
        (steps.iter().filter(|s| s.completed).count(), steps.len())
    }

    pub fn all_steps_done(&self, section: Section) -> bool {
        let (done, total) = self.step_progress(section);
        total > 0 && done == total
    }

    pub fn entry_for(&self, date: CalendarDate) -> Option<&HistoryEntry> {
        self.history.iter().find(|entry| entry.date == date)
    }

    /// Whether `section` is recorded in history for `date`.
    pub fn is_recorded(&self, section: Section, date: CalendarDate) -> bool {
        self.entry_for(date)
            .map(|entry| entry.is_done(section))
            .unwrap_or(false)
    }
}

impl Default for RoutineState {
    fn default() -> Self {
        Self::new(&RoutineTemplate::default())
    }
}

/// Result of [`RoutineTracker::complete_section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionOutcome {
    /// A new `(date, section)` completion was written to history.
    Recorded {
        section: Section,
        date: CalendarDate,
        streak: u32,
        best_streak: u32,
        /// The other section had already been completed today.
        other_section_done: bool,
    },
    /// The section was already recorded for today; nothing changed.
    AlreadyComplete { section: Section, date: CalendarDate },
}

impl SectionOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, SectionOutcome::Recorded { .. })
    }
}

/// Result of [`RoutineTracker::check_and_reset_for_new_day`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RolloverOutcome {
    /// Today's step lists were reset.
    pub new_day: bool,
    /// Streak value that was dropped to zero by a missed day.
    pub broken_streak: Option<u32>,
}

/// Applies routine transitions to a [`RoutineState`].
///
/// Holds only the step template; all user data lives in the state passed in.
#[derive(Debug, Clone, Default)]
pub struct RoutineTracker {
    template: RoutineTemplate,
}

impl RoutineTracker {
    pub fn new(template: RoutineTemplate) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &RoutineTemplate {
        &self.template
    }

    pub fn fresh_state(&self) -> RoutineState {
        RoutineState::new(&self.template)
    }

    /// Mark one step done. Unknown ids and already-done steps are ignored.
    ///
    /// Returns `true` if a step changed.
    pub fn complete_step(&self, state: &mut RoutineState, section: Section, step_id: &str) -> bool {
        match state
            .steps_mut(section)
            .iter_mut()
            .find(|step| step.id == step_id && !step.completed)
        {
            Some(step) => {
                step.completed = true;
                tracing::debug!(%section, step_id, "step completed");
                true
            }
            None => false,
        }
    }

    /// Record `section` as performed on `today`.
    ///
    /// Idempotent per `(today, section)`: the check is made against today's
    /// history entry, so replays leave the state untouched.
    pub fn complete_section(
        &self,
        state: &mut RoutineState,
        section: Section,
        today: CalendarDate,
    ) -> SectionOutcome {
        if state.is_recorded(section, today) {
            tracing::debug!(%section, date = %today, "section already recorded today");
            return SectionOutcome::AlreadyComplete {
                section,
                date: today,
            };
        }

        let mut next = state.clone();
        match next.history.iter_mut().find(|entry| entry.date == today) {
            Some(entry) => entry.mark(section),
            None => next.history.push(HistoryEntry::for_section(today, section)),
        }

        let other_section_done = next.is_recorded(section.other(), today);
        next.set_completed_today(section, true);
        next.set_completed_today(section.other(), other_section_done);

        next.current_streak = compute_streak(&next.history, today);
        next.best_streak = next.best_streak.max(next.current_streak);
        next.last_completed_date = Some(today);
        next.steps_date = Some(today);
        next.lost_streak = 0;
        for step in next.steps_mut(section).iter_mut() {
            step.completed = true;
        }

        let outcome = SectionOutcome::Recorded {
            section,
            date: today,
            streak: next.current_streak,
            best_streak: next.best_streak,
            other_section_done,
        };
        *state = next;

        tracing::info!(
            %section,
            date = %today,
            streak = state.current_streak,
            best = state.best_streak,
            "section completed"
        );
        outcome
    }

    /// Reset today's steps when the calendar day has moved on.
    ///
    /// A gap of more than one day since the last completion also drops the
    /// current streak to zero. The best streak is never touched here. Steps
    /// already reset for `today` are left alone, so calling this before
    /// every command keeps partial progress.
    pub fn check_and_reset_for_new_day(
        &self,
        state: &mut RoutineState,
        today: CalendarDate,
    ) -> RolloverOutcome {
        let Some(last) = state.last_completed_date else {
            return RolloverOutcome::default();
        };
        if last == today {
            return RolloverOutcome::default();
        }

        let gap = today.days_since(last);
        if gap < 0 {
            tracing::warn!(
                last_completed = %last,
                today = %today,
                "today is earlier than the last completion date"
            );
        }

        let mut next = state.clone();
        let new_day = next.steps_date != Some(today);
        if new_day {
            next.today_morning_steps = self.template.fresh_steps(Section::Morning);
            next.today_evening_steps = self.template.fresh_steps(Section::Evening);
            // Only a date already in history (clock moved back) has a section done.
            for section in Section::ALL {
                let done = next.is_recorded(section, today);
                next.set_completed_today(section, done);
                if done {
                    for step in next.steps_mut(section).iter_mut() {
                        step.completed = true;
                    }
                }
            }
            next.steps_date = Some(today);
        }

        let mut broken_streak = None;
        if gap > 1 && next.current_streak > 0 {
            broken_streak = Some(next.current_streak);
            next.lost_streak = next.current_streak;
            next.current_streak = 0;
        }
        *state = next;

        if new_day || broken_streak.is_some() {
            tracing::debug!(
                last_completed = %last,
                today = %today,
                gap,
                broken = ?broken_streak,
                "daily rollover"
            );
        }
        RolloverOutcome {
            new_day,
            broken_streak,
        }
    }

    /// Explicit full reset. The only path that clears the best streak.
    pub fn reset(&self, state: &mut RoutineState) {
        *state = self.fresh_state();
        tracing::info!("routine state reset");
    }
}
