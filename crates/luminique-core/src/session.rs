//! The calling policy that wires tracker, streak, ledger and store together.
//!
//! A [`GlowSession`] is what an app shell holds for one signed-in user. It
//! checks for a day rollover before every command, awards points only for
//! newly recorded `(date, section)` completions, and persists both state
//! objects after each change.

use serde::Serialize;

use crate::achievements::{self, Achievement};
use crate::date::{CalendarDate, DateProvider};
use crate::error::Result;
use crate::points::{PointsAction, PointsTable, Profile};
use crate::progress::{GrowthState, NextTierInfo, Tier};
use crate::routine::{RolloverOutcome, RoutineState, RoutineTracker, Section, SectionOutcome};
use crate::stats::RoutineStats;
use crate::storage::{Config, StateStore};

/// Streak length that earns the streak bonus, and every multiple of it.
pub const STREAK_BONUS_INTERVAL: u32 = 7;

/// What a section completion did to the user's state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompletionReport {
    pub outcome: SectionOutcome,
    /// Points awarded by this call; zero for a replay.
    pub points_awarded: u64,
    pub glow_points: u64,
    pub tier: Tier,
}

/// Result of a single step completion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepReport {
    pub section: Section,
    /// The step was newly marked done.
    pub changed: bool,
    pub completed_steps: usize,
    pub total_steps: usize,
    /// Set when this step finished the section.
    pub section_completion: Option<CompletionReport>,
}

/// Snapshot of everything a home screen renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub today: CalendarDate,
    pub routine: RoutineState,
    pub profile: Profile,
    pub growth: GrowthState,
    pub next_tier: NextTierInfo,
    pub achievements: Vec<Achievement>,
}

pub struct GlowSession<C, S> {
    clock: C,
    store: S,
    tracker: RoutineTracker,
    points: PointsTable,
    routine: RoutineState,
    profile: Profile,
    /// Rollover applied while opening.
    opening_rollover: RolloverOutcome,
}

impl<C: DateProvider, S: StateStore> GlowSession<C, S> {
    /// Load state from `store` and bring it up to `clock`'s today.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub fn open(clock: C, store: S, config: &Config) -> Result<Self> {
        let tracker = RoutineTracker::new(config.routine.clone());
        let routine = store
            .load_routine()?
            .unwrap_or_else(|| tracker.fresh_state());
        let profile = store.load_profile()?.unwrap_or_default();

        let mut session = Self {
            clock,
            store,
            tracker,
            points: config.points.clone(),
            routine,
            profile,
            opening_rollover: RolloverOutcome::default(),
        };
        session.opening_rollover = session.roll_over()?;
        Ok(session)
    }

    pub fn today(&self) -> CalendarDate {
        self.clock.today()
    }

    pub fn routine(&self) -> &RoutineState {
        &self.routine
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// What the rollover in [`GlowSession::open`] changed.
    pub fn opening_rollover(&self) -> RolloverOutcome {
        self.opening_rollover
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Withered persists across sessions until the next section completion.
    pub fn growth_state(&self) -> GrowthState {
        GrowthState::from_streak(self.routine.current_streak, self.routine.lost_streak)
    }

    pub fn next_tier(&self) -> NextTierInfo {
        self.profile.next_tier()
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        achievements::unlocked(self.routine.current_streak, &self.profile)
    }

    pub fn stats(&self) -> RoutineStats {
        RoutineStats::compute(&self.routine, self.today())
    }

    pub fn overview(&self) -> Overview {
        Overview {
            today: self.today(),
            routine: self.routine.clone(),
            profile: self.profile.clone(),
            growth: self.growth_state(),
            next_tier: self.next_tier(),
            achievements: self.achievements(),
        }
    }

    /// Apply the daily rollover for the current date and persist if needed.
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn roll_over(&mut self) -> Result<RolloverOutcome> {
        let today = self.today();
        let outcome = self
            .tracker
            .check_and_reset_for_new_day(&mut self.routine, today);
        if let Some(broken) = outcome.broken_streak {
            tracing::info!(broken, date = %today, "streak broken by a missed day");
        }
        if outcome.new_day || outcome.broken_streak.is_some() {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Mark one step done, completing the section when it was the last one.
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn complete_step(&mut self, section: Section, step_id: &str) -> Result<StepReport> {
        self.roll_over()?;
        let today = self.today();

        let changed = self
            .tracker
            .complete_step(&mut self.routine, section, step_id);

        let section_completion =
            if self.routine.all_steps_done(section) && !self.routine.is_recorded(section, today) {
                Some(self.record_section(section, today))
            } else {
                None
            };

        if changed || section_completion.is_some() {
            self.persist()?;
        }

        let (completed_steps, total_steps) = self.routine.step_progress(section);
        Ok(StepReport {
            section,
            changed,
            completed_steps,
            total_steps,
            section_completion,
        })
    }

    /// Record a whole section for today and award its points.
    ///
    /// Replaying a section already recorded today awards nothing.
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn complete_section(&mut self, section: Section) -> Result<CompletionReport> {
        self.roll_over()?;
        let today = self.today();
        let report = self.record_section(section, today);
        if report.outcome.is_recorded() {
            self.persist()?;
        }
        Ok(report)
    }

    fn record_section(&mut self, section: Section, today: CalendarDate) -> CompletionReport {
        let outcome = self
            .tracker
            .complete_section(&mut self.routine, section, today);

        let mut points_awarded = 0;
        if let SectionOutcome::Recorded {
            streak,
            other_section_done,
            ..
        } = outcome
        {
            points_awarded = self.points.amount(match section {
                Section::Morning => PointsAction::MorningRoutine,
                Section::Evening => PointsAction::EveningRoutine,
            });
            if other_section_done {
                points_awarded += self.points.amount(PointsAction::BothRoutinesBonus);
            }
            // Only the first section of the day can move the streak.
            if !other_section_done && streak > 0 && streak % STREAK_BONUS_INTERVAL == 0 {
                points_awarded += self.points.amount(PointsAction::SevenDayStreak);
            }
            self.profile.award(points_awarded);
            self.profile.total_routines_completed += 1;
            tracing::info!(%section, points_awarded, total = self.profile.glow_points(), "points awarded");
        }

        CompletionReport {
            outcome,
            points_awarded,
            glow_points: self.profile.glow_points(),
            tier: self.profile.tier(),
        }
    }

    /// Add an arbitrary number of points.
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn award(&mut self, amount: u64) -> Result<u64> {
        let total = self.profile.award(amount);
        self.persist()?;
        Ok(total)
    }

    /// Count a product review and award its points.
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn record_review(&mut self) -> Result<u64> {
        self.profile.products_reviewed += 1;
        let amount = self.points.amount(PointsAction::WriteReview);
        self.award(amount)
    }

    /// Mark the first purchase. Returns the points awarded (zero if the
    /// bonus was already claimed).
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn record_first_purchase(&mut self) -> Result<u64> {
        if self.profile.has_first_purchase {
            return Ok(0);
        }
        self.profile.has_first_purchase = true;
        let amount = self.points.amount(PointsAction::FirstPurchase);
        self.award(amount)?;
        Ok(amount)
    }

    /// Wipe all progress, including the best streak.
    ///
    /// # Errors
    /// Returns an error if the store cannot be cleared or written.
    pub fn reset(&mut self) -> Result<()> {
        self.tracker.reset(&mut self.routine);
        self.profile = Profile::default();
        self.store.clear()?;
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save_snapshot(&self.routine, &self.profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::FixedClock;
    use crate::storage::MemoryStore;
    use std::cell::Cell;

    /// Clock whose date can be advanced between calls.
    struct StepClock(Cell<CalendarDate>);

    impl StepClock {
        fn at(s: &str) -> Self {
            Self(Cell::new(s.parse().unwrap()))
        }
        fn set(&self, s: &str) {
            self.0.set(s.parse().unwrap());
        }
    }

    impl DateProvider for StepClock {
        fn today(&self) -> CalendarDate {
            self.0.get()
        }
    }

    fn session_at(day: &str) -> GlowSession<FixedClock, MemoryStore> {
        let clock = FixedClock(day.parse().unwrap());
        GlowSession::open(clock, MemoryStore::new(), &Config::default()).unwrap()
    }

    #[test]
    fn first_section_awards_base_points() {
        let mut session = session_at("2024-01-03");
        let report = session.complete_section(Section::Morning).unwrap();
        assert_eq!(report.points_awarded, 10);
        assert_eq!(report.glow_points, 10);
        assert_eq!(session.routine().current_streak, 1);
        assert_eq!(session.profile().total_routines_completed, 1);
    }

    #[test]
    fn second_section_earns_both_routines_bonus() {
        let mut session = session_at("2024-01-03");
        session.complete_section(Section::Morning).unwrap();
        let report = session.complete_section(Section::Evening).unwrap();
        assert_eq!(report.points_awarded, 15);
        assert_eq!(session.profile().glow_points(), 25);
    }

    #[test]
    fn replayed_section_awards_nothing() {
        let mut session = session_at("2024-01-03");
        session.complete_section(Section::Evening).unwrap();
        let routine_once = session.routine().clone();

        let replay = session.complete_section(Section::Evening).unwrap();
        assert!(!replay.outcome.is_recorded());
        assert_eq!(replay.points_awarded, 0);
        assert_eq!(session.profile().glow_points(), 10);
        assert_eq!(session.routine(), &routine_once);
        assert_eq!(session.profile().total_routines_completed, 1);
    }

    #[test]
    fn finishing_last_step_completes_the_section() {
        let mut session = session_at("2024-01-03");
        for id in ["m1", "m2", "m3", "m4"] {
            let report = session.complete_step(Section::Morning, id).unwrap();
            assert!(report.section_completion.is_none());
        }
        let report = session.complete_step(Section::Morning, "m5").unwrap();
        assert_eq!(report.completed_steps, 5);
        let completion = report.section_completion.unwrap();
        assert_eq!(completion.points_awarded, 10);
        assert!(session.routine().morning_completed_today);

        // Clicking a step again after completion changes nothing.
        let again = session.complete_step(Section::Morning, "m5").unwrap();
        assert!(!again.changed);
        assert!(again.section_completion.is_none());
        assert_eq!(session.profile().glow_points(), 10);
    }

    #[test]
    fn unknown_step_is_ignored() {
        let mut session = session_at("2024-01-03");
        let report = session.complete_step(Section::Evening, "zz").unwrap();
        assert!(!report.changed);
        assert_eq!(report.completed_steps, 0);
    }

    #[test]
    fn seventh_day_earns_streak_bonus_once() {
        let clock = StepClock::at("2024-01-01");
        let mut session = GlowSession::open(&clock, MemoryStore::new(), &Config::default()).unwrap();
        let mut last = None;
        for day in 1..=7 {
            clock.set(&format!("2024-01-{day:02}"));
            last = Some(session.complete_section(Section::Morning).unwrap());
        }
        assert_eq!(session.routine().current_streak, 7);
        assert_eq!(last.unwrap().points_awarded, 60);

        let evening = session.complete_section(Section::Evening).unwrap();
        assert_eq!(evening.points_awarded, 15);
        assert_eq!(session.growth_state(), GrowthState::Bloom);
        assert!(session.achievements().contains(&Achievement::FirstStreak));
    }

    #[test]
    fn missed_day_withers_the_plant() {
        let clock = StepClock::at("2024-01-01");
        let mut session = GlowSession::open(&clock, MemoryStore::new(), &Config::default()).unwrap();
        for day in 1..=4 {
            clock.set(&format!("2024-01-{day:02}"));
            session.complete_section(Section::Morning).unwrap();
        }
        assert_eq!(session.growth_state(), GrowthState::Bud);

        clock.set("2024-01-07");
        let rollover = session.roll_over().unwrap();
        assert!(rollover.new_day);
        assert_eq!(rollover.broken_streak, Some(4));
        assert_eq!(session.routine().current_streak, 0);
        assert_eq!(session.routine().best_streak, 4);
        assert_eq!(session.growth_state(), GrowthState::Withered);

        session.complete_section(Section::Evening).unwrap();
        assert_eq!(session.growth_state(), GrowthState::Seed);
    }

    #[test]
    fn state_survives_reopen() {
        let clock = FixedClock("2024-01-03".parse().unwrap());
        let mut session = GlowSession::open(clock, MemoryStore::new(), &Config::default()).unwrap();
        session.complete_section(Section::Morning).unwrap();
        session.record_review().unwrap();
        let store = session.store().clone();

        let reopened = GlowSession::open(clock, store, &Config::default()).unwrap();
        assert_eq!(reopened.routine(), session.routine());
        assert_eq!(reopened.profile(), session.profile());
        assert_eq!(reopened.profile().glow_points(), 25);
    }

    #[test]
    fn first_purchase_is_awarded_once() {
        let mut session = session_at("2024-01-03");
        assert_eq!(session.record_first_purchase().unwrap(), 25);
        assert_eq!(session.record_first_purchase().unwrap(), 0);
        assert_eq!(session.profile().glow_points(), 25);
    }

    #[test]
    fn configured_point_values_are_used() {
        let mut config = Config::default();
        config.points.morning_routine = 40;
        config.points.both_routines_bonus = 0;
        let clock = FixedClock("2024-01-03".parse().unwrap());
        let mut session = GlowSession::open(clock, MemoryStore::new(), &config).unwrap();
        session.complete_section(Section::Evening).unwrap();
        let report = session.complete_section(Section::Morning).unwrap();
        assert_eq!(report.points_awarded, 40);
        assert_eq!(session.profile().glow_points(), 50);
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = session_at("2024-01-03");
        session.complete_section(Section::Morning).unwrap();
        session.award(600).unwrap();
        session.reset().unwrap();

        assert_eq!(session.routine().best_streak, 0);
        assert!(session.routine().history.is_empty());
        assert_eq!(session.profile().glow_points(), 0);
        assert_eq!(session.profile().tier(), Tier::Starter);
    }
}
