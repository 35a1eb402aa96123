//! # Luminique Core Library
//!
//! This library provides the streak and progress engine behind the
//! Luminique skincare routine app. Screens and the CLI are thin layers that
//! call into the same operations and render their outputs.
//!
//! ## Architecture
//!
//! - **Routine Tracker**: per-day morning/evening step state and the
//!   day-indexed activity history
//! - **Streak Calculator**: consecutive-day streak from history, ending today
//!   or yesterday
//! - **Progress Classifier**: growth state from the streak, reward tier and
//!   next-tier progress from points
//! - **Points Ledger**: glow point balance with the tier kept in lockstep
//! - **Storage**: SQLite key-value state store and TOML configuration
//!
//! ## Key Components
//!
//! - [`GlowSession`]: Loads state, applies commands for "today", persists
//! - [`RoutineTracker`]: Pure routine transitions over a [`RoutineState`]
//! - [`compute_streak`]: Streak from history
//! - [`DateProvider`]: Injected source of the current calendar date

pub mod achievements;
pub mod date;
pub mod error;
pub mod points;
pub mod progress;
pub mod routine;
pub mod session;
pub mod stats;
pub mod storage;
pub mod streak;

pub use achievements::Achievement;
pub use date::{CalendarDate, DateProvider, FixedClock, LocalClock};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use points::{PointsAction, PointsTable, Profile};
pub use progress::{GrowthState, NextTierInfo, Tier};
pub use routine::{
    HistoryEntry, RolloverOutcome, RoutineState, RoutineStep, RoutineTemplate, RoutineTracker,
    Section, SectionOutcome, StepTemplate,
};
pub use session::{CompletionReport, GlowSession, Overview, StepReport};
pub use stats::{DayActivity, RoutineStats};
pub use storage::{Config, Database, MemoryStore, StateStore};
pub use streak::compute_streak;
