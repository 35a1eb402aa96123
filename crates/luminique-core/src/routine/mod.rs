mod history;
mod step;
mod tracker;

pub use history::HistoryEntry;
pub use step::{RoutineStep, RoutineTemplate, Section, StepTemplate};
pub use tracker::{RolloverOutcome, RoutineState, RoutineTracker, SectionOutcome};
