use clap::Subcommand;
use luminique_core::Section;

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum RoutineAction {
    /// Show today's steps, streak and growth state
    Status,
    /// Mark a single step done
    Step {
        /// "morning" or "evening"
        section: Section,
        /// Step id (e.g. "m1")
        id: String,
    },
    /// Mark a whole section done for today
    Complete {
        /// "morning" or "evening"
        section: Section,
    },
    /// Print what the daily rollover changed on this invocation
    Rollover,
}

pub fn run(ctx: &Context, action: RoutineAction) -> CmdResult {
    let mut session = ctx.session()?;

    match action {
        RoutineAction::Status => print_json(&session.overview())?,
        RoutineAction::Step { section, id } => {
            let report = session.complete_step(section, &id)?;
            if !report.changed {
                eprintln!("step '{id}' is unknown or already done");
            }
            print_json(&report)?;
        }
        RoutineAction::Complete { section } => {
            let report = session.complete_section(section)?;
            if !report.outcome.is_recorded() {
                eprintln!("{section} routine already completed today");
            }
            print_json(&report)?;
        }
        RoutineAction::Rollover => print_json(&session.opening_rollover())?,
    }
    Ok(())
}
