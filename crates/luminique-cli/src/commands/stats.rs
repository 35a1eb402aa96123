use clap::Subcommand;

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Streaks and 30-day completion rates
    Summary,
    /// Activity for the last 7 days
    Week,
}

pub fn run(ctx: &Context, action: StatsAction) -> CmdResult {
    let session = ctx.session()?;
    let stats = session.stats();

    match action {
        StatsAction::Summary => print_json(&stats),
        StatsAction::Week => print_json(&stats.last_7_days),
    }
}
