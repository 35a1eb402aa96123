use luminique_core::Achievement;
use serde::Serialize;

use super::{print_json, CmdResult, Context};

#[derive(Serialize)]
struct Badge {
    id: Achievement,
    label: &'static str,
    unlocked: bool,
}

pub fn run(ctx: &Context) -> CmdResult {
    let session = ctx.session()?;
    let unlocked = session.achievements();

    let badges: Vec<Badge> = Achievement::ALL
        .into_iter()
        .map(|a| Badge {
            id: a,
            label: a.label(),
            unlocked: unlocked.contains(&a),
        })
        .collect();
    print_json(&badges)
}
