use clap::Subcommand;
use serde::Serialize;

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum PointsAction {
    /// Balance, tier and progress to the next tier
    Show,
    /// Add points to the balance
    Award {
        /// Number of points
        amount: u64,
    },
    /// Record a product review
    Review,
    /// Record the first purchase (awarded once)
    Purchase,
}

#[derive(Serialize)]
struct Award {
    awarded: u64,
    glow_points: u64,
    tier: luminique_core::Tier,
}

pub fn run(ctx: &Context, action: PointsAction) -> CmdResult {
    let mut session = ctx.session()?;

    let before = session.profile().glow_points();
    match action {
        PointsAction::Show => {
            let profile = session.profile();
            print_json(&serde_json::json!({
                "glow_points": profile.glow_points(),
                "tier": profile.tier(),
                "next_tier": session.next_tier(),
                "total_routines_completed": profile.total_routines_completed,
                "products_reviewed": profile.products_reviewed,
                "has_first_purchase": profile.has_first_purchase,
            }))?;
            return Ok(());
        }
        PointsAction::Award { amount } => {
            session.award(amount)?;
        }
        PointsAction::Review => {
            session.record_review()?;
        }
        PointsAction::Purchase => {
            session.record_first_purchase()?;
        }
    }

    let profile = session.profile();
    print_json(&Award {
        awarded: profile.glow_points() - before,
        glow_points: profile.glow_points(),
        tier: profile.tier(),
    })
}
