//! Badges unlocked by streak length, points and profile milestones.

use serde::{Deserialize, Serialize};

use crate::points::Profile;
use crate::progress::GLOW_PRO_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// 7-day streak
    FirstStreak,
    /// 30-day streak
    FullBloom,
    FirstReview,
    FirstPurchase,
    GlowproTier,
    /// 45-day streak
    TopAchiever,
}

impl Achievement {
    pub const ALL: [Achievement; 6] = [
        Achievement::FirstStreak,
        Achievement::FullBloom,
        Achievement::FirstReview,
        Achievement::FirstPurchase,
        Achievement::GlowproTier,
        Achievement::TopAchiever,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Achievement::FirstStreak => "First Streak",
            Achievement::FullBloom => "Full Bloom",
            Achievement::FirstReview => "First Review",
            Achievement::FirstPurchase => "First Purchase",
            Achievement::GlowproTier => "GlowPro Tier",
            Achievement::TopAchiever => "Top Achiever",
        }
    }

    pub fn is_unlocked(&self, streak: u32, profile: &Profile) -> bool {
        match self {
            Achievement::FirstStreak => streak >= 7,
            Achievement::FullBloom => streak >= 30,
            Achievement::FirstReview => profile.products_reviewed > 0,
            Achievement::FirstPurchase => profile.has_first_purchase,
            Achievement::GlowproTier => profile.glow_points() >= GLOW_PRO_THRESHOLD,
            Achievement::TopAchiever => streak >= 45,
        }
    }
}

/// Achievements unlocked for the given current streak and profile.
pub fn unlocked(streak: u32, profile: &Profile) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|a| a.is_unlocked(streak, profile))
        .collect()
}
