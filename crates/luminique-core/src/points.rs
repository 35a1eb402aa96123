//! Glow points ledger and the user's reward profile.
//!
//! [`Profile::award`] is the only writer of the point balance and it
//! re-derives the tier in the same call, so a profile never carries a tier
//! that disagrees with its points. Bonus eligibility is decided by the
//! caller; the ledger just sums what it is given.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::progress::{NextTierInfo, Tier};

/// Points and reward counters for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProfileRecord")]
pub struct Profile {
    glow_points: u64,
    tier: Tier,
    pub total_routines_completed: u32,
    pub products_reviewed: u32,
    pub has_first_purchase: bool,
}

/// Wire shape of [`Profile`]; the tier is recomputed on the way in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ProfileRecord {
    glow_points: u64,
    total_routines_completed: u32,
    products_reviewed: u32,
    has_first_purchase: bool,
}

impl From<ProfileRecord> for Profile {
    fn from(record: ProfileRecord) -> Self {
        Self {
            glow_points: record.glow_points,
            tier: Tier::classify(record.glow_points),
            total_routines_completed: record.total_routines_completed,
            products_reviewed: record.products_reviewed,
            has_first_purchase: record.has_first_purchase,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        ProfileRecord::default().into()
    }
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn glow_points(&self) -> u64 {
        self.glow_points
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn next_tier(&self) -> NextTierInfo {
        NextTierInfo::for_points(self.glow_points)
    }

    /// Add `amount` points and re-derive the tier. Returns the new balance.
    pub fn award(&mut self, amount: u64) -> u64 {
        let glow_points = self.glow_points.saturating_add(amount);
        let tier = Tier::classify(glow_points);
        if tier != self.tier {
            tracing::info!(from = %self.tier, to = %tier, points = glow_points, "tier changed");
        }
        self.glow_points = glow_points;
        self.tier = tier;
        glow_points
    }
}

/// Reward actions with a configured point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsAction {
    MorningRoutine,
    EveningRoutine,
    BothRoutinesBonus,
    SevenDayStreak,
    WriteReview,
    FirstPurchase,
}

impl PointsAction {
    pub const ALL: [PointsAction; 6] = [
        PointsAction::MorningRoutine,
        PointsAction::EveningRoutine,
        PointsAction::BothRoutinesBonus,
        PointsAction::SevenDayStreak,
        PointsAction::WriteReview,
        PointsAction::FirstPurchase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PointsAction::MorningRoutine => "morning_routine",
            PointsAction::EveningRoutine => "evening_routine",
            PointsAction::BothRoutinesBonus => "both_routines_bonus",
            PointsAction::SevenDayStreak => "seven_day_streak",
            PointsAction::WriteReview => "write_review",
            PointsAction::FirstPurchase => "first_purchase",
        }
    }
}

impl fmt::Display for PointsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PointsAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PointsAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "action".to_string(),
                message: format!("unknown points action '{s}'"),
            })
    }
}

/// Point value of each reward action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsTable {
    #[serde(default = "default_routine_points")]
    pub morning_routine: u64,
    #[serde(default = "default_routine_points")]
    pub evening_routine: u64,
    #[serde(default = "default_both_bonus")]
    pub both_routines_bonus: u64,
    #[serde(default = "default_seven_day_streak")]
    pub seven_day_streak: u64,
    #[serde(default = "default_write_review")]
    pub write_review: u64,
    #[serde(default = "default_first_purchase")]
    pub first_purchase: u64,
}

fn default_routine_points() -> u64 {
    10
}
fn default_both_bonus() -> u64 {
    5
}
fn default_seven_day_streak() -> u64 {
    50
}
fn default_write_review() -> u64 {
    15
}
fn default_first_purchase() -> u64 {
    25
}

impl Default for PointsTable {
    fn default() -> Self {
        Self {
            morning_routine: default_routine_points(),
            evening_routine: default_routine_points(),
            both_routines_bonus: default_both_bonus(),
            seven_day_streak: default_seven_day_streak(),
            write_review: default_write_review(),
            first_purchase: default_first_purchase(),
        }
    }
}

impl PointsTable {
    pub fn amount(&self, action: PointsAction) -> u64 {
        match action {
            PointsAction::MorningRoutine => self.morning_routine,
            PointsAction::EveningRoutine => self.evening_routine,
            PointsAction::BothRoutinesBonus => self.both_routines_bonus,
            PointsAction::SevenDayStreak => self.seven_day_streak,
            PointsAction::WriteReview => self.write_review,
            PointsAction::FirstPurchase => self.first_purchase,
        }
    }

    /// Look up an action by name; unknown names are worth nothing.
    pub fn amount_for(&self, action: &str) -> u64 {
        action
            .parse::<PointsAction>()
            .map(|a| self.amount(a))
            .unwrap_or(0)
    }
}
