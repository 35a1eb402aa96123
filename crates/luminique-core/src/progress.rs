//! Display state derived from streaks and points.
//!
//! Both mappings are pure. Tier derivation lives only here so the points
//! ledger and every reader agree on the same thresholds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the GlowUp tier.
pub const GLOW_UP_THRESHOLD: u64 = 500;
/// Lower bound (inclusive) of the GlowPro tier.
pub const GLOW_PRO_THRESHOLD: u64 = 1500;

/// Visual growth stage driven by the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthState {
    Seed,
    Bud,
    Bloom,
    /// A bud or bloom whose streak was lost.
    Withered,
}

impl GrowthState {
    /// Classify `streak`, given the streak that preceded it.
    pub fn from_streak(streak: u32, previous_streak: u32) -> Self {
        if streak == 0 && previous_streak > 2 {
            return GrowthState::Withered;
        }
        match streak {
            0..=2 => GrowthState::Seed,
            3..=6 => GrowthState::Bud,
            _ => GrowthState::Bloom,
        }
    }
}

impl fmt::Display for GrowthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GrowthState::Seed => "seed",
            GrowthState::Bud => "bud",
            GrowthState::Bloom => "bloom",
            GrowthState::Withered => "withered",
        };
        f.write_str(name)
    }
}

/// Reward tier derived from cumulative glow points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Tier {
    #[default]
    Starter,
    GlowUp,
    GlowPro,
}

impl Tier {
    /// Tier for a point total. Lower bounds inclusive, upper exclusive.
    pub fn classify(points: u64) -> Self {
        if points >= GLOW_PRO_THRESHOLD {
            Tier::GlowPro
        } else if points >= GLOW_UP_THRESHOLD {
            Tier::GlowUp
        } else {
            Tier::Starter
        }
    }

    /// Points needed to enter this tier.
    pub fn threshold(&self) -> u64 {
        match self {
            Tier::Starter => 0,
            Tier::GlowUp => GLOW_UP_THRESHOLD,
            Tier::GlowPro => GLOW_PRO_THRESHOLD,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Starter => "Starter",
            Tier::GlowUp => "GlowUp",
            Tier::GlowPro => "GlowPro",
        };
        f.write_str(name)
    }
}

/// Progress toward the next tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NextTierInfo {
    pub name: Tier,
    pub threshold: u64,
    /// Percentage in `[0, 100]`.
    pub progress: f64,
    /// Points still needed; zero once the top tier is reached.
    pub points_remaining: u64,
}

impl NextTierInfo {
    pub fn for_points(points: u64) -> Self {
        let (name, threshold, progress) = if points < GLOW_UP_THRESHOLD {
            (
                Tier::GlowUp,
                GLOW_UP_THRESHOLD,
                points as f64 / GLOW_UP_THRESHOLD as f64 * 100.0,
            )
        } else if points < GLOW_PRO_THRESHOLD {
            let span = (GLOW_PRO_THRESHOLD - GLOW_UP_THRESHOLD) as f64;
            (
                Tier::GlowPro,
                GLOW_PRO_THRESHOLD,
                (points - GLOW_UP_THRESHOLD) as f64 / span * 100.0,
            )
        } else {
            (Tier::GlowPro, GLOW_PRO_THRESHOLD, 100.0)
        };

        Self {
            name,
            threshold,
            progress,
            points_remaining: threshold.saturating_sub(points),
        }
    }
}
