//! Engine constants and host-supplied configuration records.

use crate::model::ActionKind;
use serde::{Deserialize, Serialize};

/// Accumulated-segment thresholds for ascension levels 1..=3.
pub const ASCENSION_THRESHOLDS: [f64; 3] = [35.0, 95.0, 180.0];

/// Segments a combatant starts a combat with, indexed by ascension level.
pub const ASCENSION_STARTING_SEGMENTS: [f64; 4] = [0.0, 0.0, 1.0, 2.0];

/// Energy accumulation bonus per ascension level.
pub const ASCENSION_ACCUMULATION_BONUS: [f64; 4] = [0.0, 0.25, 0.25, 0.50];

/// Floor for a freshly spawned combatant's energy capacity.
pub const MIN_MAX_ENERGY: f64 = 3.0;

/// Hard cap on counter-chain iterations.
pub const COUNTER_CHAIN_CAP: usize = 10;

/// Fraction of max stamina restored by EVADE.
pub const EVADE_REGEN_RATIO: f64 = 0.30;

/// Per-segment damage bonus of SPECIAL.
pub const SPECIAL_SEGMENT_BONUS: f64 = 0.10;

/// Magnitude of an elemental path buff or debuff on a success rate.
pub const PATH_MODIFIER_MAGNITUDE: f64 = 0.10;

/// Scheduling priority per action kind. Lower sorts earlier.
pub fn action_priority(kind: ActionKind) -> u8 {
    match kind {
        ActionKind::Group => 0,
        ActionKind::Defend => 1,
        ActionKind::Attack => 2,
        ActionKind::Special => 2,
        ActionKind::Evade => 3,
    }
}

/// Energy requirement a GROUP declaration must meet across the party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyRequirement {
    Full,
}

/// Tuning for the coordinated team strike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupActionConfig {
    pub damage_multiplier: f64,
    pub energy_requirement: EnergyRequirement,
}

impl Default for GroupActionConfig {
    fn default() -> Self {
        GroupActionConfig {
            damage_multiplier: 1.5,
            energy_requirement: EnergyRequirement::Full,
        }
    }
}

/// Options the host hands the AI evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatorConfig {
    pub group_actions_enabled: bool,
}
