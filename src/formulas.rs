//! Pure numeric contracts of the combat system.
//!
//! Roll inputs are plain numbers in [0, 20]; production draws them from a
//! `RollSource`, tests pass fixed values. Degenerate divisors
//! (`target_speed = 0`, `target_power = 0`) follow IEEE-754: the ratio
//! becomes `+inf`, so an eligible check always succeeds. Feeding a zero
//! stat is a configuration defect, not an engine error.

use crate::config;

/// Dominance margin for an outright KO. Positive only when the attacker
/// outranks the target.
pub fn rank_ko_threshold(attacker_rank: f64, target_rank: f64) -> f64 {
    ((attacker_rank - target_rank) * 3.0) / 10.0
}

/// Rank-KO requires outranking the target by at least half a tier.
pub fn rank_ko_eligible(attacker_rank: f64, target_rank: f64) -> bool {
    attacker_rank - target_rank >= 0.5
}

pub fn blindside_threshold(attacker_speed: f64, target_speed: f64) -> f64 {
    (attacker_speed - target_speed) / target_speed
}

pub fn blindside_eligible(attacker_speed: f64, target_speed: f64) -> bool {
    attacker_speed > target_speed
}

pub fn crushing_blow_threshold(action_power: f64, target_power: f64) -> f64 {
    (action_power - target_power) / target_power
}

pub fn crushing_blow_eligible(action_power: f64, target_power: f64) -> bool {
    action_power > target_power
}

/// Shared success test for the dominance checks: the normalized roll must
/// clear the complement of the threshold.
pub fn threshold_check(roll: f64, threshold: f64) -> bool {
    roll / 20.0 >= 1.0 - threshold
}

/// Base damage shared by ATTACK, SPECIAL, and each GROUP contribution.
pub fn base_damage(attacker_power: f64, target_power: f64, modifier: f64) -> f64 {
    attacker_power * (attacker_power / target_power) + modifier
}

/// SPECIAL scales its base damage by the segments spent.
pub fn special_damage(base: f64, segments_spent: f64) -> f64 {
    base * (1.0 + config::SPECIAL_SEGMENT_BONUS * segments_spent)
}

/// Stamina returned by EVADE.
pub fn evade_regen(max_stamina: f64) -> f64 {
    max_stamina * config::EVADE_REGEN_RATIO
}

/// Energy-generating events, split by initiative and outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyEvent {
    ActionSuccess,
    ActionFailure,
    ReactionSuccess,
    ReactionFailure,
}

/// Segments gained for an event at the given ascension level.
pub fn energy_gain(event: EnergyEvent, ascension_level: u8) -> f64 {
    let base = match event {
        EnergyEvent::ActionSuccess => 1.0,
        EnergyEvent::ActionFailure => 0.5,
        EnergyEvent::ReactionSuccess => 0.5,
        EnergyEvent::ReactionFailure => 0.25,
    };
    let level = (ascension_level as usize).min(config::ASCENSION_ACCUMULATION_BONUS.len() - 1);
    base * (1.0 + config::ASCENSION_ACCUMULATION_BONUS[level])
}

/// Ascension level implied by a career segment total.
pub fn ascension_level_for(total_energy: f64) -> u8 {
    let mut level = 0u8;
    for threshold in config::ASCENSION_THRESHOLDS {
        if total_energy >= threshold {
            level += 1;
        }
    }
    level
}
