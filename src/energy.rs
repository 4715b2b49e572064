//! Energy segment accumulation and ascension tracking.
//!
//! Segments held this round are clamped at `max_energy`; the career total
//! accumulates unclamped and drives ascension threshold crossings. Energy
//! carries across rounds within a combat; `reset_round_energy` seeds the
//! starting segments at combat initialization.

use crate::config;
use crate::formulas::{self, EnergyEvent};
use crate::model::Combatant;

/// Credit a combatant for an energy-generating event. KO'd combatants
/// accumulate nothing.
pub fn add_energy_segments(combatant: &mut Combatant, event: EnergyEvent) {
    if combatant.is_ko {
        return;
    }
    let gain = formulas::energy_gain(event, combatant.ascension_level);
    combatant.energy = (combatant.energy + gain).min(combatant.max_energy);
    combatant.total_energy += gain;
    check_ascension_advance(combatant);
}

/// Recompute the ascension level from the career total. Returns true when
/// the level changed.
pub fn check_ascension_advance(combatant: &mut Combatant) -> bool {
    let level = formulas::ascension_level_for(combatant.total_energy);
    if level == combatant.ascension_level {
        return false;
    }
    combatant.ascension_level = level;
    combatant.max_energy =
        config::ASCENSION_STARTING_SEGMENTS[level as usize].max(config::MIN_MAX_ENERGY);
    true
}

/// Seed the held segments from the starting-segment table for the current
/// ascension level.
pub fn reset_round_energy(combatant: &mut Combatant) {
    combatant.energy = config::ASCENSION_STARTING_SEGMENTS[combatant.ascension_level as usize];
}
