//! Defense resolver.
//!
//! Maps a defense choice and a roll to an outcome. Success predicate is
//! `roll <= effective_rate * 20`; Defenseless ignores the roll entirely.

use crate::model::{Combatant, DefenseKind};

/// Discriminated outcome of one defense roll. `damage_multiplier` is
/// final damage over raw damage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefenseOutcome {
    pub kind: DefenseKind,
    pub success: bool,
    pub damage_multiplier: f64,
    /// Block leaves the attacker eligible for a crushing-blow roll.
    pub crushing_blow_eligible: bool,
    /// A successful Parry triggers the counter chain.
    pub triggers_counter: bool,
}

pub fn resolve_defense(target: &Combatant, kind: DefenseKind, roll: f64) -> DefenseOutcome {
    let Some(skill) = target.defenses.get(kind) else {
        return DefenseOutcome {
            kind: DefenseKind::Defenseless,
            success: false,
            damage_multiplier: 1.0,
            crushing_blow_eligible: false,
            triggers_counter: false,
        };
    };

    let success = roll <= target.effective_rate(kind) * 20.0;
    let multiplier = if success {
        match kind {
            DefenseKind::Block => 1.0 - skill.success_mitigation,
            _ => 0.0,
        }
    } else {
        1.0 - skill.failure_mitigation
    };

    DefenseOutcome {
        kind,
        success,
        damage_multiplier: multiplier,
        crushing_blow_eligible: kind == DefenseKind::Block,
        triggers_counter: kind == DefenseKind::Parry && success,
    }
}
