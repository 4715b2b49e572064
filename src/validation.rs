//! Declaration validator.
//!
//! Checks run in a fixed order and the first failure is returned. A GROUP
//! declaration that fails only its energy gate carries a fallback ATTACK on
//! the same target so the orchestrator can substitute instead of dropping.

use crate::model::{CombatAction, CombatState, Side};

/// Outcome of validating one declaration. Never an error type: rejection
/// is a value the orchestrator acts on.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid,
    Invalid {
        error: String,
        fallback: Option<CombatAction>,
    },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

fn invalid(error: impl Into<String>) -> ValidationResult {
    ValidationResult::Invalid {
        error: error.into(),
        fallback: None,
    }
}

pub fn validate_declaration(state: &CombatState, action: &CombatAction) -> ValidationResult {
    // 1. Declarer exists and is standing.
    let Some(declarer) = state.combatant(action.actor()) else {
        return invalid(format!("unknown declarer '{}'", action.actor()));
    };
    if declarer.is_ko {
        return invalid(format!("'{}' is knocked out", declarer.id));
    }
    let declarer_side = state
        .side_of(&declarer.id)
        .expect("declarer was just found in a party");

    // 2. Target rules per action kind. (The action tag itself is statically
    //    one of the five variants.)
    match action {
        CombatAction::Attack { target, .. } | CombatAction::Special { target, .. } => {
            if !is_standing_member(state, target, declarer_side.opposing()) {
                return invalid(format!("'{target}' is not a standing opponent"));
            }
        }
        CombatAction::Defend { target, .. } => {
            if !is_standing_member(state, target, declarer_side) {
                return invalid(format!("'{target}' is not a standing ally"));
            }
        }
        CombatAction::Evade { .. } => {}
        CombatAction::Group { actor, target } => {
            if !is_standing_member(state, target, declarer_side.opposing()) {
                return invalid(format!("'{target}' is not a standing opponent"));
            }
            let party = state.party(declarer_side);
            let short_of_energy = party
                .iter()
                .filter(|c| !c.is_ko)
                .any(|c| c.energy < c.max_energy);
            if short_of_energy {
                return ValidationResult::Invalid {
                    error: "group strike requires full energy across the party".to_string(),
                    fallback: Some(CombatAction::Attack {
                        actor: actor.clone(),
                        target: target.clone(),
                    }),
                };
            }
        }
    }

    // 3. Declarer can still fight.
    if declarer.stamina <= 0.0 {
        return invalid(format!("'{}' has no stamina left", declarer.id));
    }

    // 4. SPECIAL needs segments to burn.
    if matches!(action, CombatAction::Special { .. }) && declarer.energy <= 0.0 {
        return invalid(format!("'{}' has no energy for a special", declarer.id));
    }

    ValidationResult::Valid
}

fn is_standing_member(state: &CombatState, id: &str, side: Side) -> bool {
    state
        .party(side)
        .iter()
        .any(|c| c.id == id && !c.is_ko)
}
