//! Counter-chain engine.
//!
//! A successful Parry turns the tables: the parrier strikes back and the
//! original attacker must parry in turn. The exchange iterates with roles
//! swapping on every successful Parry, and terminates on a failed Parry
//! (failure damage lands), a KO, or the safety cap.

use crate::config;
use crate::defense::resolve_defense;
use crate::formulas;
use crate::model::{
    ActionKind, ActionOutcome, AttackResult, CombatState, DefenseKind,
};
use crate::rng::RollSource;

#[derive(Debug, Clone, PartialEq)]
pub struct CounterChainResult {
    pub iterations: usize,
    pub outcomes: Vec<ActionOutcome>,
}

/// Run the chain to completion on the working state. The parrier opens as
/// the chain's attacker; the original attacker defends first. Zero
/// iterations (an already-settled pairing) leaves the state untouched.
pub fn resolve_counter_chain(
    state: &mut CombatState,
    original_attacker: &str,
    parrier: &str,
    rolls: &mut dyn RollSource,
) -> CounterChainResult {
    let mut attacker_id = parrier.to_string();
    let mut target_id = original_attacker.to_string();
    let mut outcomes = Vec::new();
    let mut iterations = 0;

    while iterations < config::COUNTER_CHAIN_CAP {
        let (Some(attacker), Some(target)) =
            (state.combatant(&attacker_id), state.combatant(&target_id))
        else {
            break;
        };
        if attacker.is_ko || target.is_ko {
            break;
        }

        let attacker_power = attacker.effective_power();
        let target_power = target.effective_power();
        let outcome = resolve_defense(target, DefenseKind::Parry, rolls.roll());
        iterations += 1;

        if outcome.success {
            outcomes.push(chain_entry(&attacker_id, &target_id, 0.0, true));
            std::mem::swap(&mut attacker_id, &mut target_id);
            continue;
        }

        let damage =
            formulas::base_damage(attacker_power, target_power, 0.0) * outcome.damage_multiplier;
        let target = state
            .combatant_mut(&target_id)
            .expect("chain target was found standing this iteration");
        target.apply_damage(damage);
        outcomes.push(chain_entry(&attacker_id, &target_id, damage, false));
        break;
    }

    CounterChainResult {
        iterations,
        outcomes,
    }
}

fn chain_entry(attacker_id: &str, target_id: &str, damage: f64, success: bool) -> ActionOutcome {
    ActionOutcome {
        actor_id: attacker_id.to_string(),
        kind: ActionKind::Attack,
        attack: Some(AttackResult {
            target_id: target_id.to_string(),
            damage,
            defense: DefenseKind::Parry,
            defense_success: success,
            rank_ko: false,
            blindside: false,
            crushing_blow: false,
            counter_chain: true,
        }),
    }
}
