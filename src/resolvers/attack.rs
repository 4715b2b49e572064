//! Seven-step per-attack resolution pipeline.
//!
//! Drives one scheduled action against the working state: true-target
//! redirection, the rank-KO and blindside dominance checks, reaction
//! selection, the defense roll, the counter chain, and post-effects.
//! GROUP actions delegate to the group resolver.

use crate::config::GroupActionConfig;
use crate::counter::resolve_counter_chain;
use crate::defense::resolve_defense;
use crate::energy::add_energy_segments;
use crate::formulas::{self, EnergyEvent};
use crate::model::{
    ActionKind, ActionOutcome, AttackResult, CombatAction, CombatState, DefenseKind,
    ModifierDuration, StatModifier,
};
use crate::paths::PathKind;
use crate::resolvers::group::resolve_group;
use crate::rng::RollSource;

/// Resolve one action against the state, returning the next state and the
/// outcome entries it produced. The input state is untouched.
pub fn resolve_per_attack(
    state: &CombatState,
    action: &CombatAction,
    rolls: &mut dyn RollSource,
) -> (CombatState, Vec<ActionOutcome>) {
    match action {
        CombatAction::Group { actor, target } => resolve_group(
            state,
            actor,
            target,
            &GroupActionConfig::default(),
            rolls,
        ),
        CombatAction::Defend { actor, .. } => resolve_defend(state, actor),
        CombatAction::Evade { actor } => resolve_evade(state, actor),
        CombatAction::Attack { actor, target } => {
            resolve_strike(state, actor, target, None, rolls)
        }
        CombatAction::Special {
            actor,
            target,
            segments,
        } => resolve_strike(state, actor, target, Some(*segments), rolls),
    }
}

/// DEFEND has no damage step of its own: the declaration serves as the
/// intercept target for the redirect scan, and resolving its queue slot
/// grants the defender reaction-success energy.
fn resolve_defend(state: &CombatState, actor: &str) -> (CombatState, Vec<ActionOutcome>) {
    let mut working = state.clone();
    let Some(defender) = working.combatant_mut(actor) else {
        return (working, Vec::new());
    };
    if defender.is_ko {
        return (working, Vec::new());
    }
    add_energy_segments(defender, EnergyEvent::ReactionSuccess);
    (
        working,
        vec![ActionOutcome {
            actor_id: actor.to_string(),
            kind: ActionKind::Defend,
            attack: None,
        }],
    )
}

fn resolve_evade(state: &CombatState, actor: &str) -> (CombatState, Vec<ActionOutcome>) {
    let mut working = state.clone();
    let Some(evader) = working.combatant_mut(actor) else {
        return (working, Vec::new());
    };
    if evader.is_ko {
        return (working, Vec::new());
    }
    let regen = formulas::evade_regen(evader.max_stamina);
    evader.heal(regen);
    add_energy_segments(evader, EnergyEvent::ReactionSuccess);
    (
        working,
        vec![ActionOutcome {
            actor_id: actor.to_string(),
            kind: ActionKind::Evade,
            attack: None,
        }],
    )
}

fn resolve_strike(
    state: &CombatState,
    actor: &str,
    declared_target: &str,
    special_segments: Option<f64>,
    rolls: &mut dyn RollSource,
) -> (CombatState, Vec<ActionOutcome>) {
    let mut working = state.clone();
    let kind = if special_segments.is_some() {
        ActionKind::Special
    } else {
        ActionKind::Attack
    };

    let Some(attacker) = working.combatant(actor) else {
        return (working, Vec::new());
    };
    if attacker.is_ko {
        return (working, Vec::new());
    }
    let attacker_rank = attacker.rank;
    let attacker_speed = attacker.effective_speed();
    let attacker_power = attacker.effective_power();
    let attacker_path = attacker.path;

    // 1. True-target resolution: a DEFEND declared on this target pulls the
    //    hit onto the defender. The guard holds for the whole round, since
    //    DEFEND sorts ahead of the attacks it intercepts.
    let target_id = redirect_target(&working, declared_target);

    let Some(target) = working.combatant(&target_id) else {
        return (working, Vec::new());
    };

    // A target dropped earlier in the round still yields a zero-damage
    // record; the attacker swung at a body already down.
    if target.is_ko {
        spend_special_segments(&mut working, actor, special_segments);
        gain(&mut working, actor, EnergyEvent::ActionFailure);
        let outcome = ActionOutcome {
            actor_id: actor.to_string(),
            kind,
            attack: Some(AttackResult {
                target_id,
                damage: 0.0,
                defense: DefenseKind::Defenseless,
                defense_success: false,
                rank_ko: false,
                blindside: false,
                crushing_blow: false,
                counter_chain: false,
            }),
        };
        return (working, vec![outcome]);
    }
    let target_rank = target.rank;
    let target_speed = target.effective_speed();
    let target_power = target.effective_power();

    // 2. Rank-KO: enough dominance ends the exchange outright. Steps 5-7
    //    then apply only energy updates.
    if formulas::rank_ko_eligible(attacker_rank, target_rank) {
        let threshold = formulas::rank_ko_threshold(attacker_rank, target_rank);
        if formulas::threshold_check(rolls.roll(), threshold) {
            spend_special_segments(&mut working, actor, special_segments);
            let removed = working
                .combatant_mut(&target_id)
                .expect("target was found standing above")
                .knock_out();
            gain(&mut working, actor, EnergyEvent::ActionSuccess);
            let outcome = ActionOutcome {
                actor_id: actor.to_string(),
                kind,
                attack: Some(AttackResult {
                    target_id,
                    damage: removed,
                    defense: DefenseKind::Defenseless,
                    defense_success: false,
                    rank_ko: true,
                    blindside: false,
                    crushing_blow: false,
                    counter_chain: false,
                }),
            };
            return (working, vec![outcome]);
        }
    }

    // 3. Blindside: outpace the target enough and it cannot react.
    let mut blindsided = false;
    if formulas::blindside_eligible(attacker_speed, target_speed) {
        let threshold = formulas::blindside_threshold(attacker_speed, target_speed);
        blindsided = formulas::threshold_check(rolls.roll(), threshold);
    }

    // 4. Reaction selection.
    let target = working
        .combatant(&target_id)
        .expect("target was found standing above");
    let defense_kind = if blindsided {
        DefenseKind::Defenseless
    } else if kind == ActionKind::Special {
        attacker_path.profile().special_forces
    } else {
        choose_reaction(target)
    };

    // 5. Defense roll and damage.
    let segments_spent = spend_special_segments(&mut working, actor, special_segments);
    let mut raw = formulas::base_damage(attacker_power, target_power, 0.0);
    if kind == ActionKind::Special {
        raw = formulas::special_damage(raw, segments_spent);
    }

    let target = working
        .combatant(&target_id)
        .expect("target was found standing above");
    let defense = resolve_defense(target, defense_kind, rolls.roll());
    let final_damage = raw * defense.damage_multiplier;

    let mut crushing_blow = false;
    if defense.crushing_blow_eligible
        && formulas::crushing_blow_eligible(attacker_power, target_power)
    {
        let threshold = formulas::crushing_blow_threshold(attacker_power, target_power);
        crushing_blow = formulas::threshold_check(rolls.roll(), threshold);
    }

    working
        .combatant_mut(&target_id)
        .expect("target was found standing above")
        .apply_damage(final_damage);

    // 6. Counter chain on a successful Parry.
    let mut chain_outcomes = Vec::new();
    if defense.triggers_counter {
        let chain = resolve_counter_chain(&mut working, actor, &target_id, rolls);
        chain_outcomes = chain.outcomes;
    }

    // 7. Post-effects: energy for both sides, then the elemental buff or
    //    debuff for this round.
    gain(
        &mut working,
        actor,
        if defense.success {
            EnergyEvent::ActionFailure
        } else {
            EnergyEvent::ActionSuccess
        },
    );
    gain(
        &mut working,
        &target_id,
        if defense.success {
            EnergyEvent::ReactionSuccess
        } else {
            EnergyEvent::ReactionFailure
        },
    );
    apply_path_effects(&mut working, actor, &target_id);

    let mut outcomes = vec![ActionOutcome {
        actor_id: actor.to_string(),
        kind,
        attack: Some(AttackResult {
            target_id,
            damage: final_damage,
            defense: defense.kind,
            defense_success: defense.success,
            rank_ko: false,
            blindside: blindsided,
            crushing_blow,
            counter_chain: defense.triggers_counter,
        }),
    }];
    outcomes.extend(chain_outcomes);
    (working, outcomes)
}

/// Scan the round's queue for a standing defender guarding this target.
fn redirect_target(state: &CombatState, declared_target: &str) -> String {
    for queued in &state.queue {
        if let CombatAction::Defend { actor, target } = queued {
            if target == declared_target {
                if let Some(defender) = state.combatant(actor) {
                    if !defender.is_ko {
                        return actor.clone();
                    }
                }
            }
        }
    }
    declared_target.to_string()
}

/// Archetype reaction policy: a profile may pin a fixed defense; the
/// default takes the highest effective success rate, Block over Dodge over
/// Parry on exact ties.
fn choose_reaction(target: &crate::model::Combatant) -> DefenseKind {
    if let Some(profile) = crate::ai::profiles::profile_for(&target.archetype) {
        if let Some(pinned) = profile.reaction {
            return pinned;
        }
    }
    let mut best = DefenseKind::Block;
    let mut best_rate = target.effective_rate(DefenseKind::Block);
    for kind in [DefenseKind::Dodge, DefenseKind::Parry] {
        let rate = target.effective_rate(kind);
        if rate > best_rate {
            best = kind;
            best_rate = rate;
        }
    }
    best
}

/// Deduct the declared SPECIAL spend, capped at what the declarer holds.
/// Returns the segments actually spent.
fn spend_special_segments(
    state: &mut CombatState,
    actor: &str,
    declared: Option<f64>,
) -> f64 {
    let Some(declared) = declared else {
        return 0.0;
    };
    let Some(attacker) = state.combatant_mut(actor) else {
        return 0.0;
    };
    let spend = declared.max(0.0).min(attacker.energy);
    attacker.energy -= spend;
    spend
}

fn gain(state: &mut CombatState, id: &str, event: EnergyEvent) {
    if let Some(combatant) = state.combatant_mut(id) {
        add_energy_segments(combatant, event);
    }
}

/// Reaction paths buff the attacker's own affine defense; action paths
/// debuff the target's. Both live for the current round only.
fn apply_path_effects(state: &mut CombatState, attacker_id: &str, target_id: &str) {
    let Some(attacker) = state.combatant(attacker_id) else {
        return;
    };
    let path = attacker.path;
    let stat = path.boost_stat();
    let source = format!("path:{:?}", path).to_lowercase();
    match path.kind() {
        PathKind::Reaction => {
            if let Some(attacker) = state.combatant_mut(attacker_id) {
                attacker.modifiers.push(StatModifier {
                    stat,
                    amount: crate::config::PATH_MODIFIER_MAGNITUDE,
                    source,
                    duration: ModifierDuration::Round,
                });
            }
        }
        PathKind::Action => {
            if let Some(target) = state.combatant_mut(target_id) {
                target.modifiers.push(StatModifier {
                    stat,
                    amount: -crate::config::PATH_MODIFIER_MAGNITUDE,
                    source,
                    duration: ModifierDuration::Round,
                });
            }
        }
    }
}
