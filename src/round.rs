//! Five-phase round orchestrator.
//!
//! Phase 1 lets the enemy AI declare, Phase 2 derives the public visual
//! payload, Phase 3 validates player declarations (substituting fallbacks
//! and conscripting allies into an accepted GROUP), Phase 4 merges and
//! sorts the queue, Phase 5 drives every action through the per-attack
//! pipeline. Post-round bookkeeping recomputes status, sweeps round-scoped
//! modifiers, and appends the round record.

use crate::ai::{self, EvaluateError};
use crate::config::EvaluatorConfig;
use crate::model::{
    ActionKind, ActionOutcome, CombatAction, CombatState, RoundPhase, RoundResult,
};
use crate::rng::RollSource;
use crate::scheduler::sort_by_priority;
use crate::validation::{validate_declaration, ValidationResult};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Public per-round payload for the presentation layer. Enemy decisions
/// are deliberately absent; only player-declared targeting is exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualInfo {
    pub round: u32,
    pub combatants: Vec<CombatantVisual>,
    pub declared_targeting: Vec<DeclaredTargeting>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantVisual {
    pub id: String,
    pub name: String,
    pub stamina: f64,
    pub max_stamina: f64,
    pub is_ko: bool,
    pub ascension_level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredTargeting {
    pub actor_id: String,
    pub kind: ActionKind,
    pub target_id: Option<String>,
}

/// Derive the round's public payload from state plus the submitted player
/// declarations. Pure; the payload is caller-owned and never stored.
pub fn build_visual_info(state: &CombatState, declarations: &[CombatAction]) -> VisualInfo {
    let combatants = state
        .players
        .iter()
        .chain(state.enemies.iter())
        .map(|c| CombatantVisual {
            id: c.id.clone(),
            name: c.name.clone(),
            stamina: c.stamina,
            max_stamina: c.max_stamina,
            is_ko: c.is_ko,
            ascension_level: c.ascension_level,
        })
        .collect();
    let declared_targeting = declarations
        .iter()
        .map(|a| DeclaredTargeting {
            actor_id: a.actor().to_string(),
            kind: a.kind(),
            target_id: a.target().map(str::to_string),
        })
        .collect();
    VisualInfo {
        round: state.round,
        combatants,
        declared_targeting,
    }
}

/// Resolve one full round. The input state is untouched; the returned
/// state carries the incremented round counter, the appended round record,
/// and a possibly terminal status.
pub fn run_round(
    state: &CombatState,
    player_declarations: &[CombatAction],
    rolls: &mut dyn RollSource,
) -> CombatState {
    let mut working = state.clone();
    working.queue.clear();

    // Phase 1: enemy declarations. AI decisions accumulate on the queue so
    // later evaluations can see their allies' targeting.
    working.phase = RoundPhase::EnemyPlanning;
    let evaluator_config = EvaluatorConfig {
        group_actions_enabled: true,
    };
    let enemy_ids: Vec<String> = working
        .enemies
        .iter()
        .filter(|c| !c.is_ko)
        .map(|c| c.id.clone())
        .collect();
    for id in enemy_ids {
        let combatant = working
            .combatant(&id)
            .expect("enemy id was just read from the roster");
        let action = match ai::evaluate(combatant, &working, &evaluator_config) {
            Ok(action) => Some(action),
            Err(EvaluateError::UnknownArchetype(tag)) => {
                warn!("no profile for archetype '{}', using stub attacker", tag);
                stub_attack(&working, &id)
            }
        };
        if let Some(action) = action {
            working.queue.push(action);
        }
    }
    // A GROUP declaration overrides its participants' own plans, on the
    // enemy side no differently than for players.
    if let Some(group) = working
        .queue
        .iter()
        .find(|a| a.kind() == ActionKind::Group)
        .cloned()
    {
        let leader = group.actor().to_string();
        working
            .queue
            .retain(|a| a.actor() == leader && a.kind() == ActionKind::Group);
        working.queue.truncate(1);
    }

    // Phase 2: the public payload, derived and handed out-of-band. Hosts
    // call `build_visual_info` themselves; the engine only traces it.
    working.phase = RoundPhase::Presentation;
    let visual = build_visual_info(&working, player_declarations);
    debug!(
        "round {}: visual payload covers {} combatants, {} declarations",
        visual.round,
        visual.combatants.len(),
        visual.declared_targeting.len()
    );

    // Phase 3: validate player declarations, substitute fallbacks, drop
    // the rest, then conscript allies into an accepted GROUP.
    working.phase = RoundPhase::Validation;
    let mut player_actions: Vec<CombatAction> = Vec::new();
    for declaration in player_declarations {
        match validate_declaration(&working, declaration) {
            ValidationResult::Valid => player_actions.push(declaration.clone()),
            ValidationResult::Invalid { error, fallback } => match fallback {
                Some(substitute) => {
                    debug!("declaration rejected ({error}), substituting fallback");
                    player_actions.push(substitute);
                }
                None => warn!("declaration dropped: {error}"),
            },
        }
    }
    if let Some(group) = player_actions
        .iter()
        .find(|a| a.kind() == ActionKind::Group)
        .cloned()
    {
        let leader = group.actor().to_string();
        player_actions.retain(|a| a.actor() == leader && a.kind() == ActionKind::Group);
        player_actions.truncate(1);
        debug!("group strike accepted: allies conscripted behind '{leader}'");
    }

    // Phase 4: merge and sort.
    working.phase = RoundPhase::Scheduling;
    let mut merged = std::mem::take(&mut working.queue);
    merged.extend(player_actions);
    working.queue = sort_by_priority(merged, &working, rolls);

    // Phase 5: resolve in order. The full sorted queue stays visible to
    // the pipeline for the DEFEND intercept scan.
    working.phase = RoundPhase::Resolution;
    let schedule = working.queue.clone();
    let mut outcomes: Vec<ActionOutcome> = Vec::new();
    for action in &schedule {
        let (next, mut produced) =
            crate::resolvers::resolve_per_attack(&working, action, rolls);
        working = next;
        outcomes.append(&mut produced);
    }

    // Post-round bookkeeping.
    for combatant in working
        .players
        .iter_mut()
        .chain(working.enemies.iter_mut())
    {
        combatant.clear_round_modifiers();
    }
    working.recompute_status();
    let finished_round = working.round;
    working.round += 1;
    working.phase = RoundPhase::EnemyPlanning;
    working.queue.clear();

    let mut snapshot = working.clone();
    snapshot.history.clear();
    working.history.push(RoundResult {
        round: finished_round,
        outcomes,
        snapshot,
    });
    working
}

/// Fallback for combatants without an archetype profile: attack the first
/// standing opponent.
fn stub_attack(state: &CombatState, actor: &str) -> Option<CombatAction> {
    state
        .opponents_of(actor)
        .into_iter()
        .find(|c| !c.is_ko)
        .map(|target| CombatAction::Attack {
            actor: actor.to_string(),
            target: target.id.clone(),
        })
}
