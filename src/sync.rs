//! Sync boundary between the host game state and a combat.
//!
//! The host document is opaque to the engine: only its `combatState` slot
//! and journal are touched, and unrecognized fields ride through a
//! flattened map so a persist→load round trip loses nothing.

use crate::energy::reset_round_energy;
use crate::model::{
    CombatState, CombatStatus, Combatant, EncounterConfig, RoundPhase,
};
use log::info;
use serde::{Deserialize, Serialize};

/// Host-side game state. Fields the engine does not know about are kept
/// verbatim in `host_fields`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    #[serde(default)]
    pub combat_state: Option<CombatState>,
    #[serde(default)]
    pub journal: Vec<String>,
    #[serde(flatten)]
    pub host_fields: serde_json::Map<String, serde_json::Value>,
}

/// Terminal result reported back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatResult {
    Victory,
    Defeat,
}

impl std::fmt::Display for CombatResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CombatResult::Victory => write!(f, "victory"),
            CombatResult::Defeat => write!(f, "defeat"),
        }
    }
}

/// Spawn a fresh combat from an encounter config.
pub fn init_combat_state(encounter: &EncounterConfig) -> CombatState {
    info!(
        "initializing combat '{}' ({} vs {})",
        encounter.name,
        encounter.players.len(),
        encounter.enemies.len()
    );
    let spawn = |cfgs: &[crate::model::CombatantConfig]| -> Vec<Combatant> {
        cfgs.iter()
            .map(|cfg| {
                let mut combatant = Combatant::from_config(cfg);
                reset_round_energy(&mut combatant);
                combatant
            })
            .collect()
    };
    CombatState {
        round: 1,
        phase: RoundPhase::EnemyPlanning,
        players: spawn(&encounter.players),
        enemies: spawn(&encounter.enemies),
        queue: Vec::new(),
        history: Vec::new(),
        status: CombatStatus::Active,
    }
}

/// Return a new host state with the combat slot replaced; every other
/// host field rides through unchanged.
pub fn sync_to_game_state(host: &GameState, combat: &CombatState) -> GameState {
    let mut next = host.clone();
    next.combat_state = Some(combat.clone());
    next
}

/// Close out a combat: clear the slot and journal the result.
pub fn end_combat(host: &GameState, result: CombatResult) -> GameState {
    let mut next = host.clone();
    next.combat_state = None;
    next.journal.push(format!("combat ended in {result}"));
    next
}
