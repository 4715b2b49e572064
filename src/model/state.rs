use super::action::{CombatAction, RoundResult};
use super::combatant::{Combatant, CombatantConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opposing(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatStatus {
    Active,
    Victory,
    Defeat,
}

/// The five phases of a round, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundPhase {
    EnemyPlanning,
    Presentation,
    Validation,
    Scheduling,
    Resolution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatState {
    pub round: u32,
    pub phase: RoundPhase,
    pub players: Vec<Combatant>,
    pub enemies: Vec<Combatant>,
    /// Current round's action queue; sorted once Phase 4 has run.
    pub queue: Vec<CombatAction>,
    pub history: Vec<RoundResult>,
    pub status: CombatStatus,
}

impl CombatState {
    pub fn combatant(&self, id: &str) -> Option<&Combatant> {
        self.players
            .iter()
            .chain(self.enemies.iter())
            .find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: &str) -> Option<&mut Combatant> {
        self.players
            .iter_mut()
            .chain(self.enemies.iter_mut())
            .find(|c| c.id == id)
    }

    pub fn side_of(&self, id: &str) -> Option<Side> {
        if self.players.iter().any(|c| c.id == id) {
            Some(Side::Player)
        } else if self.enemies.iter().any(|c| c.id == id) {
            Some(Side::Enemy)
        } else {
            None
        }
    }

    pub fn party(&self, side: Side) -> &[Combatant] {
        match side {
            Side::Player => &self.players,
            Side::Enemy => &self.enemies,
        }
    }

    pub fn party_mut(&mut self, side: Side) -> &mut Vec<Combatant> {
        match side {
            Side::Player => &mut self.players,
            Side::Enemy => &mut self.enemies,
        }
    }

    /// Same-party members of `id`, excluding `id` itself.
    pub fn allies_of(&self, id: &str) -> Vec<&Combatant> {
        match self.side_of(id) {
            Some(side) => self.party(side).iter().filter(|c| c.id != id).collect(),
            None => Vec::new(),
        }
    }

    pub fn opponents_of(&self, id: &str) -> Vec<&Combatant> {
        match self.side_of(id) {
            Some(side) => self.party(side.opposing()).iter().collect(),
            None => Vec::new(),
        }
    }

    /// Mean effective speed over a party's non-KO members. Zero when the
    /// party is wiped.
    pub fn team_average_speed(&self, side: Side) -> f64 {
        let standing: Vec<&Combatant> =
            self.party(side).iter().filter(|c| !c.is_ko).collect();
        if standing.is_empty() {
            return 0.0;
        }
        standing.iter().map(|c| c.effective_speed()).sum::<f64>() / standing.len() as f64
    }

    /// Recompute terminal status. Defeat wins a mutual wipe.
    pub fn recompute_status(&mut self) {
        let players_down = self.players.iter().all(|c| c.is_ko);
        let enemies_down = self.enemies.iter().all(|c| c.is_ko);
        self.status = if players_down {
            CombatStatus::Defeat
        } else if enemies_down {
            CombatStatus::Victory
        } else {
            CombatStatus::Active
        };
    }
}

/// Host-supplied description of one combat encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterConfig {
    pub id: String,
    pub name: String,
    pub players: Vec<CombatantConfig>,
    pub enemies: Vec<CombatantConfig>,
}
