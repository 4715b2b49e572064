//! Read-only snapshot the evaluator scores against.
//!
//! Factors never touch `CombatState` directly; everything they may weigh
//! is derived here once per evaluation.

use crate::model::{CombatState, Combatant};

#[derive(Debug, Clone, PartialEq)]
pub struct SelfView {
    pub stamina_pct: f64,
    pub energy: f64,
    pub max_energy: f64,
    pub ascension_level: u8,
    pub power: f64,
    pub speed: f64,
    pub rank: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllyView {
    pub id: String,
    pub stamina_pct: f64,
    pub is_ko: bool,
    pub energy: f64,
    pub max_energy: f64,
    /// Target of the ally's declaration, if one is already queued.
    pub declared_target: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyView {
    pub id: String,
    pub stamina_pct: f64,
    pub is_ko: bool,
    /// Own effective speed minus the enemy's. Positive means faster.
    pub speed_delta: f64,
    /// Own effective power minus the enemy's.
    pub power_delta: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Perception {
    pub round: u32,
    pub own: SelfView,
    pub allies: Vec<AllyView>,
    pub enemies: Vec<EnemyView>,
}

impl Perception {
    /// Standing allies, self included, hold full energy.
    pub fn team_at_full_energy(&self) -> bool {
        self.own.energy >= self.own.max_energy
            && self
                .allies
                .iter()
                .filter(|a| !a.is_ko)
                .all(|a| a.energy >= a.max_energy)
    }

    /// Cohesion in [0, 1]: the standing fraction of the party scaled by
    /// its mean stamina.
    pub fn team_cohesion(&self) -> f64 {
        let total = self.allies.len() + 1;
        let mut standing = 1usize;
        let mut stamina_sum = self.own.stamina_pct;
        for ally in self.allies.iter().filter(|a| !a.is_ko) {
            standing += 1;
            stamina_sum += ally.stamina_pct;
        }
        let standing_fraction = standing as f64 / total as f64;
        let mean_stamina = stamina_sum / standing as f64;
        standing_fraction * mean_stamina
    }
}

pub fn build_perception(combatant: &Combatant, state: &CombatState) -> Perception {
    let own_speed = combatant.effective_speed();
    let own_power = combatant.effective_power();

    let allies = state
        .allies_of(&combatant.id)
        .into_iter()
        .map(|ally| AllyView {
            id: ally.id.clone(),
            stamina_pct: ally.stamina_pct(),
            is_ko: ally.is_ko,
            energy: ally.energy,
            max_energy: ally.max_energy,
            declared_target: state
                .queue
                .iter()
                .find(|a| a.actor() == ally.id)
                .and_then(|a| a.target().map(str::to_string)),
        })
        .collect();

    let enemies = state
        .opponents_of(&combatant.id)
        .into_iter()
        .map(|enemy| EnemyView {
            id: enemy.id.clone(),
            stamina_pct: enemy.stamina_pct(),
            is_ko: enemy.is_ko,
            speed_delta: own_speed - enemy.effective_speed(),
            power_delta: own_power - enemy.effective_power(),
        })
        .collect();

    Perception {
        round: state.round,
        own: SelfView {
            stamina_pct: combatant.stamina_pct(),
            energy: combatant.energy,
            max_energy: combatant.max_energy,
            ascension_level: combatant.ascension_level,
            power: own_power,
            speed: own_speed,
            rank: combatant.rank,
        },
        allies,
        enemies,
    }
}
