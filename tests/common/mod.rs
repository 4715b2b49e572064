//! Shared fixture builders for the integration suite.
#![allow(dead_code)]

use combat_engine::model::{
    CombatState, CombatStatus, Combatant, CombatantConfig, DefenseSkill, DefenseSkills,
    RoundPhase,
};
use combat_engine::paths::ElementalPath;

pub struct FighterSpec {
    pub id: &'static str,
    pub archetype: &'static str,
    pub path: ElementalPath,
    pub rank: f64,
    pub stamina: f64,
    pub power: f64,
    pub speed: f64,
}

impl Default for FighterSpec {
    fn default() -> Self {
        FighterSpec {
            id: "x",
            archetype: "duelist",
            path: ElementalPath::Fire,
            rank: 3.0,
            stamina: 300.0,
            power: 50.0,
            speed: 25.0,
        }
    }
}

pub fn default_defenses() -> DefenseSkills {
    DefenseSkills {
        block: DefenseSkill {
            success_rate: 0.5,
            success_mitigation: 0.4,
            failure_mitigation: 0.1,
        },
        dodge: DefenseSkill {
            success_rate: 0.4,
            success_mitigation: 0.0,
            failure_mitigation: 0.15,
        },
        parry: DefenseSkill {
            success_rate: 0.35,
            success_mitigation: 0.0,
            failure_mitigation: 0.2,
        },
    }
}

pub fn fighter(spec: FighterSpec) -> Combatant {
    Combatant::from_config(&CombatantConfig {
        id: spec.id.to_string(),
        name: spec.id.to_uppercase(),
        archetype: spec.archetype.to_string(),
        path: spec.path,
        rank: spec.rank,
        stamina: spec.stamina,
        power: spec.power,
        speed: spec.speed,
        defenses: default_defenses(),
        total_energy: 0.0,
    })
}

pub fn combat(players: Vec<Combatant>, enemies: Vec<Combatant>) -> CombatState {
    CombatState {
        round: 1,
        phase: RoundPhase::EnemyPlanning,
        players,
        enemies,
        queue: Vec::new(),
        history: Vec::new(),
        status: CombatStatus::Active,
    }
}
