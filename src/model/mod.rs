//! Shared combat data model.

pub mod action;
pub mod combatant;
pub mod state;

pub use action::{ActionKind, ActionOutcome, AttackResult, CombatAction, RoundResult};
pub use combatant::{
    Combatant, CombatantConfig, DefenseKind, DefenseSkill, DefenseSkills, ModifierDuration,
    StatKey, StatModifier,
};
pub use state::{CombatState, CombatStatus, EncounterConfig, RoundPhase, Side};
