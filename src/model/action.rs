use super::combatant::DefenseKind;
use super::state::CombatState;
use serde::{Deserialize, Serialize};

/// Discriminant of a combat action, used by the scheduler and the AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Attack,
    Defend,
    Evade,
    Special,
    Group,
}

/// A declared action. EVADE is the only untargeted variant; SPECIAL carries
/// the energy segments its declarer chose to spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CombatAction {
    Attack {
        actor: String,
        target: String,
    },
    Defend {
        actor: String,
        target: String,
    },
    Evade {
        actor: String,
    },
    Special {
        actor: String,
        target: String,
        #[serde(default)]
        segments: f64,
    },
    Group {
        actor: String,
        target: String,
    },
}

impl CombatAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            CombatAction::Attack { .. } => ActionKind::Attack,
            CombatAction::Defend { .. } => ActionKind::Defend,
            CombatAction::Evade { .. } => ActionKind::Evade,
            CombatAction::Special { .. } => ActionKind::Special,
            CombatAction::Group { .. } => ActionKind::Group,
        }
    }

    pub fn actor(&self) -> &str {
        match self {
            CombatAction::Attack { actor, .. }
            | CombatAction::Defend { actor, .. }
            | CombatAction::Evade { actor }
            | CombatAction::Special { actor, .. }
            | CombatAction::Group { actor, .. } => actor,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            CombatAction::Attack { target, .. }
            | CombatAction::Defend { target, .. }
            | CombatAction::Special { target, .. }
            | CombatAction::Group { target, .. } => Some(target),
            CombatAction::Evade { .. } => None,
        }
    }
}

/// Outcome of one resolved hit (or counter-chain iteration).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackResult {
    pub target_id: String,
    pub damage: f64,
    pub defense: DefenseKind,
    /// Whether the target's defense roll succeeded.
    pub defense_success: bool,
    pub rank_ko: bool,
    pub blindside: bool,
    pub crushing_blow: bool,
    pub counter_chain: bool,
}

/// One entry in a round's resolution log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    pub actor_id: String,
    pub kind: ActionKind,
    pub attack: Option<AttackResult>,
}

/// Append-only record of one resolved round.
///
/// The stored snapshot carries an emptied history so the record stays
/// linear in combat length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub round: u32,
    pub outcomes: Vec<ActionOutcome>,
    pub snapshot: CombatState,
}
