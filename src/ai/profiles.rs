//! Archetype decision profiles.
//!
//! Pure data: base score per action kind, a weight per factor, and an
//! optional pinned reaction. No per-archetype control flow anywhere else.

use super::factors::FactorKind;
use crate::model::{ActionKind, DefenseKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeProfile {
    pub name: &'static str,
    /// Indexed as [attack, defend, evade, special, group].
    base_scores: [f64; 5],
    /// Indexed in `ALL_FACTORS` order.
    weights: [f64; 7],
    /// Fixed defense this archetype always reaches for, if any.
    pub reaction: Option<DefenseKind>,
}

impl ArchetypeProfile {
    pub fn base_score(&self, kind: ActionKind) -> f64 {
        self.base_scores[match kind {
            ActionKind::Attack => 0,
            ActionKind::Defend => 1,
            ActionKind::Evade => 2,
            ActionKind::Special => 3,
            ActionKind::Group => 4,
        }]
    }

    pub fn weight(&self, factor: FactorKind) -> f64 {
        self.weights[match factor {
            FactorKind::OwnStamina => 0,
            FactorKind::AllyInDanger => 1,
            FactorKind::TargetVulnerability => 2,
            FactorKind::EnergyAvailability => 3,
            FactorKind::SpeedAdvantage => 4,
            FactorKind::RoundPhase => 5,
            FactorKind::TeamBalance => 6,
        }]
    }
}

const BERSERKER: ArchetypeProfile = ArchetypeProfile {
    name: "berserker",
    base_scores: [4.0, 0.0, 0.0, 3.0, 2.0],
    weights: [0.2, 0.1, 1.2, 0.8, 1.0, 0.6, 0.4],
    reaction: None,
};

const SENTINEL: ArchetypeProfile = ArchetypeProfile {
    name: "sentinel",
    base_scores: [2.0, 3.0, 1.0, 1.0, 1.0],
    weights: [1.2, 1.4, 0.5, 0.4, 0.3, 0.8, 0.8],
    reaction: Some(DefenseKind::Block),
};

const DUELIST: ArchetypeProfile = ArchetypeProfile {
    name: "duelist",
    base_scores: [3.0, 1.0, 1.0, 3.0, 1.0],
    weights: [0.6, 0.4, 1.0, 1.0, 0.8, 0.6, 0.5],
    reaction: Some(DefenseKind::Parry),
};

const STRATEGIST: ArchetypeProfile = ArchetypeProfile {
    name: "strategist",
    base_scores: [2.0, 2.0, 1.0, 2.0, 3.0],
    weights: [0.8, 1.0, 0.8, 1.0, 0.4, 0.7, 1.4],
    reaction: None,
};

/// Profile lookup by archetype tag, case-insensitive.
pub fn profile_for(tag: &str) -> Option<&'static ArchetypeProfile> {
    match tag.to_ascii_lowercase().as_str() {
        "berserker" => Some(&BERSERKER),
        "sentinel" => Some(&SENTINEL),
        "duelist" => Some(&DUELIST),
        "strategist" => Some(&STRATEGIST),
        _ => None,
    }
}
