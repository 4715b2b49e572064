//! Elemental path table.
//!
//! Reaction paths (Fire, Air, Light) boost the wielder's own defense;
//! action paths (Water, Shadow, Earth) debuff the target's. Each path also
//! forces the defense a target must use against the path's Special, and
//! carries the fixed action ordering the AI falls back to on score ties.

use crate::model::{ActionKind, DefenseKind, StatKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementalPath {
    Fire,
    Air,
    Light,
    Water,
    Shadow,
    Earth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    Reaction,
    Action,
}

/// Static profile of one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathProfile {
    pub kind: PathKind,
    /// The defensive skill this path's buff or debuff touches.
    pub defense_boost: DefenseKind,
    /// The defense a target is forced into against this path's Special.
    pub special_forces: DefenseKind,
}

impl ElementalPath {
    pub fn profile(self) -> PathProfile {
        match self {
            ElementalPath::Fire => PathProfile {
                kind: PathKind::Reaction,
                defense_boost: DefenseKind::Parry,
                special_forces: DefenseKind::Parry,
            },
            ElementalPath::Air => PathProfile {
                kind: PathKind::Reaction,
                defense_boost: DefenseKind::Dodge,
                special_forces: DefenseKind::Dodge,
            },
            ElementalPath::Light => PathProfile {
                kind: PathKind::Reaction,
                defense_boost: DefenseKind::Block,
                special_forces: DefenseKind::Block,
            },
            ElementalPath::Water => PathProfile {
                kind: PathKind::Action,
                defense_boost: DefenseKind::Dodge,
                special_forces: DefenseKind::Dodge,
            },
            ElementalPath::Shadow => PathProfile {
                kind: PathKind::Action,
                defense_boost: DefenseKind::Parry,
                special_forces: DefenseKind::Parry,
            },
            ElementalPath::Earth => PathProfile {
                kind: PathKind::Action,
                defense_boost: DefenseKind::Block,
                special_forces: DefenseKind::Block,
            },
        }
    }

    pub fn kind(self) -> PathKind {
        self.profile().kind
    }

    /// Stat moved by this path's buff (reaction) or debuff (action).
    pub fn boost_stat(self) -> StatKey {
        // Every boost targets a real defense, so the lookup cannot miss.
        StatKey::for_defense(self.profile().defense_boost)
            .expect("path defense boost maps to a success-rate stat")
    }

    /// Fixed per-path action ordering used to break AI score ties.
    pub fn action_priority(self) -> [ActionKind; 5] {
        match self {
            ElementalPath::Fire => [
                ActionKind::Attack,
                ActionKind::Special,
                ActionKind::Defend,
                ActionKind::Group,
                ActionKind::Evade,
            ],
            ElementalPath::Air => [
                ActionKind::Evade,
                ActionKind::Attack,
                ActionKind::Defend,
                ActionKind::Special,
                ActionKind::Group,
            ],
            ElementalPath::Light => [
                ActionKind::Defend,
                ActionKind::Attack,
                ActionKind::Group,
                ActionKind::Special,
                ActionKind::Evade,
            ],
            ElementalPath::Water => [
                ActionKind::Special,
                ActionKind::Attack,
                ActionKind::Group,
                ActionKind::Evade,
                ActionKind::Defend,
            ],
            ElementalPath::Shadow => [
                ActionKind::Attack,
                ActionKind::Group,
                ActionKind::Special,
                ActionKind::Evade,
                ActionKind::Defend,
            ],
            ElementalPath::Earth => [
                ActionKind::Group,
                ActionKind::Attack,
                ActionKind::Special,
                ActionKind::Defend,
                ActionKind::Evade,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ElementalPath; 6] = [
        ElementalPath::Fire,
        ElementalPath::Air,
        ElementalPath::Light,
        ElementalPath::Water,
        ElementalPath::Shadow,
        ElementalPath::Earth,
    ];

    #[test]
    fn test_reaction_action_split() {
        assert_eq!(ElementalPath::Fire.kind(), PathKind::Reaction);
        assert_eq!(ElementalPath::Air.kind(), PathKind::Reaction);
        assert_eq!(ElementalPath::Light.kind(), PathKind::Reaction);
        assert_eq!(ElementalPath::Water.kind(), PathKind::Action);
        assert_eq!(ElementalPath::Shadow.kind(), PathKind::Action);
        assert_eq!(ElementalPath::Earth.kind(), PathKind::Action);
    }

    #[test]
    fn test_boost_matches_forced_defense() {
        for path in ALL {
            let profile = path.profile();
            assert_eq!(profile.defense_boost, profile.special_forces);
        }
    }

    #[test]
    fn test_tie_break_orderings_are_complete() {
        for path in ALL {
            let order = path.action_priority();
            for kind in [
                ActionKind::Attack,
                ActionKind::Defend,
                ActionKind::Evade,
                ActionKind::Special,
                ActionKind::Group,
            ] {
                assert!(order.contains(&kind), "{path:?} ordering misses {kind:?}");
            }
        }
    }
}
