use crate::config;
use crate::paths::ElementalPath;
use serde::{Deserialize, Serialize};

/// The defense a target can put up against an incoming hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefenseKind {
    Block,
    Dodge,
    Parry,
    Defenseless,
}

/// One trained defense: success rate plus mitigation on either outcome.
///
/// `success_mitigation` only matters for Block (Dodge and Parry negate all
/// damage on success); `failure_mitigation` applies whenever the roll fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseSkill {
    pub success_rate: f64,
    pub success_mitigation: f64,
    pub failure_mitigation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefenseSkills {
    pub block: DefenseSkill,
    pub dodge: DefenseSkill,
    pub parry: DefenseSkill,
}

impl DefenseSkills {
    /// Skill entry for a defense choice. Defenseless has no skill.
    pub fn get(&self, kind: DefenseKind) -> Option<&DefenseSkill> {
        match kind {
            DefenseKind::Block => Some(&self.block),
            DefenseKind::Dodge => Some(&self.dodge),
            DefenseKind::Parry => Some(&self.parry),
            DefenseKind::Defenseless => None,
        }
    }
}

/// Stat a dynamic modifier can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatKey {
    BlockRate,
    DodgeRate,
    ParryRate,
    Power,
    Speed,
}

impl StatKey {
    /// The success-rate stat touched by buffs on the given defense.
    pub fn for_defense(kind: DefenseKind) -> Option<StatKey> {
        match kind {
            DefenseKind::Block => Some(StatKey::BlockRate),
            DefenseKind::Dodge => Some(StatKey::DodgeRate),
            DefenseKind::Parry => Some(StatKey::ParryRate),
            DefenseKind::Defenseless => None,
        }
    }
}

/// How long a modifier survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierDuration {
    Round,
    Encounter,
}

/// A signed adjustment to one stat, tagged with its origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatModifier {
    pub stat: StatKey,
    pub amount: f64,
    pub source: String,
    pub duration: ModifierDuration,
}

/// The reduced form a combatant is spawned from at combat start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantConfig {
    pub id: String,
    pub name: String,
    pub archetype: String,
    pub path: ElementalPath,
    pub rank: f64,
    pub stamina: f64,
    pub power: f64,
    pub speed: f64,
    pub defenses: DefenseSkills,
    #[serde(default)]
    pub total_energy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    pub id: String,
    pub name: String,
    pub archetype: String,
    pub path: ElementalPath,
    /// Fractional tier 0-11. Drives rank-KO eligibility and AI quality.
    pub rank: f64,
    pub stamina: f64,
    pub max_stamina: f64,
    pub is_ko: bool,
    pub power: f64,
    pub speed: f64,
    /// Segments currently held, clamped to `max_energy`.
    pub energy: f64,
    pub max_energy: f64,
    pub ascension_level: u8,
    /// Career accumulation used for ascension threshold tests.
    pub total_energy: f64,
    pub defenses: DefenseSkills,
    pub modifiers: Vec<StatModifier>,
}

impl Combatant {
    pub fn from_config(cfg: &CombatantConfig) -> Self {
        let level = crate::formulas::ascension_level_for(cfg.total_energy);
        let starting = config::ASCENSION_STARTING_SEGMENTS[level as usize];
        Combatant {
            id: cfg.id.clone(),
            name: cfg.name.clone(),
            archetype: cfg.archetype.clone(),
            path: cfg.path,
            rank: cfg.rank,
            stamina: cfg.stamina,
            max_stamina: cfg.stamina,
            is_ko: false,
            power: cfg.power,
            speed: cfg.speed,
            energy: starting,
            max_energy: starting.max(config::MIN_MAX_ENERGY),
            ascension_level: level,
            total_energy: cfg.total_energy,
            defenses: cfg.defenses,
            modifiers: Vec::new(),
        }
    }

    pub fn stamina_pct(&self) -> f64 {
        if self.max_stamina > 0.0 {
            self.stamina / self.max_stamina
        } else {
            0.0
        }
    }

    /// Sum of active modifier magnitudes on one stat.
    pub fn modifier_total(&self, stat: StatKey) -> f64 {
        self.modifiers
            .iter()
            .filter(|m| m.stat == stat)
            .map(|m| m.amount)
            .sum()
    }

    pub fn effective_power(&self) -> f64 {
        self.power + self.modifier_total(StatKey::Power)
    }

    pub fn effective_speed(&self) -> f64 {
        self.speed + self.modifier_total(StatKey::Speed)
    }

    /// Base success rate plus modifiers, clamped to [0, 1].
    pub fn effective_rate(&self, kind: DefenseKind) -> f64 {
        let Some(skill) = self.defenses.get(kind) else {
            return 0.0;
        };
        let Some(stat) = StatKey::for_defense(kind) else {
            return 0.0;
        };
        (skill.success_rate + self.modifier_total(stat)).clamp(0.0, 1.0)
    }

    /// Apply damage, clamping stamina at zero and flipping the KO flag
    /// in the same update.
    pub fn apply_damage(&mut self, damage: f64) {
        self.stamina = (self.stamina - damage).max(0.0);
        if self.stamina == 0.0 {
            self.is_ko = true;
        }
    }

    /// KO outright, regardless of remaining stamina. Returns the stamina
    /// removed.
    pub fn knock_out(&mut self) -> f64 {
        let removed = self.stamina;
        self.stamina = 0.0;
        self.is_ko = true;
        removed
    }

    pub fn heal(&mut self, amount: f64) {
        self.stamina = (self.stamina + amount).min(self.max_stamina);
    }

    /// Drop modifiers that only live for the current round.
    pub fn clear_round_modifiers(&mut self) {
        self.modifiers
            .retain(|m| m.duration != ModifierDuration::Round);
    }
}
