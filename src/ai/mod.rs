//! Utility-scoring action evaluator.
//!
//! Deterministic: the same combatant, state, and config always produce the
//! same declaration. Ties resolve through the declarer's elemental path
//! ordering, then the lowest-stamina target, then enumeration order.

pub mod factors;
pub mod perception;
pub mod profiles;

use crate::config::EvaluatorConfig;
use crate::model::{ActionKind, CombatAction, CombatState, Combatant};
use factors::{evaluate_factor, Candidate, ALL_FACTORS};
use perception::{build_perception, Perception};
use profiles::ArchetypeProfile;

/// The evaluator cannot score a combatant without a profile; the caller
/// falls back to the stub attacker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluateError {
    UnknownArchetype(String),
}

impl std::fmt::Display for EvaluateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluateError::UnknownArchetype(tag) => {
                write!(f, "no archetype profile for '{}'", tag)
            }
        }
    }
}

impl std::error::Error for EvaluateError {}

/// Decision-quality scaling: low ranks blunt the weighted factor sum.
fn rank_coefficient(rank: f64) -> f64 {
    (rank / 10.0).max(0.2).min(1.0)
}

struct ScoredCandidate {
    action: CombatAction,
    score: f64,
    target_stamina: f64,
}

pub fn evaluate(
    combatant: &Combatant,
    state: &CombatState,
    config: &EvaluatorConfig,
) -> Result<CombatAction, EvaluateError> {
    let profile = profiles::profile_for(&combatant.archetype)
        .ok_or_else(|| EvaluateError::UnknownArchetype(combatant.archetype.clone()))?;

    let view = build_perception(combatant, state);
    let coefficient = rank_coefficient(combatant.rank);

    let mut best: Option<ScoredCandidate> = None;
    let order = combatant.path.action_priority();
    let rank_of = |kind: ActionKind| {
        order
            .iter()
            .position(|k| *k == kind)
            .unwrap_or(order.len())
    };

    for scored in enumerate_candidates(combatant, &view, config, profile, coefficient) {
        let replace = match &best {
            None => true,
            Some(current) => {
                if scored.score > current.score + f64::EPSILON {
                    true
                } else if (scored.score - current.score).abs() <= f64::EPSILON {
                    // Tied on score: the path ordering decides, then the
                    // weaker target; enumeration order wins final ties.
                    let a = rank_of(scored.action.kind());
                    let b = rank_of(current.action.kind());
                    a < b || (a == b && scored.target_stamina < current.target_stamina)
                } else {
                    false
                }
            }
        };
        if replace {
            best = Some(scored);
        }
    }

    // Every living combatant can at least EVADE, so enumeration is never
    // empty for a legal caller.
    Ok(best
        .expect("candidate enumeration always yields EVADE")
        .action)
}

fn enumerate_candidates(
    combatant: &Combatant,
    view: &Perception,
    config: &EvaluatorConfig,
    profile: &ArchetypeProfile,
    coefficient: f64,
) -> Vec<ScoredCandidate> {
    let mut out = Vec::new();
    let standing_enemies: Vec<_> = view.enemies.iter().filter(|e| !e.is_ko).collect();
    let standing_allies: Vec<_> = view.allies.iter().filter(|a| !a.is_ko).collect();

    // ATTACK
    for &enemy in &standing_enemies {
        out.push(score(
            CombatAction::Attack {
                actor: combatant.id.clone(),
                target: enemy.id.clone(),
            },
            Candidate {
                kind: ActionKind::Attack,
                enemy: Some(enemy),
                ally: None,
            },
            enemy.stamina_pct,
            view,
            profile,
            coefficient,
        ));
    }

    // DEFEND
    for &ally in &standing_allies {
        out.push(score(
            CombatAction::Defend {
                actor: combatant.id.clone(),
                target: ally.id.clone(),
            },
            Candidate {
                kind: ActionKind::Defend,
                enemy: None,
                ally: Some(ally),
            },
            ally.stamina_pct,
            view,
            profile,
            coefficient,
        ));
    }

    // EVADE
    out.push(score(
        CombatAction::Evade {
            actor: combatant.id.clone(),
        },
        Candidate {
            kind: ActionKind::Evade,
            enemy: None,
            ally: None,
        },
        f64::INFINITY,
        view,
        profile,
        coefficient,
    ));

    // SPECIAL
    if combatant.energy > 0.0 {
        for &enemy in &standing_enemies {
            out.push(score(
                CombatAction::Special {
                    actor: combatant.id.clone(),
                    target: enemy.id.clone(),
                    segments: combatant.energy,
                },
                Candidate {
                    kind: ActionKind::Special,
                    enemy: Some(enemy),
                    ally: None,
                },
                enemy.stamina_pct,
                view,
                profile,
                coefficient,
            ));
        }
    }

    // GROUP
    if config.group_actions_enabled && view.team_at_full_energy() {
        for &enemy in &standing_enemies {
            out.push(score(
                CombatAction::Group {
                    actor: combatant.id.clone(),
                    target: enemy.id.clone(),
                },
                Candidate {
                    kind: ActionKind::Group,
                    enemy: Some(enemy),
                    ally: None,
                },
                enemy.stamina_pct,
                view,
                profile,
                coefficient,
            ));
        }
    }

    out
}

fn score(
    action: CombatAction,
    candidate: Candidate,
    target_stamina: f64,
    view: &Perception,
    profile: &ArchetypeProfile,
    coefficient: f64,
) -> ScoredCandidate {
    let weighted: f64 = ALL_FACTORS
        .iter()
        .map(|factor| profile.weight(*factor) * evaluate_factor(*factor, &candidate, view))
        .sum();
    ScoredCandidate {
        score: profile.base_score(candidate.kind) + coefficient * weighted,
        target_stamina,
        action,
    }
}
