//! The seven scoring factors.
//!
//! Each factor maps a candidate and the perception snapshot to a bounded
//! score on a fixed bracket scale, linearly interpolated inside brackets.
//! Archetype weights decide how much each factor matters.

use super::perception::{AllyView, EnemyView, Perception};
use crate::model::ActionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorKind {
    OwnStamina,
    AllyInDanger,
    TargetVulnerability,
    EnergyAvailability,
    SpeedAdvantage,
    RoundPhase,
    TeamBalance,
}

pub const ALL_FACTORS: [FactorKind; 7] = [
    FactorKind::OwnStamina,
    FactorKind::AllyInDanger,
    FactorKind::TargetVulnerability,
    FactorKind::EnergyAvailability,
    FactorKind::SpeedAdvantage,
    FactorKind::RoundPhase,
    FactorKind::TeamBalance,
];

/// One legal `(action, target)` pair under evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub kind: ActionKind,
    pub enemy: Option<&'a EnemyView>,
    pub ally: Option<&'a AllyView>,
}

/// Piecewise-linear bracket scale. Inputs clamp to the outer brackets.
fn scale(brackets: &[(f64, f64)], x: f64) -> f64 {
    let (first_x, first_y) = brackets[0];
    if x <= first_x {
        return first_y;
    }
    for pair in brackets.windows(2) {
        let (lo_x, lo_y) = pair[0];
        let (hi_x, hi_y) = pair[1];
        if x <= hi_x {
            let t = (x - lo_x) / (hi_x - lo_x);
            return lo_y + t * (hi_y - lo_y);
        }
    }
    brackets[brackets.len() - 1].1
}

pub fn evaluate_factor(factor: FactorKind, candidate: &Candidate, view: &Perception) -> f64 {
    match factor {
        FactorKind::OwnStamina => match candidate.kind {
            ActionKind::Defend | ActionKind::Evade => scale(
                &[(0.0, 10.0), (0.35, 6.0), (0.7, 2.0), (1.0, 0.0)],
                view.own.stamina_pct,
            ),
            _ => 0.0,
        },
        FactorKind::AllyInDanger => match (candidate.kind, candidate.ally) {
            (ActionKind::Defend, Some(ally)) => scale(
                &[(0.0, 10.0), (0.25, 8.0), (0.5, 3.0), (1.0, 0.0)],
                ally.stamina_pct,
            ),
            _ => 0.0,
        },
        FactorKind::TargetVulnerability => match (candidate.kind, candidate.enemy) {
            (ActionKind::Attack | ActionKind::Special | ActionKind::Group, Some(enemy)) => scale(
                &[(0.0, 10.0), (0.3, 7.0), (0.6, 3.0), (1.0, 1.0)],
                enemy.stamina_pct,
            ),
            _ => 0.0,
        },
        FactorKind::EnergyAvailability => match candidate.kind {
            ActionKind::Special => {
                let held = if view.own.max_energy > 0.0 {
                    view.own.energy / view.own.max_energy
                } else {
                    0.0
                };
                scale(&[(0.0, 0.0), (0.5, 4.0), (1.0, 8.0)], held)
            }
            // A GROUP candidate only exists once the whole team is full.
            ActionKind::Group => 10.0,
            _ => 0.0,
        },
        FactorKind::SpeedAdvantage => match (candidate.kind, candidate.enemy) {
            (ActionKind::Attack, Some(enemy)) if enemy.speed_delta > 0.0 => scale(
                &[(0.0, 0.0), (5.0, 3.0), (15.0, 6.0), (30.0, 8.0)],
                enemy.speed_delta,
            ),
            _ => 0.0,
        },
        FactorKind::RoundPhase => match candidate.kind {
            ActionKind::Evade => scale(
                &[(1.0, 6.0), (3.0, 3.0), (5.0, 0.0)],
                view.round as f64,
            ),
            ActionKind::Attack | ActionKind::Special => scale(
                &[(1.0, 0.0), (3.0, 2.0), (6.0, 4.0)],
                view.round as f64,
            ),
            _ => 0.0,
        },
        FactorKind::TeamBalance => match candidate.kind {
            ActionKind::Group => scale(
                &[(0.0, 0.0), (0.5, 3.0), (1.0, 8.0)],
                view.team_cohesion(),
            ),
            _ => 0.0,
        },
    }
}
