//! Priority scheduler for the round's action queue.
//!
//! Sort order: action priority ascending, declarer speed descending inside
//! a bucket, and a roll of jitter as the final tie-break for equal speeds.
//! GROUP actions collide at priority 0 on their party's average speed over
//! standing members rather than the declarer's own.

use crate::config;
use crate::model::{ActionKind, CombatAction, CombatState};
use crate::rng::RollSource;

pub fn sort_by_priority(
    actions: Vec<CombatAction>,
    state: &CombatState,
    rolls: &mut dyn RollSource,
) -> Vec<CombatAction> {
    let mut keyed: Vec<(u8, f64, f64, CombatAction)> = actions
        .into_iter()
        .map(|action| {
            let priority = config::action_priority(action.kind());
            let speed = speed_key(&action, state);
            let jitter = rolls.roll();
            (priority, speed, jitter, action)
        })
        .collect();

    keyed.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal))
            .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal))
    });

    keyed.into_iter().map(|(_, _, _, action)| action).collect()
}

fn speed_key(action: &CombatAction, state: &CombatState) -> f64 {
    if action.kind() == ActionKind::Group {
        match state.side_of(action.actor()) {
            Some(side) => state.team_average_speed(side),
            None => 0.0,
        }
    } else {
        state
            .combatant(action.actor())
            .map(|c| c.effective_speed())
            .unwrap_or(0.0)
    }
}
