//! GROUP resolver: the coordinated team strike.
//!
//! The leader conscripts every standing ally, their base damages sum and
//! scale by the group multiplier, and the target may only Block the
//! consolidated hit. No Dodge, no Parry, no counter chain. Every standing
//! participant's energy is zeroed whether or not the strike connects.

use crate::config::GroupActionConfig;
use crate::defense::resolve_defense;
use crate::formulas;
use crate::model::{
    ActionKind, ActionOutcome, AttackResult, CombatState, DefenseKind,
};
use crate::rng::RollSource;

pub fn resolve_group(
    state: &CombatState,
    leader_id: &str,
    target_id: &str,
    config: &GroupActionConfig,
    rolls: &mut dyn RollSource,
) -> (CombatState, Vec<ActionOutcome>) {
    let mut working = state.clone();

    let Some(side) = working.side_of(leader_id) else {
        return (working, Vec::new());
    };
    let Some(leader) = working.combatant(leader_id) else {
        return (working, Vec::new());
    };
    if leader.is_ko {
        return (working, Vec::new());
    }

    // 1. Leader plus every standing ally. A solo strike is valid.
    let participants: Vec<String> = working
        .party(side)
        .iter()
        .filter(|c| !c.is_ko)
        .map(|c| c.id.clone())
        .collect();

    let Some(target) = working.combatant(target_id) else {
        return (working, Vec::new());
    };
    let target_power = target.effective_power();
    let target_down = target.is_ko;

    let outcome = if target_down {
        // A wasted strike still drains the participants below.
        ActionOutcome {
            actor_id: leader_id.to_string(),
            kind: ActionKind::Group,
            attack: Some(AttackResult {
                target_id: target_id.to_string(),
                damage: 0.0,
                defense: DefenseKind::Block,
                defense_success: false,
                rank_ko: false,
                blindside: false,
                crushing_blow: false,
                counter_chain: false,
            }),
        }
    } else {
        // 2-3. Sum each participant's base contribution, then scale.
        let summed: f64 = participants
            .iter()
            .filter_map(|id| working.combatant(id))
            .map(|c| formulas::base_damage(c.effective_power(), target_power, 0.0))
            .sum();
        let group_damage = summed * config.damage_multiplier;

        // 4. The target is forced into Block with a single roll.
        let target = working
            .combatant(target_id)
            .expect("target was found standing above");
        let defense = resolve_defense(target, DefenseKind::Block, rolls.roll());
        let final_damage = group_damage * defense.damage_multiplier;

        // 5. Land the hit.
        working
            .combatant_mut(target_id)
            .expect("target was found standing above")
            .apply_damage(final_damage);

        ActionOutcome {
            actor_id: leader_id.to_string(),
            kind: ActionKind::Group,
            attack: Some(AttackResult {
                target_id: target_id.to_string(),
                damage: final_damage,
                defense: DefenseKind::Block,
                defense_success: defense.success,
                rank_ko: false,
                blindside: false,
                crushing_blow: false,
                counter_chain: false,
            }),
        }
    };

    // 6. Drain every standing participant, unconditionally.
    for id in &participants {
        if let Some(participant) = working.combatant_mut(id) {
            participant.energy = 0.0;
        }
    }

    (working, vec![outcome])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CombatStatus, Combatant, CombatantConfig, DefenseSkill, DefenseSkills, RoundPhase,
    };
    use crate::paths::ElementalPath;
    use crate::rng::FixedRolls;

    fn striker(id: &str, power: f64) -> Combatant {
        let skill = DefenseSkill {
            success_rate: 0.5,
            success_mitigation: 0.4,
            failure_mitigation: 0.1,
        };
        let mut c = Combatant::from_config(&CombatantConfig {
            id: id.to_string(),
            name: id.to_uppercase(),
            archetype: "duelist".to_string(),
            path: ElementalPath::Earth,
            rank: 3.0,
            stamina: 300.0,
            power,
            speed: 25.0,
            defenses: DefenseSkills {
                block: skill,
                dodge: skill,
                parry: skill,
            },
            total_energy: 0.0,
        });
        c.energy = c.max_energy;
        c
    }

    fn arena(players: Vec<Combatant>, enemies: Vec<Combatant>) -> CombatState {
        CombatState {
            round: 1,
            phase: RoundPhase::Resolution,
            players,
            enemies,
            queue: Vec::new(),
            history: Vec::new(),
            status: CombatStatus::Active,
        }
    }

    #[test]
    fn test_multiplier_applies_with_reduced_roster() {
        let mut p3 = striker("p3", 40.0);
        p3.knock_out();
        let mut e1 = striker("e1", 55.0);
        e1.defenses.block = DefenseSkill {
            success_rate: 0.5,
            success_mitigation: 0.4,
            failure_mitigation: 0.1,
        };
        let state = arena(
            vec![striker("p1", 60.0), striker("p2", 50.0), p3],
            vec![e1],
        );

        // Block roll 15 fails the 0.5 rate, so the failure mitigation
        // applies to the full team damage.
        let mut rolls = FixedRolls::new([15.0]);
        let (next, outcomes) = resolve_group(
            &state,
            "p1",
            "e1",
            &GroupActionConfig::default(),
            &mut rolls,
        );

        let expected =
            (60.0 * 60.0 / 55.0 + 50.0 * 50.0 / 55.0) * 1.5 * (1.0 - 0.1);
        let result = outcomes[0].attack.as_ref().unwrap();
        assert!((result.damage - expected).abs() < 1e-9);
        assert!((next.combatant("e1").unwrap().stamina - (300.0 - expected)).abs() < 1e-9);

        // Every standing participant is drained; the KO'd ally is not a
        // participant at all.
        assert_eq!(next.combatant("p1").unwrap().energy, 0.0);
        assert_eq!(next.combatant("p2").unwrap().energy, 0.0);
    }

    #[test]
    fn test_block_success_mitigates_team_damage() {
        let state = arena(
            vec![striker("p1", 60.0), striker("p2", 50.0)],
            vec![striker("e1", 55.0)],
        );
        let mut rolls = FixedRolls::new([10.0]);
        let (next, outcomes) = resolve_group(
            &state,
            "p1",
            "e1",
            &GroupActionConfig::default(),
            &mut rolls,
        );
        let expected =
            (60.0 * 60.0 / 55.0 + 50.0 * 50.0 / 55.0) * 1.5 * (1.0 - 0.4);
        let result = outcomes[0].attack.as_ref().unwrap();
        assert!(result.defense_success);
        assert!((result.damage - expected).abs() < 1e-9);
        assert!((next.combatant("e1").unwrap().stamina - (300.0 - expected)).abs() < 1e-9);
    }

    #[test]
    fn test_solo_group_is_valid() {
        let state = arena(vec![striker("p1", 60.0)], vec![striker("e1", 55.0)]);
        let mut rolls = FixedRolls::new([15.0]);
        let (next, outcomes) = resolve_group(
            &state,
            "p1",
            "e1",
            &GroupActionConfig::default(),
            &mut rolls,
        );
        let expected = (60.0 * 60.0 / 55.0) * 1.5 * (1.0 - 0.1);
        assert!((outcomes[0].attack.as_ref().unwrap().damage - expected).abs() < 1e-9);
        assert_eq!(next.combatant("p1").unwrap().energy, 0.0);
    }

    #[test]
    fn test_drain_applies_even_against_downed_target() {
        let mut e1 = striker("e1", 55.0);
        e1.knock_out();
        let state = arena(vec![striker("p1", 60.0), striker("p2", 50.0)], vec![e1]);
        let mut rolls = FixedRolls::new([]);
        let (next, outcomes) = resolve_group(
            &state,
            "p1",
            "e1",
            &GroupActionConfig::default(),
            &mut rolls,
        );
        assert_eq!(outcomes[0].attack.as_ref().unwrap().damage, 0.0);
        assert_eq!(next.combatant("p1").unwrap().energy, 0.0);
        assert_eq!(next.combatant("p2").unwrap().energy, 0.0);
    }
}
