//! Property-based checks for the engine's universal invariants.
//!
//! These validate rules that must hold regardless of rolls, rosters, or
//! declarations: round bookkeeping, stamina and energy bounds, the KO
//! flag, scheduler ordering, and evaluator determinism.

mod common;

use combat_engine::config::EvaluatorConfig;
use combat_engine::formulas::ascension_level_for;
use combat_engine::model::{ActionKind, CombatAction, CombatState, Combatant};
use combat_engine::rng::{FixedRolls, SeededRolls};
use combat_engine::{ai, run_round, sort_by_priority, validate_declaration};
use common::{combat, default_defenses};
use proptest::prelude::*;

fn roster(prefix: &str, count: usize, stats: &[(f64, f64, f64)]) -> Vec<Combatant> {
    use combat_engine::model::CombatantConfig;
    use combat_engine::paths::ElementalPath;

    const PATHS: [ElementalPath; 6] = [
        ElementalPath::Fire,
        ElementalPath::Air,
        ElementalPath::Light,
        ElementalPath::Water,
        ElementalPath::Shadow,
        ElementalPath::Earth,
    ];
    const ARCHETYPES: [&str; 4] = ["berserker", "sentinel", "duelist", "strategist"];

    (0..count)
        .map(|i| {
            let (stamina, power, speed) = stats[i % stats.len()];
            Combatant::from_config(&CombatantConfig {
                id: format!("{prefix}{i}"),
                name: format!("{prefix}{i}").to_uppercase(),
                archetype: ARCHETYPES[i % ARCHETYPES.len()].to_string(),
                path: PATHS[i % PATHS.len()],
                rank: 1.0 + (i % 5) as f64,
                stamina,
                power,
                speed,
                defenses: default_defenses(),
                total_energy: (i * 20) as f64,
            })
        })
        .collect()
}

fn assert_combatant_invariants(state: &CombatState) {
    for c in state.players.iter().chain(state.enemies.iter()) {
        assert!(c.stamina >= 0.0, "{} has negative stamina", c.id);
        assert!(
            c.stamina <= c.max_stamina,
            "{} overshoots max stamina",
            c.id
        );
        assert_eq!(c.stamina == 0.0, c.is_ko, "{} KO flag out of sync", c.id);
        assert!(c.energy >= 0.0, "{} has negative energy", c.id);
        assert!(c.energy <= c.max_energy, "{} overshoots max energy", c.id);
        assert_eq!(
            c.ascension_level,
            ascension_level_for(c.total_energy),
            "{} ascension level diverged from its total",
            c.id
        );
    }
}

proptest! {
    /// Every round advances the counter by one, appends one record, and
    /// keeps every combatant inside its bounds.
    #[test]
    fn prop_round_bookkeeping_and_bounds(
        players in 1usize..4,
        enemies in 1usize..4,
        stamina in 50.0f64..400.0,
        power in 20.0f64..80.0,
        speed in 10.0f64..40.0,
        seed in any::<u64>(),
        rounds in 1usize..4,
    ) {
        let stats = [(stamina, power, speed), (stamina * 0.8, power * 1.2, speed * 0.9)];
        let mut state = combat(
            roster("p", players, &stats),
            roster("e", enemies, &stats),
        );
        let mut rolls = SeededRolls::new(seed);

        for _ in 0..rounds {
            let declarations: Vec<CombatAction> = state
                .players
                .iter()
                .filter(|c| !c.is_ko)
                .filter_map(|c| {
                    ai::evaluate(c, &state, &EvaluatorConfig::default()).ok()
                })
                .collect();

            let before = state.clone();
            let next = run_round(&state, &declarations, &mut rolls);

            prop_assert_eq!(&state, &before, "input state was mutated");
            prop_assert_eq!(next.round, state.round + 1);
            prop_assert_eq!(next.history.len(), state.history.len() + 1);
            assert_combatant_invariants(&next);
            state = next;
        }
    }

    /// Sorted queues are monotone in priority, and monotone in speed
    /// inside each single-declarer priority bucket.
    #[test]
    fn prop_scheduler_orders_priorities_and_speeds(
        seed in any::<u64>(),
        picks in prop::collection::vec(0usize..4, 1..10),
    ) {
        let stats = [(300.0, 50.0, 30.0), (300.0, 50.0, 20.0), (300.0, 50.0, 10.0)];
        let state = combat(roster("p", 3, &stats), roster("e", 3, &stats));

        let actions: Vec<CombatAction> = picks
            .iter()
            .enumerate()
            .map(|(i, pick)| {
                let actor = format!("p{}", i % 3);
                match pick {
                    0 => CombatAction::Attack { actor, target: "e0".to_string() },
                    1 => CombatAction::Defend { actor, target: format!("p{}", (i + 1) % 3) },
                    2 => CombatAction::Evade { actor },
                    _ => CombatAction::Special { actor, target: "e0".to_string(), segments: 1.0 },
                }
            })
            .collect();

        let mut rolls = SeededRolls::new(seed);
        let sorted = sort_by_priority(actions, &state, &mut rolls);

        let priority = |k: ActionKind| combat_engine::config::action_priority(k);
        for pair in sorted.windows(2) {
            prop_assert!(priority(pair[0].kind()) <= priority(pair[1].kind()));
            if priority(pair[0].kind()) == priority(pair[1].kind()) {
                let speed_of = |a: &CombatAction| {
                    state.combatant(a.actor()).unwrap().effective_speed()
                };
                prop_assert!(speed_of(&pair[0]) >= speed_of(&pair[1]));
            }
        }
    }

    /// The ascension table is the unique level for any total.
    #[test]
    fn prop_ascension_level_matches_thresholds(total in 0.0f64..500.0) {
        let level = ascension_level_for(total);
        let thresholds = combat_engine::config::ASCENSION_THRESHOLDS;
        match level {
            0 => prop_assert!(total < thresholds[0]),
            1 => prop_assert!(total >= thresholds[0] && total < thresholds[1]),
            2 => prop_assert!(total >= thresholds[1] && total < thresholds[2]),
            3 => prop_assert!(total >= thresholds[2]),
            _ => prop_assert!(false, "impossible level {}", level),
        }
    }

    /// KO'd declarers are always rejected, whatever they declare.
    #[test]
    fn prop_validator_rejects_ko_declarers(pick in 0usize..5) {
        let stats = [(300.0, 50.0, 30.0)];
        let mut state = combat(roster("p", 2, &stats), roster("e", 1, &stats));
        state.players[0].knock_out();

        let actor = "p0".to_string();
        let action = match pick {
            0 => CombatAction::Attack { actor, target: "e0".to_string() },
            1 => CombatAction::Defend { actor, target: "p1".to_string() },
            2 => CombatAction::Evade { actor },
            3 => CombatAction::Special { actor, target: "e0".to_string(), segments: 1.0 },
            _ => CombatAction::Group { actor, target: "e0".to_string() },
        };
        prop_assert!(!validate_declaration(&state, &action).is_valid());
    }

    /// The evaluator is a pure function of its inputs.
    #[test]
    fn prop_evaluator_is_deterministic(
        players in 1usize..4,
        enemies in 1usize..4,
        wounded in 0.1f64..1.0,
    ) {
        let stats = [(300.0, 50.0, 30.0), (250.0, 60.0, 20.0)];
        let mut state = combat(roster("p", players, &stats), roster("e", enemies, &stats));
        state.players[0].stamina *= wounded;

        let cfg = EvaluatorConfig { group_actions_enabled: true };
        for enemy in &state.enemies {
            let first = ai::evaluate(enemy, &state, &cfg);
            let second = ai::evaluate(enemy, &state, &cfg);
            prop_assert_eq!(first, second);
        }
    }
}

/// Group resolution leaves every standing participant at zero energy, for
/// any roll.
#[test]
fn test_group_drains_participants_for_any_roll() {
    for roll in [0.0, 5.0, 10.0, 15.0, 20.0] {
        let stats = [(300.0, 50.0, 30.0)];
        let mut state = combat(roster("p", 3, &stats), roster("e", 1, &stats));
        for p in &mut state.players {
            p.energy = p.max_energy;
        }
        let mut rolls = FixedRolls::new([roll]);
        let (next, _) = combat_engine::resolve_group(
            &state,
            "p0",
            "e0",
            &combat_engine::config::GroupActionConfig::default(),
            &mut rolls,
        );
        for p in &next.players {
            assert_eq!(p.energy, 0.0, "{} kept energy after the strike", p.id);
        }
    }
}
