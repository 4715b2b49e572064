//! Demonstration runner: spawns a small encounter and plays it to a
//! terminal status with the AI driving both sides.

use clap::Parser;
use combat_engine::config::EvaluatorConfig;
use combat_engine::model::{
    CombatAction, CombatStatus, CombatantConfig, DefenseSkill, DefenseSkills, EncounterConfig,
};
use combat_engine::paths::ElementalPath;
use combat_engine::rng::SeededRolls;
use combat_engine::sync::{end_combat, init_combat_state, sync_to_game_state, CombatResult};
use combat_engine::{ai, run_round, GameState};

#[derive(Parser, Debug)]
#[command(name = "combat_cli", about = "Run a demonstration combat")]
struct Args {
    /// Seed for the roll source; omit for an entropy seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many rounds even without a terminal status.
    #[arg(long, default_value_t = 30)]
    max_rounds: u32,
}

fn demo_encounter() -> EncounterConfig {
    let fighter = |id: &str,
                   name: &str,
                   archetype: &str,
                   path: ElementalPath,
                   rank: f64,
                   stamina: f64,
                   power: f64,
                   speed: f64| CombatantConfig {
        id: id.to_string(),
        name: name.to_string(),
        archetype: archetype.to_string(),
        path,
        rank,
        stamina,
        power,
        speed,
        defenses: DefenseSkills {
            block: DefenseSkill {
                success_rate: 0.5,
                success_mitigation: 0.4,
                failure_mitigation: 0.1,
            },
            dodge: DefenseSkill {
                success_rate: 0.4,
                success_mitigation: 0.0,
                failure_mitigation: 0.15,
            },
            parry: DefenseSkill {
                success_rate: 0.35,
                success_mitigation: 0.0,
                failure_mitigation: 0.2,
            },
        },
        total_energy: 0.0,
    };

    EncounterConfig {
        id: uuid::Uuid::new_v4().to_string(),
        name: "Demonstration Skirmish".to_string(),
        players: vec![
            fighter("p1", "Kael", "berserker", ElementalPath::Fire, 4.0, 320.0, 55.0, 28.0),
            fighter("p2", "Mira", "sentinel", ElementalPath::Light, 3.5, 380.0, 40.0, 22.0),
            fighter("p3", "Sorin", "duelist", ElementalPath::Shadow, 4.5, 280.0, 50.0, 34.0),
        ],
        enemies: vec![
            fighter("e1", "Warden", "sentinel", ElementalPath::Earth, 4.0, 400.0, 45.0, 20.0),
            fighter("e2", "Stalker", "berserker", ElementalPath::Air, 3.0, 260.0, 52.0, 36.0),
        ],
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let encounter = demo_encounter();
    let host = GameState::default();
    let mut combat = init_combat_state(&encounter);
    let mut rolls = match args.seed {
        Some(seed) => SeededRolls::new(seed),
        None => SeededRolls::from_entropy(),
    };

    println!("== {} ({}) ==", encounter.name, encounter.id);

    let player_config = EvaluatorConfig {
        group_actions_enabled: true,
    };
    while combat.status == CombatStatus::Active && combat.round <= args.max_rounds {
        // Drive the player party with the evaluator too.
        let declarations: Vec<CombatAction> = combat
            .players
            .iter()
            .filter(|c| !c.is_ko)
            .filter_map(|c| ai::evaluate(c, &combat, &player_config).ok())
            .collect();

        combat = run_round(&combat, &declarations, &mut rolls);

        let round = combat.history.last().expect("run_round appends a record");
        println!("-- round {} --", round.round);
        for outcome in &round.outcomes {
            match &outcome.attack {
                Some(attack) => {
                    let mut notes = Vec::new();
                    if attack.rank_ko {
                        notes.push("rank-KO");
                    }
                    if attack.blindside {
                        notes.push("blindside");
                    }
                    if attack.crushing_blow {
                        notes.push("crushing blow");
                    }
                    if attack.counter_chain {
                        notes.push("counter");
                    }
                    let notes = if notes.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", notes.join(", "))
                    };
                    println!(
                        "  {} -> {}: {:.1} damage ({:?}, {}){}",
                        outcome.actor_id,
                        attack.target_id,
                        attack.damage,
                        attack.defense,
                        if attack.defense_success { "held" } else { "broken" },
                        notes
                    );
                }
                None => println!("  {} {:?}", outcome.actor_id, outcome.kind),
            }
        }
        for c in combat.players.iter().chain(combat.enemies.iter()) {
            println!(
                "  {:>8}: {:>6.1}/{:>6.1} stamina, {:.2} energy{}",
                c.name,
                c.stamina,
                c.max_stamina,
                c.energy,
                if c.is_ko { " (KO)" } else { "" }
            );
        }
    }

    let result = match combat.status {
        CombatStatus::Victory => CombatResult::Victory,
        CombatStatus::Defeat => CombatResult::Defeat,
        CombatStatus::Active => {
            println!("round cap reached with combat still active");
            return;
        }
    };
    let host = sync_to_game_state(&host, &combat);
    let host = end_combat(&host, result);
    println!("== {} ==", host.journal.last().expect("end_combat journals"));
}
