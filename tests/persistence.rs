//! Persist→load fidelity and stable serialization shapes.

mod common;

use combat_engine::config::GroupActionConfig;
use combat_engine::model::{CombatAction, CombatState};
use combat_engine::paths::ElementalPath;
use combat_engine::rng::FixedRolls;
use combat_engine::{run_round, GameState};
use common::{combat, fighter, FighterSpec};

fn played_state() -> CombatState {
    let state = combat(
        vec![
            fighter(FighterSpec {
                id: "p1",
                archetype: "berserker",
                ..FighterSpec::default()
            }),
            fighter(FighterSpec {
                id: "p2",
                archetype: "sentinel",
                path: ElementalPath::Water,
                ..FighterSpec::default()
            }),
        ],
        vec![fighter(FighterSpec {
            id: "e1",
            archetype: "duelist",
            ..FighterSpec::default()
        })],
    );
    let declarations = vec![
        CombatAction::Attack {
            actor: "p1".to_string(),
            target: "e1".to_string(),
        },
        CombatAction::Defend {
            actor: "p2".to_string(),
            target: "p1".to_string(),
        },
    ];
    let mut rolls = FixedRolls::new([12.0, 3.0, 17.0, 8.0, 10.0, 10.0, 10.0]);
    run_round(&state, &declarations, &mut rolls)
}

/// Every field of a played combat state survives a JSON round trip:
/// rosters, round counter, history, and status.
#[test]
fn test_combat_state_json_round_trip() {
    let state = played_state();
    assert!(!state.history.is_empty());

    let json = serde_json::to_string(&state).expect("combat state serializes");
    let back: CombatState = serde_json::from_str(&json).expect("combat state deserializes");
    assert_eq!(back, state);
}

/// The host document keeps fields the engine knows nothing about.
#[test]
fn test_host_state_preserves_unknown_fields() {
    let raw = serde_json::json!({
        "combatState": null,
        "journal": ["left the village"],
        "chapter": 7,
        "inventory": {"potions": 3}
    });
    let host: GameState = serde_json::from_value(raw.clone()).expect("host state deserializes");
    assert_eq!(host.journal, vec!["left the village".to_string()]);
    assert_eq!(host.host_fields.get("chapter"), Some(&serde_json::json!(7)));

    let back = serde_json::to_value(&host).expect("host state serializes");
    assert_eq!(back.get("chapter"), raw.get("chapter"));
    assert_eq!(back.get("inventory"), raw.get("inventory"));
}

/// A host state carrying a live combat round-trips losslessly.
#[test]
fn test_host_state_with_combat_round_trip() {
    let mut host = GameState::default();
    host.combat_state = Some(played_state());
    let json = serde_json::to_string(&host).expect("host state serializes");
    let back: GameState = serde_json::from_str(&json).expect("host state deserializes");
    assert_eq!(back, host);
}

/// Wire shapes the host relies on stay put.
#[test]
fn test_group_config_shape() {
    insta::assert_json_snapshot!(GroupActionConfig::default(), @r###"
    {
      "damageMultiplier": 1.5,
      "energyRequirement": "full"
    }
    "###);
}

#[test]
fn test_path_profile_shape() {
    insta::assert_json_snapshot!(ElementalPath::Fire.profile(), @r###"
    {
      "kind": "reaction",
      "defenseBoost": "parry",
      "specialForces": "parry"
    }
    "###);
}

#[test]
fn test_action_tagging_shape() {
    let action = CombatAction::Special {
        actor: "p1".to_string(),
        target: "e1".to_string(),
        segments: 2.0,
    };
    insta::assert_json_snapshot!(action, @r###"
    {
      "type": "special",
      "actor": "p1",
      "target": "e1",
      "segments": 2.0
    }
    "###);
}
