use arena_engine::core::battle::{is_battle_over, start_fighting, BattleEngine};
use arena_engine::core::state::{create_battle_state, BattleState, CombatantState, Phase, Side};

fn combatant(id: u32, name: &str, types: &[&str], max_hp: i32, special_damage: i32) -> CombatantState {
    CombatantState {
        id,
        name: name.to_string(),
        types: types.iter().map(|t| t.to_string()).collect(),
        attack: 80,
        defense: 80,
        hp: max_hp,
        max_hp,
        special_name: "Test Strike".to_string(),
        special_damage,
    }
}

#[test]
fn battles_need_exactly_two_combatants() {
    let err = create_battle_state(vec![combatant(1, "Solo", &["Normal"], 80, 50)])
        .expect_err("one combatant");
    assert!(err.contains("exactly two"));

    let err = create_battle_state(Vec::new()).expect_err("empty");
    assert!(err.contains("exactly two"));
}

#[test]
fn combatants_enter_at_full_health() {
    let mut wounded = combatant(1, "Wounded", &["Normal"], 80, 50);
    wounded.hp = 3;
    let state = create_battle_state(vec![wounded, combatant(2, "Fresh", &["Normal"], 90, 50)])
        .expect("two combatants");
    assert_eq!(state.combatants[0].hp, 80);
    assert_eq!(state.combatants[1].hp, 90);
    assert_eq!(state.phase, Phase::Setup);
    assert_eq!(state.current_turn, Side::Player1);
}

#[test]
fn exchanges_are_rejected_before_the_battle_starts() {
    let state = create_battle_state(vec![
        combatant(1, "A", &["Normal"], 100, 50),
        combatant(2, "B", &["Normal"], 100, 50),
    ])
    .expect("two combatants");

    let engine = BattleEngine::default();
    let mut draws = 0;
    let mut rng = || {
        draws += 1;
        0.5
    };
    let err = engine
        .resolve_exchange(&state, Side::Player1, &mut rng)
        .expect_err("setup phase");
    assert!(err.contains("has not started"));
    // A rejected exchange must not even consume randomness.
    assert_eq!(draws, 0);
}

#[test]
fn start_fighting_moves_setup_to_fighting_once() {
    let state = create_battle_state(vec![
        combatant(1, "A", &["Normal"], 100, 50),
        combatant(2, "B", &["Normal"], 100, 50),
    ])
    .expect("two combatants");

    let fighting = start_fighting(&state).expect("start");
    assert_eq!(fighting.phase, Phase::Fighting);

    let err = start_fighting(&fighting).expect_err("already started");
    assert!(err.contains("fighting phase"));
}

#[test]
fn turn_alternates_after_a_non_terminal_exchange() {
    let state = create_battle_state(vec![
        combatant(1, "A", &["Normal"], 100, 50),
        combatant(2, "B", &["Normal"], 100, 50),
    ])
    .expect("two combatants");
    let state = start_fighting(&state).expect("start");
    let engine = BattleEngine::default();
    let mut rng = || 0.3;

    let after_first = engine
        .resolve_exchange(&state, Side::Player1, &mut rng)
        .expect("first exchange");
    assert_eq!(after_first.current_turn, Side::Player2);
    assert_eq!(after_first.turn, 1);
    assert_eq!(after_first.log.len(), 1);

    let after_second = engine
        .resolve_exchange(&after_first, Side::Player2, &mut rng)
        .expect("second exchange");
    assert_eq!(after_second.current_turn, Side::Player1);
    assert_eq!(after_second.turn, 2);
    assert_eq!(after_second.log.len(), 2);
}

#[test]
fn only_the_side_to_move_may_attack() {
    let state = create_battle_state(vec![
        combatant(1, "A", &["Normal"], 100, 50),
        combatant(2, "B", &["Normal"], 100, 50),
    ])
    .expect("two combatants");
    let state = start_fighting(&state).expect("start");

    let err = BattleEngine::default()
        .resolve_exchange(&state, Side::Player2, &mut || 0.5)
        .expect_err("out of turn");
    assert!(err.contains("player1's turn"));
}

#[test]
fn knockout_sets_the_winner_and_floors_hp_at_zero() {
    let state = create_battle_state(vec![
        combatant(1, "Flame", &["Fire"], 200, 60),
        combatant(2, "Leaf", &["Grass"], 20, 50),
    ])
    .expect("two combatants");
    let state = start_fighting(&state).expect("start");
    let engine = BattleEngine::default();

    // Max hits against 20 hp deal 10; two of them finish the battle.
    let state = engine
        .resolve_exchange_with_rolls(&state, Side::Player1, 6, 1)
        .expect("first hit");
    assert_eq!(state.combatants[1].hp, 10);
    assert_eq!(state.winner, None);

    let state = engine
        .resolve_exchange_with_rolls(&state, Side::Player2, 1, 6)
        .expect("counter attack");
    assert!(state.combatants[0].hp > 0);

    let state = engine
        .resolve_exchange_with_rolls(&state, Side::Player1, 6, 1)
        .expect("finishing hit");
    assert_eq!(state.combatants[1].hp, 0);
    assert_eq!(state.winner, Some(Side::Player1));
    assert_eq!(state.phase, Phase::Finished);
    assert!(is_battle_over(&state));

    let outcome = state.outcome().expect("outcome");
    assert_eq!(outcome.winner_id, 1);
    assert_eq!(outcome.loser_id, 2);
}

#[test]
fn finished_battles_reject_further_exchanges() {
    let state = create_battle_state(vec![
        combatant(1, "Flame", &["Fire"], 200, 60),
        combatant(2, "Leaf", &["Grass"], 20, 50),
    ])
    .expect("two combatants");
    let mut state = start_fighting(&state).expect("start");
    let engine = BattleEngine::default();

    while !is_battle_over(&state) {
        state = engine
            .resolve_exchange_with_rolls(&state, state.current_turn, 6, 1)
            .expect("exchange");
    }
    let exchanges = state.log.len();

    let err = engine
        .resolve_exchange_with_rolls(&state, state.current_turn, 3, 3)
        .expect_err("battle over");
    assert!(err.contains("already finished"));
    assert_eq!(state.log.len(), exchanges);
    assert_eq!(state.winner, Some(Side::Player1));
}

#[test]
fn the_damage_window_bounds_battle_length() {
    // 255 hp and a 15% minimum hit: seven landed hits always finish a side.
    let state = create_battle_state(vec![
        combatant(1, "Wall", &["Normal"], 255, 50),
        combatant(2, "Wall Too", &["Normal"], 255, 50),
    ])
    .expect("two combatants");
    let mut state = start_fighting(&state).expect("start");
    let engine = BattleEngine::default();
    let mut rng = || 0.5;

    let mut exchanges = 0;
    while !is_battle_over(&state) && exchanges < 50 {
        exchanges += 1;
        state = engine
            .resolve_exchange(&state, state.current_turn, &mut rng)
            .expect("exchange");
    }
    assert!(is_battle_over(&state));
    assert!(exchanges <= 14, "battle took {} exchanges", exchanges);
    assert_eq!(state.turn, exchanges);
}

#[test]
fn snapshots_without_log_fields_still_parse() {
    // States persisted before the log and the recording flag existed.
    let raw = r#"{
        "combatants": [
            {"id": 1, "name": "A", "types": ["Normal"], "attack": 80, "defense": 80,
             "hp": 62, "max_hp": 100, "special_name": "Test Strike", "special_damage": 50},
            {"id": 2, "name": "B", "types": ["Normal"], "attack": 80, "defense": 80,
             "hp": 100, "max_hp": 100, "special_name": "Test Strike", "special_damage": 50}
        ],
        "phase": "fighting",
        "current_turn": "player2",
        "winner": null,
        "turn": 1
    }"#;
    let state: BattleState = serde_json::from_str(raw).expect("parse snapshot");
    assert!(state.log.is_empty());
    assert!(!state.outcome_recorded);
    assert_eq!(state.phase, Phase::Fighting);
    assert_eq!(state.current_turn, Side::Player2);

    let resumed = BattleEngine::default()
        .resolve_exchange_with_rolls(&state, Side::Player2, 3, 3)
        .expect("resume from snapshot");
    assert_eq!(resumed.log.len(), 1);
}
