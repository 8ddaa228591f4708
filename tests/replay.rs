use arena_engine::core::battle::{is_battle_over, start_fighting, BattleEngine};
use arena_engine::core::damage::BattleSettings;
use arena_engine::core::replay::{replay_battle, replay_battle_with_engine};
use arena_engine::core::state::{create_battle_state, CombatantState, Phase};

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

fn lcg(seed: u64) -> impl FnMut() -> f64 {
    let mut state = seed;
    move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state as f64) / (u64::MAX as f64)
    }
}

#[test]
fn replay_reproduces_the_recorded_battle() {
    let initial = create_battle_state(vec![
        combatant(157, "Typhlosion", &["Fire"], 78, 60),
        combatant(160, "Feraligatr", &["Water"], 85, 55),
    ])
    .expect("two combatants");

    let engine = BattleEngine::default();
    let mut rng = lcg(42);
    let mut recorded = start_fighting(&initial).expect("start");
    while !is_battle_over(&recorded) {
        recorded = engine
            .resolve_exchange(&recorded, recorded.current_turn, &mut rng)
            .expect("exchange");
    }

    let replayed = replay_battle(&initial, &recorded.log).expect("replay");
    assert_eq!(replayed.winner, recorded.winner);
    assert_eq!(replayed.turn, recorded.turn);
    assert_eq!(replayed.combatants[0].hp, recorded.combatants[0].hp);
    assert_eq!(replayed.combatants[1].hp, recorded.combatants[1].hp);
    assert_eq!(replayed.log.len(), recorded.log.len());
}

#[test]
fn replay_detects_a_tampered_log() {
    let initial = create_battle_state(vec![
        combatant(1, "A", &["Normal"], 100, 50),
        combatant(2, "B", &["Normal"], 100, 50),
    ])
    .expect("two combatants");
    let engine = BattleEngine::default();

    let fighting = start_fighting(&initial).expect("start");
    let recorded = engine
        .resolve_exchange_with_rolls(&fighting, fighting.current_turn, 6, 1)
        .expect("exchange");

    let mut log = recorded.log.clone();
    log[0].damage += 1;

    let err = replay_battle(&initial, &log).expect_err("tampered");
    assert!(err.contains("Replay diverged at exchange 1"));
}

#[test]
fn replay_detects_a_settings_mismatch() {
    let initial = create_battle_state(vec![
        combatant(1, "A", &["Normal"], 80, 50),
        combatant(2, "B", &["Normal"], 80, 50),
    ])
    .expect("two combatants");

    let heavy = BattleEngine::with_settings(BattleSettings {
        attack_bonus: 10,
        ..BattleSettings::default()
    });
    let fighting = start_fighting(&initial).expect("start");
    let recorded = heavy
        .resolve_exchange_with_rolls(&fighting, fighting.current_turn, 3, 2)
        .expect("exchange");

    // Replaying under the classic settings computes different damage.
    let err = replay_battle(&initial, &recorded.log).expect_err("wrong settings");
    assert!(err.contains("Replay diverged"));

    // With the original settings the replay goes through.
    replay_battle_with_engine(&initial, &recorded.log, &heavy).expect("matching settings");
}

#[test]
fn replaying_an_empty_log_just_starts_the_battle() {
    let initial = create_battle_state(vec![
        combatant(1, "A", &["Normal"], 100, 50),
        combatant(2, "B", &["Normal"], 100, 50),
    ])
    .expect("two combatants");

    let replayed = replay_battle(&initial, &[]).expect("empty log");
    assert_eq!(replayed.phase, Phase::Fighting);
    assert_eq!(replayed.turn, 0);
    assert!(replayed.log.is_empty());
}
