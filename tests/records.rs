use arena_engine::core::records::{
    load_stats, record_duel, record_outcome, save_stats, BattleReport, MemoryStore, StatStore,
    WinLossRecord, STATS_KEY,
};
use arena_engine::core::sim::DuelResult;
use arena_engine::core::state::{create_battle_state, BattleState, CombatantState, Phase, Side};
use std::collections::HashMap;

fn combatant(id: u32, name: &str) -> CombatantState {
    CombatantState {
        id,
        name: name.to_string(),
        types: vec!["Normal".to_string()],
        attack: 80,
        defense: 80,
        hp: 100,
        max_hp: 100,
        special_name: "Test Strike".to_string(),
        special_damage: 50,
    }
}

fn finished_state(winner: Side) -> BattleState {
    let mut state = create_battle_state(vec![
        combatant(7, "Typhlosion"),
        combatant(9, "Feraligatr"),
    ])
    .expect("two combatants");
    state.phase = Phase::Finished;
    state.winner = Some(winner);
    state.combatant_mut(winner.opponent()).hp = 0;
    state
}

#[test]
fn record_outcome_writes_once_per_battle() {
    let mut store = MemoryStore::new();
    let mut state = finished_state(Side::Player1);

    let outcome = record_outcome(&mut state, &mut store)
        .expect("record")
        .expect("first call reports the outcome");
    assert_eq!(outcome.winner_id, 7);
    assert_eq!(outcome.loser_id, 9);

    let stats = load_stats(&store);
    assert_eq!(stats[&7], WinLossRecord { wins: 1, losses: 0 });
    assert_eq!(stats[&9], WinLossRecord { wins: 0, losses: 1 });

    // The same state records nothing twice, no matter how often it is passed.
    let repeat = record_outcome(&mut state, &mut store).expect("repeat call");
    assert!(repeat.is_none());
    let stats = load_stats(&store);
    assert_eq!(stats[&7], WinLossRecord { wins: 1, losses: 0 });
    assert_eq!(stats[&9], WinLossRecord { wins: 0, losses: 1 });
}

#[test]
fn unfinished_battles_have_no_outcome_to_record() {
    let mut store = MemoryStore::new();
    let mut state = create_battle_state(vec![
        combatant(7, "Typhlosion"),
        combatant(9, "Feraligatr"),
    ])
    .expect("two combatants");

    let err = record_outcome(&mut state, &mut store).expect_err("setup phase");
    assert!(err.contains("No outcome to record"));
    assert!(load_stats(&store).is_empty());
}

#[test]
fn stats_accumulate_across_battles() {
    let mut store = MemoryStore::new();

    let mut first = finished_state(Side::Player1);
    record_outcome(&mut first, &mut store).expect("first battle");

    let mut second = finished_state(Side::Player2);
    record_outcome(&mut second, &mut store).expect("second battle");

    let stats = load_stats(&store);
    assert_eq!(stats[&7], WinLossRecord { wins: 1, losses: 1 });
    assert_eq!(stats[&9], WinLossRecord { wins: 1, losses: 1 });
}

#[test]
fn malformed_stored_stats_degrade_to_empty() {
    let mut store = MemoryStore::new();
    store.set(STATS_KEY, "definitely not json".to_string());
    assert!(load_stats(&store).is_empty());

    // The next recorded battle starts a fresh, valid map.
    let mut state = finished_state(Side::Player1);
    record_outcome(&mut state, &mut store).expect("record over garbage");
    let stats = load_stats(&store);
    assert_eq!(stats[&7].wins, 1);
}

#[test]
fn stats_round_trip_through_the_store() {
    let mut store = MemoryStore::new();
    let mut stats = HashMap::new();
    stats.insert(157, WinLossRecord { wins: 3, losses: 1 });
    save_stats(&mut store, &stats).expect("save");
    assert_eq!(load_stats(&store), stats);
}

#[test]
fn battle_report_carries_the_leaderboard_shape() {
    let state = finished_state(Side::Player2);
    let report = BattleReport::from_battle(&state).expect("finished battle");
    assert_eq!(report.combatant_a, "Typhlosion");
    assert_eq!(report.combatant_b, "Feraligatr");
    assert_eq!(report.winner_name, "Feraligatr");

    let value = serde_json::to_value(&report).expect("encode");
    assert_eq!(value["combatantA"], "Typhlosion");
    assert_eq!(value["combatantB"], "Feraligatr");
    assert_eq!(value["winnerName"], "Feraligatr");
}

#[test]
fn battle_report_needs_a_winner() {
    let state = create_battle_state(vec![
        combatant(7, "Typhlosion"),
        combatant(9, "Feraligatr"),
    ])
    .expect("two combatants");
    assert!(BattleReport::from_battle(&state).is_none());
}

#[test]
fn duels_count_into_the_same_stats() {
    let mut store = MemoryStore::new();
    let duel = DuelResult {
        winner_id: 7,
        loser_id: 9,
        rolls: vec![(6, 1)],
        decided_by_coin_flip: false,
    };

    record_duel(&duel, &mut store).expect("first duel");
    let stats = load_stats(&store);
    assert_eq!(stats[&7], WinLossRecord { wins: 1, losses: 0 });
    assert_eq!(stats[&9], WinLossRecord { wins: 0, losses: 1 });

    // Unlike battles, every call is its own duel.
    record_duel(&duel, &mut store).expect("second duel");
    let stats = load_stats(&store);
    assert_eq!(stats[&7], WinLossRecord { wins: 2, losses: 0 });
    assert_eq!(stats[&9], WinLossRecord { wins: 0, losses: 2 });
}

#[test]
fn duel_reports_name_the_winner() {
    let duel = DuelResult {
        winner_id: 9,
        loser_id: 7,
        rolls: vec![(2, 5)],
        decided_by_coin_flip: false,
    };
    let report = BattleReport::from_duel(
        &duel,
        &combatant(7, "Typhlosion"),
        &combatant(9, "Feraligatr"),
    );
    assert_eq!(report.combatant_a, "Typhlosion");
    assert_eq!(report.combatant_b, "Feraligatr");
    assert_eq!(report.winner_name, "Feraligatr");
}
