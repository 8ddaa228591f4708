use arena_engine::core::battle::{is_battle_over, start_fighting, BattleEngine};
use arena_engine::core::factory::create_combatant;
use arena_engine::core::records::{
    build_roster, load_stats, record_duel, record_outcome, BattleReport, StatStore,
};
use arena_engine::core::sim::{quick_duel, DuelResult};
use arena_engine::core::state::{create_battle_state, BattleState, CombatantState, Side};
use arena_engine::data::cards::CardDatabase;
use arena_engine::data::rulesets::RulesetDatabase;
use inquire::Select;

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

const STATS_FILE: &str = "battle_stats.json";
const PENDING_RESULTS_FILE: &str = "pending_results.json";

const MODE_BATTLE: &str = "Full battle";
const MODE_DUEL: &str = "Quick duel";

/// StatStore backed by a JSON file next to the binary, standing in for the
/// browser's localStorage.
struct FileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileStore {
    fn load(path: &str) -> Self {
        let values = fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self {
            path: PathBuf::from(path),
            values,
        }
    }

    fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let raw = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl StatStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

fn main() {
    println!("╔═══════════════════════════════════════╗");
    println!("║       ⚔️  Card Battle Arena CLI  ⚔️       ║");
    println!("╚═══════════════════════════════════════╝");
    println!();

    let card_db = CardDatabase::load_default().expect("Failed to load the card catalog");
    let rulesets = RulesetDatabase::load_default().unwrap_or_default();
    let mut store = FileStore::load(STATS_FILE);
    let mut rng = || rand_f64();

    let mode = Select::new("Pick a game:", vec![MODE_BATTLE, MODE_DUEL])
        .prompt()
        .unwrap_or(MODE_BATTLE);
    println!();

    // Roster with lifetime records.
    println!("📋 Card roster:");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let roster = build_roster(&card_db, &store);
    for (i, entry) in roster.iter().enumerate() {
        let types_str = entry.card.types.join(" / ");
        println!(
            "  {}. {} ({}) [{}]",
            i + 1,
            entry.card.name,
            types_str,
            entry.rarity.label()
        );
        println!(
            "     HP {} | ATK {} | DEF {} | {} ({} dmg)",
            entry.card.max_hp,
            entry.card.attack,
            entry.card.defense,
            entry.card.special_move.name,
            entry.card.special_move.damage
        );
        println!("     Record: {}W - {}L", entry.record.wins, entry.record.losses);
        println!();
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("🎮 Pick two cards for the arena (two numbers, space separated):");
    let picks = read_numbers(2, roster.len());
    let first_card = &roster[picks[0]].card;
    let second_card = &roster[picks[1]].card;

    let first = create_combatant(first_card).expect("Failed to ready the first card");
    let second = create_combatant(second_card).expect("Failed to ready the second card");

    if mode == MODE_DUEL {
        play_duel(first, second, &mut store, &mut rng);
        return;
    }

    // Ruleset pick, classic first.
    println!();
    let mut ruleset_names: Vec<String> = rulesets.as_map().keys().cloned().collect();
    ruleset_names.sort();
    if let Some(pos) = ruleset_names.iter().position(|name| name == "classic") {
        ruleset_names.swap(0, pos);
    }
    let ruleset_name = Select::new("Pick a ruleset:", ruleset_names)
        .with_page_size(12)
        .prompt()
        .unwrap_or_else(|_| "classic".to_string());
    let settings = rulesets.get(&ruleset_name).cloned().unwrap_or_default();
    let engine = BattleEngine::with_settings(settings);

    // A dice duel decides who strikes first.
    println!();
    println!("🎲 Opening duel: higher roll strikes first!");
    let duel = quick_duel(&first, &second, &mut rng);
    print_duel_rolls(&duel, &first, &second);
    let (opener, follower) = if duel.winner_id == first.id {
        (first, second)
    } else {
        (second, first)
    };
    println!("  ✨ {} strikes first!", opener.name);
    println!();

    let state = create_battle_state(vec![opener, follower]).expect("Failed to set up the battle");
    let mut state = start_fighting(&state).expect("Failed to start the battle");

    println!("════════════════════════════════════════");
    println!("          ⚔️  Battle start! ⚔️          ");
    println!("════════════════════════════════════════");
    println!();

    while !is_battle_over(&state) {
        print_battle_status(&state);
        let attacker_name = state.combatant(state.current_turn).name.clone();
        println!("🎯 {} attacks. Press Enter to roll the dice...", attacker_name);
        wait_for_enter();

        state = engine
            .resolve_exchange(&state, state.current_turn, &mut rng)
            .expect("Exchange failed");
        print_last_exchange(&state);
        println!();
    }

    println!("════════════════════════════════════════");
    let winner_name = state
        .winner
        .map(|side| state.combatant(side).name.clone())
        .unwrap_or_default();
    println!("      🏆 {} wins the battle! 🏆      ", winner_name);
    println!("════════════════════════════════════════");
    println!();

    match record_outcome(&mut state, &mut store) {
        Ok(Some(outcome)) => {
            let stats = load_stats(&store);
            for combatant in &state.combatants {
                let record = stats.get(&combatant.id).copied().unwrap_or_default();
                let marker = if combatant.id == outcome.winner_id {
                    "🏆"
                } else {
                    "💔"
                };
                println!(
                    "  {} {}: {}W - {}L",
                    marker, combatant.name, record.wins, record.losses
                );
            }
        }
        Ok(None) => {}
        Err(err) => println!("⚠️  Could not record the outcome: {}", err),
    }
    if let Err(err) = store.save() {
        println!("⚠️  Could not save records to {}: {}", STATS_FILE, err);
    }

    if let Some(report) = BattleReport::from_battle(&state) {
        match queue_report(report) {
            Ok(count) => println!(
                "📤 Result queued for the leaderboard ({} pending, run results-sync to upload).",
                count
            ),
            Err(err) => println!("⚠️  Could not queue the result: {}", err),
        }
    }
}

/// The original arena's sibling game: one roll each, higher wins, recorded
/// into the same lifetime stats and leaderboard queue as full battles.
fn play_duel(
    first: CombatantState,
    second: CombatantState,
    store: &mut FileStore,
    rng: &mut dyn FnMut() -> f64,
) {
    println!();
    println!("🎲 Quick duel: one roll each, higher wins!");
    let duel = quick_duel(&first, &second, rng);
    print_duel_rolls(&duel, &first, &second);

    let winner_name = if duel.winner_id == first.id {
        &first.name
    } else {
        &second.name
    };
    println!();
    println!("════════════════════════════════════════");
    println!("      🏆 {} wins the duel! 🏆      ", winner_name);
    println!("════════════════════════════════════════");
    println!();

    match record_duel(&duel, store) {
        Ok(()) => {
            let stats = load_stats(store);
            for combatant in [&first, &second] {
                let record = stats.get(&combatant.id).copied().unwrap_or_default();
                let marker = if combatant.id == duel.winner_id {
                    "🏆"
                } else {
                    "💔"
                };
                println!(
                    "  {} {}: {}W - {}L",
                    marker, combatant.name, record.wins, record.losses
                );
            }
        }
        Err(err) => println!("⚠️  Could not record the outcome: {}", err),
    }
    if let Err(err) = store.save() {
        println!("⚠️  Could not save records to {}: {}", STATS_FILE, err);
    }

    let report = BattleReport::from_duel(&duel, &first, &second);
    match queue_report(report) {
        Ok(count) => println!(
            "📤 Result queued for the leaderboard ({} pending, run results-sync to upload).",
            count
        ),
        Err(err) => println!("⚠️  Could not queue the result: {}", err),
    }
}

fn print_duel_rolls(duel: &DuelResult, first: &CombatantState, second: &CombatantState) {
    for (i, (roll_a, roll_b)) in duel.rolls.iter().enumerate() {
        println!(
            "  {} rolls {} | {} rolls {}",
            first.name, roll_a, second.name, roll_b
        );
        if roll_a == roll_b && i + 1 < duel.rolls.len() {
            println!("  Tie! Rolling again...");
        }
    }
    if duel.decided_by_coin_flip {
        println!("  Still tied after every re-roll. A coin flip settles it.");
    }
}

fn print_battle_status(state: &BattleState) {
    println!("─────────────────────────────────────────");
    println!("  Exchange {}", state.turn + 1);
    println!("─────────────────────────────────────────");
    for side in [Side::Player1, Side::Player2] {
        let combatant = state.combatant(side);
        let marker = if side == state.current_turn { "▶" } else { " " };
        println!(
            "  {} {} ({}) {}",
            marker,
            combatant.name,
            combatant.types.join("/"),
            hp_bar_string(combatant.hp, combatant.max_hp)
        );
    }
    println!();
}

fn print_last_exchange(state: &BattleState) {
    let Some(entry) = state.log.last() else {
        return;
    };
    let attacker = name_of(state, entry.attacker_id);
    let defender = name_of(state, entry.defender_id);
    println!(
        "  🎲 {} rolls {} | {} rolls {}",
        attacker, entry.attacker_roll, defender, entry.defender_roll
    );
    if entry.critical {
        println!("  💥 CRITICAL HIT!");
    }
    if entry.effectiveness > 1.0 {
        println!("  ✨ It's super effective!");
    } else if entry.effectiveness < 1.0 {
        println!("  🛡️  It's not very effective...");
    }
    println!("  {} takes {} damage!", defender, entry.damage);
}

fn name_of(state: &BattleState, id: u32) -> String {
    state
        .combatants
        .iter()
        .find(|combatant| combatant.id == id)
        .map(|combatant| combatant.name.clone())
        .unwrap_or_else(|| format!("#{}", id))
}

fn hp_bar_string(hp: i32, max_hp: i32) -> String {
    let percentage = (hp as f64 / max_hp as f64 * 100.0) as i32;
    let bars = (hp as f64 / max_hp as f64 * 10.0) as usize;
    let filled = "█".repeat(bars);
    let empty = "░".repeat(10 - bars);
    format!("[{}{}] {}/{} ({}%)", filled, empty, hp, max_hp, percentage)
}

fn queue_report(report: BattleReport) -> Result<usize, Box<dyn std::error::Error>> {
    let mut pending: Vec<BattleReport> = fs::read_to_string(PENDING_RESULTS_FILE)
        .ok()
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default();
    pending.push(report);
    fs::write(PENDING_RESULTS_FILE, serde_json::to_string_pretty(&pending)?)?;
    Ok(pending.len())
}

fn wait_for_enter() {
    print!("> ");
    io::stdout().flush().ok();
    let mut input = String::new();
    io::stdin().read_line(&mut input).ok();
}

fn read_numbers(count: usize, max: usize) -> Vec<usize> {
    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            continue;
        }

        let numbers: Vec<usize> = input
            .split_whitespace()
            .filter_map(|s| s.parse::<usize>().ok())
            .filter(|&n| n >= 1 && n <= max)
            .map(|n| n - 1)
            .take(count)
            .collect();

        if numbers.len() == count {
            return numbers;
        }

        println!("Enter {} valid numbers (1-{}).", count, max);
    }
}

fn rand_f64() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    static mut SEED: u64 = 12345;
    unsafe {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos() as u64;
        SEED = SEED.wrapping_mul(6364136223846793005).wrapping_add(now % 1000);
        (SEED as f64) / (u64::MAX as f64)
    }
}
