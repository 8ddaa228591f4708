//! Balance Simulator
//!
//! Runs every ordered card pairing through automatic battles and reports
//! per-card win rates, so ruleset tweaks can be sanity checked before they
//! reach players.
//!
//! Usage:
//!   cargo run --bin balance-sim -- \
//!     --games 50 \
//!     --ruleset sudden_death \
//!     --csv target/balance.csv \
//!     --seed 7

use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::path::PathBuf;

use arena_engine::core::battle::BattleEngine;
use arena_engine::core::factory::create_combatant;
use arena_engine::core::sim::run_auto_battle;
use arena_engine::core::state::{create_battle_state, CombatantState, Side};
use arena_engine::data::cards::CardDatabase;
use arena_engine::data::rulesets::RulesetDatabase;

#[derive(Debug)]
struct Config {
    games: usize,
    ruleset: String,
    csv_path: Option<PathBuf>,
    seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            games: 20,
            ruleset: "classic".to_string(),
            csv_path: None,
            seed: 12345,
        }
    }
}

fn parse_args() -> Config {
    let mut config = Config::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                if i + 1 < args.len() {
                    config.games = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--ruleset" => {
                if i + 1 < args.len() {
                    config.ruleset = args[i + 1].clone();
                    i += 1;
                }
            }
            "--csv" => {
                if i + 1 < args.len() {
                    config.csv_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().unwrap_or(12345);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!(
        r#"Balance Simulator - Auto-battle every card pairing and report win rates

USAGE:
    cargo run --bin balance-sim -- [OPTIONS]

OPTIONS:
    --games <N>         Battles per ordered pairing
                        Default: 20
    --ruleset <NAME>    Ruleset preset to simulate under
                        Default: classic
    --csv <PATH>        Also write the per-card table to a CSV file
    --seed <N>          Seed for the deterministic dice
                        Default: 12345
    --help, -h          Print this help message

EXAMPLES:
    # Quick pass under the classic rules
    cargo run --bin balance-sim

    # Heavier pass under sudden death, exported for a spreadsheet
    cargo run --bin balance-sim -- --games 100 --ruleset sudden_death --csv balance.csv
"#
    );
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    games: u32,
    wins: u32,
}

impl Tally {
    fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games as f64 * 100.0
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = parse_args();

    println!("🚀 Balance Simulator");
    println!("====================");
    println!("🎲 Ruleset: {}", config.ruleset);
    println!("🔁 Games per pairing: {}", config.games);
    println!("🌱 Seed: {}", config.seed);
    println!();

    let card_db = CardDatabase::load_default()?;
    let rulesets = RulesetDatabase::load_default().unwrap_or_default();
    let settings = rulesets
        .get(&config.ruleset)
        .cloned()
        .ok_or_else(|| format!("Unknown ruleset: {}", config.ruleset))?;
    let engine = BattleEngine::with_settings(settings);

    let mut cards: Vec<_> = card_db.as_map().values().collect();
    cards.sort_by_key(|card| card.id);
    let combatants: Vec<CombatantState> = cards
        .iter()
        .map(|card| create_combatant(card))
        .collect::<Result<_, _>>()?;
    println!("🃏 Cards in the pool: {}", combatants.len());

    let mut seed = config.seed;
    let mut rng = move || {
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (seed as f64) / (u64::MAX as f64)
    };

    let mut tallies: HashMap<u32, Tally> = HashMap::new();
    let mut total_battles: u64 = 0;
    let mut opener_wins: u64 = 0;
    let mut total_exchanges: u64 = 0;

    for opener in &combatants {
        for follower in &combatants {
            if opener.id == follower.id {
                continue;
            }
            for _ in 0..config.games {
                let state = create_battle_state(vec![opener.clone(), follower.clone()])?;
                let final_state = run_auto_battle(&state, &engine, &mut rng)?;
                let Some(outcome) = final_state.outcome() else {
                    continue;
                };

                tallies.entry(opener.id).or_default().games += 1;
                tallies.entry(follower.id).or_default().games += 1;
                tallies.entry(outcome.winner_id).or_default().wins += 1;

                total_battles += 1;
                total_exchanges += final_state.turn as u64;
                if final_state.winner == Some(Side::Player1) {
                    opener_wins += 1;
                }
            }
        }
    }

    let mut rows: Vec<_> = cards
        .iter()
        .map(|card| {
            let tally = tallies.get(&card.id).copied().unwrap_or_default();
            (card, tally)
        })
        .collect();
    rows.sort_by(|a, b| {
        b.1.win_rate()
            .partial_cmp(&a.1.win_rate())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    println!();
    println!("📊 Win rates:");
    println!("─────────────────────────────────────────────────────────");
    for (card, tally) in &rows {
        println!(
            "  {:<12} {:<11} {:>6} games {:>6} wins {:>6.1}%",
            card.name,
            format!("[{}]", card.rarity().label()),
            tally.games,
            tally.wins,
            tally.win_rate()
        );
    }
    println!("─────────────────────────────────────────────────────────");
    println!();
    if total_battles > 0 {
        println!(
            "⚖️  First-strike win share: {:.1}%",
            opener_wins as f64 / total_battles as f64 * 100.0
        );
        println!(
            "⏱️  Average battle length: {:.1} exchanges",
            total_exchanges as f64 / total_battles as f64
        );
    }

    if let Some(csv_path) = &config.csv_path {
        let mut writer = csv::Writer::from_path(csv_path)?;
        writer.write_record(["id", "name", "rarity", "games", "wins", "winRate"])?;
        for (card, tally) in &rows {
            writer.write_record([
                card.id.to_string(),
                card.name.clone(),
                card.rarity().label().to_string(),
                tally.games.to_string(),
                tally.wins.to_string(),
                format!("{:.1}", tally.win_rate()),
            ])?;
        }
        writer.flush()?;
        println!("💾 Table written to {:?}", csv_path);
    }

    Ok(())
}
