use crate::core::sim::DuelResult;
use crate::core::state::{BattleOutcome, BattleState, CombatantState, Phase};
use crate::data::cards::{CardData, CardDatabase, Rarity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Single storage key holding the whole id -> record map as a JSON string,
/// mirroring how the browser UI keeps its stats in one localStorage slot.
pub const STATS_KEY: &str = "cardStats";

/// The persistence capability the engine depends on. The browser side backs
/// this with localStorage; tools back it with a JSON file; tests use
/// [`MemoryStore`].
pub trait StatStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinLossRecord {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

/// Malformed or missing stored stats degrade to an empty map; the next write
/// replaces them.
pub fn load_stats(store: &dyn StatStore) -> HashMap<u32, WinLossRecord> {
    let Some(raw) = store.get(STATS_KEY) else {
        return HashMap::new();
    };
    serde_json::from_str(&raw).unwrap_or_default()
}

pub fn save_stats(
    store: &mut dyn StatStore,
    stats: &HashMap<u32, WinLossRecord>,
) -> Result<(), String> {
    let raw = serde_json::to_string(stats).map_err(|e| format!("Failed to encode stats: {}", e))?;
    store.set(STATS_KEY, raw);
    Ok(())
}

/// Writes the winner's win and the loser's loss exactly once per battle.
/// Repeat calls on the same state return `Ok(None)` without touching the
/// store, so a re-rendering caller cannot double-count.
pub fn record_outcome(
    state: &mut BattleState,
    store: &mut dyn StatStore,
) -> Result<Option<BattleOutcome>, String> {
    if state.phase != Phase::Finished {
        return Err(format!(
            "No outcome to record: the battle is in the {} phase.",
            state.phase.label()
        ));
    }
    if state.outcome_recorded {
        return Ok(None);
    }
    let outcome = state
        .outcome()
        .ok_or_else(|| "Finished battle has no winner.".to_string())?;

    let mut stats = load_stats(store);
    stats.entry(outcome.winner_id).or_default().wins += 1;
    stats.entry(outcome.loser_id).or_default().losses += 1;
    save_stats(store, &stats)?;

    state.outcome_recorded = true;
    Ok(Some(outcome))
}

/// Duel outcomes share the battle bookkeeping: one win, one loss, same
/// storage key. Every call counts one played duel.
pub fn record_duel(duel: &DuelResult, store: &mut dyn StatStore) -> Result<(), String> {
    let mut stats = load_stats(store);
    stats.entry(duel.winner_id).or_default().wins += 1;
    stats.entry(duel.loser_id).or_default().losses += 1;
    save_stats(store, &stats)
}

/// One finished battle in the shape the leaderboard endpoint accepts.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BattleReport {
    pub combatant_a: String,
    pub combatant_b: String,
    pub winner_name: String,
}

impl BattleReport {
    pub fn from_battle(state: &BattleState) -> Option<Self> {
        let winner_side = state.winner?;
        Some(Self {
            combatant_a: state.combatants.first()?.name.clone(),
            combatant_b: state.combatants.get(1)?.name.clone(),
            winner_name: state.combatant(winner_side).name.clone(),
        })
    }

    pub fn from_duel(duel: &DuelResult, a: &CombatantState, b: &CombatantState) -> Self {
        let winner_name = if duel.winner_id == a.id {
            a.name.clone()
        } else {
            b.name.clone()
        };
        Self {
            combatant_a: a.name.clone(),
            combatant_b: b.name.clone(),
            winner_name,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RosterEntry {
    pub card: CardData,
    pub rarity: Rarity,
    pub record: WinLossRecord,
}

/// Catalog entries merged with their stored win/loss records, sorted by card
/// id for stable display.
pub fn build_roster(db: &CardDatabase, store: &dyn StatStore) -> Vec<RosterEntry> {
    let stats = load_stats(store);
    let mut roster: Vec<RosterEntry> = db
        .as_map()
        .values()
        .map(|card| RosterEntry {
            rarity: card.rarity(),
            record: stats.get(&card.id).copied().unwrap_or_default(),
            card: card.clone(),
        })
        .collect();
    roster.sort_by_key(|entry| entry.card.id);
    roster
}
