use crate::core::battle::{is_battle_over, start_fighting, BattleEngine};
use crate::core::dice::{roll_die, DEFAULT_DIE_SIDES};
use crate::core::state::{BattleState, CombatantState, Phase};
use serde::{Deserialize, Serialize};

/// Hard cap on auto-battle exchanges. The clamp window already bounds real
/// battles; the cap only matters for rulesets with zeroing stages.
const MAX_AUTO_EXCHANGES: u32 = 100;

/// Plays a battle to completion with no player input, always attacking on the
/// side whose turn it is.
pub fn run_auto_battle(
    state: &BattleState,
    engine: &BattleEngine,
    rng: &mut dyn FnMut() -> f64,
) -> Result<BattleState, String> {
    let mut next = if state.phase == Phase::Setup {
        start_fighting(state)?
    } else {
        state.clone()
    };
    let mut exchanges = 0;
    while !is_battle_over(&next) && exchanges < MAX_AUTO_EXCHANGES {
        exchanges += 1;
        next = engine.resolve_exchange(&next, next.current_turn, rng)?;
    }
    Ok(next)
}

pub const DUEL_MAX_REROLLS: usize = 5;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DuelResult {
    pub winner_id: u32,
    pub loser_id: u32,
    /// Every roll pair in order, ties included.
    pub rolls: Vec<(u32, u32)>,
    pub decided_by_coin_flip: bool,
}

/// Sudden-death variant: one d6 each, higher face wins outright. Ties re-roll
/// up to [`DUEL_MAX_REROLLS`] times; if the dice still agree, a coin flip
/// settles it so a duel always produces a winner.
pub fn quick_duel(
    a: &CombatantState,
    b: &CombatantState,
    rng: &mut dyn FnMut() -> f64,
) -> DuelResult {
    let mut rolls = Vec::new();
    for _ in 0..=DUEL_MAX_REROLLS {
        let roll_a = roll_die(rng, DEFAULT_DIE_SIDES);
        let roll_b = roll_die(rng, DEFAULT_DIE_SIDES);
        rolls.push((roll_a, roll_b));
        if roll_a != roll_b {
            let (winner, loser) = if roll_a > roll_b { (a, b) } else { (b, a) };
            return DuelResult {
                winner_id: winner.id,
                loser_id: loser.id,
                rolls,
                decided_by_coin_flip: false,
            };
        }
    }
    let (winner, loser) = if rng() < 0.5 { (a, b) } else { (b, a) };
    DuelResult {
        winner_id: winner.id,
        loser_id: loser.id,
        rolls,
        decided_by_coin_flip: true,
    }
}
