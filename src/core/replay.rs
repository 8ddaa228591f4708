use crate::core::battle::{start_fighting, BattleEngine};
use crate::core::state::{BattleState, ExchangeResult, Phase};

pub fn replay_battle(
    initial_state: &BattleState,
    log: &[ExchangeResult],
) -> Result<BattleState, String> {
    replay_battle_with_engine(initial_state, log, &BattleEngine::default())
}

/// Re-derives a battle from its exchange log by feeding the recorded rolls
/// back through the engine. A per-exchange damage mismatch means the log was
/// produced under different settings (or a different chart) and the replay
/// stops with an error instead of silently diverging.
pub fn replay_battle_with_engine(
    initial_state: &BattleState,
    log: &[ExchangeResult],
    engine: &BattleEngine,
) -> Result<BattleState, String> {
    let mut next = if initial_state.phase == Phase::Setup {
        start_fighting(initial_state)?
    } else {
        initial_state.clone()
    };

    for (index, entry) in log.iter().enumerate() {
        next = engine.resolve_exchange_with_rolls(
            &next,
            entry.attacker,
            entry.attacker_roll,
            entry.defender_roll,
        )?;
        let replayed = next
            .log
            .last()
            .ok_or_else(|| "Replay produced no log entry.".to_string())?;
        if replayed.damage != entry.damage {
            return Err(format!(
                "Replay diverged at exchange {}: recorded {} damage, replayed {}.",
                index + 1,
                entry.damage,
                replayed.damage
            ));
        }
    }
    Ok(next)
}
