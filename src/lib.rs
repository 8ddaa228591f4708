pub mod core;
pub mod data;

pub use self::core::{
    battle::{is_battle_over, resolve_exchange, start_fighting, BattleEngine},
    damage::{compute_exchange, crit_streak, BattleSettings, DamageModifier},
    dice::{roll_die, DEFAULT_DIE_SIDES},
    factory::create_combatant,
    records::{
        build_roster, load_stats, record_duel, record_outcome, save_stats, BattleReport,
        MemoryStore, RosterEntry, StatStore, WinLossRecord, STATS_KEY,
    },
    replay::replay_battle,
    sim::{quick_duel, run_auto_battle, DuelResult},
    state::{
        create_battle_state, BattleOutcome, BattleState, CombatantState, ExchangeResult, Phase,
        Side,
    },
};
pub use self::data::{
    cards::{CardData, CardDatabase, Rarity, SpecialMove},
    rulesets::RulesetDatabase,
    type_chart::TypeChart,
};

#[cfg(target_arch = "wasm32")]
pub mod wasm;
