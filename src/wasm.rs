use crate::core::battle::{is_battle_over, start_fighting, BattleEngine};
use crate::core::damage::BattleSettings;
use crate::core::factory::create_combatant;
use crate::core::state::{
    create_battle_state, BattleOutcome, BattleState, CombatantState, ExchangeResult, Phase, Side,
};
use crate::data::cards::CardDatabase;
use crate::data::rulesets::RulesetDatabase;
use crate::data::type_chart::TypeChart;
use js_sys::Math;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

static CARD_DB: Lazy<CardDatabase> =
    Lazy::new(|| CardDatabase::load_default().unwrap_or_else(|_| CardDatabase::minimal()));
static RULESETS_DB: Lazy<RulesetDatabase> =
    Lazy::new(|| RulesetDatabase::load_default().unwrap_or_default());
static TYPE_CHART: Lazy<TypeChart> = Lazy::new(TypeChart::new);

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CombatantStateWire {
    id: u32,
    name: String,
    types: Vec<String>,
    attack: i32,
    defense: i32,
    hp: i32,
    max_hp: i32,
    special_name: String,
    special_damage: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeResultWire {
    attacker: String,
    attacker_id: u32,
    defender_id: u32,
    damage: i32,
    critical: bool,
    effectiveness: f32,
    attacker_roll: u32,
    defender_roll: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BattleStateWire {
    combatants: Vec<CombatantStateWire>,
    phase: String,
    current_turn: String,
    winner: Option<String>,
    turn: u32,
    #[serde(default)]
    log: Vec<ExchangeResultWire>,
    #[serde(default)]
    outcome_recorded: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BattleOutcomeWire {
    winner_id: u32,
    loser_id: u32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RosterCardWire {
    id: u32,
    name: String,
    types: Vec<String>,
    hp: i32,
    max_hp: i32,
    attack: i32,
    defense: i32,
    special_name: String,
    special_damage: i32,
    special_description: String,
    rarity: String,
    stat_total: i32,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolveOptionsWire {
    ruleset: Option<String>,
    settings: Option<BattleSettings>,
    attacker_roll: Option<u32>,
    defender_roll: Option<u32>,
}

fn js_err(message: impl ToString) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn side_from_js(value: &str) -> Result<Side, String> {
    match value {
        "player1" => Ok(Side::Player1),
        "player2" => Ok(Side::Player2),
        other => Err(format!("Unknown side: {}", other)),
    }
}

fn phase_from_js(value: &str) -> Result<Phase, String> {
    match value {
        "setup" => Ok(Phase::Setup),
        "fighting" => Ok(Phase::Fighting),
        "finished" => Ok(Phase::Finished),
        other => Err(format!("Unknown phase: {}", other)),
    }
}

impl From<CombatantState> for CombatantStateWire {
    fn from(combatant: CombatantState) -> Self {
        Self {
            id: combatant.id,
            name: combatant.name,
            types: combatant.types,
            attack: combatant.attack,
            defense: combatant.defense,
            hp: combatant.hp,
            max_hp: combatant.max_hp,
            special_name: combatant.special_name,
            special_damage: combatant.special_damage,
        }
    }
}

impl From<CombatantStateWire> for CombatantState {
    fn from(combatant: CombatantStateWire) -> Self {
        Self {
            id: combatant.id,
            name: combatant.name,
            types: combatant.types,
            attack: combatant.attack,
            defense: combatant.defense,
            hp: combatant.hp,
            max_hp: combatant.max_hp,
            special_name: combatant.special_name,
            special_damage: combatant.special_damage,
        }
    }
}

impl From<ExchangeResult> for ExchangeResultWire {
    fn from(result: ExchangeResult) -> Self {
        Self {
            attacker: result.attacker.label().to_string(),
            attacker_id: result.attacker_id,
            defender_id: result.defender_id,
            damage: result.damage,
            critical: result.critical,
            effectiveness: result.effectiveness,
            attacker_roll: result.attacker_roll,
            defender_roll: result.defender_roll,
        }
    }
}

impl TryFrom<ExchangeResultWire> for ExchangeResult {
    type Error = String;

    fn try_from(result: ExchangeResultWire) -> Result<Self, Self::Error> {
        Ok(Self {
            attacker: side_from_js(&result.attacker)?,
            attacker_id: result.attacker_id,
            defender_id: result.defender_id,
            damage: result.damage,
            critical: result.critical,
            effectiveness: result.effectiveness,
            attacker_roll: result.attacker_roll,
            defender_roll: result.defender_roll,
        })
    }
}

impl From<BattleState> for BattleStateWire {
    fn from(state: BattleState) -> Self {
        Self {
            combatants: state
                .combatants
                .into_iter()
                .map(CombatantStateWire::from)
                .collect(),
            phase: state.phase.label().to_string(),
            current_turn: state.current_turn.label().to_string(),
            winner: state.winner.map(|side| side.label().to_string()),
            turn: state.turn,
            log: state.log.into_iter().map(ExchangeResultWire::from).collect(),
            outcome_recorded: state.outcome_recorded,
        }
    }
}

impl TryFrom<BattleStateWire> for BattleState {
    type Error = String;

    fn try_from(state: BattleStateWire) -> Result<Self, Self::Error> {
        if state.combatants.len() != 2 {
            return Err(format!(
                "Battle state needs exactly two combatants, found {}.",
                state.combatants.len()
            ));
        }
        Ok(Self {
            combatants: state
                .combatants
                .into_iter()
                .map(CombatantState::from)
                .collect(),
            phase: phase_from_js(&state.phase)?,
            current_turn: side_from_js(&state.current_turn)?,
            winner: match state.winner {
                Some(side) => Some(side_from_js(&side)?),
                None => None,
            },
            turn: state.turn,
            log: state
                .log
                .into_iter()
                .map(ExchangeResult::try_from)
                .collect::<Result<_, _>>()?,
            outcome_recorded: state.outcome_recorded,
        })
    }
}

impl From<BattleOutcome> for BattleOutcomeWire {
    fn from(outcome: BattleOutcome) -> Self {
        Self {
            winner_id: outcome.winner_id,
            loser_id: outcome.loser_id,
        }
    }
}

/// Explicit settings win over a named ruleset; with neither the classic
/// numbers apply.
fn settings_from_options(options: &ResolveOptionsWire) -> Result<BattleSettings, String> {
    if let Some(settings) = &options.settings {
        return Ok(settings.clone());
    }
    if let Some(name) = &options.ruleset {
        return RULESETS_DB
            .get(name)
            .cloned()
            .ok_or_else(|| format!("Unknown ruleset: {}", name));
    }
    Ok(BattleSettings::default())
}

#[wasm_bindgen(js_name = listCards)]
pub fn list_cards_wasm() -> Result<JsValue, JsValue> {
    let mut roster: Vec<RosterCardWire> = CARD_DB
        .as_map()
        .values()
        .map(|card| RosterCardWire {
            id: card.id,
            name: card.name.clone(),
            types: card.types.clone(),
            hp: card.hp,
            max_hp: card.max_hp,
            attack: card.attack,
            defense: card.defense,
            special_name: card.special_move.name.clone(),
            special_damage: card.special_move.damage,
            special_description: card.special_move.description.clone(),
            rarity: card.rarity().label().to_string(),
            stat_total: card.stat_total(),
        })
        .collect();
    roster.sort_by_key(|card| card.id);
    serde_wasm_bindgen::to_value(&roster).map_err(js_err)
}

#[wasm_bindgen(js_name = listRulesets)]
pub fn list_rulesets_wasm() -> Result<JsValue, JsValue> {
    let mut names: Vec<&String> = RULESETS_DB.as_map().keys().collect();
    names.sort();
    serde_wasm_bindgen::to_value(&names).map_err(js_err)
}

#[wasm_bindgen(js_name = createCombatant)]
pub fn create_combatant_wasm(card_id: u32) -> Result<JsValue, JsValue> {
    let card = CARD_DB
        .get(card_id)
        .ok_or_else(|| js_err(format!("Unknown card id: {}", card_id)))?;
    let combatant = create_combatant(card).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&CombatantStateWire::from(combatant)).map_err(js_err)
}

#[wasm_bindgen(js_name = createBattleState)]
pub fn create_battle_state_wasm(combatants: JsValue) -> Result<JsValue, JsValue> {
    let combatants_wire: Vec<CombatantStateWire> =
        serde_wasm_bindgen::from_value(combatants).map_err(js_err)?;
    let combatants: Vec<CombatantState> = combatants_wire
        .into_iter()
        .map(CombatantState::from)
        .collect();
    let state = create_battle_state(combatants).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&BattleStateWire::from(state)).map_err(js_err)
}

#[wasm_bindgen(js_name = startFighting)]
pub fn start_fighting_wasm(state: JsValue) -> Result<JsValue, JsValue> {
    let state_wire: BattleStateWire = serde_wasm_bindgen::from_value(state).map_err(js_err)?;
    let state = BattleState::try_from(state_wire).map_err(js_err)?;
    let next_state = start_fighting(&state).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&BattleStateWire::from(next_state)).map_err(js_err)
}

#[wasm_bindgen(js_name = resolveExchange)]
pub fn resolve_exchange_wasm(
    state: JsValue,
    side: String,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let state_wire: BattleStateWire = serde_wasm_bindgen::from_value(state).map_err(js_err)?;
    let options_wire: ResolveOptionsWire = if options.is_undefined() || options.is_null() {
        ResolveOptionsWire::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(js_err)?
    };
    let state = BattleState::try_from(state_wire).map_err(js_err)?;
    let side = side_from_js(&side).map_err(js_err)?;
    let settings = settings_from_options(&options_wire).map_err(js_err)?;
    let engine = BattleEngine::with_settings(settings);

    let next_state = match (options_wire.attacker_roll, options_wire.defender_roll) {
        (Some(attacker_roll), Some(defender_roll)) => engine
            .resolve_exchange_with_rolls(&state, side, attacker_roll, defender_roll)
            .map_err(js_err)?,
        _ => {
            let mut rng = || Math::random();
            engine.resolve_exchange(&state, side, &mut rng).map_err(js_err)?
        }
    };
    serde_wasm_bindgen::to_value(&BattleStateWire::from(next_state)).map_err(js_err)
}

#[wasm_bindgen(js_name = isBattleOver)]
pub fn is_battle_over_wasm(state: JsValue) -> Result<bool, JsValue> {
    let state_wire: BattleStateWire = serde_wasm_bindgen::from_value(state).map_err(js_err)?;
    let state = BattleState::try_from(state_wire).map_err(js_err)?;
    Ok(is_battle_over(&state))
}

#[wasm_bindgen(js_name = battleOutcome)]
pub fn battle_outcome_wasm(state: JsValue) -> Result<JsValue, JsValue> {
    let state_wire: BattleStateWire = serde_wasm_bindgen::from_value(state).map_err(js_err)?;
    let state = BattleState::try_from(state_wire).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&state.outcome().map(BattleOutcomeWire::from)).map_err(js_err)
}

#[wasm_bindgen(js_name = typeEffectiveness)]
pub fn type_effectiveness_wasm(
    attacker_types: JsValue,
    defender_types: JsValue,
) -> Result<f32, JsValue> {
    let attacker_types: Vec<String> =
        serde_wasm_bindgen::from_value(attacker_types).map_err(js_err)?;
    let defender_types: Vec<String> =
        serde_wasm_bindgen::from_value(defender_types).map_err(js_err)?;
    Ok(TYPE_CHART.effectiveness(&attacker_types, &defender_types))
}
