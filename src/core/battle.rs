use crate::core::damage::{compute_exchange, crit_streak, BattleSettings};
use crate::core::dice::{clamp_roll, roll_die};
use crate::core::state::{BattleState, Phase, Side};
use crate::data::type_chart::TypeChart;

#[derive(Clone, Debug)]
pub struct BattleEngine {
    pub type_chart: TypeChart,
    pub settings: BattleSettings,
}

impl Default for BattleEngine {
    fn default() -> Self {
        Self {
            type_chart: TypeChart::new(),
            settings: BattleSettings::default(),
        }
    }
}

impl BattleEngine {
    pub fn new(type_chart: TypeChart, settings: BattleSettings) -> Self {
        Self {
            type_chart,
            settings,
        }
    }

    pub fn with_settings(settings: BattleSettings) -> Self {
        Self::new(TypeChart::new(), settings)
    }

    /// Draws one fresh roll per side and resolves the exchange. The state is
    /// never mutated in place; a rejected call leaves no trace, not even
    /// consumed rng draws.
    pub fn resolve_exchange(
        &self,
        state: &BattleState,
        side: Side,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<BattleState, String> {
        self.check_can_resolve(state, side)?;
        let attacker_roll = roll_die(rng, self.settings.die_sides);
        let defender_roll = roll_die(rng, self.settings.die_sides);
        Ok(self.apply_exchange(state, side, attacker_roll, defender_roll))
    }

    /// Same contract with caller-supplied rolls, for UIs that reveal the dice
    /// themselves and for replays. Out-of-range rolls are clamped.
    pub fn resolve_exchange_with_rolls(
        &self,
        state: &BattleState,
        side: Side,
        attacker_roll: u32,
        defender_roll: u32,
    ) -> Result<BattleState, String> {
        self.check_can_resolve(state, side)?;
        let attacker_roll = clamp_roll(attacker_roll, self.settings.die_sides);
        let defender_roll = clamp_roll(defender_roll, self.settings.die_sides);
        Ok(self.apply_exchange(state, side, attacker_roll, defender_roll))
    }

    fn check_can_resolve(&self, state: &BattleState, side: Side) -> Result<(), String> {
        if state.combatants.len() != 2 {
            return Err(format!(
                "Battle state needs exactly two combatants, found {}.",
                state.combatants.len()
            ));
        }
        match state.phase {
            Phase::Fighting => {}
            Phase::Setup => {
                return Err("Exchange rejected: the battle has not started yet.".to_string())
            }
            Phase::Finished => {
                return Err("Exchange rejected: the battle is already finished.".to_string())
            }
        }
        if side != state.current_turn {
            return Err(format!(
                "Exchange rejected: it is {}'s turn, not {}'s.",
                state.current_turn.label(),
                side.label()
            ));
        }
        Ok(())
    }

    fn apply_exchange(
        &self,
        state: &BattleState,
        side: Side,
        attacker_roll: u32,
        defender_roll: u32,
    ) -> BattleState {
        let mut next = state.clone();
        let defender_side = side.opponent();
        let streak = crit_streak(&next.log, side);
        let result = compute_exchange(
            next.combatant(side),
            next.combatant(defender_side),
            side,
            attacker_roll,
            defender_roll,
            streak,
            &self.type_chart,
            &self.settings,
        );

        let defender = next.combatant_mut(defender_side);
        defender.hp = (defender.hp - result.damage).max(0);
        let defender_down = defender.hp == 0;

        next.turn += 1;
        next.log.push(result);

        if defender_down {
            next.winner = Some(side);
            next.phase = Phase::Finished;
        } else {
            next.current_turn = defender_side;
        }
        next
    }
}

/// Setup -> Fighting. The presentation delay before this transition belongs to
/// the caller; the engine has no timing of its own.
pub fn start_fighting(state: &BattleState) -> Result<BattleState, String> {
    if state.phase != Phase::Setup {
        return Err(format!(
            "Cannot start fighting from the {} phase.",
            state.phase.label()
        ));
    }
    let mut next = state.clone();
    next.phase = Phase::Fighting;
    Ok(next)
}

pub fn resolve_exchange(
    state: &BattleState,
    side: Side,
    rng: &mut dyn FnMut() -> f64,
) -> Result<BattleState, String> {
    BattleEngine::default().resolve_exchange(state, side, rng)
}

pub fn is_battle_over(state: &BattleState) -> bool {
    state.phase == Phase::Finished
}
