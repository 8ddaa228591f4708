use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Player1 => 0,
            Side::Player2 => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Player1 => "player1",
            Side::Player2 => "player2",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Fighting,
    Finished,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Fighting => "fighting",
            Phase::Finished => "finished",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CombatantState {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub attack: i32,
    pub defense: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub special_name: String,
    pub special_damage: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExchangeResult {
    pub attacker: Side,
    pub attacker_id: u32,
    pub defender_id: u32,
    pub damage: i32,
    pub critical: bool,
    pub effectiveness: f32,
    pub attacker_roll: u32,
    pub defender_roll: u32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BattleOutcome {
    pub winner_id: u32,
    pub loser_id: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BattleState {
    pub combatants: Vec<CombatantState>,
    pub phase: Phase,
    pub current_turn: Side,
    pub winner: Option<Side>,
    pub turn: u32,
    #[serde(default)]
    pub log: Vec<ExchangeResult>,
    #[serde(default)]
    pub outcome_recorded: bool,
}

impl BattleState {
    pub fn combatant(&self, side: Side) -> &CombatantState {
        &self.combatants[side.index()]
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut CombatantState {
        &mut self.combatants[side.index()]
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        let winner_side = self.winner?;
        Some(BattleOutcome {
            winner_id: self.combatant(winner_side).id,
            loser_id: self.combatant(winner_side.opponent()).id,
        })
    }
}

/// Battles always start from defensive copies: each combatant enters at full
/// health regardless of the hp the caller's roster entry carried.
pub fn create_battle_state(combatants: Vec<CombatantState>) -> Result<BattleState, String> {
    if combatants.len() != 2 {
        return Err(format!(
            "A battle needs exactly two combatants, got {}.",
            combatants.len()
        ));
    }
    Ok(BattleState {
        combatants: combatants
            .into_iter()
            .map(|mut combatant| {
                combatant.hp = combatant.max_hp;
                combatant
            })
            .collect(),
        phase: Phase::Setup,
        current_turn: Side::Player1,
        winner: None,
        turn: 0,
        log: Vec::new(),
        outcome_recorded: false,
    })
}
