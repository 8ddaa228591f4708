use crate::core::state::{CombatantState, ExchangeResult, Side};
use crate::data::type_chart::TypeChart;
use serde::{Deserialize, Serialize};

fn default_die_sides() -> u32 {
    6
}

fn default_base_scale() -> f64 {
    0.2
}

fn default_attack_bonus() -> i32 {
    5
}

fn default_defense_reduction() -> i32 {
    3
}

fn default_crit_multiplier() -> f64 {
    1.5
}

fn default_min_damage_percent() -> f64 {
    0.15
}

fn default_max_damage_percent() -> f64 {
    0.50
}

/// Optional damage stages applied, in declaration order, after the clamped
/// damage is known. Rulesets that want blocking, dodging, or combo streaks
/// declare them here instead of forking the formula.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DamageModifier {
    /// Defender rolls at or above `threshold`: damage is scaled down, but a
    /// connecting hit still deals at least 1.
    Block { threshold: u32, scale: f64 },
    /// Defender rolls exactly `roll`: the hit is avoided outright.
    Dodge { roll: u32 },
    /// Consecutive criticals by the same attacker scale follow-up damage by
    /// `1 + streak * per_hit`, capped at `max_scale`.
    Combo {
        #[serde(rename = "perHit")]
        per_hit: f64,
        #[serde(rename = "maxScale")]
        max_scale: f64,
    },
}

impl DamageModifier {
    pub fn apply(&self, damage: i32, defender_roll: u32, crit_streak: u32) -> i32 {
        match *self {
            DamageModifier::Block { threshold, scale } => {
                if defender_roll >= threshold {
                    ((damage as f64 * scale).floor() as i32).max(1)
                } else {
                    damage
                }
            }
            DamageModifier::Dodge { roll } => {
                if defender_roll == roll {
                    0
                } else {
                    damage
                }
            }
            DamageModifier::Combo { per_hit, max_scale } => {
                if crit_streak == 0 {
                    return damage;
                }
                let scale = (1.0 + crit_streak as f64 * per_hit).min(max_scale);
                (damage as f64 * scale).floor() as i32
            }
        }
    }
}

/// All tunable constants of the damage formula. Named rulesets are just
/// alternative values for this struct; the defaults are the classic arena
/// numbers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BattleSettings {
    #[serde(default = "default_die_sides", rename = "dieSides")]
    pub die_sides: u32,
    #[serde(default = "default_base_scale", rename = "baseScale")]
    pub base_scale: f64,
    #[serde(default = "default_attack_bonus", rename = "attackBonus")]
    pub attack_bonus: i32,
    #[serde(default = "default_defense_reduction", rename = "defenseReduction")]
    pub defense_reduction: i32,
    #[serde(default = "default_crit_multiplier", rename = "critMultiplier")]
    pub crit_multiplier: f64,
    #[serde(default = "default_min_damage_percent", rename = "minDamagePercent")]
    pub min_damage_percent: f64,
    #[serde(default = "default_max_damage_percent", rename = "maxDamagePercent")]
    pub max_damage_percent: f64,
    #[serde(default, rename = "critOnDefenseFumble")]
    pub crit_on_defense_fumble: bool,
    #[serde(default)]
    pub modifiers: Vec<DamageModifier>,
}

impl Default for BattleSettings {
    fn default() -> Self {
        Self {
            die_sides: default_die_sides(),
            base_scale: default_base_scale(),
            attack_bonus: default_attack_bonus(),
            defense_reduction: default_defense_reduction(),
            crit_multiplier: default_crit_multiplier(),
            min_damage_percent: default_min_damage_percent(),
            max_damage_percent: default_max_damage_percent(),
            crit_on_defense_fumble: false,
            modifiers: Vec::new(),
        }
    }
}

/// Counts the attacker's unbroken run of critical hits at the tail of the log.
/// The opponent's interleaved exchanges are skipped; the streak ends at the
/// attacker's most recent non-critical hit.
pub fn crit_streak(log: &[ExchangeResult], side: Side) -> u32 {
    let mut streak = 0;
    for entry in log.iter().rev() {
        if entry.attacker != side {
            continue;
        }
        if !entry.critical {
            break;
        }
        streak += 1;
    }
    streak
}

/// The damage formula. Stats and rolls in, one immutable exchange record out;
/// HP application belongs to the battle layer.
pub fn compute_exchange(
    attacker: &CombatantState,
    defender: &CombatantState,
    attacker_side: Side,
    attacker_roll: u32,
    defender_roll: u32,
    streak: u32,
    type_chart: &TypeChart,
    settings: &BattleSettings,
) -> ExchangeResult {
    let base = (attacker.special_damage as f64 * settings.base_scale).floor() as i32;
    let bonus = attacker_roll as i32 * settings.attack_bonus
        - defender_roll as i32 * settings.defense_reduction;
    let critical = attacker_roll == settings.die_sides
        || (settings.crit_on_defense_fumble && defender_roll == 1);
    let effectiveness = type_chart.effectiveness(&attacker.types, &defender.types);

    let mut raw = ((base + bonus) as f64 * effectiveness as f64).floor() as i32;
    if critical {
        raw = (raw as f64 * settings.crit_multiplier).floor() as i32;
    }

    // Floor at 1 first, then clamp into the percent window of the defender's
    // max hp. The window keeps battles bounded: no one-shot kills, no no-op
    // hits.
    let min_damage = (defender.max_hp as f64 * settings.min_damage_percent).floor() as i32;
    let max_damage = (defender.max_hp as f64 * settings.max_damage_percent).floor() as i32;
    let mut damage = raw.max(1).clamp(min_damage, max_damage.max(min_damage));

    for modifier in &settings.modifiers {
        damage = modifier.apply(damage, defender_roll, streak);
    }

    ExchangeResult {
        attacker: attacker_side,
        attacker_id: attacker.id,
        defender_id: defender.id,
        damage: damage.max(0),
        critical,
        effectiveness,
        attacker_roll,
        defender_roll,
    }
}
