use crate::core::state::CombatantState;
use crate::data::cards::CardData;
use crate::data::type_chart::is_known_type;

/// Builds a battle-ready combatant from a catalog card. Validation happens
/// here, before any battle state exists: a card that fails never reaches the
/// fighting phase.
pub fn create_combatant(card: &CardData) -> Result<CombatantState, String> {
    if card.name.trim().is_empty() {
        return Err(format!("Card {} has an empty name.", card.id));
    }
    if card.types.is_empty() {
        return Err(format!(
            "'{}' has no types; every card carries one or two.",
            card.name
        ));
    }
    if card.types.len() > 2 {
        return Err(format!(
            "'{}' has {} types; every card carries one or two.",
            card.name,
            card.types.len()
        ));
    }
    for type_name in &card.types {
        if !is_known_type(type_name) {
            return Err(format!("'{}' has unknown type '{}'.", card.name, type_name));
        }
    }
    if card.max_hp <= 0 {
        return Err(format!(
            "'{}' has non-positive max hp ({}).",
            card.name, card.max_hp
        ));
    }
    if card.attack < 0 || card.defense < 0 {
        return Err(format!("'{}' has negative stats.", card.name));
    }
    if card.special_move.damage < 0 {
        return Err(format!(
            "'{}' has a special move with negative damage ({}).",
            card.name, card.special_move.damage
        ));
    }

    Ok(CombatantState {
        id: card.id,
        name: card.name.clone(),
        types: card.types.clone(),
        attack: card.attack,
        defense: card.defense,
        hp: card.max_hp,
        max_hp: card.max_hp,
        special_name: card.special_move.name.clone(),
        special_damage: card.special_move.damage,
    })
}
