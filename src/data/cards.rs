use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpecialMove {
    pub name: String,
    pub damage: i32,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardData {
    pub id: u32,
    pub name: String,
    #[serde(default, alias = "type")]
    pub types: Vec<String>,
    pub hp: i32,
    #[serde(rename = "maxHp")]
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    #[serde(rename = "specialMove")]
    pub special_move: SpecialMove,
}

impl CardData {
    pub fn stat_total(&self) -> i32 {
        self.hp + self.attack + self.defense
    }

    pub fn rarity(&self) -> Rarity {
        Rarity::from_stats(self.hp, self.attack, self.defense)
    }
}

/// Derived from the stat total, never stored with the card.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    pub fn from_stats(hp: i32, attack: i32, defense: i32) -> Self {
        let total = hp + attack + defense;
        if total >= 300 {
            Rarity::Legendary
        } else if total >= 200 {
            Rarity::Rare
        } else if total >= 120 {
            Rarity::Uncommon
        } else {
            Rarity::Common
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
        }
    }
}

#[derive(Clone, Debug)]
pub struct CardDatabase {
    cards: HashMap<u32, CardData>,
}

impl CardDatabase {
    pub fn new() -> Self {
        Self {
            cards: HashMap::new(),
        }
    }

    /// Tiny hardcoded roster used as a fallback when the bundled catalog
    /// cannot be parsed, and by tests that do not care about the full set.
    pub fn minimal() -> Self {
        let mut db = Self::new();
        db.insert(CardData {
            id: 157,
            name: "Typhlosion".to_string(),
            types: vec!["Fire".to_string()],
            hp: 78,
            max_hp: 78,
            attack: 84,
            defense: 78,
            special_move: SpecialMove {
                name: "Eruption".to_string(),
                damage: 60,
                description: "More powerful when HP is high".to_string(),
            },
        });
        db.insert(CardData {
            id: 160,
            name: "Feraligatr".to_string(),
            types: vec!["Water".to_string()],
            hp: 85,
            max_hp: 85,
            attack: 105,
            defense: 100,
            special_move: SpecialMove {
                name: "Hydro Pump".to_string(),
                damage: 55,
                description: "Powerful water blast".to_string(),
            },
        });
        db.insert(CardData {
            id: 154,
            name: "Meganium".to_string(),
            types: vec!["Grass".to_string()],
            hp: 80,
            max_hp: 80,
            attack: 82,
            defense: 100,
            special_move: SpecialMove {
                name: "Petal Dance".to_string(),
                damage: 55,
                description: "Powerful but confusing".to_string(),
            },
        });
        db.insert(CardData {
            id: 161,
            name: "Pichu".to_string(),
            types: vec!["Electric".to_string()],
            hp: 20,
            max_hp: 20,
            attack: 40,
            defense: 15,
            special_move: SpecialMove {
                name: "Thunder Shock".to_string(),
                damage: 15,
                description: "Weak electric attack".to_string(),
            },
        });
        db
    }

    pub fn insert(&mut self, card: CardData) {
        self.cards.insert(card.id, card);
    }

    pub fn get(&self, card_id: u32) -> Option<&CardData> {
        self.cards.get(&card_id)
    }

    pub fn as_map(&self) -> &HashMap<u32, CardData> {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Accepts either a bare card array or a `{"cards": [...]}` wrapper, the
    /// two shapes the frontend exports its catalog in.
    pub fn load_from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        let list_value = match value.as_object() {
            Some(obj) => obj.get("cards").cloned().unwrap_or(value.clone()),
            None => value.clone(),
        };
        let cards: Vec<CardData> = serde_json::from_value(list_value)?;
        let mut db = Self::new();
        for card in cards {
            db.insert(card);
        }
        Ok(db)
    }

    pub fn load_from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let db = Self::load_from_json_str(&content)?;
        Ok(db)
    }

    pub fn load_default() -> Result<Self, serde_json::Error> {
        const DEFAULT_CARDS_JSON: &str = include_str!("../../data/cards.json");
        Self::load_from_json_str(DEFAULT_CARDS_JSON)
    }
}

impl Default for CardDatabase {
    fn default() -> Self {
        Self::load_default().unwrap_or_else(|_| Self::minimal())
    }
}
