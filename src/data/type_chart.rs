use std::collections::HashMap;

pub const SUPER_EFFECTIVE: f32 = 1.25;
pub const RESISTED: f32 = 0.8;
pub const NEUTRAL: f32 = 1.0;

pub const ALL_TYPES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

#[derive(Clone, Debug)]
pub struct TypeChart {
    strong_against: HashMap<String, Vec<String>>,
}

impl TypeChart {
    pub fn new() -> Self {
        let mut strong_against = HashMap::new();
        let mut add_entry = |type_name: &str, strong: &[&str]| {
            strong_against.insert(
                type_name.to_string(),
                strong.iter().map(|v| v.to_string()).collect(),
            );
        };

        // normal, ice, bug, and poison hit nothing super-effectively
        add_entry("normal", &[]);
        add_entry("fire", &["grass", "bug", "steel", "ice"]);
        add_entry("water", &["fire", "ground", "rock"]);
        add_entry("electric", &["water", "flying"]);
        add_entry("grass", &["water", "ground", "rock"]);
        add_entry("ice", &[]);
        add_entry("fighting", &["normal", "rock", "steel", "ice", "dark"]);
        add_entry("poison", &[]);
        add_entry("ground", &["fire", "electric", "poison", "rock", "steel"]);
        add_entry("flying", &["grass", "fighting", "bug"]);
        add_entry("psychic", &["fighting", "poison"]);
        add_entry("bug", &[]);
        add_entry("rock", &["fire", "ice", "flying", "bug"]);
        add_entry("ghost", &["psychic", "ghost"]);
        add_entry("dragon", &["dragon"]);
        add_entry("dark", &["psychic", "ghost"]);
        add_entry("steel", &["ice", "rock", "fairy"]);
        add_entry("fairy", &["fighting", "dragon", "dark"]);

        Self { strong_against }
    }

    /// Attacker types are scanned in order against the defender's, and the
    /// super-effective check runs before the resisted one. The first match wins;
    /// multiple matches never stack.
    pub fn effectiveness(&self, attacker_types: &[String], defender_types: &[String]) -> f32 {
        for attacker_type in attacker_types {
            let attacker_key = attacker_type.to_lowercase();
            for defender_type in defender_types {
                let defender_key = defender_type.to_lowercase();
                if self.beats(&attacker_key, &defender_key) {
                    return SUPER_EFFECTIVE;
                }
                if self.beats(&defender_key, &attacker_key) {
                    return RESISTED;
                }
            }
        }
        NEUTRAL
    }

    fn beats(&self, attacker_key: &str, defender_key: &str) -> bool {
        self.strong_against
            .get(attacker_key)
            .map(|targets| targets.iter().any(|t| t == defender_key))
            .unwrap_or(false)
    }
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_known_type(type_name: &str) -> bool {
    let key = type_name.to_lowercase();
    ALL_TYPES.iter().any(|t| *t == key)
}
