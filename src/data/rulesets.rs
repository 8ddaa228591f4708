use crate::core::damage::BattleSettings;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Named tuning presets. Keys are the ruleset names players pick from
/// ("classic", "sudden_death", ...), values are full engine settings.
#[derive(Clone, Debug)]
pub struct RulesetDatabase {
    rulesets: HashMap<String, BattleSettings>,
}

impl RulesetDatabase {
    pub fn new() -> Self {
        Self {
            rulesets: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: &str, settings: BattleSettings) {
        self.rulesets.insert(name.to_string(), settings);
    }

    pub fn get(&self, name: &str) -> Option<&BattleSettings> {
        self.rulesets.get(name)
    }

    pub fn as_map(&self) -> &HashMap<String, BattleSettings> {
        &self.rulesets
    }

    pub fn len(&self) -> usize {
        self.rulesets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rulesets.is_empty()
    }

    /// Presets rely on serde defaults, so a ruleset only has to spell out
    /// the knobs it changes.
    pub fn load_from_yaml_str(yaml: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let json_value = yaml_to_json(value);
        let rulesets: HashMap<String, BattleSettings> = serde_json::from_value(json_value)?;
        let mut db = Self::new();
        for (name, settings) in rulesets {
            db.rulesets.insert(name, settings);
        }
        Ok(db)
    }

    pub fn load_from_yaml_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Self::load_from_yaml_str(&content)
    }

    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        const DEFAULT_RULESETS_YAML: &str = include_str!("../../data/rulesets.yaml");
        Self::load_from_yaml_str(DEFAULT_RULESETS_YAML)
    }
}

impl Default for RulesetDatabase {
    fn default() -> Self {
        Self::load_default().unwrap_or_else(|_| {
            let mut db = Self::new();
            db.insert("classic", BattleSettings::default());
            db
        })
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> serde_json::Value {
    match value {
        serde_yaml::Value::Null => serde_json::Value::Null,
        serde_yaml::Value::Bool(b) => serde_json::Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                serde_json::Value::Number(i.into())
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            } else {
                serde_json::Value::Null
            }
        }
        serde_yaml::Value::String(s) => serde_json::Value::String(s),
        serde_yaml::Value::Sequence(seq) => {
            serde_json::Value::Array(seq.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let mut obj = serde_json::Map::new();
            for (k, v) in map {
                if let serde_yaml::Value::String(key) = k {
                    obj.insert(key, yaml_to_json(v));
                }
            }
            serde_json::Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}
