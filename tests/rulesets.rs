use arena_engine::core::damage::{BattleSettings, DamageModifier};
use arena_engine::data::rulesets::RulesetDatabase;

#[test]
fn bundled_classic_matches_the_engine_defaults() {
    let db = RulesetDatabase::load_default().expect("load rulesets");
    let classic = db.get("classic").expect("classic exists");
    assert_eq!(*classic, BattleSettings::default());
}

#[test]
fn the_bundled_presets_all_load() {
    let db = RulesetDatabase::load_default().expect("load rulesets");
    for name in [
        "classic",
        "high_roller",
        "blitz",
        "stonewall",
        "sudden_death",
        "punishing",
        "shieldwall",
        "phantom",
        "onslaught",
        "gauntlet",
        "training",
    ] {
        assert!(db.get(name).is_some(), "missing preset {}", name);
    }
    assert!(db.get("nope").is_none());
}

#[test]
fn partial_presets_inherit_unlisted_knobs() {
    let db = RulesetDatabase::load_from_yaml_str("spicy:\n  critMultiplier: 2.0\n")
        .expect("parse yaml");
    let spicy = db.get("spicy").expect("spicy exists");
    assert_eq!(spicy.crit_multiplier, 2.0);
    assert_eq!(spicy.die_sides, 6);
    assert_eq!(spicy.min_damage_percent, 0.15);
    assert!(!spicy.crit_on_defense_fumble);
    assert!(spicy.modifiers.is_empty());
}

#[test]
fn modifier_stages_parse_from_yaml() {
    let db = RulesetDatabase::load_default().expect("load rulesets");

    let shieldwall = db.get("shieldwall").expect("shieldwall");
    assert!(matches!(
        shieldwall.modifiers.as_slice(),
        [DamageModifier::Block { threshold: 5, .. }]
    ));

    let phantom = db.get("phantom").expect("phantom");
    assert!(matches!(
        phantom.modifiers.as_slice(),
        [DamageModifier::Dodge { roll: 6 }]
    ));

    let onslaught = db.get("onslaught").expect("onslaught");
    match onslaught.modifiers.as_slice() {
        [DamageModifier::Combo { per_hit, max_scale }] => {
            assert!((per_hit - 0.25).abs() < 1e-9);
            assert!((max_scale - 2.0).abs() < 1e-9);
        }
        other => panic!("unexpected onslaught modifiers: {:?}", other),
    }

    let gauntlet = db.get("gauntlet").expect("gauntlet");
    assert!(gauntlet.crit_on_defense_fumble);
    assert_eq!(gauntlet.modifiers.len(), 2);
}

#[test]
fn high_roller_moves_the_crit_face() {
    let db = RulesetDatabase::load_default().expect("load rulesets");
    let high_roller = db.get("high_roller").expect("high_roller");
    assert_eq!(high_roller.die_sides, 12);
    // Everything else stays classic.
    assert_eq!(high_roller.crit_multiplier, 1.5);
}

#[test]
fn sudden_death_lifts_the_damage_cap() {
    let db = RulesetDatabase::load_default().expect("load rulesets");
    let sudden_death = db.get("sudden_death").expect("sudden_death");
    assert_eq!(sudden_death.max_damage_percent, 1.0);
    assert_eq!(sudden_death.crit_multiplier, 2.0);
}
