pub mod cards;
pub mod rulesets;
pub mod type_chart;
