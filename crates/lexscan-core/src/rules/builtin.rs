use crate::error::LexscanError;
use crate::rules::schema::RuleSetDef;

const LEGISLATION_JSON: &str = include_str!("../../../../rules/legislation.json");

/// Available predefined rulesets.
pub const PRESETS: &[&str] = &["legislation"];

/// Preset used when no rules are given.
pub const DEFAULT_PRESET: &str = "legislation";

/// Load a predefined ruleset by name.
pub fn load_preset(name: &str) -> Result<RuleSetDef, LexscanError> {
    match name {
        "legislation" => {
            let ruleset: RuleSetDef = serde_json::from_str(LEGISLATION_JSON)?;
            Ok(ruleset)
        }
        _ => Err(LexscanError::RulesetInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
