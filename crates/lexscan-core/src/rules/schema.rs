use serde::{Deserialize, Serialize};

/// A checklist of compliance rules the model is asked to evaluate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSetDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub rules: Vec<RuleDef>,
}

/// A single rule within a checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDef {
    /// Assertion text, copied verbatim into the prompt.
    pub rule: String,
    /// Guidance for humans reading `rules explain`. Not sent to the model.
    #[serde(default)]
    pub note: Option<String>,
}
