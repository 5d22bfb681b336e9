pub mod builtin;
pub mod schema;

use crate::error::LexscanError;
use schema::RuleSetDef;
use std::collections::HashSet;
use std::path::Path;

/// Load a ruleset from a JSON file.
pub fn load_ruleset(path: &Path) -> Result<RuleSetDef, LexscanError> {
    let content = std::fs::read_to_string(path).map_err(|e| LexscanError::RulesetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_ruleset(&content, path)
}

/// Parse a ruleset from a JSON string.
pub fn parse_ruleset(json: &str, source: &Path) -> Result<RuleSetDef, LexscanError> {
    let ruleset: RuleSetDef = serde_json::from_str(json).map_err(|e| LexscanError::RulesetLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_ruleset(&ruleset)?;
    Ok(ruleset)
}

/// Parse a ruleset from a JSON string (no file path context).
pub fn parse_ruleset_str(json: &str) -> Result<RuleSetDef, LexscanError> {
    let ruleset: RuleSetDef = serde_json::from_str(json).map_err(LexscanError::Json)?;
    validate_ruleset(&ruleset)?;
    Ok(ruleset)
}

/// Validate that a ruleset is well-formed.
pub fn validate_ruleset(ruleset: &RuleSetDef) -> Result<(), LexscanError> {
    if ruleset.name.trim().is_empty() {
        return Err(LexscanError::RulesetInvalid("name must not be empty".into()));
    }

    if ruleset.rules.is_empty() {
        return Err(LexscanError::RulesetInvalid("rules must not be empty".into()));
    }

    let mut seen = HashSet::new();
    for (i, rule) in ruleset.rules.iter().enumerate() {
        let text = rule.rule.trim();
        if text.is_empty() {
            return Err(LexscanError::RulesetInvalid(format!(
                "rule #{} has empty text",
                i + 1
            )));
        }
        if !seen.insert(text.to_lowercase()) {
            return Err(LexscanError::RulesetInvalid(format!(
                "duplicate rule '{}'",
                text
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_valid_ruleset() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "rules": [
                { "rule": "Act must define key terms" },
                { "rule": "Act must include penalties", "note": "offences" }
            ]
        }"#;
        let rs = parse_ruleset_str(json).unwrap();
        assert_eq!(rs.name, "Test");
        assert_eq!(rs.rules.len(), 2);
        assert_eq!(rs.rules[1].note.as_deref(), Some("offences"));
    }

    #[test]
    fn test_empty_rules_rejected() {
        let json = r#"{ "name": "Bad", "version": "1.0", "rules": [] }"#;
        assert!(matches!(
            parse_ruleset_str(json),
            Err(LexscanError::RulesetInvalid(_))
        ));
    }

    #[test]
    fn test_blank_rule_rejected() {
        let json = r#"{ "name": "Bad", "version": "1.0", "rules": [ { "rule": "  " } ] }"#;
        assert!(parse_ruleset_str(json).is_err());
    }

    #[test]
    fn test_duplicate_rule_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "rules": [ { "rule": "Define terms" }, { "rule": "define terms" } ]
        }"#;
        assert!(parse_ruleset_str(json).is_err());
    }

    #[test]
    fn test_load_ruleset_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        match load_ruleset(file.path()) {
            Err(LexscanError::RulesetLoad { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected RulesetLoad, got {other:?}"),
        }
    }
}
