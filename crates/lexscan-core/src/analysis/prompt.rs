use crate::model::SectionKey;
use crate::rules::schema::RuleSetDef;
use serde_json::Value;
use std::fmt::Write;

const SUMMARY_BULLETS: usize = 5;

/// Build the analysis prompt for `document_text`.
///
/// The document is embedded verbatim. The JSON skeleton lists every
/// section key and one `rule_checks` entry per rule in `rules`.
pub fn build_prompt(document_text: &str, rules: &RuleSetDef) -> String {
    let mut prompt = String::with_capacity(document_text.len() + 2048);

    prompt.push_str(
        "Analyze the following legislative document and provide structured output.\n\n",
    );
    prompt.push_str("DOCUMENT TEXT:\n");
    prompt.push_str(document_text);
    prompt.push_str("\n\nProvide output in this JSON format only:\n");
    prompt.push_str(&json_skeleton(rules));
    prompt.push_str(
        "\n\nUse \"pass\" or \"fail\" for status and an integer from 0 to 100 for confidence.\n",
    );
    prompt.push_str("Return ONLY the JSON object, nothing else.");

    prompt
}

fn json_skeleton(rules: &RuleSetDef) -> String {
    let bullets: Vec<String> = (1..=SUMMARY_BULLETS)
        .map(|i| format!("\"bullet{i}\""))
        .collect();

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{{");
    let _ = writeln!(out, "  \"summary\": [{}],", bullets.join(", "));
    let _ = writeln!(out, "  \"sections\": {{");
    for (i, key) in SectionKey::ALL.iter().enumerate() {
        let comma = if i + 1 < SectionKey::ALL.len() { "," } else { "" };
        let _ = writeln!(out, "    \"{}\": \"text\"{}", key.as_str(), comma);
    }
    let _ = writeln!(out, "  }},");
    let _ = writeln!(out, "  \"rule_checks\": [");
    for (i, rule) in rules.rules.iter().enumerate() {
        let comma = if i + 1 < rules.rules.len() { "," } else { "" };
        let _ = writeln!(
            out,
            "    {{\"rule\": {}, \"status\": \"pass\", \"evidence\": \"text\", \"confidence\": 85}}{}",
            Value::String(rule.rule.clone()),
            comma
        );
    }
    let _ = writeln!(out, "  ]");
    let _ = write!(out, "}}");
    out
}
