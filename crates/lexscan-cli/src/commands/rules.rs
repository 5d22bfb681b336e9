use lexscan_core::error::LexscanError;
use lexscan_core::rules::builtin;
use std::path::Path;

pub fn list() -> Result<(), LexscanError> {
    println!("Available predefined checklists:\n");
    for name in builtin::PRESETS {
        let rs = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!(
            "  {:<12} {} (v{}){}",
            name, rs.name, rs.version, default_marker
        );
        if let Some(ref desc) = rs.description {
            println!("               {}", desc);
        }
        println!("               {} rules", rs.rules.len());
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), LexscanError> {
    let rs = builtin::load_preset(preset)?;

    println!("{} (version {})\n", rs.name, rs.version);

    if let Some(ref desc) = rs.description {
        println!("{}\n", desc);
    }

    println!(
        "The model is asked to mark each of these {} rules as pass or fail,",
        rs.rules.len()
    );
    println!("quote supporting evidence and give a 0-100 confidence:\n");

    for (i, rule) in rs.rules.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, rule.rule);
        if let Some(ref note) = rule.note {
            println!("      {}", note);
        }
    }

    println!();
    println!("Verdicts come from the model and are not verified against the text.");

    Ok(())
}

pub fn schema() -> Result<(), LexscanError> {
    print!(
        r#"JSON Checklist Schema
=====================

A checklist file lists the compliance rules that `lexscan analyze` asks
the model to check. Each rule becomes one entry in the "rule_checks"
array of the requested reply, in file order.

Top-level fields:
  name          (string, required)  Human-readable name of the checklist
  description   (string, optional)  What this checklist is for
  version       (string, required)  Version identifier (e.g., "2025.1")
  rules         (array, required)   Non-empty list of rules (see below)

Each rule in the "rules" array:
  rule          (string, required)  The requirement, phrased as an
                                    instruction (e.g., "Must define key
                                    terms"). Rules must be unique,
                                    ignoring case.
  note          (string, optional)  Explanation shown by
                                    `lexscan rules explain`. Not sent
                                    to the model.

Example:
{{
  "name": "Grant scheme checklist",
  "description": "House rules for funding regulations",
  "version": "1.0",
  "rules": [
    {{ "rule": "Must define key terms" }},
    {{
      "rule": "Must state an appeals procedure",
      "note": "Required by the scheme's governance policy"
    }}
  ]
}}
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), LexscanError> {
    let rs = lexscan_core::rules::load_ruleset(file)?;

    println!("Checklist '{}' (v{}) is valid.", rs.name, rs.version);
    println!("  Rules: {}", rs.rules.len());

    // Suspicious but legal: rules that will read oddly inside the prompt
    let mut warnings = Vec::new();
    for rule in &rs.rules {
        if rule.rule.contains('\n') {
            warnings.push(format!("rule '{}' spans several lines", rule.rule.trim()));
        }
        if rule.rule.chars().count() > 200 {
            warnings.push(format!(
                "rule '{}...' is longer than 200 characters",
                rule.rule.chars().take(40).collect::<String>()
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
