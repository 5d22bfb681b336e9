use lexscan_core::model::{AnalysisRecord, Column, SectionKey};
use std::fmt::Write;

pub fn print(record: &AnalysisRecord) {
    print!("{}", render(record));
}

pub fn render(record: &AnalysisRecord) -> String {
    let mut out = String::new();

    out.push_str("=== Summary ===\n\n");
    if record.summary.is_empty() {
        out.push_str("  (no summary returned)\n");
    }
    for (i, point) in record.summary.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, point);
    }
    out.push('\n');

    out.push_str("=== Key Legislative Sections ===\n\n");
    // Terminal output has no columns: left column first, then right
    for key in SectionKey::in_column(Column::Left).chain(SectionKey::in_column(Column::Right)) {
        let _ = writeln!(out, "  {}", key.label());
        let _ = writeln!(out, "    {}\n", record.sections.text_or_na(key));
    }

    out.push_str("=== Rule Compliance Check ===\n\n");
    let width = record
        .rule_checks
        .iter()
        .map(|c| c.status_label().len())
        .max()
        .unwrap_or(4);
    for check in &record.rule_checks {
        let _ = writeln!(
            out,
            "  [{:<width$}] {}",
            check.status_label(),
            check.rule_text(),
            width = width
        );
        let _ = writeln!(out, "    Evidence: {}", check.evidence_text());
        let _ = writeln!(out, "    Confidence: {}%", check.confidence_pct());
    }
    if !record.rule_checks.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "  Overall: {}", record.rules_passed_line());

    out
}
