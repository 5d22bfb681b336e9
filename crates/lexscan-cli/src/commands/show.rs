use crate::output;
use lexscan_core::analysis::parse_reply;
use lexscan_core::error::LexscanError;
use lexscan_core::export;
use lexscan_core::model::AnalysisRecord;
use std::path::Path;

/// Render an exported report.
pub fn run(report: &Path, output_format: &str) -> Result<(), LexscanError> {
    let record = export::read_report(report)?;
    render(&record, output_format)
}

/// Parse a raw model reply saved to a file, as the analyzer would.
pub fn run_reply(reply_file: &Path, output_format: &str) -> Result<(), LexscanError> {
    let reply = std::fs::read_to_string(reply_file)?;
    let record = parse_reply(&reply)?;
    render(&record, output_format)
}

fn render(record: &AnalysisRecord, output_format: &str) -> Result<(), LexscanError> {
    match output_format {
        "json" => output::json::print(record)?,
        _ => output::text::print(record),
    }
    Ok(())
}
