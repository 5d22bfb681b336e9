use crate::args::RulesArgs;
use lexscan_core::analysis::prompt::build_prompt;
use lexscan_core::error::LexscanError;
use lexscan_core::extraction::{extract_text, PdfBackend};
use std::path::PathBuf;

pub fn run(pdf_file: PathBuf, backend: PdfBackend, rules: &RulesArgs) -> Result<(), LexscanError> {
    let ruleset = rules.load()?;
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = backend.extractor();
    let text = extract_text(&pdf_bytes, extractor.as_ref())?;

    if text.is_empty() {
        return Err(LexscanError::NothingToAnalyze);
    }

    println!("{}", build_prompt(text.as_str(), &ruleset));
    Ok(())
}
