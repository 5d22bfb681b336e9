use crate::args::{ProviderArgs, RulesArgs};
use crate::output;
use lexscan_core::analysis::DocumentAnalyzer;
use lexscan_core::error::LexscanError;
use lexscan_core::export;
use lexscan_core::extraction::PdfBackend;
use std::path::PathBuf;

pub fn run(
    input_file: PathBuf,
    backend: PdfBackend,
    rules: &RulesArgs,
    provider: &ProviderArgs,
    output_format: &str,
    save_dir: Option<PathBuf>,
) -> Result<(), LexscanError> {
    let ruleset = rules.load()?;
    let client = provider.build_client()?;
    let analyzer = DocumentAnalyzer::for_client(&client, &ruleset);

    let pdf_bytes = std::fs::read(&input_file)?;
    let extractor = backend.extractor();

    eprintln!(
        "Analyzing {} with {} ({} rules)...",
        input_file.display(),
        client.config().model,
        ruleset.rules.len()
    );
    let result = lexscan_core::analyze_pdf(&pdf_bytes, extractor.as_ref(), &analyzer)?;
    eprintln!("Extracted {} characters. Analysis complete!", result.text_chars);

    match output_format {
        "json" => output::json::print(&result.record)?,
        _ => output::text::print(&result.record),
    }

    if let Some(dir) = save_dir {
        let path = export::write_report(&dir, &result.record, &chrono::Local::now())?;
        eprintln!("Report written to {}", path.display());
    }

    Ok(())
}
