pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod provider;
pub mod rules;
pub mod session;

use analysis::DocumentAnalyzer;
use error::LexscanError;
use extraction::PdfExtractor;
use model::AnalysisRecord;
use serde::Serialize;

/// Result of running one PDF through the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentAnalysis {
    /// Characters of text the extractor produced.
    pub text_chars: usize,
    pub record: AnalysisRecord,
}

/// Main API entry point: extract text from a PDF and analyze it.
///
/// A PDF without extractable text stops before the provider is called.
pub fn analyze_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    analyzer: &DocumentAnalyzer<'_>,
) -> Result<DocumentAnalysis, LexscanError> {
    let text = extraction::extract_text(pdf_bytes, extractor)?;
    if text.is_empty() {
        return Err(LexscanError::NothingToAnalyze);
    }

    let text_chars = text.len();
    tracing::info!(
        backend = extractor.backend_name(),
        chars = text_chars,
        "extracted document text"
    );

    let record = analyzer.analyze(text.as_str())?;
    tracing::info!(
        summary = record.summary.len(),
        sections = record.sections.present_count(),
        rules_passed = record.passed_count(),
        rules_total = record.total_rules(),
        "analysis complete"
    );

    Ok(DocumentAnalysis { text_chars, record })
}
