use crate::analysis::DocumentAnalyzer;
use crate::error::LexscanError;
use crate::extraction::PdfExtractor;
use crate::model::AnalysisRecord;
use crate::DocumentAnalysis;

/// A status message for the user about the last action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Info(m) | Notice::Error(m) => m,
        }
    }
}

/// State of one user's interaction: at most one current result.
///
/// A successful analysis replaces the previous one; a failed one leaves it
/// in place. Only one analysis may be in flight at a time.
#[derive(Debug, Default)]
pub struct Session {
    document_name: Option<String>,
    analysis: Option<DocumentAnalysis>,
    notice: Option<Notice>,
    busy: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> Option<&AnalysisRecord> {
        self.analysis.as_ref().map(|a| &a.record)
    }

    pub fn analysis(&self) -> Option<&DocumentAnalysis> {
        self.analysis.as_ref()
    }

    /// Name of the document the current record belongs to.
    pub fn document_name(&self) -> Option<&str> {
        self.document_name.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Mark an analysis as started. Fails if one is already running.
    pub fn begin(&mut self) -> Result<(), LexscanError> {
        if self.busy {
            return Err(LexscanError::Busy);
        }
        self.busy = true;
        Ok(())
    }

    /// Record the outcome of the analysis started with [`Session::begin`].
    pub fn finish(
        &mut self,
        document_name: &str,
        outcome: Result<DocumentAnalysis, LexscanError>,
    ) -> Result<&AnalysisRecord, LexscanError> {
        self.busy = false;
        match outcome {
            Ok(analysis) => {
                self.notice = Some(Notice::Success(format!(
                    "Extracted {} characters from {}. Analysis complete!",
                    analysis.text_chars, document_name
                )));
                self.document_name = Some(document_name.to_string());
                let analysis = self.analysis.insert(analysis);
                Ok(&analysis.record)
            }
            Err(e) => {
                self.notice = Some(match &e {
                    LexscanError::NothingToAnalyze => Notice::Info(e.to_string()),
                    _ => Notice::Error(e.to_string()),
                });
                tracing::warn!(document = document_name, error = %e, "analysis failed");
                Err(e)
            }
        }
    }

    /// Run the whole pipeline for one uploaded document.
    pub fn run(
        &mut self,
        document_name: &str,
        pdf_bytes: &[u8],
        extractor: &dyn PdfExtractor,
        analyzer: &DocumentAnalyzer<'_>,
    ) -> Result<&AnalysisRecord, LexscanError> {
        self.begin()?;
        let outcome = crate::analyze_pdf(pdf_bytes, extractor, analyzer);
        self.finish(document_name, outcome)
    }

    /// Forget the current result.
    pub fn clear(&mut self) {
        self.document_name = None;
        self.analysis = None;
        self.notice = None;
    }
}
