pub mod lopdf_backend;
pub mod pdftotext;

use crate::error::ExtractionError;
use crate::model::RawDocumentText;
use std::fmt;
use std::str::FromStr;

/// Text extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    /// Best-effort plain text; empty when the page has no text layer.
    pub text: String,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Extract the whole document as one string.
///
/// Page texts are concatenated in page order and the result is trimmed.
/// An empty result is not an error; callers decide what "no text" means.
pub fn extract_text(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
) -> Result<RawDocumentText, ExtractionError> {
    let pages = extractor.extract_pages(pdf_bytes)?;

    let mut text = String::new();
    for page in &pages {
        text.push_str(&page.text);
    }

    let trimmed = text.trim();
    tracing::debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        chars = trimmed.chars().count(),
        "extracted PDF text"
    );
    Ok(RawDocumentText::new(trimmed))
}

/// Selectable extraction backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PdfBackend {
    #[default]
    Lopdf,
    Pdftotext,
}

impl PdfBackend {
    pub const NAMES: &'static [&'static str] = &["lopdf", "pdftotext"];

    pub fn extractor(self) -> Box<dyn PdfExtractor> {
        match self {
            PdfBackend::Lopdf => Box::new(lopdf_backend::LopdfExtractor::new()),
            PdfBackend::Pdftotext => Box::new(pdftotext::PdftotextExtractor::new()),
        }
    }
}

impl FromStr for PdfBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lopdf" => Ok(PdfBackend::Lopdf),
            "pdftotext" | "poppler" => Ok(PdfBackend::Pdftotext),
            other => Err(format!(
                "unknown PDF backend '{}'. Available: {}",
                other,
                PdfBackend::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for PdfBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfBackend::Lopdf => write!(f, "lopdf"),
            PdfBackend::Pdftotext => write!(f, "pdftotext"),
        }
    }
}
