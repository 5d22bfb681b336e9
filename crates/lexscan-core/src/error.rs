use std::path::PathBuf;

/// Failure to turn PDF bytes into text.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("PDF is encrypted; remove the password protection and try again")]
    Encrypted,

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("IO error during extraction: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of the completion call itself.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no API key configured. Set LEXSCAN_API_KEY or GROQ_API_KEY")]
    MissingApiKey,

    #[error("request to completion provider failed: {0}")]
    Http(String),

    #[error("completion provider did not answer in time")]
    Timeout,

    #[error("completion provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected completion response: {0}")]
    InvalidResponse(String),

    #[error("completion provider returned no content")]
    EmptyCompletion,
}

impl ProviderError {
    /// Whether the same request may succeed if sent again.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Timeout | ProviderError::Http(_) => true,
            ProviderError::Status { status, .. } => {
                *status == 408 || *status == 429 || *status >= 500
            }
            ProviderError::MissingApiKey
            | ProviderError::InvalidResponse(_)
            | ProviderError::EmptyCompletion => false,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if e.is_decode() {
            ProviderError::InvalidResponse(e.to_string())
        } else {
            ProviderError::Http(e.to_string())
        }
    }
}

/// Failure to produce an analysis record from document text.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("error analyzing document: {0}")]
    Provider(#[from] ProviderError),

    #[error("failed to parse response as JSON: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LexscanError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("no extractable text found in PDF; nothing to analyze")]
    NothingToAnalyze,

    #[error("an analysis is already running for this session")]
    Busy,

    #[error("failed to load ruleset from {path}: {reason}")]
    RulesetLoad { path: PathBuf, reason: String },

    #[error("invalid ruleset: {0}")]
    RulesetInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_statuses() {
        let status = |status| ProviderError::Status {
            status,
            body: String::new(),
        };
        assert!(status(429).is_transient());
        assert!(status(503).is_transient());
        assert!(status(408).is_transient());
        assert!(!status(401).is_transient());
        assert!(!status(400).is_transient());
        assert!(ProviderError::Timeout.is_transient());
        assert!(!ProviderError::MissingApiKey.is_transient());
        assert!(!ProviderError::EmptyCompletion.is_transient());
    }
}
