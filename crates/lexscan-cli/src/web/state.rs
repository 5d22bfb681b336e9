use lexscan_core::extraction::PdfExtractor;
use lexscan_core::provider::CompletionProvider;
use lexscan_core::rules::schema::RuleSetDef;
use lexscan_core::session::Session;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Everything a request handler needs. The browser UI serves a single
/// session, like a desktop app with one open window.
pub struct AppState {
    pub extractor: Box<dyn PdfExtractor>,
    pub provider: Arc<dyn CompletionProvider>,
    pub rules: RuleSetDef,
    pub model: String,
    pub session: Mutex<Session>,
}

impl AppState {
    pub fn new(
        extractor: Box<dyn PdfExtractor>,
        provider: Arc<dyn CompletionProvider>,
        rules: RuleSetDef,
        model: impl Into<String>,
    ) -> Self {
        Self {
            extractor,
            provider,
            rules,
            model: model.into(),
            session: Mutex::new(Session::new()),
        }
    }
}
