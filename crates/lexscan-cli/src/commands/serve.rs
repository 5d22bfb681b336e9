use crate::args::{ProviderArgs, RulesArgs};
use crate::web::{self, AppState};
use lexscan_core::error::LexscanError;
use lexscan_core::extraction::PdfBackend;
use lexscan_core::provider::CompletionProvider;
use std::net::SocketAddr;
use std::sync::Arc;

pub fn run(
    addr: SocketAddr,
    backend: PdfBackend,
    rules: &RulesArgs,
    provider: &ProviderArgs,
) -> Result<(), LexscanError> {
    let ruleset = rules.load()?;

    // The blocking HTTP client must be created and dropped outside the
    // async runtime, so this handle outlives `runtime`.
    let client = provider.build_client()?;
    let model = client.config().model.clone();
    let client: Arc<dyn CompletionProvider> = Arc::new(client);

    let state = Arc::new(AppState::new(
        backend.extractor(),
        Arc::clone(&client),
        ruleset,
        model,
    ));
    tracing::info!(
        backend = %backend,
        model = %state.model,
        rules = state.rules.rules.len(),
        "starting browser front end"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(web::serve(addr, state));
    drop(runtime);

    result
}
