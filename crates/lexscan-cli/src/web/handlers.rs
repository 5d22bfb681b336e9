//! HTTP handlers for the browser front end

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
};
use lexscan_core::analysis::DocumentAnalyzer;
use lexscan_core::error::LexscanError;
use lexscan_core::export;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::web::error::ApiError;
use crate::web::page;
use crate::web::state::AppState;

/// Multipart field carrying the uploaded PDF.
pub const DOCUMENT_FIELD: &str = "document";

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// The single page: upload form, notices and the current result.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let session = state.session.lock().await;
    Html(page::render(&session))
}

/// Upload a PDF and run the analysis, then go back to the page.
///
/// Pipeline failures are not HTTP errors: they become the session notice
/// and the previous result stays on screen. The outcome is committed by the
/// blocking task itself, so a client that disconnects mid-analysis cannot
/// leave the session marked busy.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Redirect, ApiError> {
    let (document_name, pdf_bytes) = read_document(&mut multipart).await?;

    state.session.lock().await.begin().map_err(|e| match e {
        LexscanError::Busy => ApiError::Busy,
        other => ApiError::Internal(other),
    })?;

    tracing::info!(
        document = %document_name,
        bytes = pdf_bytes.len(),
        "analyzing uploaded document"
    );

    let worker_state = Arc::clone(&state);
    let task = tokio::task::spawn_blocking(move || {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let analyzer = DocumentAnalyzer::new(
                worker_state.provider.as_ref(),
                &worker_state.rules,
                worker_state.model.clone(),
            );
            lexscan_core::analyze_pdf(&pdf_bytes, worker_state.extractor.as_ref(), &analyzer)
        }))
        .unwrap_or_else(|_| {
            Err(LexscanError::Io(std::io::Error::other(
                "analysis task panicked",
            )))
        });

        // The error is stored as the session notice
        let _ = worker_state
            .session
            .blocking_lock()
            .finish(&document_name, outcome);
    });

    if let Err(e) = task.await {
        tracing::error!("analysis task failed: {}", e);
    }

    Ok(Redirect::to("/"))
}

async fn read_document(multipart: &mut Multipart) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid upload: {}", e)))?
    {
        if field.name() != Some(DOCUMENT_FIELD) {
            continue;
        }
        let name = field
            .file_name()
            .filter(|n| !n.is_empty())
            .unwrap_or("document.pdf")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("Invalid upload: {}", e)))?;
        if bytes.is_empty() {
            return Err(ApiError::InvalidRequest("Uploaded file is empty".to_string()));
        }
        return Ok((name, bytes.to_vec()));
    }
    Err(ApiError::InvalidRequest(format!(
        "missing '{DOCUMENT_FIELD}' file field"
    )))
}

/// Forget the current result.
pub async fn clear(State(state): State<Arc<AppState>>) -> Redirect {
    state.session.lock().await.clear();
    tracing::info!("session cleared");
    Redirect::to("/")
}

/// Download the current record as `analysis_<timestamp>.json`.
pub async fn report(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let session = state.session.lock().await;
    let record = session
        .record()
        .ok_or_else(|| ApiError::NotFound("analysis report".to_string()))?;

    let json = export::to_json(record)?;
    let file_name = export::file_name(&chrono::Local::now());

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={file_name}"),
            ),
        ],
        json,
    ))
}
