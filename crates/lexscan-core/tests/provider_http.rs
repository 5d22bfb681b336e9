//! ChatCompletionsClient against a local axum stub of the completions API.
//!
//! The stub runs on its own tokio runtime; the blocking client is driven
//! from the test thread, outside any async context.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use lexscan_core::analysis::DocumentAnalyzer;
use lexscan_core::config::ProviderConfig;
use lexscan_core::error::ProviderError;
use lexscan_core::provider::{ChatCompletionsClient, ChatMessage, CompletionProvider, CompletionRequest};
use lexscan_core::rules::builtin;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Runtime;

#[derive(Default)]
struct Stub {
    calls: AtomicUsize,
    failures_before_success: usize,
    fail_status: u16,
    seen: Mutex<Vec<(Option<String>, Value)>>,
}

async fn completions(
    State(stub): State<Arc<Stub>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let call = stub.calls.fetch_add(1, Ordering::SeqCst);
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    stub.seen.lock().unwrap().push((auth, body));

    if call < stub.failures_before_success {
        let status = StatusCode::from_u16(stub.fail_status).unwrap();
        return (status, Json(json!({"error": {"message": "try later"}})));
    }

    (
        StatusCode::OK,
        Json(json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "{\"summary\": [\"ok\"]}"},
                "finish_reason": "stop"
            }]
        })),
    )
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({"choices": []}))
}

fn spawn_stub(router: Router) -> (Runtime, String) {
    let rt = Runtime::new().unwrap();
    let listener = rt
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let addr = listener.local_addr().unwrap();
    rt.spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (rt, format!("http://{addr}/v1"))
}

fn config(endpoint: String, max_retries: u32) -> ProviderConfig {
    ProviderConfig {
        endpoint,
        api_key: Some("test-key".into()),
        model: "test-model".into(),
        timeout_secs: 1,
        max_retries,
        retry_backoff_ms: 1,
    }
}

fn request() -> CompletionRequest {
    CompletionRequest {
        model: "test-model".into(),
        max_tokens: 4096,
        messages: vec![ChatMessage::user("Analyze this")],
    }
}

#[test]
fn sends_openai_compatible_request() {
    let stub = Arc::new(Stub::default());
    let router = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(stub.clone());
    let (_rt, endpoint) = spawn_stub(router);

    let client = ChatCompletionsClient::new(config(endpoint, 0)).unwrap();
    let content = client.complete(&request()).unwrap();
    assert_eq!(content, "{\"summary\": [\"ok\"]}");

    let seen = stub.seen.lock().unwrap();
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["max_tokens"], 4096);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "Analyze this");
    assert!(body.get("temperature").is_none());
}

#[test]
fn retries_transient_failures() {
    let stub = Arc::new(Stub {
        failures_before_success: 2,
        fail_status: 503,
        ..Default::default()
    });
    let router = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(stub.clone());
    let (_rt, endpoint) = spawn_stub(router);

    let client = ChatCompletionsClient::new(config(endpoint, 2)).unwrap();
    assert!(client.complete(&request()).is_ok());
    assert_eq!(stub.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn gives_up_after_max_retries() {
    let stub = Arc::new(Stub {
        failures_before_success: 10,
        fail_status: 429,
        ..Default::default()
    });
    let router = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(stub.clone());
    let (_rt, endpoint) = spawn_stub(router);

    let client = ChatCompletionsClient::new(config(endpoint, 1)).unwrap();
    let err = client.complete(&request()).unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 429, .. }));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn auth_failure_is_not_retried() {
    let stub = Arc::new(Stub {
        failures_before_success: 10,
        fail_status: 401,
        ..Default::default()
    });
    let router = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(stub.clone());
    let (_rt, endpoint) = spawn_stub(router);

    let client = ChatCompletionsClient::new(config(endpoint, 3)).unwrap();
    let err = client.complete(&request()).unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 401, .. }));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn slow_provider_times_out() {
    let router = Router::new().route("/v1/chat/completions", post(slow));
    let (_rt, endpoint) = spawn_stub(router);

    let client = ChatCompletionsClient::new(config(endpoint, 0)).unwrap();
    let err = client.complete(&request()).unwrap_err();
    assert!(matches!(err, ProviderError::Timeout), "got {err:?}");
}

#[test]
fn analyzer_requests_configured_model() {
    let stub = Arc::new(Stub::default());
    let router = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(stub.clone());
    let (_rt, endpoint) = spawn_stub(router);

    let mut cfg = config(endpoint, 0);
    cfg.model = "llama-3.1-8b-instant".into();
    let client = ChatCompletionsClient::new(cfg).unwrap();
    let rules = builtin::load_preset(builtin::DEFAULT_PRESET).unwrap();
    let analyzer = DocumentAnalyzer::for_client(&client, &rules);

    let record = analyzer.analyze("Housing Grant Act 2024").unwrap();
    assert_eq!(record.summary, vec!["ok"]);

    let seen = stub.seen.lock().unwrap();
    assert_eq!(seen[0].1["model"], "llama-3.1-8b-instant");
}
