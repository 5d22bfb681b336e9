use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::provider::{CompletionProvider, CompletionRequest};
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;

const MAX_ERROR_BODY_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking client for OpenAI-compatible `/chat/completions` endpoints
/// (Groq, OpenAI, Ollama's `/v1`, vLLM ...).
///
/// Every request is bounded by the configured timeout. Transient failures
/// (timeouts, connection errors, 408/429/5xx) are retried up to
/// `max_retries` times with exponential backoff.
pub struct ChatCompletionsClient {
    http: Client,
    config: ProviderConfig,
    api_key: String,
}

impl ChatCompletionsClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ProviderError::MissingApiKey)?;

        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ProviderError::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(ChatCompletionsClient {
            http,
            config,
            api_key,
        })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn send_once(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let response = self
            .http
            .post(self.config.completions_url())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        parse_completion_body(&body)
    }
}

impl CompletionProvider for ChatCompletionsClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let mut attempt = 0;
        loop {
            match self.send_once(request) {
                Ok(content) => return Ok(content),
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.config.backoff_for(attempt);
                    tracing::warn!(
                        error = %e,
                        attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "completion request failed, retrying"
                    );
                    std::thread::sleep(delay);
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn provider_name(&self) -> &str {
        "chat-completions"
    }
}

/// Pull the first choice's message content out of a response body.
fn parse_completion_body(body: &str) -> Result<String, ProviderError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(ProviderError::EmptyCompletion)?;

    if content.trim().is_empty() {
        return Err(ProviderError::EmptyCompletion);
    }
    Ok(content)
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_choice() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"summary\": []}"}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ]
        }"#;
        assert_eq!(parse_completion_body(body).unwrap(), "{\"summary\": []}");
    }

    #[test]
    fn test_parse_no_choices() {
        let body = r#"{"choices": []}"#;
        assert!(matches!(
            parse_completion_body(body),
            Err(ProviderError::EmptyCompletion)
        ));
    }

    #[test]
    fn test_parse_null_content() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        assert!(matches!(
            parse_completion_body(body),
            Err(ProviderError::EmptyCompletion)
        ));
    }

    #[test]
    fn test_parse_not_json() {
        assert!(matches!(
            parse_completion_body("<html>bad gateway</html>"),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_missing_api_key() {
        let config = ProviderConfig::default();
        assert!(matches!(
            ChatCompletionsClient::new(config),
            Err(ProviderError::MissingApiKey)
        ));

        let config = ProviderConfig {
            api_key: Some("   ".into()),
            ..Default::default()
        };
        assert!(ChatCompletionsClient::new(config).is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("åäö", 2), "åä...");
    }
}
