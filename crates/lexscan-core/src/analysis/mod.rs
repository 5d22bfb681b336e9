pub mod locate;
pub mod prompt;

use crate::config::ANALYSIS_MAX_TOKENS;
use crate::error::AnalysisError;
use crate::model::AnalysisRecord;
use crate::provider::{ChatCompletionsClient, ChatMessage, CompletionProvider, CompletionRequest};
use crate::rules::schema::RuleSetDef;

const RECORD_KEYS: [&str; 3] = ["summary", "sections", "rule_checks"];

/// Turns document text into an [`AnalysisRecord`] with one provider call.
pub struct DocumentAnalyzer<'a> {
    provider: &'a dyn CompletionProvider,
    rules: &'a RuleSetDef,
    model: String,
}

impl<'a> DocumentAnalyzer<'a> {
    pub fn new(
        provider: &'a dyn CompletionProvider,
        rules: &'a RuleSetDef,
        model: impl Into<String>,
    ) -> Self {
        DocumentAnalyzer {
            provider,
            rules,
            model: model.into(),
        }
    }

    /// Analyzer that requests the model configured on `client`.
    pub fn for_client(client: &'a ChatCompletionsClient, rules: &'a RuleSetDef) -> Self {
        Self::new(client, rules, client.config().model.clone())
    }

    pub fn rules(&self) -> &RuleSetDef {
        self.rules
    }

    /// The request `analyze` would send for `document_text`.
    pub fn request_for(&self, document_text: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            max_tokens: ANALYSIS_MAX_TOKENS,
            messages: vec![ChatMessage::user(prompt::build_prompt(
                document_text,
                self.rules,
            ))],
        }
    }

    pub fn analyze(&self, document_text: &str) -> Result<AnalysisRecord, AnalysisError> {
        let request = self.request_for(document_text);
        tracing::info!(
            provider = self.provider.provider_name(),
            model = %request.model,
            prompt_chars = request.messages[0].content.chars().count(),
            "requesting analysis"
        );

        let reply = self.provider.complete(&request)?;
        tracing::debug!(reply_chars = reply.chars().count(), "received completion");

        parse_reply(&reply)
    }
}

/// Parse a raw completion reply into an [`AnalysisRecord`].
///
/// The record is the first balanced JSON object in the reply that carries at
/// least one record key (`summary`, `sections`, `rule_checks`). Objects
/// without those keys (a lone section map, a single rule check) never count
/// as a record, so a reply cut off mid-object fails instead of yielding an
/// empty analysis. If no balanced object qualifies, the slice from the first
/// `{` to the last `}` is tried under the same key requirement.
pub fn parse_reply(reply: &str) -> Result<AnalysisRecord, AnalysisError> {
    let json = match locate::locate_json_object(reply, &RECORD_KEYS) {
        Some(json) => json,
        None => {
            let slice = locate::first_last_slice(reply).ok_or_else(|| {
                AnalysisError::MalformedResponse("no JSON object found in response".into())
            })?;
            tracing::debug!("no balanced record object found, trying first/last brace slice");
            // Surface the syntax error of a truncated or broken reply
            serde_json::from_str::<serde_json::Value>(slice)
                .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
            if !locate::has_any_key(slice, &RECORD_KEYS) {
                return Err(AnalysisError::MalformedResponse(format!(
                    "response object has none of the keys {}",
                    RECORD_KEYS.join(", ")
                )));
            }
            slice
        }
    };

    serde_json::from_str::<AnalysisRecord>(json)
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
}
