//! LLM client: the single point of entry for all OpenRouter calls.
//!
//! No other module may talk to the chat-completion API directly: the report
//! path goes through [`LlmClient::chat`], the pass-through proxy route goes
//! through [`LlmClient::forward`]. The API key is a per-call argument because
//! the two paths use different credentials (admin-stored vs. environment).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Default upstream endpoint; overridable via `OPENROUTER_URL` (tests point
/// this at a local mock server).
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Attribution headers OpenRouter uses for request accounting.
const HTTP_REFERER: &str = "https://physiozentrum.contextery.com";
const X_TITLE: &str = "Physiotherapie Abschlussbericht";

/// Sampling settings for report generation, matching the product's tuning.
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1500;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned no choices")]
    EmptyChoices,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// The single HTTP client used for all upstream calls.
/// One request per call, no retry, no backoff; failures are the caller's
/// policy decision (the report path degrades to the demo report).
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient").field("api_url", &self.api_url).finish()
    }
}

impl LlmClient {
    pub fn new(api_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_url,
        }
    }

    /// One chat-completion call. Returns the first choice's message content.
    pub async fn chat(
        &self,
        api_key: &str,
        model: &str,
        system: &str,
        user: &str,
    ) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self.post(api_key, &request_body).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        let chat: ChatResponse = serde_json::from_str(&body)?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(LlmError::EmptyChoices)?;

        debug!("LLM call succeeded: model={model}, {} chars", content.len());
        Ok(content)
    }

    /// Forwards an arbitrary chat-completion body verbatim and returns the
    /// upstream JSON body on success. Used by the proxy route, which injects
    /// the server-side credential.
    pub async fn forward(&self, api_key: &str, body: &Value) -> Result<Value, LlmError> {
        let response = self.post(api_key, body).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        api_key: &str,
        body: &T,
    ) -> Result<reqwest::Response, LlmError> {
        Ok(self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .header("HTTP-Referer", HTTP_REFERER)
            .header("X-Title", X_TITLE)
            .json(body)
            .send()
            .await?)
    }
}

/// Pulls a human-readable message out of an upstream error body.
/// Accepts both `{"error": {"message": ...}}` and `{"message": ...}`; falls
/// back to the raw body, or a generic note when the body is empty.
fn extract_error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<Value>(body) {
        if let Some(msg) = parsed
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
        {
            return msg.to_string();
        }
        if let Some(msg) = parsed.get("message").and_then(Value::as_str) {
            return msg.to_string();
        }
    }
    if body.trim().is_empty() {
        "Fehler bei der Kommunikation mit dem KI-Service".to_string()
    } else {
        body.to_string()
    }
}
