// Groq-hosted Llama Guard moderation.
//
// Groq exposes an OpenAI-compatible chat completions API. Llama Guard takes
// the text to classify as a single user message and answers with a short
// completion ("safe", or "unsafe" plus category codes).
//
// API docs: https://console.groq.com/docs/api-reference#chat-create

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::ModerationModel;
use crate::error::ModerationError;
use crate::output::truncate_chars;

/// Groq's OpenAI-compatible API root.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Llama Guard 4 as served by Groq.
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-Guard-4-12B";

/// Moderation client for a Groq (or other OpenAI-compatible) endpoint.
pub struct GroqModerator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqModerator {
    /// Create a moderator. Fails before touching the network if the key is blank.
    pub fn new(api_key: &str, model: &str, base_url: &str) -> Result<Self, ModerationError> {
        let client = Client::builder()
            .user_agent(concat!("guardcheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ModerationError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Self::with_client(client, api_key, model, base_url)
    }

    /// Create a moderator around an existing HTTP client (custom proxy, TLS, timeouts).
    pub fn with_client(
        client: Client,
        api_key: &str,
        model: &str,
        base_url: &str,
    ) -> Result<Self, ModerationError> {
        if api_key.trim().is_empty() {
            return Err(ModerationError::Configuration(
                "Groq API key is missing. Set GROQ_API_KEY or pass --api-key.".to_string(),
            ));
        }

        Ok(Self {
            client,
            api_key: api_key.trim().to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl std::fmt::Debug for GroqModerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqModerator")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl ModerationModel for GroqModerator {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn moderate(&self, prompt: &str) -> Result<String, ModerationError> {
        if prompt.trim().is_empty() {
            return Err(ModerationError::Input(
                "Prompt is empty. Provide some text to analyse.".to_string(),
            ));
        }

        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "Sending moderation request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ModerationError::Upstream(error_chain(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModerationError::Upstream(upstream_message(status, &body)));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModerationError::Upstream(error_chain(&e)))?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ModerationError::Upstream(
                    "Moderation response contained no completion".to_string(),
                )
            })?;

        debug!(reply = %truncate_chars(&reply, 80), "Received moderation reply");

        Ok(reply)
    }
}

/// Validate the credential, then send the prompt and return the raw reply.
///
/// The credential check happens first, so a missing key is reported even
/// when the prompt is also empty.
pub async fn dispatch(
    prompt: &str,
    api_key: &str,
    model: &str,
    base_url: &str,
) -> Result<String, ModerationError> {
    let moderator = GroqModerator::new(api_key, model, base_url)?;
    moderator.moderate(prompt).await
}

/// Prefer the provider's own error message; fall back to status + body.
fn upstream_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => status.to_string(),
        Err(_) => format!("{status}: {}", body.trim()),
    }
}

/// reqwest's top-level message hides the cause ("error sending request"),
/// so append each source in turn.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

// --- Chat completions request/response types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_prefers_provider_error() {
        let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        assert_eq!(
            upstream_message(reqwest::StatusCode::UNAUTHORIZED, body),
            "Invalid API Key"
        );
    }

    #[test]
    fn upstream_message_falls_back_to_status_and_body() {
        assert_eq!(
            upstream_message(reqwest::StatusCode::BAD_GATEWAY, "upstream down\n"),
            "502 Bad Gateway: upstream down"
        );
        assert_eq!(
            upstream_message(reqwest::StatusCode::SERVICE_UNAVAILABLE, ""),
            "503 Service Unavailable"
        );
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let moderator = GroqModerator::new("gsk_secret", DEFAULT_MODEL, DEFAULT_BASE_URL).unwrap();
        let debug = format!("{moderator:?}");
        assert!(!debug.contains("gsk_secret"));
        assert!(debug.contains("<redacted>"));
    }
}
