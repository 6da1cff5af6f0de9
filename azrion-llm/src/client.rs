//! HTTP chat client for Ollama and OpenAI-compatible backends.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::LlmError;
use crate::types::{ChatModel, ChatRequest, ChatResponse};

/// Provider backend for chat inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmProvider {
    /// Ollama running locally (default).
    Ollama {
        /// Server root, e.g. `http://localhost:11434`.
        base_url: String,
    },
    /// Any OpenAI-compatible `/v1/chat/completions` endpoint.
    OpenAiCompatible {
        /// Server root without the `/v1` suffix.
        base_url: String,
        /// Bearer token.
        api_key: String,
    },
    /// No model available; every call fails with [`LlmError::Unavailable`].
    None,
}

impl LlmProvider {
    /// Build a provider from its config name (`ollama`, `openai`, `none`).
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigError`] for an unknown provider name.
    pub fn from_name(name: &str, base_url: &str, api_key: &str) -> Result<Self, LlmError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        match name.to_ascii_lowercase().as_str() {
            "ollama" => Ok(LlmProvider::Ollama { base_url }),
            "openai" | "openai-compatible" => Ok(LlmProvider::OpenAiCompatible {
                base_url,
                api_key: api_key.to_string(),
            }),
            "none" => Ok(LlmProvider::None),
            other => Err(LlmError::ConfigError(format!("unknown provider '{other}'"))),
        }
    }
}

/// The chat client that routes requests to the configured backend.
#[derive(Debug, Clone)]
pub struct LlmClient {
    provider: LlmProvider,
    http: Client,
    max_retries: u32,
}

impl LlmClient {
    /// Create a new client. `max_retries` extra attempts follow a failure.
    #[must_use]
    pub fn new(provider: LlmProvider, max_retries: u32) -> Self {
        Self {
            provider,
            http: Client::new(),
            max_retries,
        }
    }

    /// Create a client with no backend.
    #[must_use]
    pub fn none() -> Self {
        Self::new(LlmProvider::None, 0)
    }

    /// Whether a backend is configured. A client without one fails every
    /// call with [`LlmError::Unavailable`].
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self.provider, LlmProvider::None)
    }

    /// Send a chat request, retrying transport and HTTP failures.
    ///
    /// # Errors
    ///
    /// [`LlmError::Unavailable`] without a backend,
    /// [`LlmError::ParseError`] for a non-JSON body, and
    /// [`LlmError::RetriesExhausted`] carrying the final attempt's
    /// [`LlmError::Timeout`], [`LlmError::Unavailable`] or
    /// [`LlmError::RequestFailed`] when every attempt failed.
    pub async fn generate(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let (url, body, api_key) = match &self.provider {
            LlmProvider::None => {
                return Err(LlmError::Unavailable("No LLM provider configured".into()));
            }
            LlmProvider::Ollama { base_url } => {
                (format!("{base_url}/api/chat"), ollama_body(request), None)
            }
            LlmProvider::OpenAiCompatible { base_url, api_key } => (
                format!("{base_url}/v1/chat/completions"),
                openai_body(request),
                Some(api_key.as_str()),
            ),
        };

        let attempts = self.max_retries.saturating_add(1);
        let mut last = LlmError::Unavailable("no attempt made".into());
        for attempt in 1..=attempts {
            if attempt > 1 {
                debug!("Retrying chat call (attempt {attempt}/{attempts})");
            }

            let start = Instant::now();
            let mut call = self
                .http
                .post(&url)
                .json(&body)
                .timeout(Duration::from_millis(request.timeout_ms));
            if let Some(key) = api_key.filter(|k| !k.is_empty()) {
                call = call.bearer_auth(key);
            }
            let result = call.send().await;
            let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            last = match result {
                Ok(resp) if resp.status().is_success() => {
                    let json: Value = resp
                        .json()
                        .await
                        .map_err(|e| LlmError::ParseError(e.to_string()))?;
                    debug!(model = %request.model, latency_ms, "Chat reply received");
                    return Ok(ChatResponse {
                        text: reply_text(&json),
                        model: request.model.clone(),
                        latency_ms,
                    });
                }
                Ok(resp) => {
                    let status = resp.status();
                    LlmError::from_status(status, &resp.text().await.unwrap_or_default())
                }
                Err(e) => LlmError::from_transport(&e, request.timeout_ms),
            };
            warn!(attempt, error = %last, "Chat call failed");
        }

        Err(LlmError::RetriesExhausted {
            attempts,
            last: Box::new(last),
        })
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        self.generate(request).await
    }
}

fn ollama_body(request: &ChatRequest) -> Value {
    let mut body = json!({
        "model": request.model,
        "messages": request.messages,
        "stream": false,
    });
    if let Some(t) = request.temperature {
        body["options"] = json!({ "temperature": t });
    }
    body
}

fn openai_body(request: &ChatRequest) -> Value {
    let mut body = json!({
        "model": request.model,
        "messages": request.messages,
    });
    if let Some(t) = request.temperature {
        body["temperature"] = json!(t);
    }
    body
}

/// Pull the reply text out of a backend response.
///
/// Tries, in order, Ollama chat (`message.content`), OpenAI
/// (`choices[0].message.content`), Ollama generate (`response`) and a bare
/// `text` field. Anything else is returned as its JSON text, so the result
/// is never empty.
#[must_use]
pub fn reply_text(json: &Value) -> String {
    [
        &json["message"]["content"],
        &json["choices"][0]["message"]["content"],
        &json["response"],
        &json["text"],
    ]
    .into_iter()
    .filter_map(Value::as_str)
    .find(|s| !s.trim().is_empty())
    .map_or_else(|| json.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;

    #[test]
    fn reply_text_coercion_order() {
        assert_eq!(reply_text(&json!({"message": {"role": "assistant", "content": "hi"}})), "hi");
        assert_eq!(
            reply_text(&json!({"choices": [{"message": {"content": "from openai"}}]})),
            "from openai"
        );
        assert_eq!(reply_text(&json!({"response": "generated"})), "generated");
        assert_eq!(reply_text(&json!({"text": "plain"})), "plain");
        assert_eq!(
            reply_text(&json!({"message": {"content": ""}, "text": "second"})),
            "second"
        );
    }

    #[test]
    fn unknown_shape_is_stringified() {
        let text = reply_text(&json!({"done": true}));
        assert_eq!(text, r#"{"done":true}"#);
        assert!(!reply_text(&Value::Null).is_empty());
    }

    #[test]
    fn provider_names() {
        assert_eq!(
            LlmProvider::from_name("Ollama", "http://localhost:11434/", "").expect("ollama"),
            LlmProvider::Ollama { base_url: "http://localhost:11434".into() }
        );
        assert!(matches!(
            LlmProvider::from_name("openai", "https://api.example", "k"),
            Ok(LlmProvider::OpenAiCompatible { .. })
        ));
        assert_eq!(LlmProvider::from_name("none", "", "").expect("none"), LlmProvider::None);
        assert!(matches!(
            LlmProvider::from_name("gpt4all", "", ""),
            Err(LlmError::ConfigError(_))
        ));
    }

    #[test]
    fn bodies_carry_transcript_and_optional_temperature() {
        let request = ChatRequest::new("llama3.1:latest", vec![ChatMessage::system("be nice"), ChatMessage::user("hey")]);
        let body = ollama_body(&request);
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hey");
        assert!(body.get("options").is_none());

        let body = openai_body(&request.with_temperature(Some(0.5)));
        assert_eq!(body["temperature"], 0.5);
    }

    #[tokio::test]
    async fn none_provider_fails_fast() {
        let client = LlmClient::none();
        assert!(!client.is_available());
        let err = client
            .chat(&ChatRequest::new("m", vec![ChatMessage::user("hi")]))
            .await
            .expect_err("no backend");
        assert!(matches!(err, LlmError::Unavailable(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_exhausts_retries() {
        let client = LlmClient::new(LlmProvider::Ollama { base_url: "http://127.0.0.1:9".into() }, 1);
        let request = ChatRequest::new("m", vec![ChatMessage::user("hi")]).with_timeout(2_000);
        match client.generate(&request).await {
            Err(LlmError::RetriesExhausted { attempts, last }) => {
                assert_eq!(attempts, 2);
                assert!(
                    matches!(*last, LlmError::Unavailable(_) | LlmError::Timeout(2_000)),
                    "{last}"
                );
            }
            other => panic!("expected exhausted retries, got {other:?}"),
        }
    }
}
