//! Gemini HTTP client for the hosted `generateContent` endpoint, behind
//! the [`RiskModel`] seam so the transport can be mocked in tests.

use serde::{Deserialize, Serialize};

use super::prompt::response_schema;
use super::PredictionError;
use crate::config;

/// Determinism-biasing setting for the external call: low but non-zero.
const TEMPERATURE: f32 = 0.2;

/// Abstraction over the hosted generative model (allows mocking).
pub trait RiskModel: Send + Sync {
    /// Issue exactly one generation call and return the raw reply text.
    fn generate(&self, prompt: &str) -> Result<String, PredictionError>;

    fn model_name(&self) -> &str;

    /// Whether a credential is configured. A missing credential still
    /// only surfaces as a failure at call time.
    fn is_configured(&self) -> bool;
}

/// HTTP client for Google Gemini's `generateContent` endpoint.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    /// Create a client for an explicit endpoint and credential.
    pub fn new(base_url: &str, model: &str, api_key: Option<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            client,
        }
    }

    /// Build the client from process environment: `GEMINI_API_KEY` for
    /// the credential, `GEMINI_BASE_URL` to override the endpoint.
    pub fn from_env() -> Self {
        let base_url = std::env::var(config::BASE_URL_ENV)
            .unwrap_or_else(|_| config::DEFAULT_BASE_URL.to_string());
        let api_key = std::env::var(config::API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self::new(&base_url, config::DEFAULT_MODEL, api_key)
    }
}

/// Request body for `models/{model}:generateContent`.
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
    temperature: f32,
}

/// Response body from `generateContent`, reduced to the path we read.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ReplyContent>,
}

#[derive(Deserialize)]
struct ReplyContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

impl RiskModel for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, PredictionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(PredictionError::MissingCredential(config::API_KEY_ENV))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
                temperature: TEMPERATURE,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    PredictionError::Transport(format!("cannot reach {}", self.base_url))
                } else if e.is_timeout() {
                    PredictionError::Transport("request timed out".into())
                } else {
                    PredictionError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PredictionError::ServiceStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| PredictionError::MalformedReply(e.to_string()))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| PredictionError::MalformedReply("no candidate text in reply".into()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Mock model for testing — returns a configured reply, or a transport
/// failure when built with [`MockRiskModel::failing`].
pub struct MockRiskModel {
    reply: Option<String>,
}

impl MockRiskModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { reply: None }
    }
}

impl RiskModel for MockRiskModel {
    fn generate(&self, _prompt: &str) -> Result<String, PredictionError> {
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(PredictionError::Transport("mock transport failure".into())),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        true
    }
}
