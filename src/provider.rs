//! Generation Service Client
//!
//! The seam between the plan generator and the external large-language-model
//! endpoint. `GenerationService` is the injectable interface; `GeminiClient`
//! is the HTTP implementation speaking the Gemini `generateContent` API with a
//! response schema and JSON response MIME type.

use crate::config::ServiceConfig;
use crate::error::{ConfigurationError, ServiceError};
use crate::schema::SchemaNode;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const JSON_MIME_TYPE: &str = "application/json";

/// Environment variable holding the service credential.
pub const API_KEY_ENV: &str = "API_KEY";

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingOptions {
    pub temperature: f32, // 0.0-2.0
    pub top_p: f32,       // nucleus mass
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            top_p: 0.95,
        }
    }
}

/// One structured-generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    pub prompt: String,
    pub schema: &'a SchemaNode,
    pub response_mime_type: &'static str,
    pub options: SamplingOptions,
}

/// Token usage information
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Raw service output, before any parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutput {
    pub text: String,
    pub model: String,
    pub usage: TokenUsage,
    pub finish_reason: Option<String>,
}

impl GenerationOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: String::new(),
            usage: TokenUsage::default(),
            finish_reason: None,
        }
    }
}

/// External generation service.
///
/// Implementations perform exactly one outbound call per invocation and hold
/// no per-call mutable state.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(
        &self,
        request: GenerationRequest<'_>,
    ) -> Result<GenerationOutput, ServiceError>;

    fn provider_name(&self) -> &str;

    fn model_name(&self) -> &str;
}

/// API credential read from the process environment.
#[derive(Clone)]
pub struct ApiCredential(String);

impl ApiCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Read `API_KEY`. Absent or blank is a fatal configuration error.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_var(API_KEY_ENV)
    }

    pub fn from_var(var: &'static str) -> Result<Self, ConfigurationError> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(Self(key)),
            _ => Err(ConfigurationError::MissingCredential { var }),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(<redacted>)")
    }
}

// Gemini generateContent request/response structures
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a SchemaNode,
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

// Map transport-level reqwest errors to ServiceError
fn map_http_error(error: reqwest::Error) -> ServiceError {
    if let Some(status) = error.status() {
        map_status(status.as_u16(), error.to_string())
    } else if error.is_timeout() {
        ServiceError::Timeout(error.to_string())
    } else if error.is_connect() {
        ServiceError::Transport(error.to_string())
    } else {
        ServiceError::Transport(format!("HTTP error: {}", error))
    }
}

/// Classify a non-success HTTP status.
pub fn map_status(status: u16, message: String) -> ServiceError {
    match status {
        401 | 403 => ServiceError::Authentication(message),
        429 => ServiceError::RateLimited(message),
        404 => ServiceError::ModelNotFound(message),
        _ => ServiceError::Status { status, message },
    }
}

fn into_output(
    response: GenerateContentResponse,
    fallback_model: &str,
) -> Result<GenerationOutput, ServiceError> {
    let candidate = match response.candidates.into_iter().next() {
        Some(candidate) => candidate,
        None => {
            let reason = response
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .map(|reason| format!("prompt blocked: {}", reason))
                .unwrap_or_else(|| "no candidates in response".to_string());
            return Err(ServiceError::EmptyResponse(reason));
        }
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate
            .finish_reason
            .map(|reason| format!("candidate has no text (finish reason: {})", reason))
            .unwrap_or_else(|| "candidate has no text".to_string());
        return Err(ServiceError::EmptyResponse(reason));
    }

    let usage = response
        .usage_metadata
        .map(|usage| TokenUsage {
            prompt_tokens: usage.prompt_token_count,
            completion_tokens: usage.candidates_token_count,
            total_tokens: usage.total_token_count,
        })
        .unwrap_or_default();

    Ok(GenerationOutput {
        text,
        model: response
            .model_version
            .unwrap_or_else(|| fallback_model.to_string()),
        usage,
        finish_reason: candidate.finish_reason,
    })
}

fn build_http_client(config: &ServiceConfig) -> Result<Client, ConfigurationError> {
    Client::builder()
        .no_proxy()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| ConfigurationError::HttpClient(e.to_string()))
}

/// Gemini `generateContent` client with captured credential, model and timeouts.
pub struct GeminiClient {
    client: Client,
    model: String,
    credential: ApiCredential,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &ServiceConfig, credential: ApiCredential) -> Result<Self, ConfigurationError> {
        let client = build_http_client(config)?;
        Ok(Self {
            client,
            model: config.model.clone(),
            credential,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerationService for GeminiClient {
    async fn generate(
        &self,
        request: GenerationRequest<'_>,
    ) -> Result<GenerationOutput, ServiceError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.prompt),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: request.response_mime_type,
                response_schema: request.schema,
                temperature: request.options.temperature,
                top_p: request.options.top_p,
            },
        };

        let url = self.endpoint();
        debug!(url = %url, model = %self.model, "Sending generateContent request");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_status(status, error_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ServiceError::Timeout(e.to_string())
            } else {
                ServiceError::Transport(format!("Failed to decode response envelope: {}", e))
            }
        })?;

        into_output(parsed, &self.model)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// Mock service for testing
#[cfg(test)]
pub struct MockService {
    responses: std::sync::Mutex<std::collections::VecDeque<Result<String, ServiceError>>>,
    calls: std::sync::atomic::AtomicUsize,
    last_prompt: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MockService {
    pub fn new(responses: Vec<Result<String, ServiceError>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses.into()),
            calls: std::sync::atomic::AtomicUsize::new(0),
            last_prompt: std::sync::Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl GenerationService for MockService {
    async fn generate(
        &self,
        request: GenerationRequest<'_>,
    ) -> Result<GenerationOutput, ServiceError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(request.prompt);
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::EmptyResponse("script exhausted".to_string())));
        next.map(GenerationOutput::text)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
