//! Error types for the presence plan generation pipeline.

use thiserror::Error;

/// Maximum number of payload characters echoed in `InvalidResponse` messages.
pub const PAYLOAD_PREVIEW_CHARS: usize = 512;

/// Startup-time configuration errors. Any of these prevents generation.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Missing credential: environment variable {var} is not set")]
    MissingCredential { var: &'static str },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid response schema: {0}")]
    InvalidSchema(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}

impl From<config::ConfigError> for ConfigurationError {
    fn from(err: config::ConfigError) -> Self {
        ConfigurationError::Invalid(err.to_string())
    }
}

/// Failures reported by the generation service or the transport reaching it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Service returned no content: {0}")]
    EmptyResponse(String),
}

/// Classified failure of a single `generate` call.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Failed to generate plan from generation service: {0}")]
    ServiceFailure(#[from] ServiceError),

    #[error("Invalid response from generation service: {reason} (payload: {})", preview(.payload))]
    InvalidResponse { reason: String, payload: String },

    #[error("Plan generation was cancelled")]
    Cancelled,
}

impl GenerationError {
    pub fn invalid_response(reason: impl Into<String>, payload: impl Into<String>) -> Self {
        GenerationError::InvalidResponse {
            reason: reason.into(),
            payload: payload.into(),
        }
    }

    /// Full raw payload for `InvalidResponse`, for diagnostics.
    pub fn raw_payload(&self) -> Option<&str> {
        match self {
            GenerationError::InvalidResponse { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

/// Top-level error for the command-line front end.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Failed to render output: {0}")]
    Output(String),
}

fn preview(payload: &str) -> String {
    let mut chars = payload.chars();
    let head: String = chars.by_ref().take(PAYLOAD_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
