//! Configuration System
//!
//! Layered configuration for the generation service client and logging:
//! built-in defaults, then the global config file, then an explicit
//! `--config` file, then `PRESENCE__*` environment variables. The API
//! credential is deliberately not part of this tree; it is read from the
//! process environment by `ApiCredential::from_env`.

use crate::error::ConfigurationError;
use crate::logging::LoggingConfig;
use crate::provider::{SamplingOptions, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::schema::CardinalityPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge_policy;
mod sources;

pub use merge_policy::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Generation service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings captured by the service client and the plan generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout enforced by the HTTP client
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Enforce list-length hints (platforms, ideas, keywords) on responses
    #[serde(default)]
    pub strict_cardinality: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_temperature() -> f32 {
    SamplingOptions::default().temperature
}

fn default_top_p() -> f32 {
    SamplingOptions::default().top_p
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            strict_cardinality: false,
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model cannot be empty".to_string());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "Base URL must start with http:// or https://: {}",
                self.base_url
            ));
        }
        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err("Timeouts must be greater than zero".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(format!("top_p must be in (0.0, 1.0], got {}", self.top_p));
        }
        Ok(())
    }

    pub fn sampling_options(&self) -> SamplingOptions {
        SamplingOptions {
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }

    pub fn cardinality_policy(&self) -> CardinalityPolicy {
        if self.strict_cardinality {
            CardinalityPolicy::Strict
        } else {
            CardinalityPolicy::Lenient
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.service
            .validate()
            .map_err(|e| ConfigurationError::Invalid(format!("service: {}", e)))?;
        self.logging
            .validate()
            .map_err(|e| ConfigurationError::Invalid(format!("logging: {}", e)))
    }
}

/// Loads `PlannerConfig` from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, global file, optional explicit file and environment.
    pub fn load(explicit: Option<&Path>) -> Result<PlannerConfig, ConfigurationError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = sources::global_file::add_to_builder(builder)?;
        if let Some(path) = explicit {
            builder = sources::explicit_file::add_to_builder(builder, path)?;
        }
        builder = sources::environment::add_to_builder(builder);

        let config: PlannerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load defaults and a single file, ignoring global file and environment.
    pub fn load_from_file(path: &Path) -> Result<PlannerConfig, ConfigurationError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = sources::explicit_file::add_to_builder(builder, path)?;
        let config: PlannerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }
}
