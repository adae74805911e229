//! Plan Generator
//!
//! Turns a `BusinessInfo` into an `OnlinePresencePlan` through exactly one
//! call to the generation service: build the prompt, submit it with the
//! response schema, then trim, parse, shape-check and deserialize the reply.
//! Every failure is classified into a `GenerationError`; nothing is retried.

use crate::config::ServiceConfig;
use crate::error::{ConfigurationError, GenerationError};
use crate::prompt::build_prompt;
use crate::provider::{GenerationRequest, GenerationService, SamplingOptions, JSON_MIME_TYPE};
use crate::schema::{plan_schema, CardinalityPolicy, SchemaNode};
use crate::types::{BusinessInfo, OnlinePresencePlan};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct PlanGenerator {
    service: Arc<dyn GenerationService>,
    schema: &'static SchemaNode,
    options: SamplingOptions,
    policy: CardinalityPolicy,
}

impl PlanGenerator {
    /// Create a generator with default sampling and lenient cardinality.
    ///
    /// Fails if the schema descriptor does not pass its self-check.
    pub fn new(service: Arc<dyn GenerationService>) -> Result<Self, ConfigurationError> {
        let schema = plan_schema();
        schema.check()?;
        Ok(Self {
            service,
            schema,
            options: SamplingOptions::default(),
            policy: CardinalityPolicy::default(),
        })
    }

    /// Create a generator using the sampling and cardinality settings of `config`.
    pub fn from_config(
        service: Arc<dyn GenerationService>,
        config: &ServiceConfig,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self::new(service)?
            .with_options(config.sampling_options())
            .with_policy(config.cardinality_policy()))
    }

    pub fn with_options(mut self, options: SamplingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_policy(mut self, policy: CardinalityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn options(&self) -> SamplingOptions {
        self.options
    }

    pub fn policy(&self) -> CardinalityPolicy {
        self.policy
    }

    /// Generate a plan for `info`.
    pub async fn generate(&self, info: &BusinessInfo) -> Result<OnlinePresencePlan, GenerationError> {
        let started = Instant::now();
        info!(
            business = %info.name,
            provider = self.service.provider_name(),
            model = self.service.model_name(),
            "Generating online presence plan"
        );

        let prompt = build_prompt(info);
        debug!(prompt_len = prompt.len(), "Prompt built");

        let request = GenerationRequest {
            prompt,
            schema: self.schema,
            response_mime_type: JSON_MIME_TYPE,
            options: self.options,
        };

        let result = match self.service.generate(request).await {
            Ok(output) => {
                debug!(
                    response_len = output.text.len(),
                    total_tokens = output.usage.total_tokens,
                    finish_reason = output.finish_reason.as_deref().unwrap_or("unknown"),
                    "Generation service responded"
                );
                parse_plan(&output.text, self.schema, self.policy)
            }
            Err(e) => Err(GenerationError::ServiceFailure(e)),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(plan) => info!(
                business = %info.name,
                platforms = plan.social_media_plan.len(),
                keywords = plan.seo_keywords.len(),
                elapsed_ms,
                "Plan generated"
            ),
            Err(e) => warn!(business = %info.name, elapsed_ms, error = %e, "Plan generation failed"),
        }
        result
    }

    /// Generate a plan unless `cancel` completes first.
    ///
    /// On cancellation the in-flight request is dropped and
    /// `GenerationError::Cancelled` is returned.
    pub async fn generate_until<F>(
        &self,
        info: &BusinessInfo,
        cancel: F,
    ) -> Result<OnlinePresencePlan, GenerationError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.generate(info) => result,
            _ = cancel => {
                warn!(business = %info.name, "Plan generation cancelled");
                Err(GenerationError::Cancelled)
            }
        }
    }
}

/// Parse raw service text into a plan.
///
/// Syntax errors, shape violations and deserialization failures all become
/// `GenerationError::InvalidResponse` carrying the raw text.
pub fn parse_plan(
    raw: &str,
    schema: &SchemaNode,
    policy: CardinalityPolicy,
) -> Result<OnlinePresencePlan, GenerationError> {
    let trimmed = raw.trim();
    let value: serde_json::Value = serde_json::from_str(trimmed).map_err(|e| {
        GenerationError::invalid_response(format!("malformed JSON: {}", e), raw)
    })?;

    schema
        .validate(&value, policy)
        .map_err(|violation| GenerationError::invalid_response(violation.to_string(), raw))?;

    serde_json::from_value(value).map_err(|e| {
        GenerationError::invalid_response(format!("shape mismatch: {}", e), raw)
    })
}
