//! CLI route: run context and single route table dispatching to the generator and presentation.

use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{format_plan_json, format_plan_text};
use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::generator::PlanGenerator;
use crate::prompt::build_prompt;
use crate::provider::{ApiCredential, GeminiClient, GenerationService};
use crate::schema::plan_schema;
use crate::types::BusinessInfo;
use std::sync::Arc;
use tracing::info;

/// Runtime context for CLI execution: loaded config and a ready generator.
///
/// Construction is the startup gate: it fails before any command runs if
/// the schema, the configuration or the credential is unusable.
pub struct RunContext {
    config: PlannerConfig,
    generator: PlanGenerator,
}

impl RunContext {
    pub fn new(config: PlannerConfig, credential: ApiCredential) -> Result<Self, PlannerError> {
        plan_schema().check()?;
        let client = GeminiClient::new(&config.service, credential)?;
        info!(
            model = %config.service.model,
            timeout_secs = config.service.request_timeout_secs,
            "Generation service client ready"
        );
        Self::with_service(config, Arc::new(client))
    }

    /// Build a context around any generation service.
    pub fn with_service(
        config: PlannerConfig,
        service: Arc<dyn GenerationService>,
    ) -> Result<Self, PlannerError> {
        let generator = PlanGenerator::from_config(service, &config.service)?;
        Ok(Self { config, generator })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub async fn execute(&self, command: &Commands) -> Result<String, PlannerError> {
        match command {
            Commands::Generate { business, format } => {
                let info = BusinessInfo::from(business.clone());
                let plan = self.generator.generate(&info).await?;
                match format {
                    OutputFormat::Json => format_plan_json(&plan),
                    OutputFormat::Text => Ok(format_plan_text(&plan, self.config.logging.color)),
                }
            }
            Commands::Prompt { business } => {
                Ok(build_prompt(&BusinessInfo::from(business.clone())))
            }
            Commands::Schema => serde_json::to_string_pretty(plan_schema())
                .map_err(|e| PlannerError::Output(e.to_string())),
        }
    }
}
