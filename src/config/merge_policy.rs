//! Merge rules: defaults first, later sources override earlier ones.

use crate::provider::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("service.model", DEFAULT_MODEL)?
        .set_default("service.base_url", DEFAULT_BASE_URL)?
        .set_default("service.request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
        .set_default("service.connect_timeout_secs", DEFAULT_CONNECT_TIMEOUT_SECS as i64)?
        .set_default("service.temperature", 0.8)?
        .set_default("service.top_p", 0.95)?
        .set_default("service.strict_cardinality", false)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
