//! Presence Planner: schema-constrained online presence plan generation
//!
//! Collects structured facts about a small business and produces a typed,
//! multi-section online presence plan by delegating generation to an external
//! large-language-model service under a declared response schema.

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod prompt;
pub mod provider;
pub mod schema;
pub mod types;

pub use error::{ConfigurationError, GenerationError, ServiceError};
pub use generator::PlanGenerator;
pub use types::{BusinessInfo, OnlinePresencePlan};
