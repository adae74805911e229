//! CLI parse: clap types for presence-plan. No behavior; definitions only.

use crate::types::BusinessInfo;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// presence-plan - generate an online presence plan for a small business
#[derive(Parser)]
#[command(name = "presence-plan")]
#[command(about = "Generate a structured online presence plan for a small business")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over defaults and the global config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a plan through the generation service
    Generate {
        #[command(flatten)]
        business: BusinessArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the prompt that would be sent, without calling the service
    Prompt {
        #[command(flatten)]
        business: BusinessArgs,
    },
    /// Print the response schema sent to the service
    Schema,
}

/// The four business facts, one flag each.
#[derive(Args, Debug, Clone)]
pub struct BusinessArgs {
    /// Business name (e.g., Artisan Coffee Roasters)
    #[arg(long)]
    pub name: String,

    /// Industry or niche (e.g., Specialty Coffee & Cafe)
    #[arg(long)]
    pub industry: String,

    /// Target audience (e.g., Young professionals, students, remote workers)
    #[arg(long)]
    pub audience: String,

    /// Primary business goals (e.g., Increase online sales, build a local community)
    #[arg(long)]
    pub goals: String,
}

impl From<BusinessArgs> for BusinessInfo {
    fn from(args: BusinessArgs) -> Self {
        BusinessInfo::new(args.name, args.industry, args.audience, args.goals)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
