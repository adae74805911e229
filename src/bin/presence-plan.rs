//! presence-plan CLI Binary
//!
//! Command-line front end for the online presence plan generator.

use anyhow::Context;
use clap::Parser;
use presence_planner::cli::{map_error, Cli, RunContext};
use presence_planner::config::ConfigLoader;
use presence_planner::error::PlannerError;
use presence_planner::logging::{init_logging, LoggingConfig};
use presence_planner::provider::ApiCredential;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &config.logging);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("presence-plan starting");

    // Refuse to start without the credential, whatever the command.
    let credential = match ApiCredential::from_env() {
        Ok(credential) => credential,
        Err(e) => {
            error!("Startup aborted: {}", e);
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let context = match RunContext::new(config, credential) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match run(&context, &cli) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            match e.downcast_ref::<PlannerError>() {
                Some(planner_error) => eprintln!("{}", map_error(planner_error)),
                None => eprintln!("{:#}", e),
            }
            process::exit(1);
        }
    }
}

fn run(context: &RunContext, cli: &Cli) -> anyhow::Result<String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let output = runtime.block_on(context.execute(&cli.command))?;
    Ok(output)
}

/// Build logging configuration from CLI args over the loaded config.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, base: &LoggingConfig) -> LoggingConfig {
    let mut config = base.clone();
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    config
}
