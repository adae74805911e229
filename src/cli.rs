//! CLI domain: parse, route, output, and presentation only.
//! No generation logic; the route table dispatches to the plan generator.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{BusinessArgs, Cli, Commands, OutputFormat};
pub use presentation::{format_plan_json, format_plan_text};
pub use route::RunContext;
