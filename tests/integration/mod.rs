//! Integration tests for the presence plan generation pipeline

mod cli_startup;
mod gemini_client;
mod test_utils;
