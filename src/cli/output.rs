//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{GenerationError, PlannerError};

/// Map domain errors to a message for stderr.
pub fn map_error(e: &PlannerError) -> String {
    match e {
        PlannerError::Generation(GenerationError::InvalidResponse { .. }) => format!(
            "{}\nThe service replied with an unusable plan; running the command again may succeed.",
            e
        ),
        PlannerError::Generation(GenerationError::ServiceFailure(_)) => format!(
            "{}\nCheck your network connection and the API_KEY credential, then try again.",
            e
        ),
        _ => e.to_string(),
    }
}
