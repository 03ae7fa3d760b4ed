use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::warn;

pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Errors raised while constructing the crate's value types.
///
/// `generate_schedule` itself never returns this type: by the time values
/// reach it they are trusted, per the core's "caller rejects malformed
/// input" contract. This is the boundary collaborators hit when building an
/// `Occupation` or `Item` from untrusted upstream data.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        details: Option<JsonValue>,
    },
}

impl SchedulerError {
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "scheduler::validation", %message, "validation error");
        SchedulerError::Validation {
            message,
            details: None,
        }
    }

    pub fn validation_with_details(message: impl Into<String>, details: JsonValue) -> Self {
        let message = message.into();
        warn!(target: "scheduler::validation", %message, %details, "validation error with details");
        SchedulerError::Validation {
            message,
            details: Some(details),
        }
    }
}
