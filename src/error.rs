use thiserror::Error;

/// Main error type for the planner pipeline
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generation backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Empty input: message contained no text")]
    EmptyInput,

    #[error("Generation timed out")]
    Timeout,

    #[error("Generation superseded by a newer submission")]
    Cancelled,

    #[error("Backend output could not be decoded as a plan")]
    MalformedOutput { raw: String },

    #[error("Backend output decoded but is missing required plan keys")]
    SchemaMismatch { raw: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Check if this error is worth retrying with another submission
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlannerError::Backend(_)
                | PlannerError::Timeout
                | PlannerError::MalformedOutput { .. }
                | PlannerError::SchemaMismatch { .. }
        )
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::Backend(_) => "BACKEND_ERROR",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::EmptyInput => "EMPTY_INPUT",
            PlannerError::Timeout => "GENERATION_TIMEOUT",
            PlannerError::Cancelled => "GENERATION_CANCELLED",
            PlannerError::MalformedOutput { .. } => "MALFORMED_OUTPUT",
            PlannerError::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            PlannerError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Raw backend text preserved on repair failures, shown to the user as
    /// the fallback conversational reply.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            PlannerError::MalformedOutput { raw } | PlannerError::SchemaMismatch { raw } => {
                Some(raw)
            }
            _ => None,
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PlannerError::Timeout.error_code(), "GENERATION_TIMEOUT");
        assert_eq!(PlannerError::EmptyInput.error_code(), "EMPTY_INPUT");
        assert_eq!(
            PlannerError::MalformedOutput {
                raw: "oops".to_string()
            }
            .error_code(),
            "MALFORMED_OUTPUT"
        );
    }

    #[test]
    fn test_raw_output_preserved() {
        let err = PlannerError::SchemaMismatch {
            raw: "Sure! Here is your trip...".to_string(),
        };
        assert_eq!(err.raw_output(), Some("Sure! Here is your trip..."));
        assert!(PlannerError::Timeout.raw_output().is_none());
    }

    #[test]
    fn test_error_payload() {
        let payload = PlannerError::Timeout.to_error_payload();
        assert_eq!(payload["error"]["code"], "GENERATION_TIMEOUT");
        assert_eq!(payload["error"]["retryable"], true);

        let payload = PlannerError::EmptyInput.to_error_payload();
        assert_eq!(payload["error"]["retryable"], false);
    }
}
