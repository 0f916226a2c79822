use thiserror::Error;

use crate::domain::errors::DomainError;

/// Errors from loading or calling a hosted classification model
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Tokenizer or model metadata could not be fetched or parsed
    #[error("Failed to load model '{model}': {reason}")]
    ModelLoad { model: String, reason: String },

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// No response arrived from the inference endpoint
    #[error("Inference request failed: {0}")]
    Request(String),

    #[error("Inference endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Inference endpoint returned an error: {0}")]
    Remote(String),

    #[error("Malformed inference response: {0}")]
    MalformedResponse(String),

    #[error("Inference response contained no predictions")]
    EmptyPrediction,
}

impl From<InferenceError> for DomainError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::ModelLoad { .. } => Self::CapabilityUnavailable(err.to_string()),
            other => Self::ClassificationFailure(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_load_maps_to_capability_unavailable() {
        let err: DomainError = InferenceError::ModelLoad {
            model: "m".to_string(),
            reason: "offline".to_string(),
        }
        .into();
        assert!(matches!(err, DomainError::CapabilityUnavailable(msg) if msg.contains("offline")));
    }

    #[test]
    fn test_status_maps_to_classification_failure() {
        let err: DomainError = InferenceError::Status {
            status: 503,
            body: "loading".to_string(),
        }
        .into();
        assert!(matches!(err, DomainError::ClassificationFailure(msg) if msg.contains("503")));
    }
}
