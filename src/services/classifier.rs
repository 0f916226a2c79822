//! Single-label classification of cleaned issue text.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::ClassificationResult;
use crate::domain::ports::ClassificationCapability;

/// Wraps a capability with tokenizer-aware truncation.
///
/// Input is encoded with the capability's own tokenizer into at most
/// `max_input_length` units, special units included, and decoded back before
/// inference, so the model never receives more than it can accept and never
/// sees a unit split in half.
/// The classifier does not know whether it is doing sentiment or emotion.
#[derive(Clone)]
pub struct Classifier {
    capability: Arc<dyn ClassificationCapability>,
}

impl Classifier {
    pub fn new(capability: Arc<dyn ClassificationCapability>) -> Self {
        Self { capability }
    }

    pub fn model_id(&self) -> &str {
        self.capability.model_id()
    }

    /// Encode into at most `max_input_length` units, decode.
    pub fn truncate(&self, text: &str) -> DomainResult<String> {
        let limit = self.capability.max_input_length();
        let units = self.capability.encode(text, limit)?;
        if units.len() > limit {
            return Err(DomainError::ClassificationFailure(format!(
                "model {} encoded {} units past its limit of {limit}",
                self.capability.model_id(),
                units.len()
            )));
        }
        debug!(units = units.len(), limit, "input encoded");
        self.capability.decode(&units)
    }

    #[instrument(skip(self, text), fields(model = %self.capability.model_id(), chars = text.len()))]
    pub async fn classify(&self, text: &str) -> DomainResult<ClassificationResult> {
        let input = self.truncate(text)?;
        let prediction = self.capability.infer(&input).await?;

        if prediction.label.is_empty() {
            return Err(DomainError::ClassificationFailure(format!(
                "model {} returned an empty label",
                self.capability.model_id()
            )));
        }

        Ok(ClassificationResult {
            label: prediction.label.to_lowercase(),
            score: prediction.score,
        })
    }
}
