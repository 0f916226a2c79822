//! Classification capability port.
//!
//! A capability is an opaque single-label text classifier. Besides inference
//! it exposes its own tokenizer so callers can cut input at unit boundaries
//! the model understands instead of slicing characters.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Raw single-best prediction returned by a capability.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

#[async_trait]
pub trait ClassificationCapability: Send + Sync {
    /// Identifier of the underlying model, for logs and reports.
    fn model_id(&self) -> &str;

    /// Maximum number of units (tokens) the model accepts.
    fn max_input_length(&self) -> usize;

    /// Tokenize `text` into at most `max_units` units.
    ///
    /// Special units the model adds count against `max_units`; content is
    /// cut from the end so the special units always survive.
    fn encode(&self, text: &str, max_units: usize) -> DomainResult<Vec<u32>>;

    /// Turn units back into text, dropping special units.
    fn decode(&self, units: &[u32]) -> DomainResult<String>;

    /// Classify `text` and return the highest-scoring label.
    async fn infer(&self, text: &str) -> DomainResult<Prediction>;
}
