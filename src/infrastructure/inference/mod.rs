//! Classification capabilities backed by Hugging Face models.
//!
//! The tokenizer is fetched from the Hub and run locally so inputs can be
//! truncated on token boundaries; inference itself goes through the hosted
//! inference endpoint.

pub mod error;
pub mod hosted;
pub mod registry;

pub use error::InferenceError;
pub use hosted::HostedClassifier;
pub use registry::CapabilityRegistry;
