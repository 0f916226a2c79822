//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that infrastructure adapters implement:
//! - HttpTransport: plain GET against the issue-listing API
//! - ClassificationCapability: tokenization plus single-label inference
//! - ProgressReporter: advisory progress feedback for humans
//!
//! The services in this crate depend only on these traits, never on a
//! concrete HTTP client or model runtime.

pub mod classification;
pub mod http_transport;
pub mod progress;

pub use classification::{ClassificationCapability, Prediction};
pub use http_transport::{HttpResponse, HttpTransport};
pub use progress::{NullProgress, ProgressReporter};
