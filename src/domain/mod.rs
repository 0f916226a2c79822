//! Domain layer for the issue analysis pipeline
//!
//! This module contains the core data model, error taxonomy and the port
//! traits that infrastructure adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
