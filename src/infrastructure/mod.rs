//! Infrastructure layer module
//!
//! This module contains the outbound adapters and ambient plumbing:
//! - GitHub REST transport (reqwest)
//! - Hugging Face classification capabilities
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod github;
pub mod inference;
pub mod logging;
