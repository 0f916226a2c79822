//! Inbound adapters exposing the analysis pipeline.

pub mod analyze_http;

pub use analyze_http::{
    build_router, AnalyzeHttpConfig, AnalyzeHttpServer, AppState, MAX_ISSUES_PER_REQUEST,
};
