pub mod analysis_service;
pub mod classifier;
pub mod issue_extractor;
pub mod issue_fetcher;
pub mod text_normalizer;

pub use analysis_service::AnalysisService;
pub use classifier::Classifier;
pub use issue_fetcher::{IssueFetcher, MAX_PAGE_SIZE};
