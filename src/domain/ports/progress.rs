/// Advisory progress feedback for a human watching a run.
///
/// Nothing in the pipeline depends on these calls for correctness.
pub trait ProgressReporter: Send + Sync {
    /// Called after each page with the running issue count.
    fn fetch_advanced(&self, _fetched: usize, _target: usize) {}

    /// Called after each issue has been classified.
    fn issue_classified(&self, _done: usize, _total: usize) {}
}

/// Reporter that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressReporter for NullProgress {}
