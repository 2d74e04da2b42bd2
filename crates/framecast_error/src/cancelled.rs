//! Cancellation of an in-flight storyboard run.

/// A storyboard run was cancelled before it completed.
///
/// Carries the name of the stage that was active when the cancellation was observed.
/// Nothing produced by the run survives a cancellation.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Cancelled during {} at line {} in {}", stage, line, file)]
pub struct CancelledError {
    /// Stage that was running when the run was cancelled
    pub stage: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl CancelledError {
    /// Create a new CancelledError for the given stage.
    #[track_caller]
    pub fn new(stage: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            stage: stage.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
