//! Successful provider responses that carry nothing usable.

/// A provider call succeeded but returned no image or text.
///
/// This is distinct from [`crate::UpstreamError`]: the request was accepted and no
/// block reason was reported, the payload was simply missing. It is never papered
/// over with a placeholder.
///
/// # Examples
///
/// ```
/// use framecast_error::NoResultError;
///
/// let err = NoResultError::new("generate_image").with_detail("model replied with text only");
/// assert!(err.to_string().contains("generate_image"));
/// assert_eq!(err.detail.as_deref(), Some("model replied with text only"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("No result from {} at line {} in {}", operation, line, file)]
pub struct NoResultError {
    /// Operation that produced nothing
    pub operation: String,
    /// Optional provider-supplied explanation (for example a text reply)
    pub detail: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl NoResultError {
    /// Create a new NoResultError for the given operation.
    #[track_caller]
    pub fn new(operation: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            operation: operation.into(),
            detail: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attach provider-supplied detail.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if !detail.trim().is_empty() {
            self.detail = Some(detail);
        }
        self
    }
}
