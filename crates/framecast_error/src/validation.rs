//! Input validation errors raised before any network call.

/// Specific validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Idea text is empty or whitespace
    #[display("Idea text cannot be empty")]
    EmptyIdea,
    /// Total duration must be positive
    #[display("Total duration must be greater than zero seconds")]
    NonPositiveDuration,
    /// Scene count must be positive
    #[display("Scene count must be greater than zero")]
    NonPositiveSceneCount,
    /// Scene index does not address an existing scene
    #[display("Scene index {} out of range for storyboard with {} scenes", index, len)]
    SceneIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of scenes in the storyboard
        len: usize,
    },
    /// An operation that needs images was given none
    #[display("At least one image is required for {}", _0)]
    NoImages(String),
    /// Aspect ratio string not recognised
    #[display("Unsupported aspect ratio: {}", _0)]
    UnsupportedAspectRatio(String),
    /// Required builder field missing
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
}

/// Validation error with source location tracking.
///
/// # Examples
///
/// ```
/// use framecast_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::SceneIndexOutOfRange { index: 4, len: 3 });
/// assert!(err.to_string().contains("out of range"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
