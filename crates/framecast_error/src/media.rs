//! Image and video payload errors.

/// Specific media handling failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum MediaErrorKind {
    /// Base64 payload could not be decoded
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
    /// String is not a `data:<mime>;base64,<payload>` URL
    #[display("Invalid data URL: {}", _0)]
    InvalidDataUrl(String),
    /// Payload contains no bytes
    #[display("Media payload is empty")]
    Empty,
    /// Mime type is not an image type
    #[display("Expected an image mime type, got {}", _0)]
    NotAnImage(String),
    /// Reference cannot be consumed by the active provider
    #[display("Media reference cannot be used by {}: {}", provider, reference)]
    Unresolvable {
        /// Provider that cannot consume the reference
        provider: String,
        /// Short description of the reference
        reference: String,
    },
    /// Downloading a remote locator failed
    #[display("Failed to fetch media from {}: {}", url, message)]
    Fetch {
        /// Remote locator
        url: String,
        /// Failure description
        message: String,
    },
}

/// Media error with source location tracking.
///
/// # Examples
///
/// ```
/// use framecast_error::{MediaError, MediaErrorKind};
///
/// let err = MediaError::new(MediaErrorKind::NotAnImage("text/plain".to_string()));
/// assert!(err.to_string().contains("text/plain"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Media Error: {} at line {} in {}", kind, line, file)]
pub struct MediaError {
    /// The kind of error that occurred
    pub kind: MediaErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MediaError {
    /// Create a new MediaError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MediaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
