//! Top-level error wrapper types.

use crate::{
    CancelledError, ConfigError, MediaError, NoResultError, UpstreamError, ValidationError,
};

/// Every failure family the storyboard pipeline can surface.
///
/// # Examples
///
/// ```
/// use framecast_error::{FramecastError, NoResultError};
///
/// let err: FramecastError = NoResultError::new("generate_image").into();
/// assert!(format!("{}", err).contains("No result"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FramecastErrorKind {
    /// Caller input rejected before any network call
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Provider failure, including safety blocks
    #[from(UpstreamError)]
    Upstream(UpstreamError),
    /// Provider succeeded without a usable payload
    #[from(NoResultError)]
    NoResult(NoResultError),
    /// Image or video payload problem
    #[from(MediaError)]
    Media(MediaError),
    /// Configuration could not be loaded
    #[from(ConfigError)]
    Config(ConfigError),
    /// Run cancelled by the caller
    #[from(CancelledError)]
    Cancelled(CancelledError),
}

/// Framecast error with kind discrimination.
///
/// # Examples
///
/// ```
/// use framecast_error::{FramecastResult, UpstreamError, UpstreamErrorKind};
///
/// fn call_model() -> FramecastResult<String> {
///     Err(UpstreamError::new(
///         "ark",
///         UpstreamErrorKind::Blocked { reason: "OutputImageSensitiveContentDetected".into() },
///     ))?
/// }
///
/// let err = call_model().unwrap_err();
/// assert!(err.is_blocked());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Framecast Error: {}", _0)]
pub struct FramecastError(Box<FramecastErrorKind>);

impl FramecastError {
    /// Create a new error from a kind.
    pub fn new(kind: FramecastErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FramecastErrorKind {
        &self.0
    }

    /// True when a provider refused the request on safety grounds.
    pub fn is_blocked(&self) -> bool {
        matches!(self.kind(), FramecastErrorKind::Upstream(e) if e.is_blocked())
    }

    /// True for input validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), FramecastErrorKind::Validation(_))
    }

    /// True when the run was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind(), FramecastErrorKind::Cancelled(_))
    }
}

// Generic From implementation for any type that converts to FramecastErrorKind
impl<T> From<T> for FramecastError
where
    T: Into<FramecastErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Framecast operations.
pub type FramecastResult<T> = std::result::Result<T, FramecastError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{UpstreamErrorKind, ValidationErrorKind};

    #[test]
    fn blocked_is_distinguishable_from_status_errors() {
        let blocked: FramecastError = UpstreamError::new(
            "gemini",
            UpstreamErrorKind::Blocked {
                reason: "SAFETY".to_string(),
            },
        )
        .into();
        let status: FramecastError = UpstreamError::new(
            "gemini",
            UpstreamErrorKind::Status {
                status_code: 503,
                message: "overloaded".to_string(),
            },
        )
        .into();

        assert!(blocked.is_blocked());
        assert!(!status.is_blocked());
    }

    #[test]
    fn validation_errors_report_location() {
        let err = ValidationError::new(ValidationErrorKind::EmptyIdea);
        assert!(err.file.ends_with("error.rs"));
        let wrapped: FramecastError = err.into();
        assert!(wrapped.is_validation());
        assert!(wrapped.to_string().contains("Idea text cannot be empty"));
    }
}
