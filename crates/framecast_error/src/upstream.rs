//! Errors reported by (or while talking to) a generation provider.

/// Specific upstream failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum UpstreamErrorKind {
    /// API key for the selected provider is not configured
    #[display("No API key configured for provider {}", _0)]
    MissingApiKey(String),
    /// Request never produced an HTTP response
    #[display("Request failed: {}", _0)]
    Transport(String),
    /// Provider answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Response body or provider message
        message: String,
    },
    /// Provider refused the request on safety or policy grounds
    #[display("Request blocked by provider safety policy: {}", reason)]
    Blocked {
        /// Provider-supplied block reason
        reason: String,
    },
    /// Response body could not be interpreted
    #[display("Malformed provider response: {}", _0)]
    MalformedResponse(String),
}

impl UpstreamErrorKind {
    /// Whether retrying the identical request later could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            UpstreamErrorKind::Transport(_) => true,
            UpstreamErrorKind::Status { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}

/// Provider error with the provider name and source location.
///
/// # Examples
///
/// ```
/// use framecast_error::{UpstreamError, UpstreamErrorKind};
///
/// let err = UpstreamError::new(
///     "gemini",
///     UpstreamErrorKind::Blocked { reason: "SAFETY".to_string() },
/// );
/// assert!(err.is_blocked());
/// assert!(!err.kind.is_transient());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Upstream Error ({}): {} at line {} in {}", provider, kind, line, file)]
pub struct UpstreamError {
    /// Provider that produced the error
    pub provider: &'static str,
    /// The kind of error that occurred
    pub kind: UpstreamErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl UpstreamError {
    /// Create a new UpstreamError with automatic location tracking.
    #[track_caller]
    pub fn new(provider: &'static str, kind: UpstreamErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            provider,
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True when the provider rejected the request on safety grounds.
    ///
    /// A blocked request calls for a revised prompt, any other upstream error for
    /// trying again.
    pub fn is_blocked(&self) -> bool {
        matches!(self.kind, UpstreamErrorKind::Blocked { .. })
    }
}
