//! Error types for the Framecast storyboard pipeline.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The umbrella [`FramecastError`] lets callers distinguish the failure families a
//! front end needs to react to: bad input ([`ValidationError`]), a provider refusing
//! or failing ([`UpstreamError`], with [`UpstreamError::is_blocked`] separating safety
//! rejections from transport trouble), and a provider answering without a usable
//! payload ([`NoResultError`]).
//!
//! # Examples
//!
//! ```
//! use framecast_error::{FramecastResult, ValidationError, ValidationErrorKind};
//!
//! fn check(idea: &str) -> FramecastResult<()> {
//!     if idea.trim().is_empty() {
//!         Err(ValidationError::new(ValidationErrorKind::EmptyIdea))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(check("   ").is_err());
//! assert!(check("a lighthouse at dusk").is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cancelled;
mod config;
mod error;
mod media;
mod no_result;
mod upstream;
mod validation;

pub use cancelled::CancelledError;
pub use config::ConfigError;
pub use error::{FramecastError, FramecastErrorKind, FramecastResult};
pub use media::{MediaError, MediaErrorKind};
pub use no_result::NoResultError;
pub use upstream::{UpstreamError, UpstreamErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
