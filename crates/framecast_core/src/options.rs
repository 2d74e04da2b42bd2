//! Per-call options for provider operations.

use crate::{AspectRatio, ImageRef};

/// Options for a single image generation call.
///
/// # Examples
///
/// ```
/// use framecast_core::{AspectRatio, ImageOptions, ImageRef};
///
/// let prior = ImageRef::Url("https://cdn.example.com/scene-1.png".to_string());
/// let options = ImageOptions::new(AspectRatio::Ratio9x16).with_prior_image(Some(prior));
/// assert!(options.prior_image.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageOptions {
    /// Requested output aspect ratio
    pub aspect_ratio: AspectRatio,
    /// Previous scene's image, passed as grounding for visual continuity
    pub prior_image: Option<ImageRef>,
}

impl ImageOptions {
    /// Options without a prior image.
    pub fn new(aspect_ratio: AspectRatio) -> Self {
        Self {
            aspect_ratio,
            prior_image: None,
        }
    }

    /// Set (or clear) the prior image.
    pub fn with_prior_image(mut self, prior_image: Option<ImageRef>) -> Self {
        self.prior_image = prior_image;
        self
    }
}

/// Options for `analyze_media`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalyzeOptions {
    /// Output token cap; providers fall back to configuration for video
    pub max_tokens: Option<u32>,
    /// Request extended reasoning where the provider supports it
    pub thinking: bool,
}
