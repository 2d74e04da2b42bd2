//! Storyboard generation requests.

use crate::{AspectRatio, ImageRef};
use framecast_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};

/// How reference images seed the first scene.
///
/// The two modes are mutually exclusive.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceMode {
    /// The first reference image becomes scene 1's image directly.
    #[default]
    AnchorFirst,
    /// All reference images are merged into one anchor image for scene 1.
    CombineAll,
}

/// Everything needed to generate a storyboard.
///
/// # Examples
///
/// ```
/// use framecast_core::{AspectRatio, GenerationRequest};
///
/// let request = GenerationRequest::builder()
///     .idea_text("A lighthouse keeper finds a message in a bottle")
///     .total_duration_seconds(20u32)
///     .scene_count(3u32)
///     .aspect_ratio(AspectRatio::Ratio9x16)
///     .build()
///     .unwrap();
///
/// assert!(*request.coherent());
/// assert_eq!(request.per_scene_duration_seconds(), 7);
///
/// let empty = GenerationRequest::builder()
///     .idea_text("   ")
///     .total_duration_seconds(10u32)
///     .scene_count(2u32)
///     .build();
/// assert!(empty.is_err());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct GenerationRequest {
    /// The user's video idea
    idea_text: String,
    /// Total video length in seconds
    total_duration_seconds: u32,
    /// Number of scenes to produce
    scene_count: u32,
    /// Pass each scene's image to the next scene's generation call
    #[builder(default = "true")]
    coherent: bool,
    /// Output aspect ratio
    #[builder(default)]
    aspect_ratio: AspectRatio,
    /// User-supplied reference images
    #[builder(default)]
    reference_images: Vec<ImageRef>,
    /// How reference images seed scene 1
    #[builder(default)]
    reference_mode: ReferenceMode,
}

impl GenerationRequestBuilder {
    /// Build and validate the request.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if a required field is missing or a value is
    /// out of range.
    pub fn build(&self) -> Result<GenerationRequest, ValidationError> {
        let request = self.build_internal().map_err(|e| {
            ValidationError::new(ValidationErrorKind::InvalidRequest(e.to_string()))
        })?;
        request.validate()?;
        Ok(request)
    }
}

impl GenerationRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// Check the request without touching the network.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.idea_text.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyIdea));
        }
        if self.total_duration_seconds == 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
            ));
        }
        if self.scene_count == 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::NonPositiveSceneCount,
            ));
        }
        Ok(())
    }

    /// Seconds per scene, rounded half up, never below one.
    pub fn per_scene_duration_seconds(&self) -> u32 {
        if self.scene_count == 0 {
            return self.total_duration_seconds.max(1);
        }
        let total = u64::from(self.total_duration_seconds);
        let count = u64::from(self.scene_count);
        let rounded = ((2 * total + count) / (2 * count)).max(1);
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }

    /// The image that seeds scene 1 directly under [`ReferenceMode::AnchorFirst`].
    pub fn first_reference(&self) -> Option<&ImageRef> {
        self.reference_images.first()
    }
}
