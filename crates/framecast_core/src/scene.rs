//! A single storyboard scene.

use crate::ImageRef;
use serde::{Deserialize, Serialize};

/// One scene of a storyboard.
///
/// Scenes are only mutated through [`crate::StoryboardResult`], which keeps the
/// canonical prompt in step with every scene's `full_prompt`.
///
/// # Examples
///
/// ```
/// use framecast_core::Scene;
///
/// let scene = Scene::new("Harbor at dawn", "a fisherman, in a misty harbor", "Scene 1:Harbor at dawn");
/// assert_eq!(scene.title(), "Harbor at dawn");
/// assert!(scene.image_url().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Scene {
    /// First line of the scene block
    title: String,
    /// Short synthesized summary used for image prompting
    description: String,
    /// The scene's full block of the canonical script, prefixed `Scene <n>:`
    full_prompt: String,
    /// Generated or uploaded image
    image_url: Option<ImageRef>,
}

impl Scene {
    /// Create a scene without an image.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        full_prompt: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            full_prompt: full_prompt.into(),
            image_url: None,
        }
    }

    /// Attach an image at construction time.
    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image_url = Some(image);
        self
    }

    pub(crate) fn set_full_prompt(&mut self, full_prompt: String) {
        self.full_prompt = full_prompt;
    }

    pub(crate) fn set_image(&mut self, image: ImageRef) {
        self.image_url = Some(image);
    }
}
