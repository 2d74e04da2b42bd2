//! The storyboard aggregate.

use crate::{ImageRef, Scene};
use framecast_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};

/// Separator between scene blocks in the canonical prompt.
pub const SCENE_SEPARATOR: &str = "\n\n";

/// Join scene prompts into the canonical prompt.
pub fn join_full_prompts(scenes: &[Scene]) -> String {
    scenes
        .iter()
        .map(|scene| scene.full_prompt().as_str())
        .collect::<Vec<_>>()
        .join(SCENE_SEPARATOR)
}

/// A storyboard: ordered scenes plus the canonical, copy-ready prompt.
///
/// `copy_ready_prompt` is derived from the scenes and recomputed by every method
/// that changes a prompt, so it always equals the scenes' `full_prompt` values
/// joined with [`SCENE_SEPARATOR`].
///
/// # Examples
///
/// ```
/// use framecast_core::{Scene, StoryboardResult};
///
/// let mut storyboard = StoryboardResult::new(vec![
///     Scene::new("A", "a cat", "Scene 1:A"),
///     Scene::new("B", "a dog", "Scene 2:B"),
/// ]);
/// assert_eq!(storyboard.copy_ready_prompt(), "Scene 1:A\n\nScene 2:B");
///
/// storyboard.replace_full_prompt(1, "Scene 2:B, at night").unwrap();
/// assert_eq!(storyboard.copy_ready_prompt(), "Scene 1:A\n\nScene 2:B, at night");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_getters::Getters)]
#[serde(from = "StoryboardWire")]
pub struct StoryboardResult {
    /// Canonical prompt, all scene blocks joined
    copy_ready_prompt: String,
    /// Scenes in order
    scenes: Vec<Scene>,
}

#[derive(Deserialize)]
struct StoryboardWire {
    scenes: Vec<Scene>,
}

impl From<StoryboardWire> for StoryboardResult {
    fn from(wire: StoryboardWire) -> Self {
        Self::new(wire.scenes)
    }
}

impl StoryboardResult {
    /// Build a storyboard, deriving the canonical prompt.
    pub fn new(scenes: Vec<Scene>) -> Self {
        let copy_ready_prompt = join_full_prompts(&scenes);
        Self {
            copy_ready_prompt,
            scenes,
        }
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// True when there are no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scene at `index`.
    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    /// Fail with a validation error unless `index` addresses a scene.
    pub fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        if index < self.scenes.len() {
            Ok(())
        } else {
            Err(ValidationError::new(
                ValidationErrorKind::SceneIndexOutOfRange {
                    index,
                    len: self.scenes.len(),
                },
            ))
        }
    }

    /// Keep at most `max_scenes` scenes. Returns true when anything was dropped.
    pub fn truncate(&mut self, max_scenes: usize) -> bool {
        if self.scenes.len() <= max_scenes {
            return false;
        }
        self.scenes.truncate(max_scenes);
        self.copy_ready_prompt = join_full_prompts(&self.scenes);
        true
    }

    /// Replace one scene's prompt and recompute the canonical prompt.
    ///
    /// The scene's image is left untouched.
    pub fn replace_full_prompt(
        &mut self,
        index: usize,
        full_prompt: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.check_index(index)?;
        self.scenes[index].set_full_prompt(full_prompt.into());
        self.copy_ready_prompt = join_full_prompts(&self.scenes);
        Ok(())
    }

    /// Set one scene's image.
    pub fn set_scene_image(&mut self, index: usize, image: ImageRef) -> Result<(), ValidationError> {
        self.check_index(index)?;
        self.scenes[index].set_image(image);
        Ok(())
    }

    /// Consume the storyboard, returning its scenes.
    pub fn into_scenes(self) -> Vec<Scene> {
        self.scenes
    }
}
