//! Per-scene edits on a finished storyboard.

use crate::GeneratedStoryboard;
use framecast_config::{ResolvedConfig, SettingsSource};
use framecast_core::{AspectRatio, GenerationRequest, ImageOptions, ImageRef, StoryboardResult};
use framecast_error::{
    FramecastResult, MediaError, MediaErrorKind, ValidationError, ValidationErrorKind,
};
use framecast_interface::ProviderClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

/// A single edit addressed to one scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SceneCommand {
    /// Replace the scene's prompt text
    EditPrompt {
        /// Scene index
        index: usize,
        /// New prompt, used verbatim
        full_prompt: String,
    },
    /// Generate a fresh image from the scene's current prompt
    RegenerateImage {
        /// Scene index
        index: usize,
    },
    /// Replace the image with caller-supplied bytes
    UploadImage {
        /// Scene index
        index: usize,
        /// Encoded image
        bytes: Vec<u8>,
        /// Image mime type
        mime: String,
    },
    /// Replace the image with a base64 payload or data URL
    UploadImageBase64 {
        /// Scene index
        index: usize,
        /// Base64 payload or `data:` URL
        payload: String,
        /// Mime type, used when the payload is not a data URL
        mime: String,
    },
}

impl SceneCommand {
    /// Scene the command targets.
    pub fn index(&self) -> usize {
        match self {
            SceneCommand::EditPrompt { index, .. }
            | SceneCommand::RegenerateImage { index }
            | SceneCommand::UploadImage { index, .. }
            | SceneCommand::UploadImageBase64 { index, .. } => *index,
        }
    }
}

/// Owns a storyboard and applies scene edits to it.
///
/// Reads and writes of the storyboard are short; the lock is never held across
/// a provider call. Image operations on the same scene take that scene's lock and
/// run one after another, while other scenes and prompt edits proceed freely.
///
/// Regenerating a scene does not refresh later scenes that were generated from
/// its old image.
pub struct StoryboardSession<P> {
    provider: P,
    settings: Arc<dyn SettingsSource>,
    storyboard: RwLock<StoryboardResult>,
    scene_locks: Vec<Mutex<()>>,
    coherent: bool,
    aspect_ratio: AspectRatio,
}

impl<P> std::fmt::Debug for StoryboardSession<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryboardSession")
            .field("scenes", &self.scene_locks.len())
            .field("coherent", &self.coherent)
            .field("aspect_ratio", &self.aspect_ratio)
            .finish_non_exhaustive()
    }
}

impl<P: ProviderClient> StoryboardSession<P> {
    /// Wrap a storyboard with the run parameters it was generated under.
    pub fn new(
        provider: P,
        settings: Arc<dyn SettingsSource>,
        storyboard: StoryboardResult,
        coherent: bool,
        aspect_ratio: AspectRatio,
    ) -> Self {
        let scene_locks = (0..storyboard.len()).map(|_| Mutex::new(())).collect();
        Self {
            provider,
            settings,
            storyboard: RwLock::new(storyboard),
            scene_locks,
            coherent,
            aspect_ratio,
        }
    }

    /// Start a session from a finished run.
    pub fn from_generated(
        provider: P,
        settings: Arc<dyn SettingsSource>,
        generated: GeneratedStoryboard,
        request: &GenerationRequest,
    ) -> Self {
        Self::new(
            provider,
            settings,
            generated.into_storyboard(),
            *request.coherent(),
            *request.aspect_ratio(),
        )
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scene_locks.len()
    }

    /// True when the storyboard has no scenes.
    pub fn is_empty(&self) -> bool {
        self.scene_locks.is_empty()
    }

    /// A copy of the current storyboard.
    pub async fn snapshot(&self) -> StoryboardResult {
        self.storyboard.read().await.clone()
    }

    /// Apply one command.
    pub async fn apply(&self, command: SceneCommand) -> FramecastResult<()> {
        debug!(index = command.index(), "Applying scene command");
        match command {
            SceneCommand::EditPrompt { index, full_prompt } => {
                self.edit_scene_prompt(index, full_prompt).await
            }
            SceneCommand::RegenerateImage { index } => {
                self.regenerate_scene_image(index).await.map(|_| ())
            }
            SceneCommand::UploadImage { index, bytes, mime } => {
                self.upload_manual_scene_image(index, bytes, &mime).await
            }
            SceneCommand::UploadImageBase64 {
                index,
                payload,
                mime,
            } => {
                self.upload_manual_scene_image_base64(index, &payload, &mime)
                    .await
            }
        }
    }

    /// Replace a scene's prompt and recompute the canonical prompt.
    ///
    /// The scene's image is kept.
    pub async fn edit_scene_prompt(
        &self,
        index: usize,
        full_prompt: impl Into<String>,
    ) -> FramecastResult<()> {
        self.storyboard
            .write()
            .await
            .replace_full_prompt(index, full_prompt)?;
        debug!(index, "Edited scene prompt");
        Ok(())
    }

    /// Generate a new image for one scene from its current prompt.
    ///
    /// With coherence on, the previous scene's current image is passed along.
    /// On failure the scene keeps its old image and the error is returned.
    #[instrument(skip(self), fields(provider = self.provider.provider_name()))]
    pub async fn regenerate_scene_image(&self, index: usize) -> FramecastResult<ImageRef> {
        let _scene = self.scene_lock(index)?.lock().await;
        let config = ResolvedConfig::load(self.settings.as_ref())?;

        let (prompt, prior_image) = {
            let storyboard = self.storyboard.read().await;
            storyboard.check_index(index)?;
            let prompt = storyboard.scenes()[index].full_prompt().clone();
            let prior_image = if self.coherent && config.coherence().passes_prior_image() && index > 0
            {
                storyboard.scenes()[index - 1].image_url().clone()
            } else {
                None
            };
            (prompt, prior_image)
        };

        let options = ImageOptions::new(self.aspect_ratio).with_prior_image(prior_image);
        let image = self
            .provider
            .generate_image(&prompt, &options)
            .await
            .inspect_err(|e| warn!(index, error = %e, "Regeneration failed, keeping previous image"))?;

        self.storyboard
            .write()
            .await
            .set_scene_image(index, image.clone())?;
        info!(index, "Regenerated scene image");
        Ok(image)
    }

    /// Replace a scene's image with caller-supplied bytes.
    ///
    /// # Errors
    ///
    /// Returns a media error for empty bytes or a non-image mime type, and a
    /// validation error for an unknown index.
    pub async fn upload_manual_scene_image(
        &self,
        index: usize,
        bytes: Vec<u8>,
        mime: &str,
    ) -> FramecastResult<()> {
        if bytes.is_empty() {
            return Err(MediaError::new(MediaErrorKind::Empty).into());
        }
        self.store_upload(index, ImageRef::inline(mime, bytes)).await
    }

    /// Replace a scene's image with a base64 payload or a `data:` URL.
    pub async fn upload_manual_scene_image_base64(
        &self,
        index: usize,
        payload: &str,
        mime: &str,
    ) -> FramecastResult<()> {
        let payload = payload.trim();
        let image = if payload.starts_with("data:") {
            ImageRef::from_data_url(payload)?
        } else {
            ImageRef::from_base64(payload, mime)?
        };
        self.store_upload(index, image).await
    }

    async fn store_upload(&self, index: usize, image: ImageRef) -> FramecastResult<()> {
        let mime = image.mime().unwrap_or_default();
        if !mime.starts_with("image/") {
            return Err(MediaError::new(MediaErrorKind::NotAnImage(mime.to_string())).into());
        }

        let _scene = self.scene_lock(index)?.lock().await;
        self.storyboard.write().await.set_scene_image(index, image)?;
        info!(index, "Stored uploaded scene image");
        Ok(())
    }

    fn scene_lock(&self, index: usize) -> Result<&Mutex<()>, ValidationError> {
        self.scene_locks.get(index).ok_or_else(|| {
            ValidationError::new(ValidationErrorKind::SceneIndexOutOfRange {
                index,
                len: self.scene_locks.len(),
            })
        })
    }
}
