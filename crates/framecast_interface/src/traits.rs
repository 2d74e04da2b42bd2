//! The provider client contract.

use async_trait::async_trait;
use framecast_core::{AnalyzeOptions, ImageOptions, ImageRef, MediaKind};
use framecast_error::FramecastResult;
use std::sync::Arc;

/// Operations every generation backend provides.
///
/// Implementations keep no state between calls beyond what they were built
/// with. Failures map onto the shared taxonomy:
/// - non-success HTTP responses become `UpstreamError` with status and message
/// - safety rejections become `UpstreamError` of kind `Blocked`
/// - a successful response without an image or text becomes `NoResultError`
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Produce the storyboard script for a system and user prompt pair.
    async fn generate_storyboard_text(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> FramecastResult<String>;

    /// Generate one image, optionally grounded on a prior image.
    async fn generate_image(&self, prompt: &str, options: &ImageOptions)
    -> FramecastResult<ImageRef>;

    /// Merge several images into one according to `prompt`.
    async fn combine_images(&self, images: &[ImageRef], prompt: &str)
    -> FramecastResult<ImageRef>;

    /// Edit `base` according to `prompt`.
    async fn edit_image(&self, base: &ImageRef, prompt: &str) -> FramecastResult<ImageRef>;

    /// Describe an image or video.
    async fn analyze_media(
        &self,
        media: &ImageRef,
        prompt: &str,
        kind: MediaKind,
        options: &AnalyzeOptions,
    ) -> FramecastResult<String>;

    /// Provider name (e.g., "gemini", "ark").
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<T> ProviderClient for Arc<T>
where
    T: ProviderClient + ?Sized,
{
    async fn generate_storyboard_text(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> FramecastResult<String> {
        (**self)
            .generate_storyboard_text(system_prompt, user_prompt)
            .await
    }

    async fn generate_image(
        &self,
        prompt: &str,
        options: &ImageOptions,
    ) -> FramecastResult<ImageRef> {
        (**self).generate_image(prompt, options).await
    }

    async fn combine_images(
        &self,
        images: &[ImageRef],
        prompt: &str,
    ) -> FramecastResult<ImageRef> {
        (**self).combine_images(images, prompt).await
    }

    async fn edit_image(&self, base: &ImageRef, prompt: &str) -> FramecastResult<ImageRef> {
        (**self).edit_image(base, prompt).await
    }

    async fn analyze_media(
        &self,
        media: &ImageRef,
        prompt: &str,
        kind: MediaKind,
        options: &AnalyzeOptions,
    ) -> FramecastResult<String> {
        (**self).analyze_media(media, prompt, kind, options).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
