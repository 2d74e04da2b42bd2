//! Per-call provider selection.

use crate::{ArkClient, GeminiClient};
use async_trait::async_trait;
use framecast_config::{ProviderKind, ResolvedConfig, SettingsSource};
use framecast_core::{AnalyzeOptions, ImageOptions, ImageRef, MediaKind};
use framecast_error::FramecastResult;
use framecast_interface::ProviderClient;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

/// The concrete backend serving one call.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Gemini backend
    Gemini(GeminiClient),
    /// Ark backend
    Ark(ArkClient),
}

impl Provider {
    /// Build the backend named by `config`.
    pub fn from_config(http: Client, config: ResolvedConfig) -> Self {
        match config.provider() {
            ProviderKind::Gemini => Provider::Gemini(GeminiClient::new(http, config)),
            ProviderKind::Ark => Provider::Ark(ArkClient::new(http, config)),
        }
    }

    fn client(&self) -> &dyn ProviderClient {
        match self {
            Provider::Gemini(client) => client,
            Provider::Ark(client) => client,
        }
    }
}

#[async_trait]
impl ProviderClient for Provider {
    async fn generate_storyboard_text(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> FramecastResult<String> {
        self.client()
            .generate_storyboard_text(system_prompt, user_prompt)
            .await
    }

    async fn generate_image(
        &self,
        prompt: &str,
        options: &ImageOptions,
    ) -> FramecastResult<ImageRef> {
        self.client().generate_image(prompt, options).await
    }

    async fn combine_images(
        &self,
        images: &[ImageRef],
        prompt: &str,
    ) -> FramecastResult<ImageRef> {
        self.client().combine_images(images, prompt).await
    }

    async fn edit_image(&self, base: &ImageRef, prompt: &str) -> FramecastResult<ImageRef> {
        self.client().edit_image(base, prompt).await
    }

    async fn analyze_media(
        &self,
        media: &ImageRef,
        prompt: &str,
        kind: MediaKind,
        options: &AnalyzeOptions,
    ) -> FramecastResult<String> {
        self.client()
            .analyze_media(media, prompt, kind, options)
            .await
    }

    fn provider_name(&self) -> &'static str {
        self.client().provider_name()
    }
}

/// Provider client that re-reads settings on every call.
///
/// Holds only a shared HTTP client and the settings source, so switching the
/// provider or a model in the settings takes effect on the next call.
#[derive(Clone)]
pub struct ConfiguredProvider {
    http: Client,
    settings: Arc<dyn SettingsSource>,
}

impl std::fmt::Debug for ConfiguredProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredProvider").finish_non_exhaustive()
    }
}

impl ConfiguredProvider {
    /// Create a provider over `settings` with a default HTTP client.
    pub fn new(settings: Arc<dyn SettingsSource>) -> Self {
        Self::with_http_client(Client::new(), settings)
    }

    /// Create a provider with an explicit HTTP client.
    pub fn with_http_client(http: Client, settings: Arc<dyn SettingsSource>) -> Self {
        Self { http, settings }
    }

    /// Resolve settings now and build the selected backend.
    pub fn select(&self) -> FramecastResult<Provider> {
        let config = ResolvedConfig::load(self.settings.as_ref())?;
        debug!(provider = %config.provider(), "Selected provider for call");
        Ok(Provider::from_config(self.http.clone(), config))
    }
}

#[async_trait]
impl ProviderClient for ConfiguredProvider {
    async fn generate_storyboard_text(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> FramecastResult<String> {
        self.select()?
            .generate_storyboard_text(system_prompt, user_prompt)
            .await
    }

    async fn generate_image(
        &self,
        prompt: &str,
        options: &ImageOptions,
    ) -> FramecastResult<ImageRef> {
        self.select()?.generate_image(prompt, options).await
    }

    async fn combine_images(
        &self,
        images: &[ImageRef],
        prompt: &str,
    ) -> FramecastResult<ImageRef> {
        self.select()?.combine_images(images, prompt).await
    }

    async fn edit_image(&self, base: &ImageRef, prompt: &str) -> FramecastResult<ImageRef> {
        self.select()?.edit_image(base, prompt).await
    }

    async fn analyze_media(
        &self,
        media: &ImageRef,
        prompt: &str,
        kind: MediaKind,
        options: &AnalyzeOptions,
    ) -> FramecastResult<String> {
        self.select()?
            .analyze_media(media, prompt, kind, options)
            .await
    }

    fn provider_name(&self) -> &'static str {
        match self.select() {
            Ok(provider) => provider.provider_name(),
            Err(_) => "unconfigured",
        }
    }
}
