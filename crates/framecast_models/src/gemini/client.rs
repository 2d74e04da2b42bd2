//! Gemini REST client.

use super::dto::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part, ThinkingConfig,
};
use super::files::FilesApi;
use crate::prompts::{language_instruction, scene_image_prompt};
use crate::transport::{fetch_remote, no_block, read_json, require_api_key, send};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use framecast_config::{MediaUploadPolicy, ModelRole, ProviderEndpoint, ResolvedConfig};
use framecast_core::{AnalyzeOptions, ImageOptions, ImageRef, MediaKind};
use framecast_error::{
    FramecastResult, NoResultError, UpstreamError, UpstreamErrorKind, ValidationError,
    ValidationErrorKind,
};
use framecast_interface::ProviderClient;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const PROVIDER: &str = "gemini";

const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-pro";
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const DEFAULT_VISION_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_VIDEO_MODEL: &str = "gemini-2.5-flash";

/// Inline payloads above this size go through the Files API under the `auto` policy.
const INLINE_LIMIT_BYTES: usize = 4 * 1024 * 1024;

const THINKING_BUDGET: i32 = 32768;

/// Gemini client bound to one configuration snapshot.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    config: ResolvedConfig,
}

impl GeminiClient {
    /// Create a client from a shared HTTP client and a resolved configuration.
    pub fn new(http: Client, config: ResolvedConfig) -> Self {
        Self { http, config }
    }

    fn endpoint(&self) -> &ProviderEndpoint {
        self.config.gemini()
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(*self.config.request_timeout_secs())
    }

    /// Model id for `role`, honoring overrides.
    pub fn model(&self, role: ModelRole) -> String {
        let models = self.config.models();
        let configured = match role {
            ModelRole::Vision => models.get(ModelRole::Vision).or(models.get(ModelRole::Chat)),
            other => models.get(other),
        };
        configured
            .unwrap_or(match role {
                ModelRole::Chat => DEFAULT_CHAT_MODEL,
                ModelRole::Image => DEFAULT_IMAGE_MODEL,
                ModelRole::Vision => DEFAULT_VISION_MODEL,
                ModelRole::Video => DEFAULT_VIDEO_MODEL,
            })
            .to_string()
    }

    #[instrument(skip(self, model, body), fields(model = %model))]
    async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> FramecastResult<GenerateContentResponse> {
        let api_key = require_api_key(PROVIDER, self.endpoint())?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint().base_url(),
            model
        );
        debug!(url = %url, "Sending Gemini generateContent request");

        let response = send(
            PROVIDER,
            self.http
                .post(&url)
                .timeout(self.timeout())
                .header("x-goog-api-key", api_key)
                .json(body),
            no_block,
        )
        .await?;
        read_json(PROVIDER, response).await
    }

    fn should_upload(&self, kind: MediaKind, len: usize) -> bool {
        match self.config.media_upload() {
            MediaUploadPolicy::Always => true,
            MediaUploadPolicy::Never => false,
            MediaUploadPolicy::Auto => kind == MediaKind::Video || len > INLINE_LIMIT_BYTES,
        }
    }

    /// Turn an image reference into a request part, uploading when policy says so.
    async fn media_part(&self, media: &ImageRef, kind: MediaKind) -> FramecastResult<Part> {
        let (mime, data) = match media {
            ImageRef::FileHandle { uri, mime } => {
                let mime = mime.clone().unwrap_or_else(|| default_mime(kind).to_string());
                return Ok(Part::file(mime, uri.clone()));
            }
            ImageRef::Inline { mime, data } => (mime.clone(), data.clone()),
            ImageRef::Url(url) => fetch_remote(&self.http, url, self.timeout()).await?,
        };

        if self.should_upload(kind, data.len()) {
            let api_key = require_api_key(PROVIDER, self.endpoint())?;
            let files = FilesApi {
                http: &self.http,
                base_url: self.endpoint().base_url(),
                api_key,
                timeout: self.timeout(),
            };
            let uploaded = files.upload(&mime, data).await?;
            Ok(Part::file(uploaded.mime_type, uploaded.uri))
        } else {
            Ok(Part::inline(mime, STANDARD.encode(&data)))
        }
    }

    /// Run the tolerant body chain for an image operation.
    ///
    /// The first body asks for an image modality; if the model answers without an
    /// image (and without a block) the same parts are sent once more without
    /// generation config.
    async fn image_from_parts(
        &self,
        operation: &str,
        parts: Vec<Part>,
        aspect_ratio: Option<&str>,
    ) -> FramecastResult<ImageRef> {
        let model = self.model(ModelRole::Image);
        let bodies = [
            GenerateContentRequest::user(parts.clone())
                .with_generation_config(GenerationConfig::image(aspect_ratio)),
            GenerateContentRequest::user(parts),
        ];

        let mut last_text = String::new();
        for (attempt, body) in bodies.iter().enumerate() {
            let response = self.generate_content(&model, body).await?;
            if let Some(reason) = response.block_reason() {
                warn!(operation, reason = %reason, "Gemini blocked image request");
                return Err(UpstreamError::new(PROVIDER, UpstreamErrorKind::Blocked { reason }).into());
            }
            if let Some(image) = response.first_image() {
                return Ok(image.into_image_ref()?);
            }
            last_text = response.text();
            debug!(operation, attempt, text = %last_text, "No image in response, trying next body");
        }

        Err(NoResultError::new(operation).with_detail(last_text).into())
    }
}

fn default_mime(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image/png",
        MediaKind::Video => "video/mp4",
    }
}

#[async_trait]
impl ProviderClient for GeminiClient {
    #[instrument(skip(self, system_prompt, user_prompt), fields(provider = PROVIDER))]
    async fn generate_storyboard_text(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> FramecastResult<String> {
        let body =
            GenerateContentRequest::user(vec![Part::text(user_prompt)]).with_system(system_prompt);
        let response = self
            .generate_content(&self.model(ModelRole::Chat), &body)
            .await?;

        let text = response.text();
        if !text.is_empty() {
            return Ok(text);
        }
        if let Some(reason) = response.block_reason() {
            return Err(UpstreamError::new(PROVIDER, UpstreamErrorKind::Blocked { reason }).into());
        }
        Err(NoResultError::new("generate_storyboard_text").into())
    }

    #[instrument(skip(self, prompt, options), fields(provider = PROVIDER, aspect = %options.aspect_ratio, prior = options.prior_image.is_some()))]
    async fn generate_image(
        &self,
        prompt: &str,
        options: &ImageOptions,
    ) -> FramecastResult<ImageRef> {
        let language = self.config.language_for(prompt);
        let continuity = options
            .prior_image
            .as_ref()
            .map(|_| *self.config.coherence());
        let mut parts = vec![Part::text(scene_image_prompt(prompt, language, continuity))];
        if let Some(prior) = &options.prior_image {
            parts.push(self.media_part(prior, MediaKind::Image).await?);
        }
        self.image_from_parts("generate_image", parts, Some(options.aspect_ratio.as_str()))
            .await
    }

    #[instrument(skip(self, images, prompt), fields(provider = PROVIDER, count = images.len()))]
    async fn combine_images(
        &self,
        images: &[ImageRef],
        prompt: &str,
    ) -> FramecastResult<ImageRef> {
        if images.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::NoImages(
                "combine_images".to_string(),
            ))
            .into());
        }
        let mut parts = vec![Part::text(prompt)];
        for image in images {
            parts.push(self.media_part(image, MediaKind::Image).await?);
        }
        self.image_from_parts("combine_images", parts, None).await
    }

    #[instrument(skip(self, base, prompt), fields(provider = PROVIDER))]
    async fn edit_image(&self, base: &ImageRef, prompt: &str) -> FramecastResult<ImageRef> {
        let parts = vec![
            Part::text(prompt),
            self.media_part(base, MediaKind::Image).await?,
        ];
        self.image_from_parts("edit_image", parts, None).await
    }

    #[instrument(skip(self, media, prompt, kind, options), fields(provider = PROVIDER, kind = %kind))]
    async fn analyze_media(
        &self,
        media: &ImageRef,
        prompt: &str,
        kind: MediaKind,
        options: &AnalyzeOptions,
    ) -> FramecastResult<String> {
        let language = self.config.language_for(prompt);
        let model = match kind {
            MediaKind::Image => self.model(ModelRole::Vision),
            MediaKind::Video => self.model(ModelRole::Video),
        };
        let max_output_tokens = match (options.max_tokens, kind) {
            (Some(tokens), _) => Some(tokens),
            (None, MediaKind::Video) => Some(*self.config.video_max_tokens()),
            (None, MediaKind::Image) => None,
        };
        let thinking_config = options.thinking.then_some(ThinkingConfig {
            thinking_budget: THINKING_BUDGET,
        });

        let parts = vec![Part::text(prompt), self.media_part(media, kind).await?];
        let mut body =
            GenerateContentRequest::user(parts).with_system(language_instruction(language));
        if max_output_tokens.is_some() || thinking_config.is_some() {
            body = body.with_generation_config(GenerationConfig {
                max_output_tokens,
                thinking_config,
                ..GenerationConfig::default()
            });
        }

        let response = self.generate_content(&model, &body).await?;
        let text = response.text();
        if !text.is_empty() {
            return Ok(text);
        }
        if let Some(reason) = response.block_reason() {
            return Err(UpstreamError::new(PROVIDER, UpstreamErrorKind::Blocked { reason }).into());
        }
        Err(NoResultError::new("analyze_media").into())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framecast_config::{SettingsMap, keys};

    fn client(pairs: &[(&str, &str)]) -> GeminiClient {
        let settings: SettingsMap = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GeminiClient::new(Client::new(), ResolvedConfig::resolve(&settings))
    }

    #[test]
    fn models_fall_back_to_defaults() {
        let client = client(&[]);
        assert_eq!(client.model(ModelRole::Chat), DEFAULT_CHAT_MODEL);
        assert_eq!(client.model(ModelRole::Image), DEFAULT_IMAGE_MODEL);
        assert_eq!(client.model(ModelRole::Video), DEFAULT_VIDEO_MODEL);
    }

    #[test]
    fn vision_model_falls_back_to_chat_override() {
        let client = client(&[(keys::MODEL_CHAT, "gemini-2.5-flash-lite")]);
        assert_eq!(client.model(ModelRole::Vision), "gemini-2.5-flash-lite");
    }

    #[test]
    fn upload_policy_controls_files_api_usage() {
        let auto = client(&[]);
        assert!(!auto.should_upload(MediaKind::Image, 1024));
        assert!(auto.should_upload(MediaKind::Image, INLINE_LIMIT_BYTES + 1));
        assert!(auto.should_upload(MediaKind::Video, 1024));

        let never = client(&[(keys::MEDIA_UPLOAD, "never")]);
        assert!(!never.should_upload(MediaKind::Video, INLINE_LIMIT_BYTES * 4));

        let always = client(&[(keys::MEDIA_UPLOAD, "always")]);
        assert!(always.should_upload(MediaKind::Image, 1));
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_sending() {
        let client = client(&[]);
        let err = client
            .generate_storyboard_text("system", "user")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No API key configured for provider gemini"));
    }
}
