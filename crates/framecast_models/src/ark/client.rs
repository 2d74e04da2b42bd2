//! Ark REST client (OpenAI-compatible endpoints).

use super::dto::{
    ChatContent, ChatMessage, ChatRequest, ChatResponse, ContentPart, ImageGenerationRequest,
    ImageGenerationResponse, ImageInput, MediaUrl, Thinking, classify_block,
};
use super::size::ark_image_size;
use crate::prompts::{continuity_line, language_instruction};
use crate::transport::{read_json, require_api_key, send};
use async_trait::async_trait;
use framecast_config::{ModelRole, ProviderEndpoint, ResolvedConfig};
use framecast_core::{AnalyzeOptions, ImageOptions, ImageRef, MediaKind};
use framecast_error::{
    FramecastResult, MediaError, MediaErrorKind, NoResultError, UpstreamError, UpstreamErrorKind,
    ValidationError, ValidationErrorKind,
};
use framecast_interface::ProviderClient;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

const PROVIDER: &str = "ark";

const DEFAULT_CHAT_MODEL: &str = "doubao-1-5-pro-32k-250115";
const DEFAULT_IMAGE_MODEL: &str = "doubao-seedream-4-0-250828";
const DEFAULT_VISION_MODEL: &str = "doubao-1-5-vision-pro-32k-250115";

/// Ark client bound to one configuration snapshot.
#[derive(Debug, Clone)]
pub struct ArkClient {
    http: Client,
    config: ResolvedConfig,
}

impl ArkClient {
    /// Create a client from a shared HTTP client and a resolved configuration.
    pub fn new(http: Client, config: ResolvedConfig) -> Self {
        Self { http, config }
    }

    fn endpoint(&self) -> &ProviderEndpoint {
        self.config.ark()
    }

    /// Model id for `role`, honoring overrides.
    pub fn model(&self, role: ModelRole) -> String {
        let models = self.config.models();
        let configured = match role {
            ModelRole::Video => models.get(ModelRole::Video).or(models.get(ModelRole::Vision)),
            other => models.get(other),
        };
        configured
            .unwrap_or(match role {
                ModelRole::Chat => DEFAULT_CHAT_MODEL,
                ModelRole::Image => DEFAULT_IMAGE_MODEL,
                ModelRole::Vision | ModelRole::Video => DEFAULT_VISION_MODEL,
            })
            .to_string()
    }

    #[instrument(skip(self, body))]
    async fn post<B, R>(&self, path: &str, body: &B) -> FramecastResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let api_key = require_api_key(PROVIDER, self.endpoint())?;
        let url = format!("{}{}", self.endpoint().base_url(), path);
        debug!(url = %url, "Sending Ark request");

        let response = send(
            PROVIDER,
            self.http
                .post(&url)
                .timeout(Duration::from_secs(*self.config.request_timeout_secs()))
                .bearer_auth(api_key)
                .json(body),
            classify_block,
        )
        .await?;
        read_json(PROVIDER, response).await
    }

    /// Something Ark can fetch: a data URL or an http(s) locator.
    fn locator(&self, image: &ImageRef) -> FramecastResult<String> {
        match image {
            ImageRef::Inline { .. } => Ok(image.display_url()),
            ImageRef::Url(url) => Ok(url.clone()),
            ImageRef::FileHandle { uri, .. } => Err(MediaError::new(MediaErrorKind::Unresolvable {
                provider: PROVIDER.to_string(),
                reference: uri.clone(),
            })
            .into()),
        }
    }

    async fn generate(
        &self,
        operation: &str,
        request: ImageGenerationRequest,
    ) -> FramecastResult<ImageRef> {
        let response: ImageGenerationResponse = self.post("/images/generations", &request).await?;
        let Some(first) = response.data.into_iter().next() else {
            return Err(NoResultError::new(operation).into());
        };
        if let Some(b64) = first.b64_json.filter(|b| !b.is_empty()) {
            return Ok(ImageRef::from_base64(&b64, "image/png")?);
        }
        if let Some(url) = first.url.filter(|u| !u.is_empty()) {
            return Ok(ImageRef::Url(url));
        }
        Err(NoResultError::new(operation).into())
    }

    fn image_request(
        &self,
        model: String,
        prompt: String,
        size: &str,
        image: Option<ImageInput>,
    ) -> FramecastResult<ImageGenerationRequest> {
        let t2i = is_text_to_image(&model);
        let sequential = is_sequential_capable(&model).then_some("disabled");
        ImageGenerationRequest::builder()
            .prompt(prompt)
            .size(size)
            .watermark(*self.config.watermark())
            .image(if t2i { None } else { image })
            .seed(if t2i { *self.config.ark_t2i_seed() } else { None })
            .sequential_image_generation(sequential)
            .model(model)
            .build()
            .map_err(|e| {
                ValidationError::new(ValidationErrorKind::InvalidRequest(e.to_string())).into()
            })
    }

    async fn chat_text(&self, operation: &str, request: ChatRequest) -> FramecastResult<String> {
        let response: ChatResponse = self.post("/chat/completions", &request).await?;
        let text = response.text();
        if !text.is_empty() {
            return Ok(text);
        }
        if response.filtered() {
            return Err(UpstreamError::new(
                PROVIDER,
                UpstreamErrorKind::Blocked {
                    reason: "content_filter".to_string(),
                },
            )
            .into());
        }
        Err(NoResultError::new(operation).into())
    }
}

/// Text-to-image models accept neither reference images nor multi-image input.
fn is_text_to_image(model: &str) -> bool {
    model.to_ascii_lowercase().contains("seedream-3-0-t2i")
}

fn is_sequential_capable(model: &str) -> bool {
    model.to_ascii_lowercase().contains("seedream-4-0")
}

fn chat_build_error(e: impl std::fmt::Display) -> ValidationError {
    ValidationError::new(ValidationErrorKind::InvalidRequest(e.to_string()))
}

#[async_trait]
impl ProviderClient for ArkClient {
    #[instrument(skip(self, system_prompt, user_prompt), fields(provider = PROVIDER))]
    async fn generate_storyboard_text(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> FramecastResult<String> {
        let request = ChatRequest::builder()
            .model(self.model(ModelRole::Chat))
            .messages(vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(ChatContent::Text(user_prompt.to_string())),
            ])
            .build()
            .map_err(chat_build_error)?;
        self.chat_text("generate_storyboard_text", request).await
    }

    #[instrument(skip(self, prompt, options), fields(provider = PROVIDER, aspect = %options.aspect_ratio, prior = options.prior_image.is_some()))]
    async fn generate_image(
        &self,
        prompt: &str,
        options: &ImageOptions,
    ) -> FramecastResult<ImageRef> {
        let model = self.model(ModelRole::Image);
        let t2i = is_text_to_image(&model);
        let size = ark_image_size(*self.config.image_size(), Some(options.aspect_ratio), t2i);

        let mut text = prompt.to_string();
        let mut image = None;
        if let Some(prior) = &options.prior_image {
            if t2i {
                debug!(model = %model, "Text-to-image model ignores the prior image");
            } else {
                let language = self.config.language_for(prompt);
                if let Some(line) = continuity_line(*self.config.coherence(), language) {
                    text = format!("{}\n\n{}", text, line);
                }
                image = Some(ImageInput::Many(vec![self.locator(prior)?]));
            }
        }

        let request = self.image_request(model, text, size, image)?;
        self.generate("generate_image", request).await
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
        let model = self.model(ModelRole::Image);
        let size = ark_image_size(*self.config.image_size(), None, is_text_to_image(&model));
        let locators = images
            .iter()
            .map(|image| self.locator(image))
            .collect::<FramecastResult<Vec<_>>>()?;

        let request =
            self.image_request(model, prompt.to_string(), size, Some(ImageInput::Many(locators)))?;
        self.generate("combine_images", request).await
    }

    #[instrument(skip(self, base, prompt), fields(provider = PROVIDER))]
    async fn edit_image(&self, base: &ImageRef, prompt: &str) -> FramecastResult<ImageRef> {
        let model = self.model(ModelRole::Image);
        let size = ark_image_size(*self.config.image_size(), None, is_text_to_image(&model));
        let request = self.image_request(
            model,
            prompt.to_string(),
            size,
            Some(ImageInput::Single(self.locator(base)?)),
        )?;
        self.generate("edit_image", request).await
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
        let url = MediaUrl {
            url: self.locator(media)?,
        };
        let (model, media_part, max_tokens) = match kind {
            MediaKind::Image => (
                self.model(ModelRole::Vision),
                ContentPart::ImageUrl { image_url: url },
                options.max_tokens,
            ),
            MediaKind::Video => (
                self.model(ModelRole::Video),
                ContentPart::VideoUrl { video_url: url },
                Some(options.max_tokens.unwrap_or(*self.config.video_max_tokens())),
            ),
        };

        let request = ChatRequest::builder()
            .model(model)
            .messages(vec![
                ChatMessage::system(language_instruction(language)),
                ChatMessage::user(ChatContent::Parts(vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    media_part,
                ])),
            ])
            .max_tokens(max_tokens)
            .thinking(options.thinking.then_some(Thinking { kind: "enabled" }))
            .build()
            .map_err(chat_build_error)?;
        self.chat_text("analyze_media", request).await
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
