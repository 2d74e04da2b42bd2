//! Ark chat completion and image generation wire types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Chat message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ChatMessage {
    pub(crate) role: &'static str,
    pub(crate) content: ChatContent,
}

impl ChatMessage {
    pub(crate) fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: ChatContent::Text(text.into()),
        }
    }

    pub(crate) fn user(content: ChatContent) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

/// Plain text or multimodal parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum ChatContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: MediaUrl },
    VideoUrl { video_url: MediaUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct MediaUrl {
    pub(crate) url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Thinking {
    #[serde(rename = "type")]
    pub(crate) kind: &'static str,
}

/// `POST /chat/completions` body.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into))]
pub(crate) struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking: Option<Thinking>,
}

impl ChatRequest {
    pub(crate) fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub(crate) choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ChatChoice {
    #[serde(default)]
    pub(crate) message: Option<ChatResponseMessage>,
    #[serde(default)]
    pub(crate) finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ChatResponseMessage {
    #[serde(default)]
    pub(crate) content: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice, trimmed.
    pub(crate) fn text(&self) -> String {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
            .unwrap_or_default()
            .trim()
            .to_string()
    }

    /// True when the first choice was cut by the content filter.
    pub(crate) fn filtered(&self) -> bool {
        self.choices
            .first()
            .and_then(|choice| choice.finish_reason.as_deref())
            == Some("content_filter")
    }
}

/// A single image locator or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum ImageInput {
    Single(String),
    Many(Vec<String>),
}

/// `POST /images/generations` body.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into))]
pub(crate) struct ImageGenerationRequest {
    model: String,
    prompt: String,
    size: String,
    #[builder(default = "\"b64_json\"")]
    response_format: &'static str,
    #[builder(default)]
    watermark: bool,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<ImageInput>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    sequential_image_generation: Option<&'static str>,
}

impl ImageGenerationRequest {
    pub(crate) fn builder() -> ImageGenerationRequestBuilder {
        ImageGenerationRequestBuilder::default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ImageGenerationResponse {
    #[serde(default, alias = "images")]
    pub(crate) data: Vec<ImageDatum>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ImageDatum {
    #[serde(default)]
    pub(crate) b64_json: Option<String>,
    #[serde(default)]
    pub(crate) url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub(crate) error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) code: Option<String>,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

/// Block reason for an Ark error body, if it reports sensitive content.
pub(crate) fn classify_block(_status: u16, body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    let error = envelope.error?;
    let code = error.code.unwrap_or_default();
    let message = error.message.unwrap_or_default();
    let lowered = format!("{} {}", code, message).to_ascii_lowercase();
    if lowered.contains("sensitivecontent")
        || lowered.contains("sensitive content")
        || lowered.contains("content_filter")
    {
        Some(if code.is_empty() { message } else { code })
    } else {
        None
    }
}
