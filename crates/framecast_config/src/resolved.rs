//! Typed view over a settings snapshot.

use crate::language::{Language, contains_cjk};
use crate::{SettingsMap, SettingsSource, keys};
use framecast_error::FramecastResult;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_ARK_BASE_URL: &str = "https://ark.cn-beijing.volces.com/api/v3";
const DEFAULT_VIDEO_MAX_TOKENS: u32 = 300;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Backend serving generation calls.
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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Gemini-style multimodal API
    #[default]
    Gemini,
    /// Ark-style OpenAI-compatible API
    Ark,
}

/// Output resolution preset for generated images.
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
#[strum(ascii_case_insensitive)]
pub enum ImageSizePreset {
    /// Size derived from the aspect ratio
    #[strum(serialize = "auto")]
    #[serde(rename = "auto")]
    Auto,
    /// 2048 pixel class
    #[default]
    #[strum(serialize = "2K")]
    #[serde(rename = "2K")]
    TwoK,
    /// 4096 pixel class
    #[strum(serialize = "4K")]
    #[serde(rename = "4K")]
    FourK,
}

/// How strongly consecutive scenes are tied together.
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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum CoherenceStrength {
    /// Never pass the previous scene's image
    Off,
    /// Pass it, asking only for matching palette and style
    Weak,
    /// Pass it, asking for the same characters, wardrobe and environment
    #[default]
    Strong,
}

impl CoherenceStrength {
    /// Whether a coherent run passes prior images at all.
    pub fn passes_prior_image(&self) -> bool {
        !matches!(self, CoherenceStrength::Off)
    }
}

/// Reply language policy.
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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ReplyLanguage {
    /// Follow the language of the input text
    #[default]
    Auto,
    /// Always Chinese
    Zh,
    /// Always English
    En,
}

impl ReplyLanguage {
    /// Language to use for content derived from `text`.
    ///
    /// ```
    /// use framecast_config::{Language, ReplyLanguage};
    ///
    /// assert_eq!(ReplyLanguage::Auto.language_for("雨夜里的霓虹街道"), Language::Chinese);
    /// assert_eq!(ReplyLanguage::Auto.language_for("neon street at night"), Language::English);
    /// assert_eq!(ReplyLanguage::En.language_for("雨夜"), Language::English);
    /// ```
    pub fn language_for(&self, text: &str) -> Language {
        match self {
            ReplyLanguage::Zh => Language::Chinese,
            ReplyLanguage::En => Language::English,
            ReplyLanguage::Auto if contains_cjk(text) => Language::Chinese,
            ReplyLanguage::Auto => Language::English,
        }
    }
}

/// When inline media goes through a provider upload API instead of the request body.
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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MediaUploadPolicy {
    /// Upload video and large payloads
    #[default]
    Auto,
    /// Upload everything
    Always,
    /// Always send inline
    Never,
}

/// Which operation a model id is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ModelRole {
    /// Storyboard text generation
    Chat,
    /// Image generation, combination and editing
    Image,
    /// Image analysis
    Vision,
    /// Video analysis
    Video,
}

/// Model overrides; `None` means the provider default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModelSelection {
    /// Text model
    pub chat: Option<String>,
    /// Image model
    pub image: Option<String>,
    /// Vision model
    pub vision: Option<String>,
    /// Video model
    pub video: Option<String>,
}

impl ModelSelection {
    /// Override for `role`, if configured.
    pub fn get(&self, role: ModelRole) -> Option<&str> {
        match role {
            ModelRole::Chat => self.chat.as_deref(),
            ModelRole::Image => self.image.as_deref(),
            ModelRole::Vision => self.vision.as_deref(),
            ModelRole::Video => self.video.as_deref(),
        }
    }
}

/// Credentials and base URL for one backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ProviderEndpoint {
    /// API key, when configured
    api_key: Option<String>,
    /// Base URL without a trailing slash
    base_url: String,
}

impl ProviderEndpoint {
    fn new(api_key: Option<String>, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|key| mask(key)),
            base_url: self.base_url.clone(),
        }
    }
}

fn mask(key: &str) -> String {
    let visible: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    if key.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("****{}", visible)
    }
}

/// Fully resolved configuration for one provider call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ResolvedConfig {
    /// Active backend
    provider: ProviderKind,
    /// Gemini endpoint
    gemini: ProviderEndpoint,
    /// Ark endpoint
    ark: ProviderEndpoint,
    /// Per-operation model overrides
    models: ModelSelection,
    /// Output size preset
    image_size: ImageSizePreset,
    /// Ask the provider to watermark images
    watermark: bool,
    /// Scene-to-scene coherence strength
    coherence: CoherenceStrength,
    /// Reply language policy
    reply_language: ReplyLanguage,
    /// Output token cap for video analysis
    video_max_tokens: u32,
    /// Upload policy for media
    media_upload: MediaUploadPolicy,
    /// Seed for text-to-image models, `None` for random
    ark_t2i_seed: Option<i64>,
    /// Per-request timeout in seconds
    request_timeout_secs: u64,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self::resolve(&SettingsMap::new())
    }
}

impl ResolvedConfig {
    /// Snapshot `source` and resolve it.
    pub fn load(source: &dyn SettingsSource) -> FramecastResult<Self> {
        let snapshot = source.snapshot()?;
        Ok(Self::resolve(&snapshot))
    }

    /// Resolve a snapshot. Missing or malformed values fall back to defaults.
    pub fn resolve(values: &SettingsMap) -> Self {
        let get = |key: &str| {
            values
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };
        let text = |key: &str| get(key).map(str::to_string);

        let image_size = match values.get(keys::IMAGE_SIZE_PRESET).map(|v| v.trim()) {
            None => ImageSizePreset::default(),
            Some("") => ImageSizePreset::Auto,
            Some(raw) => parse_or_default(keys::IMAGE_SIZE_PRESET, raw),
        };

        let video_max_tokens = get(keys::VIDEO_MAX_TOKENS)
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|tokens| *tokens > 0)
            .unwrap_or(DEFAULT_VIDEO_MAX_TOKENS);

        let request_timeout_secs = get(keys::REQUEST_TIMEOUT_SECS)
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            provider: get(keys::AI_PROVIDER)
                .map(|raw| parse_or_default(keys::AI_PROVIDER, raw))
                .unwrap_or_default(),
            gemini: ProviderEndpoint::new(
                text(keys::GEMINI_API_KEY),
                get(keys::GEMINI_BASE_URL).unwrap_or(DEFAULT_GEMINI_BASE_URL),
            ),
            ark: ProviderEndpoint::new(
                text(keys::ARK_API_KEY),
                get(keys::ARK_BASE_URL).unwrap_or(DEFAULT_ARK_BASE_URL),
            ),
            models: ModelSelection {
                chat: text(keys::MODEL_CHAT),
                image: text(keys::MODEL_IMAGE),
                vision: text(keys::MODEL_VISION),
                video: text(keys::MODEL_VIDEO),
            },
            image_size,
            watermark: get(keys::IMAGE_WATERMARK).is_some_and(parse_bool),
            coherence: get(keys::COHERENCE_STRENGTH)
                .map(|raw| parse_or_default(keys::COHERENCE_STRENGTH, raw))
                .unwrap_or_default(),
            reply_language: get(keys::REPLY_LANGUAGE)
                .map(|raw| parse_or_default(keys::REPLY_LANGUAGE, raw))
                .unwrap_or_default(),
            video_max_tokens,
            media_upload: get(keys::MEDIA_UPLOAD)
                .map(|raw| parse_or_default(keys::MEDIA_UPLOAD, raw))
                .unwrap_or_default(),
            ark_t2i_seed: get(keys::ARK_T2I_SEED).and_then(parse_seed),
            request_timeout_secs,
        }
    }

    /// Endpoint of the active provider.
    pub fn active_endpoint(&self) -> &ProviderEndpoint {
        match self.provider {
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::Ark => &self.ark,
        }
    }

    /// Language for content derived from `text`, honoring the reply language policy.
    pub fn language_for(&self, text: &str) -> Language {
        self.reply_language.language_for(text)
    }

    /// Copy with API keys masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            gemini: self.gemini.redacted(),
            ark: self.ark.redacted(),
            ..self.clone()
        }
    }
}

fn parse_or_default<T>(key: &str, raw: &str) -> T
where
    T: FromStr + Default,
{
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = raw, "Unrecognised setting value, using default");
            T::default()
        }
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn parse_seed(raw: &str) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(-1) => None,
        Ok(seed) if (0..=i64::from(i32::MAX)).contains(&seed) => Some(seed),
        _ => {
            warn!(value = raw, "Seed must be -1 or within 0..=2147483647, ignoring");
            None
        }
    }
}
