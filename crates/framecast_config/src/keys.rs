//! Setting keys.
//!
//! Environment overrides use the upper-cased key with a `FRAMECAST_` prefix.

/// Active backend: `gemini` or `ark`.
pub const AI_PROVIDER: &str = "ai_provider";
/// Gemini API key.
pub const GEMINI_API_KEY: &str = "gemini_api_key";
/// Gemini API base URL.
pub const GEMINI_BASE_URL: &str = "gemini_base_url";
/// Ark API key.
pub const ARK_API_KEY: &str = "ark_api_key";
/// Ark API base URL.
pub const ARK_BASE_URL: &str = "ark_base_url";
/// Model id for storyboard text generation.
pub const MODEL_CHAT: &str = "model_chat";
/// Model id for image generation, combination and editing.
pub const MODEL_IMAGE: &str = "model_image";
/// Model id for image analysis.
pub const MODEL_VISION: &str = "model_vision";
/// Model id for video analysis.
pub const MODEL_VIDEO: &str = "model_video";
/// Image size preset: `2K`, `4K` or empty.
pub const IMAGE_SIZE_PRESET: &str = "image_size_preset";
/// Whether generated images carry a provider watermark.
pub const IMAGE_WATERMARK: &str = "image_watermark";
/// Scene-to-scene coherence strength: `off`, `weak`, `strong`.
pub const COHERENCE_STRENGTH: &str = "coherence_strength";
/// Reply language: `auto`, `zh`, `en`.
pub const REPLY_LANGUAGE: &str = "reply_language";
/// Output token cap for video analysis.
pub const VIDEO_MAX_TOKENS: &str = "video_max_tokens";
/// Files API usage for media: `auto`, `always`, `never`.
pub const MEDIA_UPLOAD: &str = "media_upload";
/// Seed for text-to-image models, `-1` for random.
pub const ARK_T2I_SEED: &str = "ark_t2i_seed";
/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: &str = "request_timeout_secs";
