//! Instruction text wrapped around caller prompts for image operations.

use framecast_config::{CoherenceStrength, Language};

const STRICT_PREFIX_EN: &str = "Generate an image that strictly follows the following scene description. Avoid extra elements. Cinematic composition with faithful lighting/colors: ";
const STRICT_PREFIX_ZH: &str =
    "请严格按照以下场景描述生成图像，不要添加额外元素。保持电影级构图与光照/色彩一致：";

const STRONG_CONTINUITY_EN: &str = "The attached image is the previous scene. Keep the same characters, wardrobe, environment, color palette and art style so the scenes read as one continuous sequence.";
const STRONG_CONTINUITY_ZH: &str =
    "附带的图像是上一个场景。保持相同的人物、服装、环境、色调和画风，使各场景连贯一致。";
const WEAK_CONTINUITY_EN: &str =
    "The attached image is the previous scene. Match its color palette and art style only.";
const WEAK_CONTINUITY_ZH: &str = "附带的图像是上一个场景。仅保持相同的色调和画风。";

/// Full prompt for scene image generation.
///
/// `continuity` is `Some` only when a prior image accompanies the request.
pub(crate) fn scene_image_prompt(
    prompt: &str,
    language: Language,
    continuity: Option<CoherenceStrength>,
) -> String {
    let prefix = match language {
        Language::English => STRICT_PREFIX_EN,
        Language::Chinese => STRICT_PREFIX_ZH,
    };
    let mut text = format!("{}{}", prefix, prompt);
    if let Some(line) = continuity.and_then(|strength| continuity_line(strength, language)) {
        text.push_str("\n\n");
        text.push_str(line);
    }
    text
}

/// Continuity instruction for a prior image, if any.
pub(crate) fn continuity_line(
    strength: CoherenceStrength,
    language: Language,
) -> Option<&'static str> {
    match (strength, language) {
        (CoherenceStrength::Off, _) => None,
        (CoherenceStrength::Weak, Language::English) => Some(WEAK_CONTINUITY_EN),
        (CoherenceStrength::Weak, Language::Chinese) => Some(WEAK_CONTINUITY_ZH),
        (CoherenceStrength::Strong, Language::English) => Some(STRONG_CONTINUITY_EN),
        (CoherenceStrength::Strong, Language::Chinese) => Some(STRONG_CONTINUITY_ZH),
    }
}

/// System line forcing the reply language for analysis calls.
pub(crate) fn language_instruction(language: Language) -> &'static str {
    match language {
        Language::English => "Respond entirely in English.",
        Language::Chinese => "请用中文回答。",
    }
}
