//! Prompt text for the storyboard run.

use framecast_config::Language;
use framecast_core::GenerationRequest;

/// Instruction sent with every reference image when merging them into one anchor.
pub const COMBINE_REFERENCES_PROMPT: &str = "Combine these reference images into a single cohesive cinematic still. Keep the main subject of the first image, blend in the environment, lighting and style of the others, and avoid adding new elements.";

/// Numbers the script prompt is parameterised on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryboardPromptParams {
    /// Exact number of scenes to produce
    pub scene_count: u32,
    /// Target seconds per scene
    pub per_scene_duration: u32,
    /// Target seconds for the whole sequence
    pub total_duration: u32,
    /// Reply language
    pub language: Language,
}

impl StoryboardPromptParams {
    /// Parameters for `request`, answered in `language`.
    pub fn from_request(request: &GenerationRequest, language: Language) -> Self {
        Self {
            scene_count: *request.scene_count(),
            per_scene_duration: request.per_scene_duration_seconds(),
            total_duration: *request.total_duration_seconds(),
            language,
        }
    }
}

/// System prompt for storyboard script generation.
pub fn system_prompt(params: &StoryboardPromptParams) -> String {
    let StoryboardPromptParams {
        scene_count,
        per_scene_duration: per,
        total_duration: total,
        language,
    } = *params;

    match language {
        Language::English => format!(
            "You are a top-tier Director of Photography (DP), Storyboard Engineer, and Visual Reverse-Analyst, specializing in AI video generation. Your task is to generate a multi-scene, highly detailed prompt sequence based on user input. Respond entirely in English.

**CRITICAL REQUIREMENT: You MUST generate exactly {scene_count} scenes. No more, no less.**

**RULES:**
- Each scene should have a duration of approximately {per} seconds.
- All fields must use \"Key: Value\" format.
- Prohibit long, prosaic sentences outside of \"Narrative/Intent\".
- Total duration must be {total} seconds.
- Each scene must have 3-4 Action Cues (one every 2-4 seconds).
- Maintain consistency in Subject, Environment, and Grade across scenes.
- Use \"Scene N:\" as the heading for each scene, starting from 1 up to {scene_count}.

**OUTPUT STRUCTURE TEMPLATE:**

Sequence Overview: <Concept or Title>

Sequence Coherence
Overall Narrative Arc: <Setup-Climax-Resolution>
Aesthetic Persistent: <Unified visual tone>
Continuity Cues: <Scene connection logic>
Total Duration Target: {total}s

Scene 1: <Scene Name>
Scene Duration: <~{per} Seconds>
Narrative/Intent: <Theme>
Subject: <Subject description>
Key Features: <Action/Features>
Environment: <Environment>
Atmosphere/Weather: <Time, weather>
Lighting: <Lighting description>
Grade: <Color grading>
Camera: <Camera perspective>
Move: <Camera movement>
Lens/Focus: <Lens and depth of field>
Action Cues:
0.0s: <Opening action>
[T1]s: <Action 1>
[T2]s: <Action 2>
[N.0s]: <Closing action>

(Repeat for all {scene_count} scenes.)
"
        ),
        Language::Chinese => format!(
            "你是一名顶级的摄影指导（DP）、分镜工程师和视觉逆向分析师，专注于 AI 视频生成。请根据用户输入生成多场景、高度详细的提示词序列。请用中文回答。

**关键要求：必须恰好生成 {scene_count} 个场景，不多也不少。**

**规则：**
- 每个场景时长约 {per} 秒。
- 所有字段使用“键：值”格式。
- 除“叙事/意图”外，禁止冗长的散文式句子。
- 总时长必须为 {total} 秒。
- 每个场景包含 3-4 条动作提示（每 2-4 秒一条）。
- 各场景的主体、环境和风格保持一致。
- 以“场景 N：”作为每个场景的标题，从 1 开始递增到 {scene_count}，不要输出额外解释。

**输出结构模板：**

序列概述：<概念或标题>

场景 1：<场景名称>
场景时长：<约 {per} 秒>
叙事/意图：<主题>
主体：<主体描述>
环境：<环境>
光照：<光照描述>
风格：<调色与风格>
镜头：<机位与运动>
动作提示：
0.0s：<开场动作>
[T1]s：<动作 1>
[T2]s：<动作 2>
[N.0s]：<收尾动作>

（对全部 {scene_count} 个场景重复以上结构。）
"
        ),
    }
}

/// Caption request for reference image `position` (1-based) of `total`.
pub fn caption_prompt(position: usize, total: usize) -> String {
    format!(
        "Describe this image in detail for a film director, focusing on subject, environment, lighting, and mood. This is reference image {position} of {total}."
    )
}

/// User prompt: the idea, plus reference captions when there are any.
pub fn user_prompt(idea: &str, captions: Option<&[String]>) -> String {
    let Some(captions) = captions.filter(|captions| !captions.is_empty()) else {
        return idea.to_string();
    };

    let visual_context = captions
        .iter()
        .enumerate()
        .map(|(i, caption)| format!("REFERENCE IMAGE {} DESCRIPTION: \"{}\"", i + 1, caption.trim()))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "USER IDEA: \"{idea}\"\n\nVISUAL CONTEXT FROM REFERENCE IMAGES:\n{visual_context}\n\nCombine the user's idea with the visual context to create the storyboard. The reference images set the overall style, mood, and content. Use the first reference image as the primary inspiration for the first scene."
    )
}
