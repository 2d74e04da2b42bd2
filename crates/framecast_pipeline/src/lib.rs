//! Storyboard orchestration for Framecast.
//!
//! [`StoryboardOrchestrator`] turns a [`framecast_core::GenerationRequest`] into
//! a fully illustrated storyboard: optional reference captioning, one script
//! generation call, parsing, then one image per scene in order, each grounded
//! on the previous scene's image when coherence is on.
//!
//! [`StoryboardSession`] owns a finished storyboard and applies per-scene edits:
//! prompt rewrites, image regeneration and manual uploads.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod orchestrator;
mod prompt;
mod session;
mod stage;

pub use orchestrator::{GeneratedStoryboard, StoryboardOrchestrator};
pub use prompt::{
    COMBINE_REFERENCES_PROMPT, StoryboardPromptParams, caption_prompt, system_prompt, user_prompt,
};
pub use session::{SceneCommand, StoryboardSession};
pub use stage::RunStage;
