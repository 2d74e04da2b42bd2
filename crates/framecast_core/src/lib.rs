//! Core data types for the Framecast storyboard pipeline.
//!
//! This crate provides the foundation data types shared by the provider clients,
//! the scene parser and the orchestrator: scenes and the storyboard aggregate,
//! image references, and the generation request.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aspect;
mod image;
mod options;
mod request;
mod scene;
mod storyboard;

pub use aspect::AspectRatio;
pub use image::{ImageRef, MediaKind};
pub use options::{AnalyzeOptions, ImageOptions};
pub use request::{GenerationRequest, GenerationRequestBuilder, ReferenceMode};
pub use scene::Scene;
pub use storyboard::{SCENE_SEPARATOR, StoryboardResult, join_full_prompts};
