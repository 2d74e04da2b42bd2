//! Framecast - storyboards from a single idea
//!
//! Framecast turns a short video idea, optionally with reference images, into a
//! multi-scene storyboard: a copy-ready prompt script for video models plus one
//! generated image per scene, kept visually coherent by feeding each scene's
//! image into the next.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use framecast::{
//!     ConfiguredProvider, GenerationRequest, LayeredSettings, SettingsSource,
//!     StoryboardOrchestrator,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings: Arc<dyn SettingsSource> = Arc::new(LayeredSettings::new());
//!     let provider = ConfiguredProvider::new(settings.clone());
//!     let orchestrator = StoryboardOrchestrator::new(provider, settings);
//!
//!     let request = GenerationRequest::builder()
//!         .idea_text("A paper boat sails through a flooded city")
//!         .total_duration_seconds(20u32)
//!         .scene_count(4u32)
//!         .build()?;
//!
//!     let generated = orchestrator.generate(&request).await?;
//!     println!("{}", generated.storyboard().copy_ready_prompt());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `framecast_error` - Error taxonomy
//! - `framecast_core` - Scenes, storyboards, image references, requests
//! - `framecast_config` - Settings sources and resolved configuration
//! - `framecast_interface` - The `ProviderClient` trait
//! - `framecast_models` - Gemini and Ark clients
//! - `framecast_script` - Scene parsing
//! - `framecast_pipeline` - Orchestrator and scene editing session
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod files;

pub use files::{image_from_path, mime_for_path, write_storyboard};

pub use framecast_config::*;
pub use framecast_core::*;
pub use framecast_error::*;
pub use framecast_interface::*;
pub use framecast_models::{ArkClient, ConfiguredProvider, GeminiClient, Provider};
pub use framecast_pipeline::*;
pub use framecast_script::*;
