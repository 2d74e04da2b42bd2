//! Orchestration stages.

use serde::{Deserialize, Serialize};

/// Where a storyboard run currently is.
///
/// Cancellation errors and failure logs name the stage that was active.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunStage {
    /// Describing reference images
    Captioning,
    /// Generating the storyboard script
    TextGeneration,
    /// Splitting the script into scenes
    Parsing,
    /// Producing one image per scene
    ImageGeneration,
    /// Finished successfully
    Complete,
    /// Aborted with an error
    Failed,
}
