//! The parsing entry point.

use crate::ParseStrategy;
use framecast_core::StoryboardResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// A storyboard plus the strategy that recovered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ParsedStoryboard {
    storyboard: StoryboardResult,
    strategy: ParseStrategy,
}

impl ParsedStoryboard {
    /// True when the text only parsed as a single raw block.
    pub fn is_degraded(&self) -> bool {
        self.strategy.is_degraded()
    }

    /// Take the storyboard, dropping the strategy.
    pub fn into_storyboard(self) -> StoryboardResult {
        self.storyboard
    }

    /// Split into the storyboard and the strategy.
    pub fn into_parts(self) -> (StoryboardResult, ParseStrategy) {
        (self.storyboard, self.strategy)
    }
}

/// Parse model output into a storyboard.
///
/// Never fails: non-empty text always yields at least one scene, and empty
/// text yields an empty storyboard. The same input always parses the same way.
#[instrument(skip(text), fields(text_len = text.len()))]
pub fn parse_storyboard(text: &str) -> ParsedStoryboard {
    for strategy in ParseStrategy::CHAIN {
        let scenes = strategy.scenes(text);
        if scenes.is_empty() {
            continue;
        }
        if strategy.is_degraded() {
            warn!(strategy = %strategy, "No scene headings found; using raw text as one scene");
        } else {
            debug!(strategy = %strategy, scenes = scenes.len(), "Parsed storyboard");
        }
        return ParsedStoryboard {
            storyboard: StoryboardResult::new(scenes),
            strategy,
        };
    }

    ParsedStoryboard {
        storyboard: StoryboardResult::default(),
        strategy: ParseStrategy::RawFallback,
    }
}
