//! Storyboard script parsing.
//!
//! Model output is free-form text that usually, but not always, follows the
//! requested `Scene N:` layout. [`parse_storyboard`] runs an ordered chain of
//! [`ParseStrategy`] values and stops at the first one that finds scenes:
//!
//! 1. [`ParseStrategy::SceneHeadings`] - `Scene 1:` / `场景 1：` headings
//! 2. [`ParseStrategy::NumberedHeadings`] - `1.`, `1)`, `1、` or bare numbered lines
//! 3. [`ParseStrategy::RawFallback`] - the whole text as a single scene
//!
//! Any non-empty input yields at least one scene. Landing on the fallback is
//! reported through [`ParsedStoryboard::is_degraded`].
//!
//! # Examples
//!
//! ```
//! use framecast_script::{parse_storyboard, ParseStrategy};
//!
//! let parsed = parse_storyboard("Scene 1: A\nSubject: cat\nScene 2: B\nSubject: dog");
//! assert_eq!(*parsed.strategy(), ParseStrategy::SceneHeadings);
//!
//! let scenes = parsed.storyboard().scenes();
//! assert_eq!(scenes[0].title(), "A");
//! assert!(scenes[1].description().contains("dog"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fields;
mod parse;
mod strategy;

pub use fields::{SceneFields, extract_fields};
pub use parse::{ParsedStoryboard, parse_storyboard};
pub use strategy::ParseStrategy;
