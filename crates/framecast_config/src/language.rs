//! Reply language detection.

use serde::{Deserialize, Serialize};

/// Language prompts and replies are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Language {
    /// English
    English,
    /// Simplified Chinese
    Chinese,
}

/// True if `text` contains a CJK unified ideograph.
///
/// ```
/// use framecast_config::contains_cjk;
///
/// assert!(contains_cjk("一只猫在屋顶上"));
/// assert!(!contains_cjk("a cat on a roof"));
/// ```
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(|c| ('\u{4E00}'..='\u{9FFF}').contains(&c))
}
