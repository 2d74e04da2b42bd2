//! Scene splitting strategies.

use crate::fields::extract_fields;
use framecast_core::Scene;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// `Scene 1:`, `## 场景 2：`, `**Shot 3 -**` style headings.
static SCENE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t>#*_]*(?:scene|shot|场景|镜头|分镜)[ \t]*(\d+)[ \t]*[*_]*[ \t]*[:：\-–—][*_]*")
        .expect("Valid scene heading regex")
});

/// `1.`, `2)`, `3、`, `**4.**` or a bare number on its own line.
///
/// The separator is captured so [`numbered_heading_spans`] can reject a dot or
/// colon followed by a digit, which keeps `1.5s` and `10:30` out.
static NUMBERED_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t>#*_]*(\d{1,3})[ \t]*(?:([.、)）:：])|[*_]*[ \t]*$)")
        .expect("Valid numbered heading regex")
});

/// How a storyboard was recovered from model text.
///
/// Strategies are tried in [`ParseStrategy::CHAIN`] order; the first that
/// yields any scene wins.
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
pub enum ParseStrategy {
    /// `Scene N:` headings in English or Chinese
    SceneHeadings,
    /// Sequentially numbered headings, 1, 2, 3...
    NumberedHeadings,
    /// The entire text as one scene
    RawFallback,
}

impl ParseStrategy {
    /// Order in which strategies are attempted.
    pub const CHAIN: [ParseStrategy; 3] = [
        ParseStrategy::SceneHeadings,
        ParseStrategy::NumberedHeadings,
        ParseStrategy::RawFallback,
    ];

    /// Run this strategy alone. An empty result means it did not apply.
    pub fn scenes(self, text: &str) -> Vec<Scene> {
        match self {
            ParseStrategy::SceneHeadings => {
                let spans = SCENE_HEADING
                    .find_iter(text)
                    .map(|m| (m.start(), m.end()))
                    .collect::<Vec<_>>();
                scenes_from_spans(text, &spans)
            }
            ParseStrategy::NumberedHeadings => {
                scenes_from_spans(text, &numbered_heading_spans(text))
            }
            ParseStrategy::RawFallback => raw_scene(text).into_iter().collect(),
        }
    }

    /// True for strategies that signal a degraded parse.
    pub fn is_degraded(self) -> bool {
        matches!(self, ParseStrategy::RawFallback)
    }
}

/// Headings whose numbers continue the sequence 1, 2, 3...
///
/// Anything else, such as a nested list restarting at 1 inside scene 2, is
/// treated as body text of the current block.
fn numbered_heading_spans(text: &str) -> Vec<(usize, usize)> {
    let mut expected = 1u32;
    let mut spans = Vec::new();
    for caps in NUMBERED_HEADING.captures_iter(text) {
        let Some(number) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
            continue;
        };
        if number != expected {
            continue;
        }
        let decimal = caps.get(2).is_some_and(|separator| {
            matches!(separator.as_str(), "." | ":" | "：")
                && text[separator.end()..].starts_with(|c: char| c.is_ascii_digit())
        });
        if decimal {
            continue;
        }
        if let Some(whole) = caps.get(0) {
            spans.push((whole.start(), whole.end()));
            expected += 1;
        }
    }
    spans
}

/// Cut `text` into blocks that start after each heading span and end at the
/// next one.
fn scenes_from_spans(text: &str, spans: &[(usize, usize)]) -> Vec<Scene> {
    spans
        .iter()
        .enumerate()
        .map(|(i, &(_, body_start))| {
            let body_end = spans.get(i + 1).map_or(text.len(), |&(next, _)| next);
            block_scene(i + 1, &text[body_start..body_end])
        })
        .collect()
}

fn block_scene(position: usize, block: &str) -> Scene {
    let body = block.trim();
    let title = body
        .lines()
        .map(clean_line)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Scene {position}"));
    let description = extract_fields(body).describe().unwrap_or_else(|| title.clone());
    Scene::new(title, description, format!("Scene {position}:{body}"))
}

fn raw_scene(text: &str) -> Option<Scene> {
    if text.is_empty() {
        return None;
    }
    let title = text
        .lines()
        .map(clean_line)
        .find(|line| !line.is_empty())
        .unwrap_or("Scene 1")
        .to_string();
    Some(Scene::new(title.clone(), title, format!("Scene 1:{text}")))
}

/// Strip markdown decoration from a heading or title line.
fn clean_line(line: &str) -> &str {
    line.trim()
        .trim_matches(|c: char| matches!(c, '*' | '_' | '#' | '>') || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_not_numbered_headings() {
        let text = "0.0s: pan left\n1.5s: tilt up\n2.0s: hold";
        assert!(numbered_heading_spans(text).is_empty());
    }

    #[test]
    fn numbered_headings_follow_the_sequence() {
        let text = "1. Dawn\nbody\n3. Skipped\n2. Noon\n1. nested\n3. Dusk";
        let spans = numbered_heading_spans(text);
        assert_eq!(spans.len(), 3);
        let scenes = ParseStrategy::NumberedHeadings.scenes(text);
        let titles = scenes.iter().map(|s| s.title().as_str()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["Dawn", "Noon", "Dusk"]);
        assert!(scenes[1].full_prompt().contains("1. nested"));
    }

    #[test]
    fn separators_may_touch_the_title() {
        let scenes = ParseStrategy::NumberedHeadings.scenes("1.Sunrise\nbody\n2)Noon\n3）Dusk\n4、Night");
        let titles = scenes.iter().map(|s| s.title().as_str()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["Sunrise", "Noon", "Dusk", "Night"]);
        assert_eq!(scenes[0].full_prompt(), "Scene 1:Sunrise\nbody");
    }

    #[test]
    fn clock_times_are_not_numbered_headings() {
        assert!(numbered_heading_spans("10:30 sunrise\n1:45 noon").is_empty());
        assert_eq!(numbered_heading_spans("1: Dawn\n2：Noon").len(), 2);
    }

    #[test]
    fn clean_line_strips_markdown() {
        assert_eq!(clean_line("  **Harbor at dawn** "), "Harbor at dawn");
        assert_eq!(clean_line("## Title"), "Title");
        assert_eq!(clean_line("***"), "");
    }

    #[test]
    fn empty_heading_body_uses_positional_title() {
        let scenes = ParseStrategy::SceneHeadings.scenes("Scene 1:\nScene 2: Night");
        assert_eq!(scenes[0].title(), "Scene 1");
        assert_eq!(scenes[0].full_prompt(), "Scene 1:");
        assert_eq!(scenes[1].title(), "Night");
    }
}
