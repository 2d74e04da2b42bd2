//! Labelled field extraction from a scene block.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

fn field_regex(labels: &str) -> Regex {
    Regex::new(&format!(
        r"(?im)^[ \t>*_\-•]*(?:{labels})[*_]*[ \t]*[:：][*_]*[ \t]*(\S.*)$"
    ))
    .expect("Valid field regex")
}

static SUBJECT: LazyLock<Regex> = LazyLock::new(|| field_regex("subject|主体|主角"));
static ENVIRONMENT: LazyLock<Regex> = LazyLock::new(|| field_regex("environment|环境|场景设定"));
static LIGHTING: LazyLock<Regex> = LazyLock::new(|| field_regex("lighting|光照|灯光|光线"));
static GRADE: LazyLock<Regex> =
    LazyLock::new(|| field_regex(r"(?:colou?r[ \t]+)?grade|色彩|调色|风格"));

/// The line right after an action cue heading, when it is stamped `0.0s` or `0s`.
static FIRST_ACTION_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t>*_\-•]*(?:action[ \t]+cues?|动作提示)[*_]*[ \t]*[:：]?[^\n]*\n[ \t>*_\-•]*\[?0(?:\.0+)?[ \t]*(?:s|秒)?\]?[*_]*[ \t]*[:：\-–—][ \t]*(\S.*)$",
    )
    .expect("Valid action cue regex")
});

/// Optional labelled fields found in a scene block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct SceneFields {
    subject: Option<String>,
    environment: Option<String>,
    lighting: Option<String>,
    grade: Option<String>,
    first_action_cue: Option<String>,
}

impl SceneFields {
    /// Compose a one-line description from whichever fields were found.
    ///
    /// Returns `None` when the block had no recognised field.
    pub fn describe(&self) -> Option<String> {
        let parts = [
            self.subject.clone(),
            self.first_action_cue.clone(),
            self.environment.as_ref().map(|env| format!("in {env}")),
            self.lighting.as_ref().map(|light| format!("with {light}")),
            self.grade.as_ref().map(|grade| format!("({grade} color grade)")),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Pull labelled fields out of a scene block.
///
/// Labels may be English or Chinese, decorated with markdown, and followed by
/// an ASCII or full-width colon.
pub fn extract_fields(block: &str) -> SceneFields {
    SceneFields {
        subject: capture(&SUBJECT, block),
        environment: capture(&ENVIRONMENT, block),
        lighting: capture(&LIGHTING, block),
        grade: capture(&GRADE, block),
        first_action_cue: capture(&FIRST_ACTION_CUE, block),
    }
}

fn capture(regex: &Regex, block: &str) -> Option<String> {
    regex
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| {
            m.as_str()
                .trim()
                .trim_matches(|c: char| matches!(c, '*' | '_'))
                .trim()
                .to_string()
        })
        .filter(|value| !value.is_empty())
}
