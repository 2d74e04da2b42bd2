//! Output aspect ratios.

use serde::{Deserialize, Serialize};

/// Aspect ratio requested for generated scene images.
///
/// # Examples
///
/// ```
/// use framecast_core::AspectRatio;
/// use std::str::FromStr;
///
/// let ratio = AspectRatio::from_str("9:16").unwrap();
/// assert_eq!(ratio, AspectRatio::Ratio9x16);
/// assert_eq!(ratio.to_string(), "9:16");
/// assert_eq!(AspectRatio::default().as_str(), "16:9");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum AspectRatio {
    /// Widescreen landscape
    #[default]
    #[strum(serialize = "16:9")]
    #[serde(rename = "16:9")]
    Ratio16x9,
    /// Vertical video
    #[strum(serialize = "9:16")]
    #[serde(rename = "9:16")]
    Ratio9x16,
    /// Square
    #[strum(serialize = "1:1")]
    #[serde(rename = "1:1")]
    Ratio1x1,
    /// Classic television
    #[strum(serialize = "4:3")]
    #[serde(rename = "4:3")]
    Ratio4x3,
    /// Classic portrait
    #[strum(serialize = "3:4")]
    #[serde(rename = "3:4")]
    Ratio3x4,
    /// Still photography landscape
    #[strum(serialize = "3:2")]
    #[serde(rename = "3:2")]
    Ratio3x2,
    /// Still photography portrait
    #[strum(serialize = "2:3")]
    #[serde(rename = "2:3")]
    Ratio2x3,
    /// Anamorphic cinema
    #[strum(serialize = "21:9")]
    #[serde(rename = "21:9")]
    Ratio21x9,
}

impl AspectRatio {
    /// The `W:H` form providers expect.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Ratio16x9 => "16:9",
            AspectRatio::Ratio9x16 => "9:16",
            AspectRatio::Ratio1x1 => "1:1",
            AspectRatio::Ratio4x3 => "4:3",
            AspectRatio::Ratio3x4 => "3:4",
            AspectRatio::Ratio3x2 => "3:2",
            AspectRatio::Ratio2x3 => "2:3",
            AspectRatio::Ratio21x9 => "21:9",
        }
    }
}
