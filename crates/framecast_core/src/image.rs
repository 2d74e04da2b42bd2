//! Image references and media kinds.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use framecast_error::{MediaError, MediaErrorKind};
use serde::{Deserialize, Serialize};

/// Kind of media handed to `analyze_media`.
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
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image
    Image,
    /// Video clip
    Video,
}

/// Opaque reference to binary image (or video) data.
///
/// A reference can always be turned into something displayable with
/// [`ImageRef::display_url`], but only inline references carry their bytes.
///
/// # Examples
///
/// ```
/// use framecast_core::ImageRef;
///
/// let image = ImageRef::from_data_url("data:image/png;base64,iVBORw0KGgo=").unwrap();
/// assert_eq!(image.mime(), Some("image/png"));
/// assert_eq!(image.inline_bytes().map(|b| b.len()), Some(8));
/// assert_eq!(image.display_url(), "data:image/png;base64,iVBORw0KGgo=");
///
/// let remote = ImageRef::parse("https://cdn.example.com/scene-1.png").unwrap();
/// assert!(matches!(remote, ImageRef::Url(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageRef {
    /// Encoded bytes held in memory
    Inline {
        /// Mime type of the payload, such as `image/png`
        mime: String,
        /// Raw encoded bytes
        data: Vec<u8>,
    },
    /// External http(s) locator
    Url(String),
    /// Provider-side file handle returned by an upload API
    FileHandle {
        /// Provider file uri
        uri: String,
        /// Mime type, when the provider reported one
        mime: Option<String>,
    },
}

impl ImageRef {
    /// Wrap encoded bytes.
    pub fn inline(mime: impl Into<String>, data: Vec<u8>) -> Self {
        ImageRef::Inline {
            mime: mime.into(),
            data,
        }
    }

    /// Decode a base64 payload into an inline reference.
    ///
    /// Whitespace inside the payload is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MediaErrorKind::Base64Decode`] for malformed payloads and
    /// [`MediaErrorKind::Empty`] when nothing decodes.
    pub fn from_base64(payload: &str, mime: impl Into<String>) -> Result<Self, MediaError> {
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let data = STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| MediaError::new(MediaErrorKind::Base64Decode(e.to_string())))?;
        if data.is_empty() {
            return Err(MediaError::new(MediaErrorKind::Empty));
        }
        Ok(Self::inline(mime, data))
    }

    /// Parse a `data:<mime>;base64,<payload>` URL.
    ///
    /// # Errors
    ///
    /// Returns [`MediaErrorKind::InvalidDataUrl`] if the string is not a base64 data URL.
    pub fn from_data_url(url: &str) -> Result<Self, MediaError> {
        let invalid = || MediaError::new(MediaErrorKind::InvalidDataUrl(truncate(url, 48)));
        let rest = url.strip_prefix("data:").ok_or_else(invalid)?;
        let (header, payload) = rest.split_once(',').ok_or_else(invalid)?;
        let mime = header.strip_suffix(";base64").ok_or_else(invalid)?;
        let mime = if mime.is_empty() {
            "application/octet-stream"
        } else {
            mime
        };
        Self::from_base64(payload, mime)
    }

    /// Interpret a caller-supplied string: data URLs become inline references,
    /// anything else is kept as a locator.
    ///
    /// # Errors
    ///
    /// Returns a [`MediaError`] for malformed data URLs or empty strings.
    pub fn parse(value: &str) -> Result<Self, MediaError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(MediaError::new(MediaErrorKind::Empty));
        }
        if value.starts_with("data:") {
            Self::from_data_url(value)
        } else {
            Ok(ImageRef::Url(value.to_string()))
        }
    }

    /// Mime type, when known.
    pub fn mime(&self) -> Option<&str> {
        match self {
            ImageRef::Inline { mime, .. } => Some(mime),
            ImageRef::FileHandle { mime, .. } => mime.as_deref(),
            ImageRef::Url(_) => None,
        }
    }

    /// Encoded bytes for inline references.
    pub fn inline_bytes(&self) -> Option<&[u8]> {
        match self {
            ImageRef::Inline { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Base64 form of inline bytes.
    pub fn to_base64(&self) -> Option<String> {
        self.inline_bytes().map(|data| STANDARD.encode(data))
    }

    /// `data:` URL for inline references.
    pub fn to_data_url(&self) -> Option<String> {
        match self {
            ImageRef::Inline { mime, data } => {
                Some(format!("data:{};base64,{}", mime, STANDARD.encode(data)))
            }
            _ => None,
        }
    }

    /// Something a browser or viewer can display: a data URL for inline bytes,
    /// the locator or file uri otherwise.
    pub fn display_url(&self) -> String {
        match self {
            ImageRef::Inline { .. } => self.to_data_url().unwrap_or_default(),
            ImageRef::Url(url) => url.clone(),
            ImageRef::FileHandle { uri, .. } => uri.clone(),
        }
    }

    /// Short description suitable for logs.
    pub fn describe(&self) -> String {
        match self {
            ImageRef::Inline { mime, data } => format!("inline {} ({} bytes)", mime, data.len()),
            ImageRef::Url(url) => format!("url {}", truncate(url, 64)),
            ImageRef::FileHandle { uri, .. } => format!("file {}", uri),
        }
    }

    /// File extension matching the mime type (`png` when unknown).
    pub fn file_extension(&self) -> &'static str {
        match self.mime() {
            Some("image/jpeg") | Some("image/jpg") => "jpg",
            Some("image/webp") => "webp",
            Some("image/gif") => "gif",
            Some("video/mp4") => "mp4",
            Some("video/quicktime") => "mov",
            Some("video/webm") => "webm",
            _ => "png",
        }
    }
}

fn truncate(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &value[..idx]),
        None => value.to_string(),
    }
}
