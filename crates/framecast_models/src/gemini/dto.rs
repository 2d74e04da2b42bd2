//! Gemini `generateContent` and Files API wire types.

use framecast_core::ImageRef;
use serde::{Deserialize, Serialize};

/// Finish reasons that mean the candidate was withheld on policy grounds.
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "PROHIBITED_CONTENT",
    "IMAGE_SAFETY",
    "BLOCKLIST",
    "SPII",
    "RECITATION",
];

/// `generateContent` request body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub(crate) contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single user turn.
    pub(crate) fn user(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content::user(parts)],
            ..Self::default()
        }
    }

    pub(crate) fn with_system(mut self, text: &str) -> Self {
        self.system_instruction = Some(Content {
            role: None,
            parts: vec![Part::text(text)],
        });
        self
    }

    pub(crate) fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

/// One conversation turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) role: Option<String>,
    #[serde(default)]
    pub(crate) parts: Vec<Part>,
}

impl Content {
    pub(crate) fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }
}

/// A content part. Responses use either camelCase or snake_case keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) text: Option<String>,
    #[serde(default, alias = "inline_data", skip_serializing_if = "Option::is_none")]
    pub(crate) inline_data: Option<Blob>,
    #[serde(default, alias = "file_data", skip_serializing_if = "Option::is_none")]
    pub(crate) file_data: Option<FileData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) thought: Option<bool>,
}

impl Part {
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub(crate) fn inline(mime_type: impl Into<String>, data: String) -> Self {
        Self {
            inline_data: Some(Blob {
                mime_type: mime_type.into(),
                data,
            }),
            ..Self::default()
        }
    }

    pub(crate) fn file(mime_type: impl Into<String>, file_uri: impl Into<String>) -> Self {
        Self {
            file_data: Some(FileData {
                mime_type: Some(mime_type.into()),
                file_uri: file_uri.into(),
            }),
            ..Self::default()
        }
    }
}

/// Inline base64 payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Blob {
    #[serde(alias = "mime_type")]
    pub(crate) mime_type: String,
    pub(crate) data: String,
}

/// Reference to an uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileData {
    #[serde(default, alias = "mime_type", skip_serializing_if = "Option::is_none")]
    pub(crate) mime_type: Option<String>,
    #[serde(alias = "file_uri")]
    pub(crate) file_uri: String,
}

/// Generation parameters.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) image_config: Option<ImageConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) thinking_config: Option<ThinkingConfig>,
}

impl GenerationConfig {
    /// Ask for an image response, optionally at a given aspect ratio.
    pub(crate) fn image(aspect_ratio: Option<&str>) -> Self {
        Self {
            response_modalities: Some(vec!["IMAGE".to_string()]),
            image_config: aspect_ratio.map(|ratio| ImageConfig {
                aspect_ratio: ratio.to_string(),
            }),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageConfig {
    pub(crate) aspect_ratio: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThinkingConfig {
    pub(crate) thinking_budget: i32,
}

/// `generateContent` response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub(crate) candidates: Vec<Candidate>,
    #[serde(default, alias = "prompt_feedback")]
    pub(crate) prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub(crate) content: Option<Content>,
    #[serde(default, alias = "finish_reason")]
    pub(crate) finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    #[serde(default, alias = "block_reason")]
    pub(crate) block_reason: Option<String>,
    #[serde(default, alias = "block_reason_message")]
    pub(crate) block_reason_message: Option<String>,
}

/// Image found in a response, before decoding.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ImagePart {
    Inline { mime_type: String, data: String },
    File { mime_type: Option<String>, uri: String },
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .flat_map(|content| content.parts.iter())
    }

    /// Safety block reason from prompt feedback or a candidate finish reason.
    pub(crate) fn block_reason(&self) -> Option<String> {
        let feedback = self.prompt_feedback.as_ref();
        if let Some(reason) = feedback.and_then(|f| f.block_reason.as_ref()) {
            return Some(match feedback.and_then(|f| f.block_reason_message.as_ref()) {
                Some(message) => format!("{}: {}", reason, message),
                None => reason.clone(),
            });
        }
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.finish_reason.as_deref())
            .find(|reason| BLOCKING_FINISH_REASONS.contains(reason))
            .map(str::to_string)
    }

    /// First image part, inline or file.
    pub(crate) fn first_image(&self) -> Option<ImagePart> {
        self.parts().find_map(|part| {
            if let Some(blob) = part.inline_data.as_ref().filter(|b| !b.data.is_empty()) {
                return Some(ImagePart::Inline {
                    mime_type: blob.mime_type.clone(),
                    data: blob.data.clone(),
                });
            }
            part.file_data.as_ref().map(|file| ImagePart::File {
                mime_type: file.mime_type.clone(),
                uri: file.file_uri.clone(),
            })
        })
    }

    /// All non-thought text parts joined by newlines.
    pub(crate) fn text(&self) -> String {
        self.parts()
            .filter(|part| part.thought != Some(true))
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

impl ImagePart {
    /// Convert to an image reference, decoding inline payloads.
    pub(crate) fn into_image_ref(self) -> Result<ImageRef, framecast_error::MediaError> {
        match self {
            ImagePart::Inline { mime_type, data } => ImageRef::from_base64(&data, mime_type),
            ImagePart::File { mime_type, uri } => Ok(ImageRef::FileHandle { uri, mime: mime_type }),
        }
    }
}

/// Uploaded file metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileInfo {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) uri: String,
    #[serde(default, alias = "mime_type")]
    pub(crate) mime_type: Option<String>,
    #[serde(default)]
    pub(crate) state: Option<String>,
}

/// Upload finalize response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UploadResponse {
    pub(crate) file: FileInfo,
}
