//! Gemini Files API: resumable upload and activation polling.

use super::dto::{FileInfo, UploadResponse};
use crate::transport::{no_block, read_json, send};
use framecast_error::{FramecastError, FramecastResult, UpstreamError, UpstreamErrorKind};
use reqwest::Client;
use std::time::Duration;
use tokio_retry2::strategy::FixedInterval;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, instrument, warn};

const PROVIDER: &str = "gemini";

/// Interval between file state checks.
const POLL_INTERVAL_MS: u64 = 800;
/// Checks before giving up on `ACTIVE` (about 15 seconds).
const POLL_ATTEMPTS: usize = 19;

/// Connection details for Files API calls.
pub(crate) struct FilesApi<'a> {
    pub(crate) http: &'a Client,
    pub(crate) base_url: &'a str,
    pub(crate) api_key: &'a str,
    pub(crate) timeout: Duration,
}

/// An uploaded file ready to be referenced from `fileData` parts.
#[derive(Debug, Clone)]
pub(crate) struct UploadedFile {
    pub(crate) uri: String,
    pub(crate) mime_type: String,
}

impl FilesApi<'_> {
    /// Upload `bytes` and wait (bounded) for the file to become active.
    ///
    /// A file that fails processing or never reports `ACTIVE` is still returned;
    /// the subsequent `generateContent` call reports any real problem.
    #[instrument(skip(self, mime, bytes), fields(mime = %mime, size = bytes.len()))]
    pub(crate) async fn upload(&self, mime: &str, bytes: Vec<u8>) -> FramecastResult<UploadedFile> {
        let upload_url = self.start_upload(mime, bytes.len()).await?;

        let response = send(
            PROVIDER,
            self.http
                .post(&upload_url)
                .timeout(self.timeout)
                .header("x-goog-api-key", self.api_key)
                .header("X-Goog-Upload-Offset", "0")
                .header("X-Goog-Upload-Command", "upload, finalize")
                .header(reqwest::header::CONTENT_LENGTH, bytes.len())
                .body(bytes),
            no_block,
        )
        .await?;
        let uploaded: UploadResponse = read_json(PROVIDER, response).await?;
        debug!(name = %uploaded.file.name, state = ?uploaded.file.state, "File uploaded");

        let file = if uploaded.file.state.as_deref() == Some("ACTIVE") {
            uploaded.file
        } else {
            self.wait_until_active(uploaded.file).await
        };

        Ok(UploadedFile {
            uri: file.uri,
            mime_type: file.mime_type.unwrap_or_else(|| mime.to_string()),
        })
    }

    async fn start_upload(&self, mime: &str, len: usize) -> FramecastResult<String> {
        let url = format!("{}/upload/v1beta/files", self.base_url);
        let response = send(
            PROVIDER,
            self.http
                .post(&url)
                .timeout(self.timeout)
                .header("x-goog-api-key", self.api_key)
                .header("X-Goog-Upload-Protocol", "resumable")
                .header("X-Goog-Upload-Command", "start")
                .header("X-Goog-Upload-Header-Content-Length", len.to_string())
                .header("X-Goog-Upload-Header-Content-Type", mime)
                .json(&serde_json::json!({ "file": { "display_name": "framecast-media" } })),
            no_block,
        )
        .await?;

        response
            .headers()
            .get("x-goog-upload-url")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                UpstreamError::new(
                    PROVIDER,
                    UpstreamErrorKind::MalformedResponse(
                        "Upload start response carried no upload URL".to_string(),
                    ),
                )
                .into()
            })
    }

    async fn poll_once(&self, url: &str) -> Result<FileInfo, RetryError<FramecastError>> {
        let response = send(
            PROVIDER,
            self.http
                .get(url)
                .timeout(self.timeout)
                .header("x-goog-api-key", self.api_key),
            no_block,
        )
        .await
        .map_err(RetryError::Permanent)?;
        let info: FileInfo = read_json(PROVIDER, response)
            .await
            .map_err(RetryError::Permanent)?;
        match info.state.as_deref() {
            Some("ACTIVE") | Some("FAILED") => Ok(info),
            _ => {
                debug!(name = %info.name, state = ?info.state, "File still processing");
                Err(RetryError::Transient {
                    err: UpstreamError::new(
                        PROVIDER,
                        UpstreamErrorKind::MalformedResponse(format!(
                            "File {} did not become active",
                            info.name
                        )),
                    )
                    .into(),
                    retry_after: None,
                })
            }
        }
    }

    async fn wait_until_active(&self, file: FileInfo) -> FileInfo {
        let url = format!("{}/v1beta/{}", self.base_url, file.name);
        let strategy = FixedInterval::from_millis(POLL_INTERVAL_MS).take(POLL_ATTEMPTS);

        let polled = Retry::spawn(strategy, || self.poll_once(&url)).await;

        match polled {
            Ok(info) => {
                if info.state.as_deref() == Some("FAILED") {
                    warn!(name = %info.name, "File processing failed, using uri anyway");
                }
                FileInfo {
                    uri: if info.uri.is_empty() { file.uri } else { info.uri },
                    mime_type: info.mime_type.or(file.mime_type),
                    ..info
                }
            }
            Err(e) => {
                warn!(name = %file.name, error = %e, "File did not become active, using uri anyway");
                file
            }
        }
    }
}
