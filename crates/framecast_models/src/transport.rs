//! HTTP plumbing shared by the provider clients.

use framecast_config::ProviderEndpoint;
use framecast_error::{
    FramecastResult, MediaError, MediaErrorKind, UpstreamError, UpstreamErrorKind,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// Inspects a failed response body and returns a block reason if the provider
/// refused the request on safety grounds.
pub(crate) type BlockClassifier = fn(u16, &str) -> Option<String>;

/// API key of `endpoint`, or `MissingApiKey`.
pub(crate) fn require_api_key<'a>(
    provider: &'static str,
    endpoint: &'a ProviderEndpoint,
) -> FramecastResult<&'a str> {
    endpoint
        .api_key()
        .as_deref()
        .ok_or_else(|| {
            UpstreamError::new(
                provider,
                UpstreamErrorKind::MissingApiKey(provider.to_string()),
            )
            .into()
        })
}

/// Send a request, turning transport failures and non-success statuses into
/// upstream errors.
pub(crate) async fn send(
    provider: &'static str,
    request: RequestBuilder,
    classify: BlockClassifier,
) -> FramecastResult<Response> {
    let response = request.send().await.map_err(|e| {
        error!(provider, error = %e, "Request failed before a response arrived");
        UpstreamError::new(provider, UpstreamErrorKind::Transport(e.to_string()))
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    error!(provider, status = %status, body = %body, "Provider returned error status");
    if let Some(reason) = classify(status.as_u16(), &body) {
        return Err(UpstreamError::new(provider, UpstreamErrorKind::Blocked { reason }).into());
    }
    Err(UpstreamError::new(
        provider,
        UpstreamErrorKind::Status {
            status_code: status.as_u16(),
            message: body,
        },
    )
    .into())
}

/// Decode a successful response body.
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: &'static str,
    response: Response,
) -> FramecastResult<T> {
    let body = response.text().await.map_err(|e| {
        UpstreamError::new(provider, UpstreamErrorKind::Transport(e.to_string()))
    })?;
    serde_json::from_str(&body).map_err(|e| {
        debug!(provider, body = %body, "Unparseable response body");
        UpstreamError::new(
            provider,
            UpstreamErrorKind::MalformedResponse(format!("Failed to parse response: {}", e)),
        )
        .into()
    })
}

/// Download a remote image so it can be sent inline.
pub(crate) async fn fetch_remote(
    http: &Client,
    url: &str,
    timeout: Duration,
) -> FramecastResult<(String, Vec<u8>)> {
    let fetch_error = |message: String| {
        MediaError::new(MediaErrorKind::Fetch {
            url: url.to_string(),
            message,
        })
    };

    debug!(url, "Fetching remote media");
    let response = http
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;
    if !response.status().is_success() {
        return Err(fetch_error(format!("HTTP {}", response.status())).into());
    }

    let mime = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(';').next().unwrap_or(value).trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "image/png".to_string());
    let bytes = response
        .bytes()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;
    if bytes.is_empty() {
        return Err(MediaError::new(MediaErrorKind::Empty).into());
    }
    Ok((mime, bytes.to_vec()))
}

/// Never classifies a status as a block.
pub(crate) fn no_block(_status: u16, _body: &str) -> Option<String> {
    None
}
