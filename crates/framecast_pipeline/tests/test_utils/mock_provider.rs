//! Mock provider client for testing.

#![allow(dead_code)]

use async_trait::async_trait;
use framecast_config::{MemorySettings, SettingsSource, keys};
use framecast_core::{AnalyzeOptions, ImageOptions, ImageRef, MediaKind};
use framecast_error::{FramecastResult, UpstreamError, UpstreamErrorKind};
use framecast_interface::ProviderClient;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const PROVIDER: &str = "mock";

/// What the script call returns.
#[derive(Debug, Clone)]
pub enum MockScript {
    /// Return this text
    Text(String),
    /// Fail with this error
    Error(UpstreamErrorKind),
}

/// One recorded provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    StoryboardText { system: String, user: String },
    Image { prompt: String, prior: Option<ImageRef> },
    Combine { count: usize },
    Edit { prompt: String },
    Analyze { prompt: String },
}

/// Mock provider for testing.
///
/// Images are numbered URLs (`https://mock.example/image-<n>.png`) in call
/// order, so tests can tell exactly which call produced which scene image.
pub struct MockProvider {
    script: MockScript,
    failing_image_calls: Vec<usize>,
    failing_captions: bool,
    image_delay: Option<Duration>,
    cancel_on_image_call: Option<(usize, CancellationToken)>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    image_count: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockProvider {
    /// Create a mock whose script call returns `text`.
    pub fn new_with_script(text: impl Into<String>) -> Self {
        Self::new(MockScript::Text(text.into()))
    }

    /// Create a mock whose script call fails.
    pub fn new_failing_script(error: UpstreamErrorKind) -> Self {
        Self::new(MockScript::Error(error))
    }

    fn new(script: MockScript) -> Self {
        Self {
            script,
            failing_image_calls: Vec::new(),
            failing_captions: false,
            image_delay: None,
            cancel_on_image_call: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            image_count: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Fail the `n`th image call (1-based) with a 503.
    pub fn failing_image_call(mut self, n: usize) -> Self {
        self.failing_image_calls.push(n);
        self
    }

    /// Fail every caption call.
    pub fn failing_captions(mut self) -> Self {
        self.failing_captions = true;
        self
    }

    /// Sleep inside each image call.
    pub fn with_image_delay(mut self, delay: Duration) -> Self {
        self.image_delay = Some(delay);
        self
    }

    /// Cancel `token` while serving the `n`th image call (1-based).
    pub fn cancelling_on_image_call(mut self, n: usize, token: CancellationToken) -> Self {
        self.cancel_on_image_call = Some((n, token));
        self
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Image calls as `(prompt, prior image)` pairs.
    pub fn image_calls(&self) -> Vec<(String, Option<ImageRef>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::Image { prompt, prior } => Some((prompt, prior)),
                _ => None,
            })
            .collect()
    }

    /// Number of caption calls.
    pub fn analyze_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, MockCall::Analyze { .. }))
            .count()
    }

    /// Most image calls that were ever running at once.
    pub fn max_concurrent_images(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }
}

/// URL of the `n`th generated mock image.
pub fn mock_image(n: usize) -> ImageRef {
    ImageRef::Url(format!("https://mock.example/image-{n}.png"))
}

fn status(status_code: u16, message: &str) -> UpstreamError {
    UpstreamError::new(
        PROVIDER,
        UpstreamErrorKind::Status {
            status_code,
            message: message.to_string(),
        },
    )
}

#[async_trait]
impl ProviderClient for MockProvider {
    async fn generate_storyboard_text(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> FramecastResult<String> {
        self.record(MockCall::StoryboardText {
            system: system_prompt.to_string(),
            user: user_prompt.to_string(),
        });
        match &self.script {
            MockScript::Text(text) => Ok(text.clone()),
            MockScript::Error(kind) => Err(UpstreamError::new(PROVIDER, kind.clone()).into()),
        }
    }

    async fn generate_image(
        &self,
        prompt: &str,
        options: &ImageOptions,
    ) -> FramecastResult<ImageRef> {
        let n = self.image_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.record(MockCall::Image {
            prompt: prompt.to_string(),
            prior: options.prior_image.clone(),
        });
        if let Some((at, token)) = &self.cancel_on_image_call {
            if *at == n {
                token.cancel();
            }
        }

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.image_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_image_calls.contains(&n) {
            return Err(status(503, "image backend unavailable").into());
        }
        Ok(mock_image(n))
    }

    async fn combine_images(
        &self,
        images: &[ImageRef],
        _prompt: &str,
    ) -> FramecastResult<ImageRef> {
        self.record(MockCall::Combine {
            count: images.len(),
        });
        Ok(ImageRef::Url("https://mock.example/combined.png".to_string()))
    }

    async fn edit_image(&self, _base: &ImageRef, prompt: &str) -> FramecastResult<ImageRef> {
        self.record(MockCall::Edit {
            prompt: prompt.to_string(),
        });
        Ok(ImageRef::Url("https://mock.example/edited.png".to_string()))
    }

    async fn analyze_media(
        &self,
        _media: &ImageRef,
        prompt: &str,
        _kind: MediaKind,
        _options: &AnalyzeOptions,
    ) -> FramecastResult<String> {
        self.record(MockCall::Analyze {
            prompt: prompt.to_string(),
        });
        if self.failing_captions {
            return Err(status(500, "vision model unavailable").into());
        }
        Ok(format!("caption for: {prompt}"))
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Settings with defaults only.
pub fn default_settings() -> Arc<dyn SettingsSource> {
    Arc::new(MemorySettings::new())
}

/// Settings with the given coherence strength.
pub fn settings_with_coherence(strength: &str) -> Arc<dyn SettingsSource> {
    Arc::new(MemorySettings::new().with(keys::COHERENCE_STRENGTH, strength))
}

/// A well-formed three scene script.
pub const THREE_SCENES: &str = "Sequence Overview: The lighthouse

Scene 1: Dusk
Subject: a lighthouse keeper
Environment: rocky coast

Scene 2: Storm
Subject: the keeper
Lighting: lightning flashes

Scene 3: Dawn
Subject: the keeper asleep";

/// A script with five scenes.
pub const FIVE_SCENES: &str = "Scene 1: One\nSubject: a\n\nScene 2: Two\nSubject: b\n\nScene 3: Three\nSubject: c\n\nScene 4: Four\nSubject: d\n\nScene 5: Five\nSubject: e";
