//! End-to-end storyboard generation.

use crate::{
    COMBINE_REFERENCES_PROMPT, RunStage, StoryboardPromptParams, caption_prompt, system_prompt,
    user_prompt,
};
use framecast_config::{ResolvedConfig, SettingsSource};
use framecast_core::{
    AnalyzeOptions, GenerationRequest, ImageOptions, ImageRef, MediaKind, ReferenceMode,
    StoryboardResult,
};
use framecast_error::{CancelledError, FramecastError, FramecastResult, NoResultError};
use framecast_interface::ProviderClient;
use framecast_script::{ParseStrategy, parse_storyboard};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// A finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GeneratedStoryboard {
    /// Scenes with images and the canonical prompt
    storyboard: StoryboardResult,
    /// How the script was parsed
    parse_strategy: ParseStrategy,
    /// Scene count the caller asked for
    requested_scenes: usize,
}

impl GeneratedStoryboard {
    /// True when the script had no recognisable scene structure.
    pub fn is_degraded(&self) -> bool {
        self.parse_strategy.is_degraded()
    }

    /// How many requested scenes the model failed to deliver.
    pub fn shortfall(&self) -> usize {
        self.requested_scenes.saturating_sub(self.storyboard.len())
    }

    /// Take the storyboard.
    pub fn into_storyboard(self) -> StoryboardResult {
        self.storyboard
    }
}

/// Drives a storyboard run against one provider.
///
/// Settings are read once at the start of each run, so coherence strength and
/// reply language changes apply from the next run on.
///
/// # Example
///
/// ```rust,ignore
/// use framecast_pipeline::StoryboardOrchestrator;
///
/// let orchestrator = StoryboardOrchestrator::new(provider, settings);
/// let generated = orchestrator.generate(&request).await?;
/// println!("{}", generated.storyboard().copy_ready_prompt());
/// ```
pub struct StoryboardOrchestrator<P> {
    provider: P,
    settings: Arc<dyn SettingsSource>,
}

impl<P> std::fmt::Debug for StoryboardOrchestrator<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryboardOrchestrator").finish_non_exhaustive()
    }
}

impl<P: ProviderClient> StoryboardOrchestrator<P> {
    /// Create an orchestrator.
    pub fn new(provider: P, settings: Arc<dyn SettingsSource>) -> Self {
        Self { provider, settings }
    }

    /// The provider runs go through.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Settings read at the start of each run.
    pub fn settings(&self) -> &Arc<dyn SettingsSource> {
        &self.settings
    }

    /// Run to completion.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed request before any provider
    /// call. Upstream and no-result errors from script or image generation abort
    /// the run; nothing partial is returned.
    pub async fn generate(&self, request: &GenerationRequest) -> FramecastResult<GeneratedStoryboard> {
        self.generate_with_cancel(request, CancellationToken::new())
            .await
    }

    /// Run until completion or until `cancel` fires.
    ///
    /// Every provider call is raced against the token. A cancelled run returns
    /// [`CancelledError`] naming the active stage and makes no further calls.
    #[instrument(
        skip(self, request, cancel),
        fields(
            provider = self.provider.provider_name(),
            scene_count = request.scene_count(),
            references = request.reference_images().len(),
            coherent = request.coherent(),
        )
    )]
    pub async fn generate_with_cancel(
        &self,
        request: &GenerationRequest,
        cancel: CancellationToken,
    ) -> FramecastResult<GeneratedStoryboard> {
        request.validate()?;

        let mut stage = RunStage::Captioning;
        let result = self.run(request, &cancel, &mut stage).await;
        match &result {
            Ok(generated) => info!(
                stage = %RunStage::Complete,
                scenes = generated.storyboard.len(),
                shortfall = generated.shortfall(),
                degraded = generated.is_degraded(),
                "Storyboard run complete"
            ),
            Err(e) => error!(
                stage = %RunStage::Failed,
                failed_in = %stage,
                error = %e,
                "Storyboard run failed"
            ),
        }
        result
    }

    async fn run(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
        stage: &mut RunStage,
    ) -> FramecastResult<GeneratedStoryboard> {
        let config = ResolvedConfig::load(self.settings.as_ref())?;

        *stage = RunStage::Captioning;
        let captions = self.caption_references(request, cancel).await?;

        *stage = RunStage::TextGeneration;
        let language = config.language_for(request.idea_text());
        let params = StoryboardPromptParams::from_request(request, language);
        let system = system_prompt(&params);
        let user = user_prompt(request.idea_text(), captions.as_deref());
        info!(stage = %stage, language = %language, "Generating storyboard script");
        let text = race(
            cancel,
            *stage,
            self.provider.generate_storyboard_text(&system, &user),
        )
        .await?;

        *stage = RunStage::Parsing;
        check_cancelled(cancel, *stage)?;
        let (mut storyboard, parse_strategy) = parse_storyboard(&text).into_parts();
        if storyboard.is_empty() {
            return Err(NoResultError::new("storyboard script")
                .with_detail("model returned no text to parse")
                .into());
        }
        if parse_strategy.is_degraded() {
            warn!(stage = %stage, "Script had no scene structure; continuing with one raw scene");
        }
        let requested_scenes = *request.scene_count() as usize;
        if storyboard.truncate(requested_scenes) {
            info!(stage = %stage, kept = requested_scenes, "Dropped scenes beyond the requested count");
        }

        *stage = RunStage::ImageGeneration;
        let anchor = self.anchor_image(request, cancel).await?;
        let pass_prior = *request.coherent() && config.coherence().passes_prior_image();
        debug!(stage = %stage, pass_prior, coherence = %config.coherence(), "Generating scene images");

        let prompts = storyboard
            .scenes()
            .iter()
            .map(|scene| scene.full_prompt().clone())
            .collect::<Vec<_>>();
        let mut previous_image: Option<ImageRef> = None;
        for (index, prompt) in prompts.iter().enumerate() {
            let image = match (index, &anchor) {
                (0, Some(anchor)) => {
                    debug!(scene = index, "Using reference anchor as first scene image");
                    anchor.clone()
                }
                _ => {
                    let prior = if pass_prior { previous_image.clone() } else { None };
                    let options = ImageOptions::new(*request.aspect_ratio()).with_prior_image(prior);
                    debug!(scene = index, with_prior = options.prior_image.is_some(), "Generating scene image");
                    race(cancel, *stage, self.provider.generate_image(prompt, &options)).await?
                }
            };
            storyboard.set_scene_image(index, image.clone())?;
            previous_image = Some(image);
        }

        Ok(GeneratedStoryboard {
            storyboard,
            parse_strategy,
            requested_scenes,
        })
    }

    /// Caption every reference image concurrently.
    ///
    /// Any caption failure drops all captions and the run continues with the
    /// bare idea. Only cancellation is propagated.
    async fn caption_references(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> FramecastResult<Option<Vec<String>>> {
        let references = request.reference_images();
        if references.is_empty() {
            return Ok(None);
        }

        let total = references.len();
        let options = &AnalyzeOptions::default();
        let provider = &self.provider;
        let calls = references.iter().enumerate().map(|(i, image)| {
            let prompt = caption_prompt(i + 1, total);
            async move {
                provider
                    .analyze_media(image, &prompt, MediaKind::Image, options)
                    .await
            }
        });

        let results = race(cancel, RunStage::Captioning, async {
            Ok::<_, FramecastError>(join_all(calls).await)
        })
        .await?;

        match results.into_iter().collect::<FramecastResult<Vec<_>>>() {
            Ok(captions) => {
                debug!(count = captions.len(), "Captioned reference images");
                Ok(Some(captions))
            }
            Err(e) => {
                warn!(error = %e, "Could not caption reference images, continuing with the idea alone");
                Ok(None)
            }
        }
    }

    /// The image that stands in for scene 1, if the request has references.
    async fn anchor_image(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> FramecastResult<Option<ImageRef>> {
        let references = request.reference_images();
        match (request.reference_mode(), references.len()) {
            (_, 0) => Ok(None),
            (ReferenceMode::CombineAll, count) if count > 1 => {
                info!(count, "Combining reference images into one anchor");
                let combined = race(
                    cancel,
                    RunStage::ImageGeneration,
                    self.provider
                        .combine_images(references, COMBINE_REFERENCES_PROMPT),
                )
                .await?;
                Ok(Some(combined))
            }
            _ => Ok(request.first_reference().cloned()),
        }
    }
}

/// Await `fut` unless `cancel` fires first.
async fn race<T, F>(cancel: &CancellationToken, stage: RunStage, fut: F) -> FramecastResult<T>
where
    F: Future<Output = FramecastResult<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            info!(stage = %stage, "Storyboard run cancelled");
            Err(CancelledError::new(stage.to_string()).into())
        }
        result = fut => result,
    }
}

fn check_cancelled(cancel: &CancellationToken, stage: RunStage) -> FramecastResult<()> {
    if cancel.is_cancelled() {
        info!(stage = %stage, "Storyboard run cancelled");
        return Err(CancelledError::new(stage.to_string()).into());
    }
    Ok(())
}
