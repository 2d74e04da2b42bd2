//! The `generate` command.

use crate::cli::GenerateArgs;
use framecast::{
    ConfiguredProvider, GenerationRequest, ReferenceMode, SettingsSource, StoryboardOrchestrator,
    image_from_path, write_storyboard,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Run the full pipeline and write the results to the output directory.
///
/// Ctrl-C cancels the run; nothing is written for a cancelled run.
pub async fn generate_storyboard(
    args: GenerateArgs,
    settings: Arc<dyn SettingsSource>,
) -> Result<(), Box<dyn std::error::Error>> {
    let reference_images = args
        .references
        .iter()
        .map(|path| image_from_path(path))
        .collect::<Result<Vec<_>, _>>()?;

    let reference_mode = if args.combine {
        ReferenceMode::CombineAll
    } else {
        ReferenceMode::AnchorFirst
    };

    let request = GenerationRequest::builder()
        .idea_text(args.idea)
        .total_duration_seconds(args.duration)
        .scene_count(args.scenes)
        .coherent(!args.no_coherence)
        .aspect_ratio(args.aspect)
        .reference_images(reference_images)
        .reference_mode(reference_mode)
        .build()?;

    let provider = ConfiguredProvider::new(settings.clone());
    let orchestrator = StoryboardOrchestrator::new(provider, settings);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling storyboard run");
            on_interrupt.cancel();
        }
    });

    let generated = orchestrator.generate_with_cancel(&request, cancel).await?;
    if generated.is_degraded() {
        warn!("Model output had no scene headings; the storyboard has a single scene");
    }
    if generated.shortfall() > 0 {
        warn!(
            requested = generated.requested_scenes(),
            produced = generated.storyboard().len(),
            "Model produced fewer scenes than requested"
        );
    }

    let written = write_storyboard(&args.out, generated.storyboard())?;
    info!(dir = %args.out.display(), files = written.len(), "Storyboard written");

    println!("{}", generated.storyboard().copy_ready_prompt());
    for path in written {
        println!("wrote {}", path.display());
    }
    Ok(())
}
