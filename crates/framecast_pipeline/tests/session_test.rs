//! Tests for per-scene storyboard edits.

mod test_utils;

use framecast_core::{AspectRatio, ImageRef, Scene, StoryboardResult, join_full_prompts};
use framecast_error::{FramecastErrorKind, MediaErrorKind, ValidationErrorKind};
use framecast_pipeline::{SceneCommand, StoryboardSession};
use std::sync::Arc;
use std::time::Duration;
use test_utils::*;

fn original(n: usize) -> ImageRef {
    ImageRef::Url(format!("https://cdn.example.com/original-{n}.png"))
}

fn illustrated_storyboard() -> StoryboardResult {
    StoryboardResult::new(vec![
        Scene::new("Dusk", "a keeper", "Scene 1:Dusk").with_image(original(0)),
        Scene::new("Storm", "the keeper", "Scene 2:Storm").with_image(original(1)),
        Scene::new("Dawn", "asleep", "Scene 3:Dawn").with_image(original(2)),
    ])
}

fn session(
    provider: Arc<MockProvider>,
    coherent: bool,
) -> StoryboardSession<Arc<MockProvider>> {
    StoryboardSession::new(
        provider,
        default_settings(),
        illustrated_storyboard(),
        coherent,
        AspectRatio::Ratio16x9,
    )
}

#[tokio::test]
async fn test_edit_prompt_recomputes_canonical_prompt() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(""));
    let session = session(provider.clone(), true);

    session
        .edit_scene_prompt(1, "Scene 2:Storm, from the lantern room")
        .await?;

    let snapshot = session.snapshot().await;
    assert_eq!(
        snapshot.scenes()[1].full_prompt(),
        "Scene 2:Storm, from the lantern room"
    );
    assert_eq!(snapshot.scenes()[1].image_url().as_ref(), Some(&original(1)));
    assert_eq!(snapshot.copy_ready_prompt(), &join_full_prompts(snapshot.scenes()));
    assert!(provider.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_regenerate_uses_previous_scene_image() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(""));
    let session = session(provider.clone(), true);

    let image = session.regenerate_scene_image(2).await?;

    assert_eq!(image, mock_image(1));
    let calls = provider.image_calls();
    assert_eq!(calls, vec![("Scene 3:Dawn".to_string(), Some(original(1)))]);
    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.scenes()[2].image_url().as_ref(), Some(&mock_image(1)));
    Ok(())
}

#[tokio::test]
async fn test_regenerate_first_scene_has_no_prior() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(""));
    let session = session(provider.clone(), true);

    session.regenerate_scene_image(0).await?;

    assert_eq!(provider.image_calls()[0].1, None);
    Ok(())
}

#[tokio::test]
async fn test_regenerate_without_coherence_has_no_prior() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(""));
    let session = session(provider.clone(), false);

    session.regenerate_scene_image(1).await?;

    assert_eq!(provider.image_calls()[0].1, None);
    Ok(())
}

#[tokio::test]
async fn test_regenerate_with_coherence_off_has_no_prior() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(""));
    let session = StoryboardSession::new(
        provider.clone(),
        settings_with_coherence("off"),
        illustrated_storyboard(),
        true,
        AspectRatio::Ratio16x9,
    );

    session.regenerate_scene_image(1).await?;

    assert_eq!(provider.image_calls()[0].1, None);
    Ok(())
}

#[tokio::test]
async fn test_failed_regeneration_keeps_images() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script("").failing_image_call(1));
    let session = session(provider, true);
    let before = session.snapshot().await;

    let err = session.regenerate_scene_image(1).await.unwrap_err();

    assert!(matches!(err.kind(), FramecastErrorKind::Upstream(_)));
    assert_eq!(session.snapshot().await, before);
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_index_is_rejected() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(""));
    let session = session(provider.clone(), true);

    for err in [
        session.edit_scene_prompt(3, "Scene 4:x").await.unwrap_err(),
        session.regenerate_scene_image(3).await.unwrap_err(),
        session
            .upload_manual_scene_image(3, vec![1, 2, 3], "image/png")
            .await
            .unwrap_err(),
    ] {
        match err.kind() {
            FramecastErrorKind::Validation(e) => assert_eq!(
                e.kind,
                ValidationErrorKind::SceneIndexOutOfRange { index: 3, len: 3 }
            ),
            other => panic!("unexpected error: {other}"),
        }
    }
    assert!(provider.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_upload_replaces_only_that_image() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(""));
    let session = session(provider.clone(), true);

    session
        .upload_manual_scene_image(1, vec![0x89, b'P', b'N', b'G'], "image/png")
        .await?;

    let snapshot = session.snapshot().await;
    assert_eq!(
        snapshot.scenes()[1].image_url().as_ref(),
        Some(&ImageRef::inline("image/png", vec![0x89, b'P', b'N', b'G']))
    );
    assert_eq!(snapshot.scenes()[0].image_url().as_ref(), Some(&original(0)));
    assert_eq!(snapshot.scenes()[2].image_url().as_ref(), Some(&original(2)));
    assert!(provider.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_upload_rejects_bad_media() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(""));
    let session = session(provider, true);
    let before = session.snapshot().await;

    let empty = session
        .upload_manual_scene_image(0, Vec::new(), "image/png")
        .await
        .unwrap_err();
    let not_image = session
        .upload_manual_scene_image(0, vec![1, 2, 3], "text/plain")
        .await
        .unwrap_err();
    let bad_base64 = session
        .upload_manual_scene_image_base64(0, "not base64!!", "image/png")
        .await
        .unwrap_err();

    assert!(matches!(empty.kind(), FramecastErrorKind::Media(e) if e.kind == MediaErrorKind::Empty));
    assert!(matches!(
        not_image.kind(),
        FramecastErrorKind::Media(e) if matches!(e.kind, MediaErrorKind::NotAnImage(_))
    ));
    assert!(matches!(
        bad_base64.kind(),
        FramecastErrorKind::Media(e) if matches!(e.kind, MediaErrorKind::Base64Decode(_))
    ));
    assert_eq!(session.snapshot().await, before);
    Ok(())
}

#[tokio::test]
async fn test_upload_accepts_data_urls() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(""));
    let session = session(provider, true);

    session
        .upload_manual_scene_image_base64(2, "data:image/jpeg;base64,AQID", "image/png")
        .await?;

    let snapshot = session.snapshot().await;
    assert_eq!(
        snapshot.scenes()[2].image_url().as_ref(),
        Some(&ImageRef::inline("image/jpeg", vec![1, 2, 3]))
    );
    Ok(())
}

#[tokio::test]
async fn test_commands_apply_like_methods() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(""));
    let session = session(provider.clone(), true);

    let commands = vec![
        SceneCommand::EditPrompt {
            index: 0,
            full_prompt: "Scene 1:Dusk, wider".to_string(),
        },
        SceneCommand::RegenerateImage { index: 1 },
        SceneCommand::UploadImageBase64 {
            index: 2,
            payload: "AQID".to_string(),
            mime: "image/webp".to_string(),
        },
    ];
    for command in commands {
        session.apply(command).await?;
    }

    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.scenes()[0].full_prompt(), "Scene 1:Dusk, wider");
    assert_eq!(snapshot.scenes()[1].image_url().as_ref(), Some(&mock_image(1)));
    assert_eq!(
        snapshot.scenes()[2].image_url().as_ref(),
        Some(&ImageRef::inline("image/webp", vec![1, 2, 3]))
    );
    assert_eq!(provider.image_calls()[0].1, Some(original(0)));
    Ok(())
}

#[tokio::test]
async fn test_same_scene_regenerations_serialize() -> anyhow::Result<()> {
    let provider = Arc::new(
        MockProvider::new_with_script("").with_image_delay(Duration::from_millis(30)),
    );
    let session = session(provider.clone(), true);

    let (first, second) = tokio::join!(
        session.regenerate_scene_image(1),
        session.regenerate_scene_image(1)
    );
    first?;
    second?;

    assert_eq!(provider.max_concurrent_images(), 1);
    let image = session.snapshot().await.scenes()[1].image_url().clone();
    assert_eq!(image, Some(mock_image(2)));
    Ok(())
}

#[tokio::test]
async fn test_different_scenes_regenerate_concurrently() -> anyhow::Result<()> {
    let provider = Arc::new(
        MockProvider::new_with_script("").with_image_delay(Duration::from_millis(30)),
    );
    let session = session(provider.clone(), true);

    let (first, second) = tokio::join!(
        session.regenerate_scene_image(0),
        session.regenerate_scene_image(2)
    );
    first?;
    second?;

    assert_eq!(provider.max_concurrent_images(), 2);
    Ok(())
}
