//! Tests for end-to-end storyboard runs against a mock provider.

mod test_utils;

use framecast_core::{GenerationRequest, ImageRef, ReferenceMode, join_full_prompts};
use framecast_error::{FramecastErrorKind, UpstreamErrorKind};
use framecast_pipeline::StoryboardOrchestrator;
use framecast_script::ParseStrategy;
use std::sync::Arc;
use test_utils::*;
use tokio_util::sync::CancellationToken;

fn request(idea: &str, scenes: u32, coherent: bool) -> anyhow::Result<GenerationRequest> {
    Ok(GenerationRequest::builder()
        .idea_text(idea)
        .total_duration_seconds(15u32)
        .scene_count(scenes)
        .coherent(coherent)
        .build()?)
}

fn reference(byte: u8) -> ImageRef {
    ImageRef::inline("image/png", vec![byte; 8])
}

#[tokio::test]
async fn test_coherent_run_chains_prior_images() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(THREE_SCENES));
    let orchestrator = StoryboardOrchestrator::new(provider.clone(), default_settings());

    let generated = orchestrator
        .generate(&request("a lighthouse keeper", 3, true)?)
        .await?;

    assert_eq!(*generated.parse_strategy(), ParseStrategy::SceneHeadings);
    assert_eq!(generated.shortfall(), 0);
    let scenes = generated.storyboard().scenes();
    assert_eq!(scenes.len(), 3);

    let calls = provider.image_calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].1, None);
    assert_eq!(calls[1].1, Some(mock_image(1)));
    assert_eq!(calls[2].1, Some(mock_image(2)));
    for (scene, (prompt, _)) in scenes.iter().zip(&calls) {
        assert_eq!(scene.full_prompt(), prompt);
    }
    for (i, scene) in scenes.iter().enumerate() {
        assert_eq!(scene.image_url().as_ref(), Some(&mock_image(i + 1)));
    }
    assert_eq!(
        generated.storyboard().copy_ready_prompt(),
        &join_full_prompts(scenes)
    );
    Ok(())
}

#[tokio::test]
async fn test_incoherent_run_never_passes_prior_images() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(THREE_SCENES));
    let orchestrator = StoryboardOrchestrator::new(provider.clone(), default_settings());

    orchestrator
        .generate(&request("a lighthouse keeper", 3, false)?)
        .await?;

    let calls = provider.image_calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|(_, prior)| prior.is_none()));
    Ok(())
}

#[tokio::test]
async fn test_coherence_off_suppresses_prior_images() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(THREE_SCENES));
    let orchestrator = StoryboardOrchestrator::new(provider.clone(), settings_with_coherence("off"));

    orchestrator
        .generate(&request("a lighthouse keeper", 3, true)?)
        .await?;

    assert!(provider.image_calls().iter().all(|(_, prior)| prior.is_none()));
    Ok(())
}

#[tokio::test]
async fn test_weak_coherence_still_passes_prior_images() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(THREE_SCENES));
    let orchestrator =
        StoryboardOrchestrator::new(provider.clone(), settings_with_coherence("weak"));

    orchestrator
        .generate(&request("a lighthouse keeper", 3, true)?)
        .await?;

    assert_eq!(provider.image_calls()[2].1, Some(mock_image(2)));
    Ok(())
}

#[tokio::test]
async fn test_extra_scenes_are_trimmed() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(FIVE_SCENES));
    let orchestrator = StoryboardOrchestrator::new(provider.clone(), default_settings());

    let generated = orchestrator.generate(&request("five ideas", 2, true)?).await?;

    let storyboard = generated.storyboard();
    assert_eq!(storyboard.len(), 2);
    assert_eq!(
        storyboard.copy_ready_prompt(),
        "Scene 1:One\nSubject: a\n\nScene 2:Two\nSubject: b"
    );
    assert_eq!(provider.image_calls().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_two_scene_script_titles_and_descriptions() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(
        "Scene 1: A\nSubject: cat\nScene 2: B\nSubject: dog",
    ));
    let orchestrator = StoryboardOrchestrator::new(provider, default_settings());

    let generated = orchestrator.generate(&request("pets", 2, true)?).await?;

    let scenes = generated.storyboard().scenes();
    assert_eq!(scenes[0].title(), "A");
    assert_eq!(scenes[1].title(), "B");
    assert!(scenes[0].description().contains("cat"));
    assert!(scenes[1].description().contains("dog"));
    Ok(())
}

#[tokio::test]
async fn test_prose_is_a_degraded_single_scene() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script("just a paragraph of prose"));
    let orchestrator = StoryboardOrchestrator::new(provider.clone(), default_settings());

    let generated = orchestrator.generate(&request("prose", 3, true)?).await?;

    assert!(generated.is_degraded());
    assert_eq!(generated.shortfall(), 2);
    let scenes = generated.storyboard().scenes();
    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].full_prompt(), "Scene 1:just a paragraph of prose");
    assert_eq!(provider.image_calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_reference_image_anchors_first_scene() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(THREE_SCENES));
    let orchestrator = StoryboardOrchestrator::new(provider.clone(), default_settings());
    let anchor = reference(7);

    let request = GenerationRequest::builder()
        .idea_text("a lighthouse keeper")
        .total_duration_seconds(15u32)
        .scene_count(3u32)
        .reference_images(vec![anchor.clone()])
        .build()?;
    let generated = orchestrator.generate(&request).await?;

    let scenes = generated.storyboard().scenes();
    assert_eq!(scenes[0].image_url().as_ref(), Some(&anchor));

    let calls = provider.image_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, Some(anchor));
    assert_eq!(calls[1].1, Some(mock_image(1)));

    assert_eq!(provider.analyze_count(), 1);
    let user_prompt = provider
        .calls()
        .into_iter()
        .find_map(|call| match call {
            MockCall::StoryboardText { user, .. } => Some(user),
            _ => None,
        })
        .ok_or_else(|| anyhow::anyhow!("no script call"))?;
    assert!(user_prompt.contains("VISUAL CONTEXT FROM REFERENCE IMAGES"));
    assert!(user_prompt.contains("reference image 1 of 1"));
    Ok(())
}

#[tokio::test]
async fn test_combine_all_merges_references() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(THREE_SCENES));
    let orchestrator = StoryboardOrchestrator::new(provider.clone(), default_settings());

    let request = GenerationRequest::builder()
        .idea_text("a lighthouse keeper")
        .total_duration_seconds(15u32)
        .scene_count(3u32)
        .reference_images(vec![reference(1), reference(2)])
        .reference_mode(ReferenceMode::CombineAll)
        .build()?;
    let generated = orchestrator.generate(&request).await?;

    let combined = ImageRef::Url("https://mock.example/combined.png".to_string());
    assert!(provider.calls().contains(&MockCall::Combine { count: 2 }));
    assert_eq!(provider.analyze_count(), 2);
    assert_eq!(
        generated.storyboard().scenes()[0].image_url().as_ref(),
        Some(&combined)
    );
    assert_eq!(provider.image_calls()[0].1, Some(combined));
    Ok(())
}

#[tokio::test]
async fn test_caption_failure_falls_back_to_idea() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(THREE_SCENES).failing_captions());
    let orchestrator = StoryboardOrchestrator::new(provider.clone(), default_settings());

    let request = GenerationRequest::builder()
        .idea_text("a lighthouse keeper")
        .total_duration_seconds(15u32)
        .scene_count(3u32)
        .reference_images(vec![reference(1), reference(2)])
        .build()?;
    let generated = orchestrator.generate(&request).await?;

    assert_eq!(generated.storyboard().len(), 3);
    let user_prompt = provider.calls().into_iter().find_map(|call| match call {
        MockCall::StoryboardText { user, .. } => Some(user),
        _ => None,
    });
    assert_eq!(user_prompt.as_deref(), Some("a lighthouse keeper"));
    Ok(())
}

#[tokio::test]
async fn test_image_failure_aborts_the_run() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(THREE_SCENES).failing_image_call(2));
    let orchestrator = StoryboardOrchestrator::new(provider.clone(), default_settings());

    let err = orchestrator
        .generate(&request("a lighthouse keeper", 3, true)?)
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), FramecastErrorKind::Upstream(_)));
    assert_eq!(provider.image_calls().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_blocked_script_surfaces_as_blocked() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_failing_script(UpstreamErrorKind::Blocked {
        reason: "SAFETY".to_string(),
    }));
    let orchestrator = StoryboardOrchestrator::new(provider.clone(), default_settings());

    let err = orchestrator
        .generate(&request("something unsafe", 3, true)?)
        .await
        .unwrap_err();

    assert!(err.is_blocked());
    assert!(provider.image_calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_invalid_request_makes_no_calls() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(THREE_SCENES));
    let orchestrator = StoryboardOrchestrator::new(provider.clone(), default_settings());

    let request: GenerationRequest = serde_json::from_str(
        r#"{
            "idea_text": "   ",
            "total_duration_seconds": 15,
            "scene_count": 3,
            "coherent": true,
            "aspect_ratio": "16:9",
            "reference_images": [],
            "reference_mode": "anchor-first"
        }"#,
    )?;
    let err = orchestrator.generate(&request).await.unwrap_err();

    assert!(err.is_validation());
    assert!(provider.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cancelled_before_start_makes_no_calls() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(THREE_SCENES));
    let orchestrator = StoryboardOrchestrator::new(provider.clone(), default_settings());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = orchestrator
        .generate_with_cancel(&request("a lighthouse keeper", 3, true)?, cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    match err.kind() {
        FramecastErrorKind::Cancelled(cancelled) => assert_eq!(cancelled.stage, "text_generation"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(provider.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cancelled_mid_run_stops_image_generation() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let provider = Arc::new(
        MockProvider::new_with_script(THREE_SCENES).cancelling_on_image_call(1, cancel.clone()),
    );
    let orchestrator = StoryboardOrchestrator::new(provider.clone(), default_settings());

    let err = orchestrator
        .generate_with_cancel(&request("a lighthouse keeper", 3, true)?, cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(provider.image_calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_chinese_idea_requests_chinese_headings() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new_with_script(
        "场景 1：雨夜\n主体：橘猫\n\n场景 2：天亮\n主体：橘猫",
    ));
    let orchestrator = StoryboardOrchestrator::new(provider.clone(), default_settings());

    let generated = orchestrator.generate(&request("一只猫在雨夜里", 2, true)?).await?;

    assert_eq!(generated.storyboard().len(), 2);
    let system = provider.calls().into_iter().find_map(|call| match call {
        MockCall::StoryboardText { system, .. } => Some(system),
        _ => None,
    });
    assert!(system.is_some_and(|system| system.contains("场景 N：")));
    Ok(())
}
