//! Provider selection and live smoke tests.

use framecast_config::{MemorySettings, keys};
use framecast_core::{AspectRatio, ImageOptions};
use framecast_interface::ProviderClient;
use framecast_models::{ConfiguredProvider, Provider};
use std::sync::Arc;

#[test]
fn test_selection_follows_settings_on_every_call() -> anyhow::Result<()> {
    let settings = Arc::new(MemorySettings::new());
    let provider = ConfiguredProvider::new(settings.clone());

    assert!(matches!(provider.select()?, Provider::Gemini(_)));
    assert_eq!(provider.provider_name(), "gemini");

    settings.set(keys::AI_PROVIDER, "ark");
    assert!(matches!(provider.select()?, Provider::Ark(_)));
    assert_eq!(provider.provider_name(), "ark");

    settings.remove(keys::AI_PROVIDER);
    assert_eq!(provider.provider_name(), "gemini");
    Ok(())
}

#[tokio::test]
async fn test_missing_key_is_reported_per_provider() -> anyhow::Result<()> {
    let settings = Arc::new(MemorySettings::new().with(keys::AI_PROVIDER, "ark"));
    let provider = ConfiguredProvider::new(settings);

    let err = provider
        .generate_image("Scene 1:A fox", &ImageOptions::new(AspectRatio::Ratio1x1))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No API key configured for provider ark"));
    assert!(!err.is_blocked());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_gemini_storyboard_text_live() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let key = std::env::var("GEMINI_API_KEY")?;
    let settings = Arc::new(MemorySettings::new().with(keys::GEMINI_API_KEY, key));
    let provider = ConfiguredProvider::new(settings);

    let text = provider
        .generate_storyboard_text(
            "Write exactly one line starting with \"Scene 1:\".",
            "A paper boat drifting down a rainy street",
        )
        .await?;
    assert!(text.contains("Scene 1"));
    Ok(())
}
