//! Configuration resolution for the Framecast storyboard pipeline.
//!
//! Settings are a flat key-value store. A [`SettingsSource`] produces a fresh
//! snapshot on every call and [`ResolvedConfig::load`] turns that snapshot into
//! typed values, falling back to defaults for anything missing or malformed.
//!
//! # Examples
//!
//! ```
//! use framecast_config::{keys, CoherenceStrength, MemorySettings, ProviderKind, ResolvedConfig};
//!
//! let settings = MemorySettings::new()
//!     .with(keys::AI_PROVIDER, "ark")
//!     .with(keys::COHERENCE_STRENGTH, "weak");
//!
//! let config = ResolvedConfig::load(&settings).unwrap();
//! assert_eq!(*config.provider(), ProviderKind::Ark);
//! assert_eq!(*config.coherence(), CoherenceStrength::Weak);
//! assert_eq!(*config.video_max_tokens(), 300);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod language;
mod resolved;
mod source;

pub mod keys;

pub use language::{Language, contains_cjk};
pub use resolved::{
    CoherenceStrength, ImageSizePreset, MediaUploadPolicy, ModelRole, ModelSelection,
    ProviderEndpoint, ProviderKind, ReplyLanguage, ResolvedConfig,
};
pub use source::{LayeredSettings, MemorySettings, SettingsMap, SettingsSource};
