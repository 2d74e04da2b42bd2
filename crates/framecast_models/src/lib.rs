//! Generation provider clients for Framecast.
//!
//! Two backends implement [`framecast_interface::ProviderClient`]:
//!
//! - **Gemini** ([`GeminiClient`]) - `generateContent` with image response modalities
//!   and the resumable Files API for large media
//! - **Ark** ([`ArkClient`]) - OpenAI-compatible chat completions and image generations
//!
//! [`ConfiguredProvider`] resolves configuration on every call and dispatches to the
//! selected backend through the [`Provider`] tagged union.
//!
//! ```no_run
//! use framecast_config::LayeredSettings;
//! use framecast_interface::ProviderClient;
//! use framecast_models::ConfiguredProvider;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = ConfiguredProvider::new(Arc::new(LayeredSettings::new()));
//! let script = provider
//!     .generate_storyboard_text("You are a storyboard artist.", "A fox crosses a frozen lake")
//!     .await?;
//! println!("{}", script);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ark;
mod gemini;
mod prompts;
mod provider;
mod transport;

pub use ark::{ArkClient, ark_image_size};
pub use gemini::GeminiClient;
pub use provider::{ConfiguredProvider, Provider};
