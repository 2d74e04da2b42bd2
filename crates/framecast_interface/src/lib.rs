//! Trait definitions for Framecast generation providers.
//!
//! Every backend exposes the same five operations through [`ProviderClient`];
//! the orchestrator and the scene mutation API only ever see this trait.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::ProviderClient;
