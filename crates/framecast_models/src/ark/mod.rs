//! Ark provider.

mod client;
mod dto;
mod size;

pub use client::ArkClient;
pub use size::ark_image_size;
