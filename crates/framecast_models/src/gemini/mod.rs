//! Gemini provider.

mod client;
mod dto;
mod files;

pub use client::GeminiClient;
