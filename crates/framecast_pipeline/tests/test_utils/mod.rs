//! Shared test utilities for pipeline tests.

pub mod mock_provider;

#[allow(unused_imports)]
pub use mock_provider::*;
