//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the framecast binary.

mod commands;
mod config;
mod generate;
mod parse;

pub use commands::{Cli, Commands, GenerateArgs};
pub use config::{settings_source, show_config};
pub use generate::generate_storyboard;
pub use parse::parse_script;
