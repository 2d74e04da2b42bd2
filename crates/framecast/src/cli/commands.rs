//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use framecast::AspectRatio;
use std::path::PathBuf;

/// Framecast - turn a video idea into an illustrated storyboard
#[derive(Parser, Debug)]
#[command(name = "framecast")]
#[command(about = "Turn a video idea into an illustrated, copy-ready storyboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read settings from this file instead of the standard locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a storyboard and one image per scene
    Generate(GenerateArgs),

    /// Parse a storyboard script file and print its scenes as JSON
    Parse {
        /// Path to the script text file
        file: PathBuf,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print the resolved configuration with API keys masked
    Config,
}

/// Arguments for `framecast generate`
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// The video idea
    pub idea: String,

    /// Total video length in seconds
    #[arg(long, default_value_t = 30)]
    pub duration: u32,

    /// Number of scenes
    #[arg(long, default_value_t = 4)]
    pub scenes: u32,

    /// Aspect ratio, e.g. 16:9 or 9:16
    #[arg(long, default_value = "16:9")]
    pub aspect: AspectRatio,

    /// Generate each scene independently of the previous one
    #[arg(long)]
    pub no_coherence: bool,

    /// Reference image files; the first anchors scene 1
    #[arg(long = "reference", value_name = "FILE")]
    pub references: Vec<PathBuf>,

    /// Merge all reference images into one anchor instead of using the first
    #[arg(long)]
    pub combine: bool,

    /// Output directory
    #[arg(long, short, default_value = "storyboard")]
    pub out: PathBuf,
}
