//! The `parse` command.

use framecast::parse_storyboard;
use std::path::Path;
use tracing::warn;

/// Parse a script file and print the scenes and strategy as JSON.
pub fn parse_script(file: &Path, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(file)?;
    let parsed = parse_storyboard(&text);
    if parsed.is_degraded() {
        warn!(file = %file.display(), "No scene headings found; treated the file as one scene");
    }

    let json = if pretty {
        serde_json::to_string_pretty(&parsed)?
    } else {
        serde_json::to_string(&parsed)?
    };
    println!("{}", json);
    Ok(())
}
