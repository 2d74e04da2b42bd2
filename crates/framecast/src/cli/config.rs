//! Settings selection and the `config` command.

use framecast::{LayeredSettings, ResolvedConfig, SettingsSource};
use std::path::Path;
use std::sync::Arc;

/// Standard layered settings, or bundled defaults plus one explicit file.
pub fn settings_source(config: Option<&Path>) -> Arc<dyn SettingsSource> {
    match config {
        Some(path) => Arc::new(LayeredSettings::from_file(path)),
        None => Arc::new(LayeredSettings::new()),
    }
}

/// Print the resolved configuration as TOML.
pub fn show_config(settings: &dyn SettingsSource) -> Result<(), Box<dyn std::error::Error>> {
    let config = ResolvedConfig::load(settings)?;
    let rendered = toml::to_string_pretty(&config.redacted())?;
    print!("{}", rendered);
    Ok(())
}
