//! Flat key-value settings sources.

use crate::keys;
use config::{Config, Environment, File, FileFormat};
use framecast_error::{ConfigError, FramecastResult};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::debug;

/// A snapshot of every setting, keyed by the names in [`crate::keys`].
pub type SettingsMap = HashMap<String, String>;

/// Anything that can produce the current settings.
///
/// Implementations must return a fresh view on every call; callers never cache
/// the result beyond a single operation.
pub trait SettingsSource: Send + Sync {
    /// Read the current settings.
    fn snapshot(&self) -> FramecastResult<SettingsMap>;
}

/// Settings held in process memory, typically written by a settings form.
///
/// # Examples
///
/// ```
/// use framecast_config::{keys, MemorySettings, SettingsSource};
///
/// let settings = MemorySettings::new().with(keys::REPLY_LANGUAGE, "zh");
/// settings.set(keys::IMAGE_WATERMARK, "true");
///
/// let snapshot = settings.snapshot().unwrap();
/// assert_eq!(snapshot.get(keys::REPLY_LANGUAGE).map(String::as_str), Some("zh"));
/// assert_eq!(snapshot.get(keys::IMAGE_WATERMARK).map(String::as_str), Some("true"));
/// ```
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<SettingsMap>,
}

impl MemorySettings {
    /// Empty settings; every key resolves to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace a value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut values = match self.values.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        values.insert(key.into(), value.into());
    }

    /// Remove a value so it falls back to its default.
    pub fn remove(&self, key: &str) {
        let mut values = match self.values.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        values.remove(key);
    }
}

impl SettingsSource for MemorySettings {
    fn snapshot(&self) -> FramecastResult<SettingsMap> {
        let values = self
            .values
            .read()
            .map_err(|_| ConfigError::new("Settings lock poisoned"))?;
        Ok(values.clone())
    }
}

/// Unprefixed environment variables accepted for API keys.
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    (keys::GEMINI_API_KEY, "GEMINI_API_KEY"),
    (keys::GEMINI_API_KEY, "API_KEY"),
    (keys::ARK_API_KEY, "ARK_API_KEY"),
];

/// Settings layered from files and the environment with the `config` crate.
///
/// Precedence, lowest first:
/// 1. Bundled defaults (`framecast.toml` compiled into the binary)
/// 2. `~/.config/framecast/framecast.toml`
/// 3. `./framecast.toml` (or an explicit file)
/// 4. `FRAMECAST_*` environment variables
///
/// The layers are rebuilt on every [`SettingsSource::snapshot`], so edits to the
/// files or environment take effect on the next provider call.
#[derive(Debug, Clone)]
pub struct LayeredSettings {
    local_file: Option<PathBuf>,
    include_home: bool,
    include_env: bool,
}

impl Default for LayeredSettings {
    fn default() -> Self {
        Self {
            local_file: None,
            include_home: true,
            include_env: true,
        }
    }
}

impl LayeredSettings {
    /// Standard layering: bundled defaults, home directory, current directory, environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bundled defaults overlaid with a single file; home directory and environment are ignored.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            local_file: Some(path.into()),
            include_home: false,
            include_env: false,
        }
    }

    fn build(&self) -> FramecastResult<SettingsMap> {
        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../framecast.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if self.include_home {
            if let Some(home) = dirs::home_dir() {
                let home_config = home.join(".config/framecast/framecast.toml");
                builder = builder.add_source(File::from(home_config).required(false));
            }
        }

        builder = match &self.local_file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder.add_source(File::with_name("framecast").required(false)),
        };

        if self.include_env {
            builder = builder.add_source(Environment::with_prefix("FRAMECAST"));
        }

        let mut values: SettingsMap = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        if self.include_env {
            for (key, var) in LEGACY_ENV_KEYS {
                let missing = values.get(*key).is_none_or(|v| v.trim().is_empty());
                if !missing {
                    continue;
                }
                if let Ok(value) = std::env::var(var) {
                    debug!(key, var, "Using unprefixed environment variable");
                    values.insert((*key).to_string(), value);
                }
            }
        }

        Ok(values)
    }
}

impl SettingsSource for LayeredSettings {
    fn snapshot(&self) -> FramecastResult<SettingsMap> {
        self.build()
    }
}
