// Configuration management
//
// Handles frontend configuration and settings persistence. Every section has
// defaults, so a partial file only overrides what it names.

use crate::input::InputConfig;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default configuration file path
pub const CONFIG_FILE: &str = "oled_glow.toml";

/// Errors raised while loading, saving or interpreting configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The configuration could not be serialized
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A key map names a key the host numbering does not cover
    #[error("unknown key name '{0}'")]
    UnknownKey(String),

    /// A gamepad binding names an unknown button
    #[error("unknown gamepad button '{0}'")]
    UnknownGamepadButton(String),
}

/// Frontend configuration
///
/// Stores all user-configurable settings for the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Video settings
    pub video: VideoConfig,

    /// OLED persistence settings
    pub persistence: PersistenceConfig,

    /// Input settings
    pub input: InputConfig,

    /// Screenshot settings
    pub screenshot: ScreenshotConfig,
}

/// Video configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Initial window width in pixels
    pub window_width: u32,

    /// Initial window height in pixels
    pub window_height: u32,

    /// Target redraw rate
    pub fps: u32,

    /// Enable VSync
    pub vsync: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            window_width: 384,
            window_height: 168,
            fps: 60,
            vsync: true,
        }
    }
}

/// Persistence ("afterglow") configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Luminance every pixel loses per emulated frame
    pub decay: u8,

    /// Luminance a lit pixel gains per emulated frame
    pub increment: u8,

    /// Emulated display refreshes per second
    pub tick_rate: u32,

    /// Upper bound on emulated frames run per redraw
    pub max_ticks_per_frame: u32,
}

impl PersistenceConfig {
    /// Duration of one emulated frame
    pub fn tick_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.tick_rate.max(1) as u64)
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            decay: 32,
            increment: 64,
            tick_rate: 60,
            max_ticks_per_frame: 4,
        }
    }
}

/// Screenshot configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    /// Screenshot directory
    pub directory: PathBuf,
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("screenshots"),
        }
    }
}

impl AppConfig {
    /// Load configuration from file or fall back to defaults
    ///
    /// A missing file is created with the default configuration. A file that
    /// exists but cannot be parsed is left untouched and defaults are used.
    ///
    /// # Arguments
    ///
    /// * `path` - Configuration file path
    ///
    /// # Returns
    ///
    /// The loaded or default configuration
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                info!("Configuration loaded from {}", path.display());
                config
            }
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                // Writing the defaults is a convenience; failure is not fatal
                match config.save(path) {
                    Ok(()) => info!("Default configuration written to {}", path.display()),
                    Err(e) => warn!("{}", e),
                }
                config
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load configuration from file
    ///
    /// # Returns
    ///
    /// Result containing the configuration or an error
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Save configuration to file
    ///
    /// # Returns
    ///
    /// Result indicating success or error
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
