//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use starfield_core::{GenerationConfig, Palette};

use crate::error::ConfigError;

/// File name of the persisted settings inside the config directory.
pub const CONFIG_FILE_NAME: &str = "starfield.ron";

/// Top-level generator settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Sampling and brightness parameters.
    pub generation: GenerationConfig,
    /// Tint mapping of the shared appearance.
    pub appearance: AppearanceConfig,
    /// Target collection handling.
    pub scene: SceneConfig,
    /// Where the assembled scene is written.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Appearance settings beyond the brightness parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Random factor to tint mapping.
    pub palette: Palette,
}

/// Collection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Collection that receives the generated stars.
    pub collection_name: String,
    /// Remove stars already in the collection before inserting new ones.
    pub clear_existing: bool,
}

/// Scene export settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination file. `.json` selects JSON, anything else RON.
    pub path: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to the log directory.
    pub log_to_file: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            collection_name: "Starfield".to_string(),
            clear_existing: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("starfield_scene.ron"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Load settings from `config_dir`, or write and return defaults when the
    /// file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded settings from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default settings at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save settings to `config_dir` as [`CONFIG_FILE_NAME`].
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE_NAME), serialized)
            .map_err(ConfigError::WriteError)
    }

    /// Check the generation and brightness parameters without generating.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generation.validate()?;
        starfield_core::build_with_palette(
            self.generation.base_brightness,
            self.generation.brightness_variation,
            self.appearance.palette,
        )?;
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}
