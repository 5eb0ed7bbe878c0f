//! Front end of the starfield generator: settings resolution and the single
//! "generate" action.

pub mod platform;

use starfield_config::{CliArgs, Config, ConfigError};
use starfield_core::CancelToken;
use starfield_scene::{GenerationReport, Scene, SceneError, StarfieldSettings, generate_starfield};
use tracing::{info, warn};

use crate::platform::{PlatformDirs, PlatformError};

/// Anything that can stop a generation run from the command line.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Resolve directories, load (or create) the settings file and apply CLI
/// overrides on top of it.
///
/// The merged settings are validated here, before any output scene is read.
pub fn load_config(args: &CliArgs) -> Result<(Config, PlatformDirs), AppError> {
    let dirs = match &args.config {
        Some(dir) => PlatformDirs::from_config_dir(dir.clone()),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok((config, dirs))
}

/// Map persisted settings onto the assembly settings.
pub fn settings_from_config(config: &Config) -> StarfieldSettings {
    StarfieldSettings {
        generation: config.generation.clone(),
        palette: config.appearance.palette,
        collection_name: config.scene.collection_name.clone(),
        clear_existing: config.scene.clear_existing,
    }
}

/// Load the existing output scene (if any), generate into it and save it.
///
/// Nothing is written when generation fails.
pub fn run_generation(config: &Config, cancel: &CancelToken) -> Result<GenerationReport, AppError> {
    let output = &config.output.path;
    let mut scene = Scene::load_or_default(output)?;
    let settings = settings_from_config(config);

    let report = generate_starfield(&mut scene, &settings, cancel).inspect_err(|e| {
        warn!(error = %e, "star field generation failed");
    })?;
    scene.save(output)?;
    info!(path = %output.display(), "{report}");
    Ok(report)
}
