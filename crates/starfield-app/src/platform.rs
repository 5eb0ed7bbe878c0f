//! Platform directory resolution.
//!
//! Settings and logs live in the OS-appropriate locations (XDG on Linux,
//! Known Folders on Windows, Library on macOS).

use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while resolving or creating platform directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// Directory creation failed.
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// OS-specific directories used by the generator.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformDirs {
    /// Holds `starfield.ron`.
    pub config_dir: PathBuf,
    /// JSON log files.
    pub log_dir: PathBuf,
}

const APP_NAME: &str = "starfield-generator";

impl PlatformDirs {
    /// Resolve platform-specific directories without creating them on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        Ok(Self::resolve_with_root(&config_base))
    }

    /// Resolve directories rooted under a custom base path.
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Use an explicit config directory, with logs in a `logs` subdirectory.
    pub fn from_config_dir(config_dir: PathBuf) -> Self {
        let log_dir = config_dir.join("logs");
        Self {
            config_dir,
            log_dir,
        }
    }

    /// Create all directories on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if any directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}
