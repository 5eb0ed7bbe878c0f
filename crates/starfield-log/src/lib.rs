//! Structured logging for the starfield generator.
//!
//! Console output carries an uptime timer and module targets; debug runs can
//! add a JSON file layer. `RUST_LOG` wins over the configured level.

use std::path::{Path, PathBuf};

use starfield_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config names a level.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written under the log directory.
pub const LOG_FILE_NAME: &str = "starfield.log";

/// Initialize the global tracing subscriber.
///
/// When `log_dir` is given and `config.debug.log_to_file` is set, a JSON file
/// layer is added next to the console layer. Failure to create the file only
/// drops that layer.
///
/// # Examples
///
/// ```no_run
/// use starfield_config::Config;
/// use starfield_log::init_logging;
///
/// init_logging(None, Some(&Config::default()));
/// ```
pub fn init_logging(log_dir: Option<&Path>, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let wants_file = config.is_some_and(|c| c.debug.log_to_file);
    if wants_file
        && let Some(log_path) = log_dir.and_then(prepare_log_file)
        && let Ok(log_file) = std::fs::File::create(&log_path)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Filter directive taken from the config, falling back to [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Create `log_dir` and return the log file path inside it.
fn prepare_log_file(log_dir: &Path) -> Option<PathBuf> {
    std::fs::create_dir_all(log_dir).ok()?;
    Some(log_dir.join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults_without_config() {
        assert_eq!(filter_directive(None), "info");
    }

    #[test]
    fn test_filter_uses_config_level() {
        let mut config = Config::default();
        config.debug.log_level = "debug,starfield_scene=trace".to_string();
        assert_eq!(filter_directive(Some(&config)), "debug,starfield_scene=trace");
    }

    #[test]
    fn test_empty_config_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "   ".to_string();
        assert_eq!(filter_directive(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,starfield_scene=trace",
            "warn,starfield_app=debug",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_new(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {}", filter_str);
        }
    }

    #[test]
    fn test_prepare_log_file_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("nested").join("logs");

        let path = prepare_log_file(&log_dir).unwrap();
        assert!(log_dir.is_dir());
        assert_eq!(path.file_name().unwrap(), LOG_FILE_NAME);
    }
}
