//! `starfield`: generate a reproducible star field and write it as a scene file.
//!
//! Settings are loaded from `starfield.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p starfield-app -- --count 5000 --seed 7 -o stars.json`.

use std::process::ExitCode;

use clap::Parser;
use starfield_app::{load_config, run_generation};
use starfield_config::CliArgs;
use starfield_core::CancelToken;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let (config, dirs) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    starfield_log::init_logging(Some(&dirs.log_dir), Some(&config));
    tracing::debug!(config_dir = %dirs.config_dir.display(), "settings resolved");

    match run_generation(&config, &CancelToken::new()) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Star field not generated: {e}");
            ExitCode::FAILURE
        }
    }
}
