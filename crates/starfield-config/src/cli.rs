//! Command-line argument parsing for the starfield generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Starfield generator command-line arguments.
///
/// CLI values override settings loaded from `starfield.ron`.
#[derive(Parser, Debug, Default)]
#[command(
    name = "starfield",
    about = "Generate a reproducible procedural star field"
)]
pub struct CliArgs {
    /// Number of stars to create.
    #[arg(long)]
    pub count: Option<usize>,

    /// Radius of the spherical field.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Minimum star size.
    #[arg(long)]
    pub min_size: Option<f64>,

    /// Maximum star size.
    #[arg(long)]
    pub max_size: Option<f64>,

    /// Base brightness for all stars.
    #[arg(long)]
    pub base_brightness: Option<f64>,

    /// Brightness spread as a fraction of the base (0 to 1).
    #[arg(long)]
    pub brightness_variation: Option<f64>,

    /// Collection that receives the stars.
    #[arg(long)]
    pub collection: Option<String>,

    /// Remove existing stars in the collection first.
    #[arg(long)]
    pub clear_existing: Option<bool>,

    /// Output scene file (.ron or .json).
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let generation = &mut self.generation;
        if let Some(count) = args.count {
            generation.count = count;
        }
        if let Some(radius) = args.radius {
            generation.radius = radius;
        }
        if let Some(seed) = args.seed {
            generation.seed = seed;
        }
        if let Some(min) = args.min_size {
            generation.min_size = min;
        }
        if let Some(max) = args.max_size {
            generation.max_size = max;
        }
        if let Some(base) = args.base_brightness {
            generation.base_brightness = base;
        }
        if let Some(variation) = args.brightness_variation {
            generation.brightness_variation = variation;
        }
        if let Some(ref name) = args.collection {
            self.scene.collection_name = name.clone();
        }
        if let Some(clear) = args.clear_existing {
            self.scene.clear_existing = clear;
        }
        if let Some(ref path) = args.output {
            self.output.path = path.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
