//! [`GenerationConfig`]: the inputs of one generation run.

use serde::{Deserialize, Serialize};

use crate::error::StarfieldError;

/// Parameters of one starfield generation run.
///
/// Identical configs always produce identical star sequences; `seed` is the
/// reproducibility key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Number of stars to create. Must be at least 1.
    pub count: usize,
    /// Radius of the spherical field, centered at the origin.
    pub radius: f64,
    /// Seed for the local random generator.
    pub seed: u64,
    /// Smallest star footprint.
    pub min_size: f64,
    /// Largest star footprint. Must not be below `min_size`.
    pub max_size: f64,
    /// Emission strength at `random_factor == 0.5`.
    pub base_brightness: f64,
    /// Symmetric brightness spread as a fraction of the base, in `[0, 1]`.
    pub brightness_variation: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            radius: 50.0,
            seed: 0,
            min_size: 0.02,
            max_size: 0.15,
            base_brightness: 3.0,
            brightness_variation: 0.8,
        }
    }
}

impl GenerationConfig {
    /// Check the sampling parameters (count, radius, size range).
    ///
    /// Brightness parameters are checked by [`crate::appearance::build`].
    ///
    /// # Errors
    ///
    /// Returns [`StarfieldError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), StarfieldError> {
        if self.count == 0 {
            return Err(StarfieldError::invalid("count must be at least 1"));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(StarfieldError::invalid(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        for (name, value) in [("min_size", self.min_size), ("max_size", self.max_size)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(StarfieldError::invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.min_size > self.max_size {
            return Err(StarfieldError::invalid(format!(
                "min_size ({}) exceeds max_size ({})",
                self.min_size, self.max_size
            )));
        }
        Ok(())
    }
}
