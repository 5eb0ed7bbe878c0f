//! Volume-uniform star sampling inside a sphere.
//!
//! Every call builds its own [`ChaCha8Rng`] from the config seed, so runs are
//! reproducible and concurrent runs never share generator state.
//!
//! Per star, in star-index order, exactly five `f64` draws are taken:
//!
//! 1. `u` radial fraction, `r = radius * cbrt(u)`
//! 2. `v` height on the unit sphere, `z = 1 - 2v`
//! 3. `w` azimuth, `phi = TAU * w`
//! 4. `s` size fraction, `size = min_size + (max_size - min_size) * s`
//! 5. `random_factor`
//!
//! Taking the cube root of the radial draw makes the density constant per
//! unit volume; the `(z, phi)` pair is the cylindrical equal-area mapping onto
//! the sphere surface.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::cancel::CancelToken;
use crate::config::GenerationConfig;
use crate::error::StarfieldError;

/// Upper bound on the up-front allocation; larger runs grow as they go.
const PREALLOC_LIMIT: usize = 1 << 16;

/// One generated star.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    /// Position inside the field sphere, `length() <= radius`.
    pub position: DVec3,
    /// Uniform footprint in `[min_size, max_size]`.
    pub size: f64,
    /// Per-instance scalar in `[0, 1)` consumed by the shared appearance.
    pub random_factor: f64,
}

/// Generate `config.count` stars.
///
/// # Errors
///
/// Returns [`StarfieldError::InvalidConfig`] if the sampling parameters are
/// out of domain. Validation happens before any draw is taken.
pub fn generate(config: &GenerationConfig) -> Result<Vec<StarRecord>, StarfieldError> {
    generate_with_cancel(config, &CancelToken::new())
}

/// Like [`generate`], polling `cancel` between stars.
///
/// # Errors
///
/// Returns [`StarfieldError::Cancelled`] as soon as the token is observed in
/// the cancelled state; everything sampled so far is dropped.
pub fn generate_with_cancel(
    config: &GenerationConfig,
    cancel: &CancelToken,
) -> Result<Vec<StarRecord>, StarfieldError> {
    config.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut stars = Vec::with_capacity(config.count.min(PREALLOC_LIMIT));

    for _ in 0..config.count {
        if cancel.is_cancelled() {
            return Err(StarfieldError::Cancelled);
        }

        let position = sample_in_sphere(&mut rng, config.radius);
        let size = sample_size(&mut rng, config.min_size, config.max_size);
        let random_factor: f64 = rng.random();

        stars.push(StarRecord {
            position,
            size,
            random_factor,
        });
    }

    Ok(stars)
}

/// Draw a point uniformly by volume inside a sphere of `radius`. Takes 3 draws.
fn sample_in_sphere<R: Rng>(rng: &mut R, radius: f64) -> DVec3 {
    let u: f64 = rng.random();
    let v: f64 = rng.random();
    let w: f64 = rng.random();

    let r = radius * u.cbrt();
    let z = 1.0 - 2.0 * v;
    let ring = (1.0 - z * z).max(0.0).sqrt();
    let phi = std::f64::consts::TAU * w;

    let direction = DVec3::new(ring * phi.cos(), ring * phi.sin(), z);
    // Rounding in the unit direction can push r ~ radius a hair outside.
    (direction * r).clamp_length_max(radius)
}

/// Draw a size in `[min, max]`. Takes 1 draw.
fn sample_size<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    let s: f64 = rng.random();
    (min + (max - min) * s).clamp(min, max)
}
