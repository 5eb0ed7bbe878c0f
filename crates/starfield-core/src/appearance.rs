//! Shared emissive appearance driven by a per-star random factor.
//!
//! One [`AppearanceDescription`] is built per run and referenced by every star
//! through an [`AppearanceId`]. Nothing is stored per star except the random
//! factor, which the description turns into a tint and an emission strength.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::color::{Palette, RAMP_SATURATION, RAMP_VALUE};
use crate::error::StarfieldError;
use crate::sampler::StarRecord;

/// Lower bound on emission strength so no star ever emits zero or negative light.
pub const MIN_BRIGHTNESS: f64 = 1e-4;

/// Identifier a placed star uses to reference its shared appearance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppearanceId(pub u32);

/// Emission evaluated for a single random factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarEmission {
    /// Linear RGB tint, each channel in `[0, 1]`.
    pub color: [f32; 3],
    /// Emission strength, at least [`MIN_BRIGHTNESS`].
    pub strength: f64,
}

/// Parameterized emissive appearance shared by all stars of one run.
///
/// Deserialization goes through [`build_with_palette`], so a loaded
/// description obeys the same limits as a built one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AppearanceParams")]
pub struct AppearanceDescription {
    base_brightness: f64,
    brightness_variation: f64,
    palette: Palette,
}

/// Unchecked wire form of [`AppearanceDescription`].
#[derive(Deserialize)]
struct AppearanceParams {
    base_brightness: f64,
    brightness_variation: f64,
    #[serde(default)]
    palette: Palette,
}

impl TryFrom<AppearanceParams> for AppearanceDescription {
    type Error = StarfieldError;

    fn try_from(p: AppearanceParams) -> Result<Self, Self::Error> {
        build_with_palette(p.base_brightness, p.brightness_variation, p.palette)
    }
}

/// Build the shared appearance with the default color ramp.
///
/// # Errors
///
/// Returns [`StarfieldError::InvalidConfig`] if `base_brightness <= 0`,
/// `brightness_variation` is outside `[0, 1]`, or the brightest star would
/// overflow to infinity.
pub fn build(
    base_brightness: f64,
    brightness_variation: f64,
) -> Result<AppearanceDescription, StarfieldError> {
    build_with_palette(base_brightness, brightness_variation, Palette::default())
}

/// Build the shared appearance with an explicit palette.
///
/// # Errors
///
/// Same as [`build`], plus [`StarfieldError::InvalidConfig`] for a blackbody
/// palette whose temperature range is non-positive or inverted.
pub fn build_with_palette(
    base_brightness: f64,
    brightness_variation: f64,
    palette: Palette,
) -> Result<AppearanceDescription, StarfieldError> {
    if !base_brightness.is_finite() || base_brightness <= 0.0 {
        return Err(StarfieldError::invalid(format!(
            "base_brightness must be positive, got {base_brightness}"
        )));
    }
    if !(0.0..=1.0).contains(&brightness_variation) {
        return Err(StarfieldError::invalid(format!(
            "brightness_variation must lie in [0, 1], got {brightness_variation}"
        )));
    }
    let peak = base_brightness * (1.0 + brightness_variation);
    if !peak.is_finite() {
        return Err(StarfieldError::invalid(format!(
            "base_brightness {base_brightness} overflows at variation {brightness_variation}"
        )));
    }
    if let Palette::Blackbody {
        min_kelvin,
        max_kelvin,
    } = palette
        && !(min_kelvin > 0.0 && min_kelvin <= max_kelvin && max_kelvin.is_finite())
    {
        return Err(StarfieldError::invalid(format!(
            "blackbody range must satisfy 0 < min <= max, got {min_kelvin}..{max_kelvin}"
        )));
    }

    Ok(AppearanceDescription {
        base_brightness,
        brightness_variation,
        palette,
    })
}

impl AppearanceDescription {
    /// Emission strength at `random_factor == 0.5`.
    pub fn base_brightness(&self) -> f64 {
        self.base_brightness
    }

    /// Symmetric spread around the base, as a fraction of it.
    pub fn brightness_variation(&self) -> f64 {
        self.brightness_variation
    }

    /// Tint mapping in use.
    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// `base * (1 + variation * (2 f - 1))`, floored at [`MIN_BRIGHTNESS`].
    ///
    /// `random_factor` is clamped into `[0, 1]` first.
    pub fn brightness(&self, random_factor: f64) -> f64 {
        let f = random_factor.clamp(0.0, 1.0);
        let raw = self.base_brightness * (1.0 + self.brightness_variation * (2.0 * f - 1.0));
        raw.max(MIN_BRIGHTNESS)
    }

    /// Inclusive `(min, max)` emission strength over all random factors.
    pub fn brightness_range(&self) -> (f64, f64) {
        (self.brightness(0.0), self.brightness(1.0))
    }

    /// Tint for a random factor; a pure function of the factor.
    pub fn tint(&self, random_factor: f64) -> [f32; 3] {
        self.palette.tint(random_factor)
    }

    /// Tint and strength together.
    pub fn evaluate(&self, random_factor: f64) -> StarEmission {
        StarEmission {
            color: self.tint(random_factor),
            strength: self.brightness(random_factor),
        }
    }
}

/// GPU-friendly packed appearance, 32 bytes, std140-compatible.
///
/// The shader rebuilds the ramp from constants; only the parameters travel.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct AppearanceGpuData {
    /// x = base brightness, y = variation, z = brightness floor, w = palette kind
    /// (0 ramp, 1 blackbody).
    pub brightness: [f32; 4],
    /// Ramp: x = saturation, y = value. Blackbody: z = min K, w = max K.
    pub palette: [f32; 4],
}

impl From<&AppearanceDescription> for AppearanceGpuData {
    fn from(d: &AppearanceDescription) -> Self {
        let (kind, palette) = match d.palette {
            Palette::Ramp => (0.0, [RAMP_SATURATION, RAMP_VALUE, 0.0, 0.0]),
            Palette::Blackbody {
                min_kelvin,
                max_kelvin,
            } => (1.0, [0.0, 0.0, min_kelvin, max_kelvin]),
        };
        Self {
            brightness: [
                d.base_brightness as f32,
                d.brightness_variation as f32,
                MIN_BRIGHTNESS as f32,
                kind,
            ],
            palette,
        }
    }
}

/// Per-star instance data for an instanced draw, 32 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct StarInstance {
    /// World-space position.
    pub position: [f32; 3],
    /// Uniform scale.
    pub size: f32,
    /// Random factor fed to the shared appearance.
    pub random_factor: f32,
    /// Index of the shared appearance.
    pub appearance: u32,
    _pad: [u32; 2],
}

impl StarInstance {
    /// Pack a record for upload, referencing `appearance`.
    pub fn new(record: &StarRecord, appearance: AppearanceId) -> Self {
        Self {
            position: record.position.as_vec3().to_array(),
            size: record.size as f32,
            random_factor: record.random_factor as f32,
            appearance: appearance.0,
            _pad: [0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_build_rejects_non_positive_base() {
        for base in [-1.0, 0.0, f64::NAN] {
            assert!(matches!(
                build(base, 0.5),
                Err(StarfieldError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_build_rejects_variation_outside_unit_range() {
        for variation in [-0.1, 1.01, 8.0, f64::NAN] {
            assert!(
                build(3.0, variation).is_err(),
                "variation {variation} accepted"
            );
        }
        assert!(build(3.0, 0.0).is_ok());
        assert!(build(3.0, 1.0).is_ok());
    }

    #[test]
    fn test_build_rejects_bad_blackbody_range() {
        let inverted = Palette::Blackbody {
            min_kelvin: 9000.0,
            max_kelvin: 3000.0,
        };
        let negative = Palette::Blackbody {
            min_kelvin: -10.0,
            max_kelvin: 3000.0,
        };
        assert!(build_with_palette(1.0, 0.5, inverted).is_err());
        assert!(build_with_palette(1.0, 0.5, negative).is_err());
    }

    #[test]
    fn test_build_rejects_overflowing_peak() {
        assert!(matches!(
            build(f64::MAX, 1.0),
            Err(StarfieldError::InvalidConfig(_))
        ));
        let near_max = build(f64::MAX, 0.0).unwrap();
        assert!(near_max.brightness(1.0).is_finite());
    }

    #[test]
    fn test_deserialize_accepts_valid_description() {
        let built = build(3.0, 0.8).unwrap();
        let json = serde_json::to_string(&built).unwrap();
        let restored: AppearanceDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, built);
    }

    #[test]
    fn test_deserialize_rejects_out_of_domain_values() {
        let cases = [
            r#"{"base_brightness":-1.0,"brightness_variation":0.5,"palette":"Ramp"}"#,
            r#"{"base_brightness":3.0,"brightness_variation":1.5,"palette":"Ramp"}"#,
            r#"{"base_brightness":3.0,"brightness_variation":0.5,"palette":{"Blackbody":{"min_kelvin":9000.0,"max_kelvin":3000.0}}}"#,
        ];
        for json in cases {
            let result: Result<AppearanceDescription, _> = serde_json::from_str(json);
            assert!(result.is_err(), "accepted {json}");
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        assert_eq!(build(3.0, 0.8).unwrap(), build(3.0, 0.8).unwrap());
    }

    #[test]
    fn test_brightness_symmetric_around_base() {
        let appearance = build(2.0, 0.5).unwrap();
        assert!((appearance.brightness(0.5) - 2.0).abs() < 1e-12);
        assert!((appearance.brightness(0.0) - 1.0).abs() < 1e-12);
        assert!((appearance.brightness(1.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_brightness_stays_within_bounds() {
        for (base, variation) in [(3.0, 0.8), (1.0, 0.0), (0.5, 1.0), (10.0, 0.25)] {
            let appearance = build(base, variation).unwrap();
            let lo = MIN_BRIGHTNESS.max(base * (1.0 - variation));
            let hi = base * (1.0 + variation);
            for i in 0..=1000 {
                let b = appearance.brightness(i as f64 / 1000.0);
                assert!(
                    b >= lo - 1e-12 && b <= hi + 1e-12,
                    "brightness {b} outside [{lo}, {hi}] for base {base} variation {variation}"
                );
            }
        }
    }

    #[test]
    fn test_full_variation_floors_at_epsilon() {
        let appearance = build(3.0, 1.0).unwrap();
        assert_eq!(appearance.brightness(0.0), MIN_BRIGHTNESS);
        assert!(appearance.brightness(0.0) > 0.0);
        assert_eq!(appearance.brightness_range(), (MIN_BRIGHTNESS, 6.0));
    }

    #[test]
    fn test_out_of_range_factor_is_clamped() {
        let appearance = build(2.0, 0.5).unwrap();
        assert_eq!(appearance.brightness(-3.0), appearance.brightness(0.0));
        assert_eq!(appearance.brightness(7.0), appearance.brightness(1.0));
    }

    #[test]
    fn test_tint_is_deterministic() {
        let a = build(3.0, 0.8).unwrap();
        let b = build(3.0, 0.8).unwrap();
        for i in 0..=20 {
            let f = i as f64 / 20.0;
            assert_eq!(a.tint(f), b.tint(f));
            assert_eq!(a.tint(f), a.tint(f));
        }
    }

    #[test]
    fn test_evaluate_combines_tint_and_strength() {
        let appearance = build(3.0, 0.8).unwrap();
        let emission = appearance.evaluate(0.25);
        assert_eq!(emission.color, appearance.tint(0.25));
        assert_eq!(emission.strength, appearance.brightness(0.25));
    }

    #[test]
    fn test_gpu_data_size_and_packing() {
        assert_eq!(std::mem::size_of::<AppearanceGpuData>(), 32);
        let gpu = AppearanceGpuData::from(&build(3.0, 0.5).unwrap());
        assert_eq!(gpu.brightness[0], 3.0);
        assert_eq!(gpu.brightness[1], 0.5);
        assert_eq!(gpu.brightness[3], 0.0);
        assert_eq!(gpu.palette[0], RAMP_SATURATION);

        let blackbody = Palette::Blackbody {
            min_kelvin: 3000.0,
            max_kelvin: 9000.0,
        };
        let gpu = AppearanceGpuData::from(&build_with_palette(1.0, 0.0, blackbody).unwrap());
        assert_eq!(gpu.brightness[3], 1.0);
        assert_eq!(gpu.palette[2..], [3000.0, 9000.0]);
    }

    #[test]
    fn test_star_instance_packing() {
        assert_eq!(std::mem::size_of::<StarInstance>(), 32);
        let record = StarRecord {
            position: DVec3::new(1.0, -2.0, 3.5),
            size: 0.25,
            random_factor: 0.5,
        };
        let instance = StarInstance::new(&record, AppearanceId(7));
        assert_eq!(instance.position, [1.0, -2.0, 3.5]);
        assert_eq!(instance.size, 0.25);
        assert_eq!(instance.random_factor, 0.5);
        assert_eq!(instance.appearance, 7);
        let bytes: &[u8] = bytemuck::bytes_of(&instance);
        assert_eq!(bytes.len(), 32);
    }
}
