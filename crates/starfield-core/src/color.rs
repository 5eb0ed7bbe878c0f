//! Deterministic star tints: the default color ramp and a blackbody palette.

use serde::{Deserialize, Serialize};

/// Color ramp stops as `(position, linear RGB)`, cool blue-white through warm
/// orange to warm white.
pub const STAR_RAMP: [(f32, [f32; 3]); 3] = [
    (0.0, [0.8, 0.9, 1.0]),
    (0.35, [1.0, 0.8, 0.65]),
    (1.0, [1.0, 0.95, 0.9]),
];

/// Saturation multiplier applied after the ramp lookup.
pub const RAMP_SATURATION: f32 = 1.1;

/// Value multiplier applied after the ramp lookup.
pub const RAMP_VALUE: f32 = 1.2;

/// How a star's random factor maps to its tint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Palette {
    /// Sample [`STAR_RAMP`], then boost saturation and value.
    #[default]
    Ramp,
    /// Map the factor linearly to a color temperature in Kelvin.
    Blackbody {
        /// Temperature at `random_factor == 0`.
        min_kelvin: f32,
        /// Temperature at `random_factor == 1`.
        max_kelvin: f32,
    },
}

impl Palette {
    /// Tint for a random factor. Every channel lies in `[0, 1]`.
    pub fn tint(&self, random_factor: f64) -> [f32; 3] {
        let t = random_factor.clamp(0.0, 1.0) as f32;
        match *self {
            Self::Ramp => {
                let base = sample_ramp(&STAR_RAMP, t);
                adjust_saturation_value(base, RAMP_SATURATION, RAMP_VALUE)
            }
            Self::Blackbody {
                min_kelvin,
                max_kelvin,
            } => blackbody_to_rgb(min_kelvin + (max_kelvin - min_kelvin) * t),
        }
    }
}

/// Linearly interpolate a color ramp at `t`. Positions must be ascending.
pub fn sample_ramp(stops: &[(f32, [f32; 3])], t: f32) -> [f32; 3] {
    let Some(&(first_pos, first_color)) = stops.first() else {
        return [0.0; 3];
    };
    if t <= first_pos {
        return first_color;
    }
    for pair in stops.windows(2) {
        let (p0, c0) = pair[0];
        let (p1, c1) = pair[1];
        if t <= p1 {
            let span = p1 - p0;
            let f = if span > 0.0 { (t - p0) / span } else { 1.0 };
            return [
                c0[0] + (c1[0] - c0[0]) * f,
                c0[1] + (c1[1] - c0[1]) * f,
                c0[2] + (c1[2] - c0[2]) * f,
            ];
        }
    }
    stops[stops.len() - 1].1
}

/// Scale saturation and value in HSV space, keeping hue. Both are capped at 1.
pub fn adjust_saturation_value(rgb: [f32; 3], saturation: f32, value: f32) -> [f32; 3] {
    let [h, s, v] = rgb_to_hsv(rgb);
    hsv_to_rgb([h, (s * saturation).clamp(0.0, 1.0), (v * value).clamp(0.0, 1.0)])
}

fn rgb_to_hsv([r, g, b]: [f32; 3]) -> [f32; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta <= f32::EPSILON {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };
    let s = if max > 0.0 { delta / max } else { 0.0 };
    [h, s, max]
}

fn hsv_to_rgb([h, s, v]: [f32; 3]) -> [f32; 3] {
    let c = v * s;
    let sector = h.rem_euclid(1.0) * 6.0;
    let x = c * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [
        (r + m).clamp(0.0, 1.0),
        (g + m).clamp(0.0, 1.0),
        (b + m).clamp(0.0, 1.0),
    ]
}

/// Convert a blackbody temperature in Kelvin to an approximate sRGB color.
///
/// Uses a simplified Planckian locus approximation (Tanner Helland algorithm).
pub fn blackbody_to_rgb(temperature_k: f32) -> [f32; 3] {
    let t = temperature_k / 100.0;
    let r = if t <= 66.0 {
        1.0
    } else {
        (329.698_73 * (t - 60.0).powf(-0.133_204_76) / 255.0).clamp(0.0, 1.0)
    };
    let g = if t <= 66.0 {
        (99.470_8 * t.ln() - 161.119_57).clamp(0.0, 255.0) / 255.0
    } else {
        (288.122_17 * (t - 60.0).powf(-0.075_514_85) / 255.0).clamp(0.0, 1.0)
    };
    let b = if t >= 66.0 {
        1.0
    } else if t <= 19.0 {
        0.0
    } else {
        (138.517_73 * (t - 10.0).ln() - 305.044_8).clamp(0.0, 255.0) / 255.0
    };
    [r, g, b]
}
