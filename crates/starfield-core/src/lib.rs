//! Procedural starfield core: volume-uniform star sampling and a shared,
//! instance-parameterized emissive appearance.
//!
//! The two entry points are [`generate`] and [`build`]. Their output is fed
//! into a host scene through the [`StarSink`] trait.

pub mod appearance;
pub mod cancel;
pub mod color;
pub mod config;
pub mod error;
pub mod sampler;
pub mod sink;

pub use appearance::{
    AppearanceDescription, AppearanceGpuData, AppearanceId, MIN_BRIGHTNESS, StarEmission,
    StarInstance, build, build_with_palette,
};
pub use cancel::CancelToken;
pub use color::{Palette, blackbody_to_rgb};
pub use config::GenerationConfig;
pub use error::StarfieldError;
pub use sampler::{StarRecord, generate, generate_with_cancel};
pub use sink::{CollectingSink, PlacedStar, StarSink, assemble};
