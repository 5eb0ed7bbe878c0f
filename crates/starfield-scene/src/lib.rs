//! Scene assembly for generated star fields.
//!
//! Stands in for a host application's scene graph: named collections of star
//! objects, one shared appearance referenced by every star, optional clearing
//! of earlier output, and RON/JSON export.

mod assembly;
mod error;
mod registry;
mod scene;

pub use assembly::{GenerationReport, STAR_APPEARANCE_NAME, StarfieldSettings, generate_starfield};
pub use error::SceneError;
pub use registry::AppearanceRegistry;
pub use scene::{Collection, CollectionSink, ObjectHandle, Scene, SceneFormat, StarObject};
