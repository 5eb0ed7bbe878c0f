//! One-shot star field assembly into a [`Scene`].
//!
//! Everything that can fail runs before the scene is touched: sampling and
//! appearance construction complete first, and only then is the collection
//! ensured, optionally cleared, and filled.

use std::time::Instant;

use starfield_core::{
    AppearanceId, CancelToken, GenerationConfig, Palette, assemble, build_with_palette,
    generate_with_cancel,
};
use tracing::{debug, info};

use crate::error::SceneError;
use crate::scene::Scene;

/// Registry name of the appearance shared by every generated star.
pub const STAR_APPEARANCE_NAME: &str = "Starfield_StarMaterial";

/// Everything one "generate" action needs.
#[derive(Debug, Clone, PartialEq)]
pub struct StarfieldSettings {
    pub generation: GenerationConfig,
    pub palette: Palette,
    pub collection_name: String,
    pub clear_existing: bool,
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            palette: Palette::default(),
            collection_name: "Starfield".to_string(),
            clear_existing: true,
        }
    }
}

/// Outcome of a successful [`generate_starfield`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub collection_name: String,
    /// Stars added by this run.
    pub star_count: usize,
    /// Stars removed because `clear_existing` was set.
    pub removed: usize,
    pub appearance: AppearanceId,
}

impl std::fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Generated {} stars in '{}' collection",
            self.star_count, self.collection_name
        )
    }
}

/// Generate a star field and place it into `scene`.
///
/// # Errors
///
/// [`SceneError::Generation`] for invalid settings or cancellation and
/// [`SceneError::EmptyCollectionName`] for an empty collection name. On any
/// error the scene is left exactly as it was.
pub fn generate_starfield(
    scene: &mut Scene,
    settings: &StarfieldSettings,
    cancel: &CancelToken,
) -> Result<GenerationReport, SceneError> {
    let started = Instant::now();
    let config = &settings.generation;
    let appearance = build_with_palette(
        config.base_brightness,
        config.brightness_variation,
        settings.palette,
    )?;
    let records = generate_with_cancel(config, cancel)?;
    debug!(
        count = records.len(),
        seed = config.seed,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "sampled stars"
    );

    let index = scene.ensure_collection(&settings.collection_name)?;
    let removed = if settings.clear_existing {
        scene.clear_collection(&settings.collection_name)
    } else {
        0
    };
    let appearance_id = scene
        .appearances_mut()
        .ensure(STAR_APPEARANCE_NAME, appearance);

    let handles = assemble(&records, appearance_id, &mut scene.sink(index));

    let report = GenerationReport {
        collection_name: settings.collection_name.clone(),
        star_count: handles.len(),
        removed,
        appearance: appearance_id,
    };
    info!(
        stars = report.star_count,
        removed = report.removed,
        collection = %report.collection_name,
        "star field assembled"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfield_core::{StarfieldError, generate};

    fn settings(count: usize, seed: u64) -> StarfieldSettings {
        StarfieldSettings {
            generation: GenerationConfig {
                count,
                seed,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_places_every_star() {
        let mut scene = Scene::new();
        let report = generate_starfield(&mut scene, &settings(50, 1), &CancelToken::new()).unwrap();

        assert_eq!(report.star_count, 50);
        assert_eq!(report.removed, 0);
        assert_eq!(report.to_string(), "Generated 50 stars in 'Starfield' collection");

        let collection = scene.collection("Starfield").unwrap();
        assert_eq!(collection.len(), 50);
        assert!(collection.objects.iter().all(|o| o.appearance == report.appearance));
    }

    #[test]
    fn test_objects_mirror_sampled_records() {
        let settings = settings(20, 7);
        let records = generate(&settings.generation).unwrap();

        let mut scene = Scene::new();
        generate_starfield(&mut scene, &settings, &CancelToken::new()).unwrap();

        let objects = &scene.collection("Starfield").unwrap().objects;
        for (record, object) in records.iter().zip(objects.iter()) {
            assert_eq!(object.position, record.position);
            assert_eq!(object.scale, record.size);
            assert_eq!(object.random_factor, record.random_factor);
        }
    }

    #[test]
    fn test_clear_existing_replaces_stars() {
        let mut scene = Scene::new();
        generate_starfield(&mut scene, &settings(30, 1), &CancelToken::new()).unwrap();
        let report = generate_starfield(&mut scene, &settings(10, 2), &CancelToken::new()).unwrap();

        assert_eq!(report.removed, 30);
        let collection = scene.collection("Starfield").unwrap();
        assert_eq!(collection.len(), 10);
        assert_eq!(collection.objects[0].name, "Star_00000");
    }

    #[test]
    fn test_without_clear_appends_stars() {
        let mut scene = Scene::new();
        generate_starfield(&mut scene, &settings(30, 1), &CancelToken::new()).unwrap();

        let appending = StarfieldSettings {
            clear_existing: false,
            ..settings(10, 2)
        };
        let report = generate_starfield(&mut scene, &appending, &CancelToken::new()).unwrap();

        assert_eq!(report.removed, 0);
        let collection = scene.collection("Starfield").unwrap();
        assert_eq!(collection.len(), 40);
        assert_eq!(collection.objects[39].name, "Star_00039");
    }

    #[test]
    fn test_shared_appearance_registered_once() {
        let mut scene = Scene::new();
        let first = generate_starfield(&mut scene, &settings(5, 1), &CancelToken::new()).unwrap();

        let mut brighter = settings(5, 1);
        brighter.generation.base_brightness = 9.0;
        let second = generate_starfield(&mut scene, &brighter, &CancelToken::new()).unwrap();

        assert_eq!(first.appearance, second.appearance);
        assert_eq!(scene.appearances().len(), 1);
        let shared = scene.appearances().get(second.appearance).unwrap();
        assert_eq!(shared.base_brightness(), 9.0);
    }

    #[test]
    fn test_invalid_settings_leave_scene_untouched() {
        let mut scene = Scene::new();
        generate_starfield(&mut scene, &settings(5, 1), &CancelToken::new()).unwrap();
        let before = scene.clone();

        let mut bad_sizes = settings(5, 2);
        bad_sizes.generation.min_size = 5.0;
        bad_sizes.generation.max_size = 1.0;
        let mut bad_brightness = settings(5, 2);
        bad_brightness.generation.base_brightness = -1.0;

        for bad in [bad_sizes, bad_brightness] {
            let err = generate_starfield(&mut scene, &bad, &CancelToken::new()).unwrap_err();
            assert!(matches!(
                err,
                SceneError::Generation(StarfieldError::InvalidConfig(_))
            ));
            assert_eq!(scene, before);
        }
    }

    #[test]
    fn test_cancelled_run_leaves_scene_untouched() {
        let mut scene = Scene::new();
        generate_starfield(&mut scene, &settings(5, 1), &CancelToken::new()).unwrap();
        let before = scene.clone();

        let token = CancelToken::new();
        token.cancel();
        let err = generate_starfield(&mut scene, &settings(1000, 2), &token).unwrap_err();
        assert!(matches!(err, SceneError::Generation(StarfieldError::Cancelled)));
        assert_eq!(scene, before);
    }

    #[test]
    fn test_empty_collection_name_rejected() {
        let mut scene = Scene::new();
        let settings = StarfieldSettings {
            collection_name: String::new(),
            ..settings(5, 1)
        };
        assert!(matches!(
            generate_starfield(&mut scene, &settings, &CancelToken::new()),
            Err(SceneError::EmptyCollectionName)
        ));
        assert!(scene.collections().is_empty());
    }

    #[test]
    fn test_same_settings_produce_identical_scenes() {
        let mut a = Scene::new();
        let mut b = Scene::new();
        generate_starfield(&mut a, &settings(100, 42), &CancelToken::new()).unwrap();
        generate_starfield(&mut b, &settings(100, 42), &CancelToken::new()).unwrap();
        assert_eq!(a, b);
    }
}
