//! In-memory scene: named collections of star objects plus the shared
//! appearance registry, with RON/JSON persistence.

use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use starfield_core::{AppearanceId, StarSink};

use crate::error::SceneError;
use crate::registry::AppearanceRegistry;

/// A placed star primitive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StarObject {
    /// `Star_00000`-style name, unique within its collection.
    pub name: String,
    /// World-space location.
    pub position: DVec3,
    /// Uniform scale.
    pub scale: f64,
    /// Shared appearance this object is shaded with.
    pub appearance: AppearanceId,
    /// Per-instance input to the shared appearance.
    pub random_factor: f64,
}

/// A named group of star objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    pub name: String,
    pub objects: Vec<StarObject>,
}

impl Collection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            objects: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Location of a placed object: `(collection index, object index)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    pub collection: usize,
    pub object: usize,
}

/// On-disk scene encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneFormat {
    Ron,
    Json,
}

impl SceneFormat {
    /// `.json` (any case) selects JSON; everything else is RON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Ron,
        }
    }
}

/// Collections plus the appearances their objects reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    collections: Vec<Collection>,
    appearances: AppearanceRegistry,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the collection named `name`, creating it if missing.
    pub fn ensure_collection(&mut self, name: &str) -> Result<usize, SceneError> {
        if name.is_empty() {
            return Err(SceneError::EmptyCollectionName);
        }
        if let Some(index) = self.collection_index(name) {
            return Ok(index);
        }
        self.collections.push(Collection::new(name));
        tracing::debug!(collection = name, "created collection");
        Ok(self.collections.len() - 1)
    }

    /// Remove every object from the collection. Returns how many were removed;
    /// a missing collection removes nothing.
    pub fn clear_collection(&mut self, name: &str) -> usize {
        match self.collection_index(name) {
            Some(index) => {
                let removed = self.collections[index].objects.len();
                self.collections[index].objects.clear();
                removed
            }
            None => 0,
        }
    }

    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn appearances(&self) -> &AppearanceRegistry {
        &self.appearances
    }

    pub fn appearances_mut(&mut self) -> &mut AppearanceRegistry {
        &mut self.appearances
    }

    /// Look up an object by handle.
    pub fn object(&self, handle: ObjectHandle) -> Option<&StarObject> {
        self.collections
            .get(handle.collection)?
            .objects
            .get(handle.object)
    }

    /// Sink that appends objects to the collection at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` was not returned by [`ensure_collection`](Self::ensure_collection).
    pub fn sink(&mut self, index: usize) -> CollectionSink<'_> {
        CollectionSink {
            index,
            collection: &mut self.collections[index],
        }
    }

    /// Serialize to a RON string.
    pub fn to_ron_string(&self) -> Result<String, SceneError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(4);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Parse a scene from RON.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, SceneError> {
        let mut scene: Scene = ron::from_str(ron_str)?;
        scene.appearances.rebuild_index();
        Ok(scene)
    }

    /// Parse a scene from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        let mut scene: Scene = serde_json::from_str(json)?;
        scene.appearances.rebuild_index();
        Ok(scene)
    }

    /// Write the scene to `path`, choosing the format from its extension.
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        let contents = match SceneFormat::from_path(path) {
            SceneFormat::Ron => self.to_ron_string()?,
            SceneFormat::Json => serde_json::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        tracing::info!(path = %path.display(), "saved scene");
        Ok(())
    }

    /// Read a scene from `path`, choosing the format from its extension.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let contents = std::fs::read_to_string(path)?;
        match SceneFormat::from_path(path) {
            SceneFormat::Ron => Self::from_ron_str(&contents),
            SceneFormat::Json => Self::from_json_str(&contents),
        }
    }

    /// Read `path` if it exists, otherwise start from an empty scene.
    pub fn load_or_default(path: &Path) -> Result<Self, SceneError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    fn collection_index(&self, name: &str) -> Option<usize> {
        self.collections.iter().position(|c| c.name == name)
    }
}

/// [`StarSink`] that appends [`StarObject`]s to one collection.
///
/// Names continue the collection's numbering, so appending to a non-empty
/// collection never reuses a name.
pub struct CollectionSink<'a> {
    index: usize,
    collection: &'a mut Collection,
}

impl StarSink for CollectionSink<'_> {
    type Handle = ObjectHandle;

    fn place(
        &mut self,
        position: DVec3,
        size: f64,
        appearance: AppearanceId,
        random_factor: f64,
    ) -> ObjectHandle {
        let object = self.collection.objects.len();
        self.collection.objects.push(StarObject {
            name: format!("Star_{object:05}"),
            position,
            scale: size,
            appearance,
            random_factor,
        });
        ObjectHandle {
            collection: self.index,
            object,
        }
    }
}
