//! Appearance registry: named, shared appearance descriptions looked up by
//! [`AppearanceId`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use starfield_core::{AppearanceDescription, AppearanceId};

/// Dense store of shared appearances. Ids are stable for the lifetime of the
/// scene; re-registering a name updates its parameters in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppearanceRegistry {
    /// Index == `AppearanceId.0`.
    entries: Vec<NamedAppearance>,
    /// Reverse lookup, rebuilt after deserialization.
    #[serde(skip)]
    name_to_id: HashMap<String, AppearanceId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct NamedAppearance {
    name: String,
    description: AppearanceDescription,
}

impl AppearanceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `description` under `name`, or overwrite the parameters of
    /// the existing entry. Returns the (stable) id either way.
    pub fn ensure(&mut self, name: &str, description: AppearanceDescription) -> AppearanceId {
        if let Some(&id) = self.name_to_id.get(name) {
            self.entries[id.0 as usize].description = description;
            return id;
        }

        let id = AppearanceId(self.entries.len() as u32);
        self.entries.push(NamedAppearance {
            name: name.to_string(),
            description,
        });
        self.name_to_id.insert(name.to_string(), id);
        id
    }

    /// Description for `id`, if registered.
    pub fn get(&self, id: AppearanceId) -> Option<&AppearanceDescription> {
        self.entries.get(id.0 as usize).map(|e| &e.description)
    }

    /// Id registered under `name`.
    pub fn id_of(&self, name: &str) -> Option<AppearanceId> {
        self.name_to_id.get(name).copied()
    }

    /// Number of registered appearances.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn rebuild_index(&mut self) {
        self.name_to_id = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), AppearanceId(i as u32)))
            .collect();
    }
}
