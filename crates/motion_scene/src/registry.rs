// SPDX-License-Identifier: MIT OR Apache-2.0
//! Object type registry and addon lifecycle.
//!
//! The [`Registry`] is an owned value created at startup and passed to
//! whatever loads or saves scenes. Addons register object types through an
//! [`AddonHost`] bound to their ID, so unloading an addon drops exactly the
//! entries it contributed.

use crate::object::{object_type_id, SceneObject};
use crate::objects::SystemAddon;
use crate::serialize::SerializeError;
use indexmap::IndexMap;
use serde_json::Value;
use std::any::TypeId;

/// ID of the built-in addon; it can never be unloaded
pub const SYSTEM_ADDON_ID: &str = "nahara";

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// An addon registered the same object type ID twice
    #[error("already registered: {addon_id}/{type_id}")]
    AlreadyRegistered {
        /// Owning addon
        addon_id: String,
        /// Object type ID
        type_id: String,
    },
    /// Addon initialization failed
    #[error("addon '{addon_id}' failed to initialize: {reason}")]
    InitFailed {
        /// Addon being loaded
        addon_id: String,
        /// Failure description
        reason: String,
    },
}

/// Descriptor of a registrable scene object type
pub trait ObjectType {
    /// Display name
    fn name(&self) -> Option<&str> {
        None
    }

    /// Longer description for pickers
    fn description(&self) -> Option<&str> {
        None
    }

    /// Picker category
    fn category(&self) -> Option<&str> {
        None
    }

    /// Concrete Rust type of the objects this descriptor creates
    fn object_type_id(&self) -> TypeId;

    /// Fresh object with default values
    fn create_new(&self) -> Box<dyn SceneObject>;

    /// Type-specific payload of `object`
    fn to_serializable(&self, object: &dyn SceneObject, registry: &Registry) -> Result<Value, SerializeError>;

    /// Rebuild an object from its payload
    fn from_serializable(&self, data: Value, registry: &Registry) -> Result<Box<dyn SceneObject>, SerializeError>;
}

/// A plugin contributing object types
pub trait Addon {
    /// Display name
    fn name(&self) -> Option<&str> {
        None
    }

    /// Register types; called once when the addon is loaded
    fn init(&mut self, _host: &mut AddonHost<'_>) -> Result<(), RegistryError> {
        Ok(())
    }

    /// Release addon resources. Registrations are dropped by the registry.
    fn unload(&mut self) {}
}

/// Registration handle given to an addon during [`Addon::init`]
pub struct AddonHost<'a> {
    addon_id: &'a str,
    registry: &'a mut Registry,
}

impl AddonHost<'_> {
    /// ID of the addon being initialized
    pub fn addon_id(&self) -> &str {
        self.addon_id
    }

    /// Register an object type under this addon
    pub fn register_object(&mut self, id: &str, object_type: Box<dyn ObjectType>) -> Result<(), RegistryError> {
        self.registry.register_object(self.addon_id, id, object_type)
    }

    /// Look up any registered type, including other addons'
    pub fn object(&self, addon_id: &str, id: &str) -> Option<&dyn ObjectType> {
        self.registry.get(addon_id, id)
    }
}

/// Registered object types keyed by `(addon ID, type ID)`
#[derive(Default)]
pub struct Registry {
    addons: IndexMap<String, Box<dyn Addon>>,
    objects: IndexMap<String, IndexMap<String, Box<dyn ObjectType>>>,
}

impl Registry {
    /// Empty registry with no addons loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in addon loaded
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.load_builtin();
        registry
    }

    /// Load the built-in addon; `false` when it was already loaded or failed
    pub fn load_builtin(&mut self) -> bool {
        let loaded = self.add_and_load_addon(SYSTEM_ADDON_ID, Box::new(SystemAddon));
        if !loaded && !self.has_addon(SYSTEM_ADDON_ID) {
            tracing::warn!(addon = SYSTEM_ADDON_ID, "Built-in object types are unavailable");
        }
        loaded
    }

    fn register_object(
        &mut self,
        addon_id: &str,
        id: &str,
        object_type: Box<dyn ObjectType>,
    ) -> Result<(), RegistryError> {
        let bound = self.objects.entry(addon_id.to_owned()).or_default();
        if bound.contains_key(id) {
            return Err(RegistryError::AlreadyRegistered {
                addon_id: addon_id.to_owned(),
                type_id: id.to_owned(),
            });
        }

        bound.insert(id.to_owned(), object_type);
        tracing::debug!(addon = addon_id, id, "Registered object type");
        Ok(())
    }

    /// Load an addon under `id`.
    ///
    /// Returns `false` if the ID is taken or `init` fails; a failed addon
    /// leaves no registrations behind.
    pub fn add_and_load_addon(&mut self, id: &str, mut addon: Box<dyn Addon>) -> bool {
        if self.addons.contains_key(id) {
            tracing::warn!(addon = id, "Addon already loaded, ignoring");
            return false;
        }

        let result = {
            let mut host = AddonHost {
                addon_id: id,
                registry: self,
            };
            addon.init(&mut host)
        };

        if let Err(err) = result {
            tracing::error!(addon = id, %err, "Failed to initialize addon");
            self.drop_registrations(id);
            return false;
        }

        tracing::info!(addon = id, name = addon.name().unwrap_or(id), "Loaded addon");
        self.addons.insert(id.to_owned(), addon);
        true
    }

    /// Unload an addon and every registration it made.
    ///
    /// The system addon and unknown IDs are refused with `false`.
    pub fn unload_addon(&mut self, id: &str) -> bool {
        if id == SYSTEM_ADDON_ID {
            tracing::warn!("The system addon cannot be unloaded");
            return false;
        }
        let Some(mut addon) = self.addons.shift_remove(id) else {
            return false;
        };

        addon.unload();
        self.drop_registrations(id);
        tracing::info!(addon = id, "Unloaded addon");
        true
    }

    fn drop_registrations(&mut self, addon_id: &str) {
        self.objects.shift_remove(addon_id);
    }

    /// Whether an addon is loaded
    pub fn has_addon(&self, id: &str) -> bool {
        self.addons.contains_key(id)
    }

    /// Loaded addon IDs, in load order
    pub fn loaded_addons(&self) -> impl Iterator<Item = &str> + '_ {
        self.addons.keys().map(String::as_str)
    }

    /// Registered type
    pub fn get(&self, addon_id: &str, id: &str) -> Option<&dyn ObjectType> {
        self.objects
            .get(addon_id)
            .and_then(|bound| bound.get(id))
            .map(Box::as_ref)
    }

    /// `(addon ID, type ID)` of a concrete object type.
    ///
    /// Scans registrations in load order; the first descriptor producing
    /// `type_id` wins.
    pub fn id_of_type(&self, type_id: TypeId) -> Option<(&str, &str)> {
        self.iter()
            .find(|(_, _, object_type)| object_type.object_type_id() == type_id)
            .map(|(addon, id, _)| (addon, id))
    }

    /// `(addon ID, type ID)` of a live object
    pub fn id_of_object(&self, object: &dyn SceneObject) -> Option<(&str, &str)> {
        self.id_of_type(object_type_id(object))
    }

    /// Every registration as `(addon ID, type ID, descriptor)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &dyn ObjectType)> + '_ {
        self.objects.iter().flat_map(|(addon, bound)| {
            bound
                .iter()
                .map(move |(id, object_type)| (addon.as_str(), id.as_str(), object_type.as_ref()))
        })
    }
}
