// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in scene object types.
//!
//! - [`Box2D`]: filled and stroked rounded rectangle
//! - [`Text2D`]: single-line or vertical text
//! - [`Container`]: group with its own coordinate space
//! - [`Data1D`] / [`Data2D`]: invisible keyframe carriers for baked data

mod box2d;
mod common;
mod container;
mod data;
mod text2d;

pub use box2d::{Box2D, Box2DData};
pub use common::{BoxTransform, BoxTransformData};
pub use container::{Container, ContainerData};
pub use data::{Data1D, Data2D, DataPayload};
pub use text2d::{Text2D, Text2DData};

use crate::object::SceneObject;
use crate::registry::{Addon, AddonHost, ObjectType, Registry, RegistryError};
use crate::serialize::SerializeError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::any::TypeId;
use std::marker::PhantomData;

/// A scene object with a serde payload type
pub trait BuiltinObject: SceneObject + Default {
    /// Serialized payload
    type Data: Serialize + DeserializeOwned;

    /// Snapshot into the payload type
    fn to_data(&self, registry: &Registry) -> Result<Self::Data, SerializeError>;

    /// Overwrite fields from a payload
    fn load_data(&mut self, data: Self::Data, registry: &Registry) -> Result<(), SerializeError>;
}

/// [`ObjectType`] descriptor for any [`BuiltinObject`]
pub struct BuiltinType<T> {
    name: &'static str,
    category: &'static str,
    description: Option<&'static str>,
    marker: PhantomData<fn() -> T>,
}

impl<T> BuiltinType<T> {
    /// Descriptor with display name and picker category
    pub const fn new(name: &'static str, category: &'static str) -> Self {
        Self {
            name,
            category,
            description: None,
            marker: PhantomData,
        }
    }

    /// Add a picker description
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

impl<T: BuiltinObject> ObjectType for BuiltinType<T> {
    fn name(&self) -> Option<&str> {
        Some(self.name)
    }

    fn description(&self) -> Option<&str> {
        self.description
    }

    fn category(&self) -> Option<&str> {
        Some(self.category)
    }

    fn object_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn create_new(&self) -> Box<dyn SceneObject> {
        Box::new(T::default())
    }

    fn to_serializable(&self, object: &dyn SceneObject, registry: &Registry) -> Result<Value, SerializeError> {
        let object = object
            .as_any()
            .downcast_ref::<T>()
            .ok_or(SerializeError::WrongType {
                expected: std::any::type_name::<T>(),
            })?;
        Ok(serde_json::to_value(object.to_data(registry)?)?)
    }

    fn from_serializable(&self, data: Value, registry: &Registry) -> Result<Box<dyn SceneObject>, SerializeError> {
        let data: T::Data = serde_json::from_value(data)?;
        let mut object = T::default();
        object.load_data(data, registry)?;
        Ok(Box::new(object))
    }
}

/// The built-in addon registering every type in this module
pub struct SystemAddon;

impl Addon for SystemAddon {
    fn name(&self) -> Option<&str> {
        Some("Motion (built-in)")
    }

    fn init(&mut self, host: &mut AddonHost<'_>) -> Result<(), RegistryError> {
        tracing::info!("Registering scene object types");
        host.register_object("box2d", Box::new(BuiltinType::<Box2D>::new("Box", "Graphics")))?;
        host.register_object("text2d", Box::new(BuiltinType::<Text2D>::new("Text", "Graphics")))?;
        host.register_object(
            "container",
            Box::new(BuiltinType::<Container>::new("Container", "Grouping")),
        )?;
        host.register_object(
            "data1d",
            Box::new(BuiltinType::<Data1D>::new("Data (1D)", "Data").with_description(
                "One-dimensional data. For baking data to keyframes and sharing it to other objects.",
            )),
        )?;
        host.register_object(
            "data2d",
            Box::new(BuiltinType::<Data2D>::new("Data (2D)", "Data").with_description(
                "Two-dimensional data. For baking data to keyframes and sharing it to other objects.",
            )),
        )?;
        Ok(())
    }
}
