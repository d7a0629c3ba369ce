// SPDX-License-Identifier: MIT OR Apache-2.0
//! Group object with its own coordinate space.

use super::common::{BoxTransform, BoxTransformData};
use super::BuiltinObject;
use crate::container::{ObjectContainer, ObjectList};
use crate::context::RenderContext;
use crate::object::{
    Capabilities, PositionData, PositionDataMut, SceneObject, SizeData, SizeDataMut, ViewportEditorInfo,
};
use crate::registry::Registry;
use crate::serialize::{objects_from_serializable, objects_to_serializable, SerializableSceneObjectInfo, SerializeError};
use motion_animation::{Animatable, ObjectProperty, Vec2};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Children placed in a rectangle of the parent.
///
/// Children see the container's evaluated size as their parent size and its
/// top-left corner as `(0, 0)`.
#[derive(Debug, Clone, Default)]
pub struct Container {
    /// Placement and size
    pub transform: BoxTransform,
    children: ObjectList,
}

impl ObjectContainer for Container {
    fn objects(&self) -> &ObjectList {
        &self.children
    }

    fn objects_mut(&mut self) -> &mut ObjectList {
        &mut self.children
    }
}

impl SceneObject for Container {
    fn properties(&mut self) -> Vec<Box<dyn ObjectProperty + '_>> {
        self.transform.properties()
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        let parent_to_this = self.transform.parent_to_this(ctx.time, ctx.container_size);
        let size = self.transform.size_at(ctx.time);

        let local = ctx.canvas.transform().multiply(&parent_to_this);
        ctx.canvas.save();
        ctx.canvas.set_transform(local);

        let mut child = ctx.child(size);
        for info in self.children.collect(child.time) {
            info.object.render(&mut child);
        }

        ctx.canvas.restore();
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::POSITIONAL
            | Capabilities::SIZABLE
            | Capabilities::ROTATABLE
            | Capabilities::CONTAINER
            | Capabilities::VIEWPORT_EDITABLE
    }

    fn position(&self) -> Option<PositionData<'_>> {
        Some(self.transform.position())
    }

    fn position_mut(&mut self) -> Option<PositionDataMut<'_>> {
        Some(self.transform.position_mut())
    }

    fn size(&self) -> Option<SizeData<'_>> {
        Some(self.transform.size())
    }

    fn size_mut(&mut self) -> Option<SizeDataMut<'_>> {
        Some(self.transform.size_mut())
    }

    fn rotation(&self) -> Option<&Animatable<f64>> {
        Some(&self.transform.rotation)
    }

    fn rotation_mut(&mut self) -> Option<&mut Animatable<f64>> {
        Some(&mut self.transform.rotation)
    }

    fn as_container(&self) -> Option<&dyn ObjectContainer> {
        Some(self)
    }

    fn as_container_mut(&mut self) -> Option<&mut dyn ObjectContainer> {
        Some(self)
    }

    fn viewport_editor_info(&self, time: f64, parent_size: Vec2) -> Option<ViewportEditorInfo> {
        Some(self.transform.viewport_editor_info(time, parent_size))
    }

    fn clone_object(&self) -> Box<dyn SceneObject> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Serialized [`Container`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerData {
    #[serde(flatten)]
    transform: BoxTransformData,
    children: Vec<SerializableSceneObjectInfo>,
}

impl BuiltinObject for Container {
    type Data = ContainerData;

    fn to_data(&self, registry: &Registry) -> Result<Self::Data, SerializeError> {
        Ok(ContainerData {
            transform: self.transform.to_data(),
            children: objects_to_serializable(&self.children, registry)?,
        })
    }

    fn load_data(&mut self, data: Self::Data, registry: &Registry) -> Result<(), SerializeError> {
        self.transform.load_data(data.transform);
        self.children = objects_from_serializable(data.children, registry)?;
        Ok(())
    }
}
