// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scenes: a root object list plus metadata.

use crate::container::{ObjectContainer, ObjectList};
use crate::context::RenderContext;
use crate::registry::Registry;
use crate::serialize::{objects_from_serializable, objects_to_serializable, SerializableSceneObjectInfo, SerializeError};
use motion_animation::{Uid, Vec2};
use serde::{Deserialize, Serialize};

/// Scene metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneMetadata {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Size shown in the editor viewport; renders use the context size
    pub size: Vec2,
}

impl Default for SceneMetadata {
    fn default() -> Self {
        Self {
            name: None,
            size: Vec2::new(1920.0, 1080.0),
        }
    }
}

/// Serialized [`Scene`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableScene {
    /// Scene UID
    pub uid: Uid,
    /// Metadata
    pub metadata: SceneMetadata,
    /// Root records in paint order
    pub root: Vec<SerializableSceneObjectInfo>,
}

/// A composition of scene objects
#[derive(Debug, Clone)]
pub struct Scene {
    uid: Uid,
    /// Metadata
    pub metadata: SceneMetadata,
    root: ObjectList,
}

impl Scene {
    /// Empty scene with a fresh UID
    pub fn new(metadata: SceneMetadata) -> Self {
        Self::with_uid(Uid::new(), metadata)
    }

    /// Empty scene with a known UID
    pub fn with_uid(uid: Uid, metadata: SceneMetadata) -> Self {
        Self {
            uid,
            metadata,
            root: ObjectList::new(),
        }
    }

    /// Scene UID
    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    /// Draw the objects visible at `ctx.time`, bottom first.
    ///
    /// The scene is drawn at `(0, 0)` with `ctx.container_size` as its size.
    pub fn render_frame(&self, ctx: &mut RenderContext<'_>) {
        for info in self.root.collect(ctx.time) {
            info.object.render(ctx);
        }
    }

    /// Latest `time_end` of any root object, or zero for an empty scene
    pub fn duration(&self) -> f64 {
        self.root.latest_end().unwrap_or(0.0).max(0.0)
    }

    /// Snapshot the scene
    pub fn to_serializable(&self, registry: &Registry) -> Result<SerializableScene, SerializeError> {
        Ok(SerializableScene {
            uid: self.uid.clone(),
            metadata: self.metadata.clone(),
            root: objects_to_serializable(&self.root, registry)?,
        })
    }

    /// Rebuild a scene, skipping objects of unregistered types
    pub fn from_serializable(data: SerializableScene, registry: &Registry) -> Result<Self, SerializeError> {
        let root = objects_from_serializable(data.root, registry)?;
        tracing::debug!(uid = %data.uid, objects = root.len(), "Loaded scene");
        Ok(Self {
            uid: data.uid,
            metadata: data.metadata,
            root,
        })
    }

    /// Snapshot as pretty JSON
    pub fn to_json(&self, registry: &Registry) -> Result<String, SerializeError> {
        Ok(serde_json::to_string_pretty(&self.to_serializable(registry)?)?)
    }

    /// Load from JSON
    pub fn from_json(json: &str, registry: &Registry) -> Result<Self, SerializeError> {
        Self::from_serializable(serde_json::from_str(json)?, registry)
    }
}

impl ObjectContainer for Scene {
    fn objects(&self) -> &ObjectList {
        &self.root
    }

    fn objects_mut(&mut self) -> &mut ObjectList {
        &mut self.root
    }
}
