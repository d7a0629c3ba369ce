// SPDX-License-Identifier: MIT OR Apache-2.0
//! Multi-scene project documents.

use crate::registry::Registry;
use crate::scene::{Scene, SceneMetadata, SerializableScene};
use crate::serialize::SerializeError;
use indexmap::IndexMap;
use motion_animation::Uid;
use serde::{Deserialize, Serialize};

/// Gap after which a change starts a new working session, in milliseconds
pub const SESSION_GAP_MS: f64 = 60_000.0;

/// Working time credited for the first change of a session, in milliseconds
pub const SESSION_START_CREDIT_MS: f64 = 5_000.0;

/// User-facing project metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    /// Project name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// License
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Accumulated working time in milliseconds. Easily spoofed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_time: Option<f64>,
}

/// Serialized [`Project`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableProject {
    /// Metadata
    pub metadata: ProjectMetadata,
    /// Scenes in creation order
    pub scenes: Vec<SerializableScene>,
}

/// A set of scenes keyed by UID
#[derive(Debug, Clone, Default)]
pub struct Project {
    /// Metadata
    pub metadata: ProjectMetadata,
    scenes: IndexMap<Uid, Scene>,
    last_change: Option<f64>,
}

impl Project {
    /// Empty project
    pub fn new(metadata: ProjectMetadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    /// Create a scene with a fresh UID
    pub fn new_scene(&mut self, metadata: SceneMetadata) -> &mut Scene {
        let scene = Scene::new(metadata);
        let uid = scene.uid().clone();
        tracing::info!(%uid, name = scene.metadata.name.as_deref().unwrap_or(""), "Created scene");
        self.scenes.entry(uid).or_insert(scene)
    }

    /// Remove a scene; `None` when it does not exist
    pub fn delete_scene(&mut self, uid: &Uid) -> Option<Scene> {
        let removed = self.scenes.shift_remove(uid);
        if removed.is_some() {
            tracing::info!(%uid, "Deleted scene");
        }
        removed
    }

    /// Scene by UID
    pub fn scene(&self, uid: &Uid) -> Option<&Scene> {
        self.scenes.get(uid)
    }

    /// Mutable scene by UID
    pub fn scene_mut(&mut self, uid: &Uid) -> Option<&mut Scene> {
        self.scenes.get_mut(uid)
    }

    /// Scenes in creation order
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> + '_ {
        self.scenes.values()
    }

    /// Count a user change at wall-clock `now_ms` towards the working time.
    ///
    /// The first change, or one more than a minute after the previous, adds
    /// five seconds; otherwise the time since the previous change is added.
    pub fn record_change(&mut self, now_ms: f64) {
        let credit = match self.last_change {
            Some(last) if now_ms - last <= SESSION_GAP_MS => (now_ms - last).max(0.0),
            _ => SESSION_START_CREDIT_MS,
        };
        self.last_change = Some(now_ms);
        *self.metadata.working_time.get_or_insert(0.0) += credit;
    }

    /// Snapshot every scene
    pub fn to_serializable(&self, registry: &Registry) -> Result<SerializableProject, SerializeError> {
        Ok(SerializableProject {
            metadata: self.metadata.clone(),
            scenes: self
                .scenes
                .values()
                .map(|scene| scene.to_serializable(registry))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Rebuild from a snapshot
    pub fn from_serializable(data: SerializableProject, registry: &Registry) -> Result<Self, SerializeError> {
        let mut project = Self::new(data.metadata);
        for scene in data.scenes {
            let scene = Scene::from_serializable(scene, registry)?;
            project.scenes.insert(scene.uid().clone(), scene);
        }
        tracing::info!(scenes = project.scenes.len(), "Loaded project");
        Ok(project)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ObjectContainer;
    use crate::object::SceneObjectInfo;
    use crate::objects::Data2D;

    #[test]
    fn test_scene_lifecycle() {
        let mut project = Project::new(ProjectMetadata::default());
        let first = project.new_scene(SceneMetadata::default()).uid().clone();
        let second = project
            .new_scene(SceneMetadata {
                name: Some("Outro".to_owned()),
                ..SceneMetadata::default()
            })
            .uid()
            .clone();
        assert_ne!(first, second);
        assert_eq!(project.scenes().count(), 2);
        assert_eq!(
            project.scene(&second).and_then(|s| s.metadata.name.as_deref()),
            Some("Outro")
        );

        assert!(project.delete_scene(&first).is_some());
        assert!(project.delete_scene(&first).is_none());
        assert!(project.scene(&first).is_none());
        assert_eq!(project.scenes().count(), 1);
    }

    #[test]
    fn test_working_time_rule() {
        let mut project = Project::new(ProjectMetadata::default());
        assert_eq!(project.metadata.working_time, None);

        project.record_change(1_000.0);
        assert_eq!(project.metadata.working_time, Some(5_000.0));

        project.record_change(31_000.0);
        assert_eq!(project.metadata.working_time, Some(35_000.0));

        project.record_change(200_000.0);
        assert_eq!(project.metadata.working_time, Some(40_000.0));
    }

    #[test]
    fn test_json_round_trip_keeps_scene_order() {
        let registry = Registry::with_builtin();
        let mut project = Project::new(ProjectMetadata {
            name: Some("Demo".to_owned()),
            author: Some("someone".to_owned()),
            ..ProjectMetadata::default()
        });
        let a = project.new_scene(SceneMetadata::default()).uid().clone();
        let b = {
            let scene = project.new_scene(SceneMetadata::default());
            scene
                .objects_mut()
                .add(SceneObjectInfo::new("data", Box::new(Data2D::default())))
                .unwrap();
            scene.uid().clone()
        };

        let json = project.to_json(&registry).unwrap();
        assert!(json.contains("\"author\": \"someone\""));
        let loaded = Project::from_json(&json, &registry).unwrap();

        let order: Vec<&Uid> = loaded.scenes().map(Scene::uid).collect();
        assert_eq!(order, vec![&a, &b]);
        assert_eq!(loaded.scene(&b).map(|s| s.objects().len()), Some(1));
        assert_eq!(loaded.metadata, project.metadata);
    }
}
