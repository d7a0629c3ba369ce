// SPDX-License-Identifier: MIT OR Apache-2.0
//! Snapshot forms of scene objects and scenes.
//!
//! Object payloads are opaque [`serde_json::Value`]s produced by the
//! registered [`ObjectType`](crate::registry::ObjectType); each record names
//! its type by `(addonId, typeId)`. Loading is lenient: records whose addon or
//! type is not registered are skipped with a warning and the rest keep their
//! order and UIDs.

use crate::container::ObjectList;
use crate::object::SceneObjectInfo;
use crate::registry::Registry;
use motion_animation::Uid;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serialization errors
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// Object's concrete type has no registry entry
    #[error("object type of {uid} is not registered")]
    UnregisteredType {
        /// Record being serialized
        uid: Uid,
    },
    /// Descriptor was handed an object of another type
    #[error("expected an object of type {expected}")]
    WrongType {
        /// Rust type the descriptor handles
        expected: &'static str,
    },
    /// Malformed payload
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Registry key of an object type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeRef {
    /// Owning addon
    pub addon_id: String,
    /// Type ID within the addon
    pub type_id: String,
}

/// Serialized [`SceneObjectInfo`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializableSceneObjectInfo {
    /// Record UID
    pub uid: Uid,
    /// Display name
    pub name: String,
    /// Display color
    pub color: String,
    /// First visible millisecond
    pub time_start: f64,
    /// First millisecond no longer visible
    pub time_end: f64,
    /// Registry key of the object type
    #[serde(rename = "type")]
    pub object_type: ObjectTypeRef,
    /// Type-specific payload
    pub object: Value,
}

impl SerializableSceneObjectInfo {
    /// Snapshot a record
    pub fn from_info(info: &SceneObjectInfo, registry: &Registry) -> Result<Self, SerializeError> {
        let (addon_id, type_id) =
            registry
                .id_of_object(info.object.as_ref())
                .ok_or_else(|| SerializeError::UnregisteredType {
                    uid: info.uid.clone(),
                })?;
        let object_type = registry
            .get(addon_id, type_id)
            .ok_or_else(|| SerializeError::UnregisteredType {
                uid: info.uid.clone(),
            })?;

        Ok(Self {
            uid: info.uid.clone(),
            name: info.name.clone(),
            color: info.color.clone(),
            time_start: info.time_start,
            time_end: info.time_end,
            object_type: ObjectTypeRef {
                addon_id: addon_id.to_owned(),
                type_id: type_id.to_owned(),
            },
            object: object_type.to_serializable(info.object.as_ref(), registry)?,
        })
    }

    /// Rebuild the record.
    ///
    /// Returns `Ok(None)` when the addon or type is not registered.
    pub fn into_info(self, registry: &Registry) -> Result<Option<SceneObjectInfo>, SerializeError> {
        let ObjectTypeRef { addon_id, type_id } = &self.object_type;
        if !registry.has_addon(addon_id) {
            tracing::warn!(addon = %addon_id, type_id = %type_id, uid = %self.uid, "Missing addon, skipping object");
            return Ok(None);
        }
        let Some(object_type) = registry.get(addon_id, type_id) else {
            tracing::warn!(addon = %addon_id, type_id = %type_id, uid = %self.uid, "Addon does not register type, skipping object");
            return Ok(None);
        };

        let object = object_type.from_serializable(self.object, registry)?;
        Ok(Some(SceneObjectInfo {
            uid: self.uid,
            name: self.name,
            color: self.color,
            time_start: self.time_start,
            time_end: self.time_end,
            object,
        }))
    }
}

/// Snapshot every record of a list, in order
pub fn objects_to_serializable(
    objects: &ObjectList,
    registry: &Registry,
) -> Result<Vec<SerializableSceneObjectInfo>, SerializeError> {
    objects
        .iter()
        .map(|info| SerializableSceneObjectInfo::from_info(info, registry))
        .collect()
}

/// Rebuild a list, dropping records of unknown types
pub fn objects_from_serializable(
    records: Vec<SerializableSceneObjectInfo>,
    registry: &Registry,
) -> Result<ObjectList, SerializeError> {
    let mut rebuilt = Vec::with_capacity(records.len());
    for record in records {
        if let Some(info) = record.into_info(registry)? {
            rebuilt.push(info);
        }
    }
    Ok(rebuilt.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Box2D, Data1D};
    use crate::registry::SYSTEM_ADDON_ID;
    use serde_json::json;

    #[derive(Debug, Clone)]
    struct Unregistered;

    impl crate::object::SceneObject for Unregistered {
        fn properties(&mut self) -> Vec<Box<dyn motion_animation::ObjectProperty + '_>> {
            Vec::new()
        }

        fn render(&self, _ctx: &mut crate::context::RenderContext<'_>) {}

        fn clone_object(&self) -> Box<dyn crate::object::SceneObject> {
            Box::new(self.clone())
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    #[test]
    fn test_record_field_names() {
        let registry = Registry::with_builtin();
        let info = SceneObjectInfo::new("Box", Box::new(Box2D::default())).with_window(10.0, 20.0);
        let json = serde_json::to_value(SerializableSceneObjectInfo::from_info(&info, &registry).unwrap()).unwrap();

        assert_eq!(json["uid"], info.uid.as_str());
        assert_eq!(json["timeStart"], 10.0);
        assert_eq!(json["timeEnd"], 20.0);
        assert_eq!(json["type"], json!({"addonId": SYSTEM_ADDON_ID, "typeId": "box2d"}));
        assert!(json["object"]["cornerRadius"].is_object());
    }

    #[test]
    fn test_unregistered_object_fails() {
        let registry = Registry::with_builtin();
        let info = SceneObjectInfo::new("odd", Box::new(Unregistered));
        let err = SerializableSceneObjectInfo::from_info(&info, &registry).unwrap_err();
        assert!(matches!(err, SerializeError::UnregisteredType { uid } if uid == info.uid));
    }

    #[test]
    fn test_unknown_types_are_skipped_in_order() {
        let registry = Registry::with_builtin();
        let mut list = ObjectList::new();
        for name in ["a", "b", "c"] {
            list.add(SceneObjectInfo::new(name, Box::new(Data1D::default()))).unwrap();
        }
        let mut records = objects_to_serializable(&list, &registry).unwrap();
        records[0].object_type.addon_id = "gone".to_owned();
        records[2].object_type.type_id = "sphere".to_owned();

        let loaded = objects_from_serializable(records, &registry).unwrap();
        assert_eq!(loaded.len(), 1);
        let b = loaded.at(0).unwrap();
        assert_eq!(b.name, "b");
        assert_eq!(b.uid, list.at(1).unwrap().uid);
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        let registry = Registry::with_builtin();
        let record: SerializableSceneObjectInfo = serde_json::from_value(json!({
            "uid": "x",
            "name": "x",
            "color": "#fff",
            "timeStart": 0.0,
            "timeEnd": 1.0,
            "type": {"addonId": SYSTEM_ADDON_ID, "typeId": "data1d"},
            "object": {"data": 5}
        }))
        .unwrap();
        assert!(matches!(record.into_info(&registry), Err(SerializeError::Json(_))));
    }
}
