// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene composition for the motion editor.
//!
//! This crate provides the space-domain half of the editor:
//! - Drawable scene objects with declared capabilities
//! - Ordered, time-windowed object containers
//! - Built-in shapes, text, groups and data carriers
//! - Scenes, projects and their JSON snapshots
//! - An addon registry mapping `(addonId, typeId)` to object types
//!
//! ## Architecture
//!
//! A [`Scene`] owns a root [`ObjectList`]. Rendering a frame collects the
//! records visible at the frame time and asks each object to draw itself on a
//! [`Canvas`]; container objects push their own coordinate space and recurse.
//! Nothing here is global: the [`Registry`] is passed to whatever needs to
//! resolve object types.

pub mod anchor;
pub mod canvas;
pub mod container;
pub mod context;
pub mod object;
pub mod objects;
pub mod project;
pub mod registry;
pub mod scene;
pub mod serialize;

pub use anchor::{Anchor, InvalidAnchor};
pub use canvas::{Canvas, DrawCommand, PathOp, RecordingCanvas, Transform2D};
pub use container::{ContainerError, ObjectContainer, ObjectList};
pub use context::RenderContext;
pub use object::{
    derive_color_from_string, object_type_id, Capabilities, HandleHint, PositionData, PositionDataMut, SceneObject,
    SceneObjectInfo, SizeData, SizeDataMut, ViewportEditHandle, ViewportEditorInfo,
};
pub use project::{Project, ProjectMetadata, SerializableProject};
pub use registry::{Addon, AddonHost, ObjectType, Registry, RegistryError, SYSTEM_ADDON_ID};
pub use scene::{Scene, SceneMetadata, SerializableScene};
pub use serialize::{ObjectTypeRef, SerializableSceneObjectInfo, SerializeError};
