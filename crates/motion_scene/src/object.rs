// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene object contract.
//!
//! A [`SceneObject`] is anything drawable that lives in a container. What an
//! object supports beyond drawing is declared through [`Capabilities`] and
//! the matching typed accessors; editors check the flags and then borrow the
//! capability data.

use crate::canvas::Transform2D;
use crate::container::ObjectContainer;
use crate::context::RenderContext;
use crate::registry::{ObjectType, Registry};
use bitflags::bitflags;
use motion_animation::{Animatable, ObjectProperty, Uid, Vec2};
use std::any::{Any, TypeId};
use std::fmt;

bitflags! {
    /// Optional features of a scene object
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Has animated `x`/`y`
        const POSITIONAL = 1 << 0;
        /// Has animated `width`/`height`
        const SIZABLE = 1 << 1;
        /// Has animated `rotation`
        const ROTATABLE = 1 << 2;
        /// Holds child objects
        const CONTAINER = 1 << 3;
        /// Exposes handles for in-viewport editing
        const VIEWPORT_EDITABLE = 1 << 4;
    }
}

/// Position timelines of a positional object
pub struct PositionData<'a> {
    /// Horizontal offset
    pub x: &'a Animatable<f64>,
    /// Vertical offset
    pub y: &'a Animatable<f64>,
}

impl PositionData<'_> {
    /// Position at `time`
    pub fn at(&self, time: f64) -> Vec2 {
        Vec2::new(self.x.get(time), self.y.get(time))
    }
}

/// Mutable position timelines
pub struct PositionDataMut<'a> {
    /// Horizontal offset
    pub x: &'a mut Animatable<f64>,
    /// Vertical offset
    pub y: &'a mut Animatable<f64>,
}

/// Size timelines of a sizable object
pub struct SizeData<'a> {
    /// Width
    pub width: &'a Animatable<f64>,
    /// Height
    pub height: &'a Animatable<f64>,
}

impl SizeData<'_> {
    /// Size at `time`
    pub fn at(&self, time: f64) -> Vec2 {
        Vec2::new(self.width.get(time), self.height.get(time))
    }
}

/// Mutable size timelines
pub struct SizeDataMut<'a> {
    /// Width
    pub width: &'a mut Animatable<f64>,
    /// Height
    pub height: &'a mut Animatable<f64>,
}

/// Cursor hint of a viewport handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleHint {
    /// Plain drag
    Regular,
    /// Top-left corner resize
    ResizeTopLeft,
    /// Top-right corner resize
    ResizeTopRight,
    /// Bottom-left corner resize
    ResizeBottomLeft,
    /// Bottom-right corner resize
    ResizeBottomRight,
    /// Top edge resize
    ResizeTop,
    /// Bottom edge resize
    ResizeBottom,
    /// Left edge resize
    ResizeLeft,
    /// Right edge resize
    ResizeRight,
    /// Rotation
    Rotate,
}

/// Draggable handle, positioned relative to the object's top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportEditHandle {
    /// Handle identifier, unique within one object
    pub uid: &'static str,
    /// Cursor hint
    pub hint: HandleHint,
    /// Offset from the object's local origin
    pub offset: Vec2,
}

/// Geometry a viewport needs to draw and hit-test an object
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportEditorInfo {
    /// Parent container space to object space
    pub parent_to_this: Transform2D,
    /// Clickable area in object space, from `(0, 0)`
    pub clickable_size: Vec2,
    /// Drag handles
    pub handles: Vec<ViewportEditHandle>,
}

/// A drawable object in a scene
pub trait SceneObject: Any + fmt::Debug {
    /// Editable properties, in panel order
    fn properties(&mut self) -> Vec<Box<dyn ObjectProperty + '_>>;

    /// Draw at `ctx.time`.
    ///
    /// The canvas transform must be the same before and after the call.
    fn render(&self, ctx: &mut RenderContext<'_>);

    /// Supported optional features
    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    /// Position timelines, when [`Capabilities::POSITIONAL`]
    fn position(&self) -> Option<PositionData<'_>> {
        None
    }

    /// Mutable position timelines
    fn position_mut(&mut self) -> Option<PositionDataMut<'_>> {
        None
    }

    /// Size timelines, when [`Capabilities::SIZABLE`]
    fn size(&self) -> Option<SizeData<'_>> {
        None
    }

    /// Mutable size timelines
    fn size_mut(&mut self) -> Option<SizeDataMut<'_>> {
        None
    }

    /// Rotation timeline in degrees, when [`Capabilities::ROTATABLE`]
    fn rotation(&self) -> Option<&Animatable<f64>> {
        None
    }

    /// Mutable rotation timeline
    fn rotation_mut(&mut self) -> Option<&mut Animatable<f64>> {
        None
    }

    /// Children, when [`Capabilities::CONTAINER`]
    fn as_container(&self) -> Option<&dyn ObjectContainer> {
        None
    }

    /// Mutable children
    fn as_container_mut(&mut self) -> Option<&mut dyn ObjectContainer> {
        None
    }

    /// Viewport geometry, when [`Capabilities::VIEWPORT_EDITABLE`]
    fn viewport_editor_info(&self, _time: f64, _parent_size: Vec2) -> Option<ViewportEditorInfo> {
        None
    }

    /// Deep copy
    fn clone_object(&self) -> Box<dyn SceneObject>;

    /// Upcast for type identification
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn SceneObject> {
    fn clone(&self) -> Self {
        self.clone_object()
    }
}

/// Concrete type of a scene object
pub fn object_type_id(object: &dyn SceneObject) -> TypeId {
    Any::type_id(object.as_any())
}

/// Display colors handed out to new objects
pub const OBJECT_COLORS: [&str; 7] = [
    "#efefef5f",
    "#ff9f9f5f",
    "#9fff9f5f",
    "#9f9fff5f",
    "#ffff9f5f",
    "#9fffff5f",
    "#ff9fff5f",
];

/// Pick a display color from a name, stable across runs.
///
/// Sums the leading UTF-16 unit of every character.
pub fn derive_color_from_string(name: &str) -> &'static str {
    let sum = name.chars().fold(0usize, |acc, c| {
        let mut units = [0u16; 2];
        acc.wrapping_add(usize::from(c.encode_utf16(&mut units)[0]))
    });
    OBJECT_COLORS[sum % OBJECT_COLORS.len()]
}

/// Default visibility window of new objects, in milliseconds
pub const DEFAULT_TIME_END: f64 = 1000.0;

/// A scene object plus its placement on the timeline
#[derive(Debug, Clone)]
pub struct SceneObjectInfo {
    /// Unique ID
    pub uid: Uid,
    /// Display name
    pub name: String,
    /// Outliner/timeline color (CSS hex string)
    pub color: String,
    /// First visible millisecond
    pub time_start: f64,
    /// First millisecond no longer visible
    pub time_end: f64,
    /// The object itself
    pub object: Box<dyn SceneObject>,
}

impl SceneObjectInfo {
    /// Wrap an object with a fresh ID, visible over `[0, 1000)`
    pub fn new(name: impl Into<String>, object: Box<dyn SceneObject>) -> Self {
        let name = name.into();
        Self {
            uid: Uid::new(),
            color: derive_color_from_string(&name).to_owned(),
            name,
            time_start: 0.0,
            time_end: DEFAULT_TIME_END,
            object,
        }
    }

    /// Instantiate a registered type over `[time_start, time_end)`.
    ///
    /// Falls back to the registry ID when the type has no display name.
    pub fn create_new(registry: &Registry, object_type: &dyn ObjectType, time_start: f64, time_end: f64) -> Self {
        let name = match object_type.name() {
            Some(name) => name.to_owned(),
            None => registry
                .id_of_type(object_type.object_type_id())
                .map(|(_, id)| id.to_owned())
                .unwrap_or_default(),
        };
        let mut info = Self::new(name, object_type.create_new());
        info.time_start = time_start;
        info.time_end = time_end;
        info
    }

    /// Set the visibility window
    pub fn with_window(mut self, time_start: f64, time_end: f64) -> Self {
        self.time_start = time_start;
        self.time_end = time_end;
        self
    }

    /// Whether the object is visible at `time` (half-open window)
    pub fn is_visible_at(&self, time: f64) -> bool {
        time >= self.time_start && time < self.time_end
    }

    /// Deep copy with fresh IDs for this record and every nested child
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.reissue_uids();
        copy
    }

    fn reissue_uids(&mut self) {
        self.uid = Uid::new();
        if let Some(children) = self.object.as_container_mut() {
            for child in children.objects_mut().iter_mut() {
                child.reissue_uids();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Dot;

    impl SceneObject for Dot {
        fn properties(&mut self) -> Vec<Box<dyn ObjectProperty + '_>> {
            Vec::new()
        }

        fn render(&self, _ctx: &mut RenderContext<'_>) {}

        fn clone_object(&self) -> Box<dyn SceneObject> {
            Box::new(self.clone())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_color_is_deterministic() {
        assert_eq!(derive_color_from_string("Box"), derive_color_from_string("Box"));
        // 'B' + 'o' + 'x' = 66 + 111 + 120 = 297, 297 % 7 = 3
        assert_eq!(derive_color_from_string("Box"), "#9f9fff5f");
        assert_eq!(derive_color_from_string(""), OBJECT_COLORS[0]);
    }

    #[test]
    fn test_half_open_window() {
        let info = SceneObjectInfo::new("dot", Box::new(Dot)).with_window(100.0, 200.0);
        assert!(!info.is_visible_at(99.999));
        assert!(info.is_visible_at(100.0));
        assert!(info.is_visible_at(199.999));
        assert!(!info.is_visible_at(200.0));
    }

    #[test]
    fn test_type_id_sees_through_box() {
        let object: Box<dyn SceneObject> = Box::new(Dot);
        assert_eq!(object_type_id(object.as_ref()), TypeId::of::<Dot>());
        assert!(object.capabilities().is_empty());
    }

    #[test]
    fn test_duplicate_reissues_uid() {
        let info = SceneObjectInfo::new("dot", Box::new(Dot));
        let copy = info.duplicate();
        assert_ne!(copy.uid, info.uid);
        assert_eq!(copy.name, info.name);
    }
}
