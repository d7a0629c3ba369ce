// SPDX-License-Identifier: MIT OR Apache-2.0
//! Placement shared by box-like objects.

use crate::anchor::Anchor;
use crate::canvas::Transform2D;
use crate::object::{
    HandleHint, PositionData, PositionDataMut, SizeData, SizeDataMut, ViewportEditHandle, ViewportEditorInfo,
};
use motion_animation::{
    Animatable, AnimatableProperty, EnumProperty, ObjectProperty, SerializableAnimatable, Vec2,
};
use serde::{Deserialize, Serialize};

/// Anchor, origin, offset, size and rotation of a rectangle in its parent
#[derive(Debug, Clone)]
pub struct BoxTransform {
    /// Point on the parent the object hangs from
    pub anchor: Anchor,
    /// Point on the object placed at the anchor
    pub origin: Anchor,
    /// Horizontal offset from the anchor
    pub x: Animatable<f64>,
    /// Vertical offset from the anchor
    pub y: Animatable<f64>,
    /// Width
    pub width: Animatable<f64>,
    /// Height
    pub height: Animatable<f64>,
    /// Clockwise rotation in degrees around the origin
    pub rotation: Animatable<f64>,
}

impl Default for BoxTransform {
    fn default() -> Self {
        Self {
            anchor: Anchor::TOP_LEFT,
            origin: Anchor::TOP_LEFT,
            x: Animatable::scalar("x", 0.0),
            y: Animatable::scalar("y", 0.0),
            width: Animatable::scalar("width", 100.0),
            height: Animatable::scalar("height", 100.0),
            rotation: Animatable::scalar("rotation", 0.0),
        }
    }
}

impl BoxTransform {
    /// Size at `time`
    pub fn size_at(&self, time: f64) -> Vec2 {
        Vec2::new(self.width.get(time), self.height.get(time))
    }

    /// Parent space to object space at `time`:
    /// `translate(anchor in parent) · translate(x, y) · rotate · translate(-origin in self)`
    pub fn parent_to_this(&self, time: f64, parent_size: Vec2) -> Transform2D {
        let size = self.size_at(time);
        let in_parent = self.anchor.resolve(parent_size);
        let in_self = self.origin.resolve(size);

        Transform2D::IDENTITY
            .translate(in_parent.x, in_parent.y)
            .translate(self.x.get(time), self.y.get(time))
            .rotate_deg(self.rotation.get(time))
            .translate(-in_self.x, -in_self.y)
    }

    /// Viewport geometry: the full rectangle plus two corner resize handles
    pub fn viewport_editor_info(&self, time: f64, parent_size: Vec2) -> ViewportEditorInfo {
        let size = self.size_at(time);
        ViewportEditorInfo {
            parent_to_this: self.parent_to_this(time, parent_size),
            clickable_size: size,
            handles: vec![
                ViewportEditHandle {
                    uid: "resize-xywh",
                    hint: HandleHint::ResizeTopLeft,
                    offset: Vec2::ZERO,
                },
                ViewportEditHandle {
                    uid: "resize-wh",
                    hint: HandleHint::ResizeBottomRight,
                    offset: size,
                },
            ],
        }
    }

    /// Anchor through rotation, in panel order
    pub fn properties(&mut self) -> Vec<Box<dyn ObjectProperty + '_>> {
        vec![
            Box::new(EnumProperty::new("anchor", &mut self.anchor)),
            Box::new(EnumProperty::new("origin", &mut self.origin)),
            Box::new(AnimatableProperty::new(&mut self.x)),
            Box::new(AnimatableProperty::new(&mut self.y)),
            Box::new(AnimatableProperty::new(&mut self.width)),
            Box::new(AnimatableProperty::new(&mut self.height)),
            Box::new(AnimatableProperty::new(&mut self.rotation)),
        ]
    }

    pub(crate) fn position(&self) -> PositionData<'_> {
        PositionData { x: &self.x, y: &self.y }
    }

    pub(crate) fn position_mut(&mut self) -> PositionDataMut<'_> {
        PositionDataMut {
            x: &mut self.x,
            y: &mut self.y,
        }
    }

    pub(crate) fn size(&self) -> SizeData<'_> {
        SizeData {
            width: &self.width,
            height: &self.height,
        }
    }

    pub(crate) fn size_mut(&mut self) -> SizeDataMut<'_> {
        SizeDataMut {
            width: &mut self.width,
            height: &mut self.height,
        }
    }

    /// Payload form
    pub fn to_data(&self) -> BoxTransformData {
        BoxTransformData {
            anchor: self.anchor,
            origin: self.origin,
            x: self.x.serializable(),
            y: self.y.serializable(),
            width: self.width.serializable(),
            height: self.height.serializable(),
            rotation: self.rotation.serializable(),
        }
    }

    /// Overwrite from payload form
    pub fn load_data(&mut self, data: BoxTransformData) {
        self.anchor = data.anchor;
        self.origin = data.origin;
        self.x.load_serializable(data.x);
        self.y.load_serializable(data.y);
        self.width.load_serializable(data.width);
        self.height.load_serializable(data.height);
        self.rotation.load_serializable(data.rotation);
    }
}

/// Serialized [`BoxTransform`], flattened into each box-like payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxTransformData {
    /// Anchor bits
    pub anchor: Anchor,
    /// Origin bits
    pub origin: Anchor,
    /// X timeline
    pub x: SerializableAnimatable<f64>,
    /// Y timeline
    pub y: SerializableAnimatable<f64>,
    /// Width timeline
    pub width: SerializableAnimatable<f64>,
    /// Height timeline
    pub height: SerializableAnimatable<f64>,
    /// Rotation timeline
    pub rotation: SerializableAnimatable<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_default_placement_is_offset_only() {
        let mut t = BoxTransform::default();
        t.x.default_value = 30.0;
        t.y.default_value = 40.0;
        let m = t.parent_to_this(0.0, Vec2::new(1920.0, 1080.0));
        assert_eq!(m.transform_point(Vec2::ZERO), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_centered_anchor_and_origin() {
        let mut t = BoxTransform::default();
        t.anchor = Anchor::MIDDLE_CENTER;
        t.origin = Anchor::MIDDLE_CENTER;
        let m = t.parent_to_this(0.0, Vec2::new(1000.0, 500.0));
        // The object's center lands on the parent's center.
        assert_eq!(m.transform_point(Vec2::new(50.0, 50.0)), Vec2::new(500.0, 250.0));
    }

    #[test]
    fn test_rotation_pivots_on_origin() {
        let mut t = BoxTransform::default();
        t.origin = Anchor::MIDDLE_CENTER;
        t.rotation.default_value = 90.0;
        let m = t.parent_to_this(0.0, Vec2::new(100.0, 100.0));
        assert!(approx(m.transform_point(Vec2::new(50.0, 50.0)), Vec2::ZERO));
        assert!(approx(m.transform_point(Vec2::new(100.0, 50.0)), Vec2::new(0.0, 50.0)));
    }

    #[test]
    fn test_animated_size_in_editor_info() {
        let mut t = BoxTransform::default();
        t.width.insert(0.0, 100.0, None);
        t.width.insert(100.0, 200.0, None);
        let info = t.viewport_editor_info(50.0, Vec2::new(500.0, 500.0));
        assert_eq!(info.clickable_size, Vec2::new(150.0, 100.0));
        assert_eq!(info.handles[1].offset, Vec2::new(150.0, 100.0));
    }

    #[test]
    fn test_property_order() {
        let mut t = BoxTransform::default();
        let keys: Vec<String> = t.properties().iter().map(|p| p.translation_key().to_owned()).collect();
        assert_eq!(keys, vec!["anchor", "origin", "x", "y", "width", "height", "rotation"]);
    }
}
