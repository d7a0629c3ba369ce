// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rounded rectangle shape.

use super::common::{BoxTransform, BoxTransformData};
use super::BuiltinObject;
use crate::context::RenderContext;
use crate::object::{
    Capabilities, PositionData, PositionDataMut, SceneObject, SizeData, SizeDataMut, ViewportEditorInfo,
};
use crate::registry::Registry;
use crate::serialize::SerializeError;
use motion_animation::{Animatable, AnimatableProperty, Color, ObjectProperty, SerializableAnimatable, Vec2};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Filled and stroked rectangle with rounded corners
#[derive(Debug, Clone)]
pub struct Box2D {
    /// Placement and size
    pub transform: BoxTransform,
    /// Fill color; skipped when fully transparent
    pub fill: Animatable<Color>,
    /// Stroke color; skipped when fully transparent
    pub stroke: Animatable<Color>,
    /// Stroke width
    pub line_width: Animatable<f64>,
    /// Corner radius, negative values draw square corners
    pub corner_radius: Animatable<f64>,
}

impl Default for Box2D {
    fn default() -> Self {
        Self {
            transform: BoxTransform::default(),
            fill: Animatable::color("fill", Color::WHITE),
            stroke: Animatable::color("stroke", Color::TRANSPARENT),
            line_width: Animatable::scalar("lineWidth", 1.0),
            corner_radius: Animatable::scalar("cornerRadius", 0.0),
        }
    }
}

impl SceneObject for Box2D {
    fn properties(&mut self) -> Vec<Box<dyn ObjectProperty + '_>> {
        let mut props = self.transform.properties();
        props.push(Box::new(AnimatableProperty::new(&mut self.fill)));
        props.push(Box::new(AnimatableProperty::new(&mut self.stroke)));
        props.push(Box::new(AnimatableProperty::new(&mut self.line_width)));
        props.push(Box::new(AnimatableProperty::new(&mut self.corner_radius)));
        props
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        let time = ctx.time;
        let parent_to_this = self.transform.parent_to_this(time, ctx.container_size);
        let size = self.transform.size_at(time);
        let fill = self.fill.get(time);
        let stroke = self.stroke.get(time);
        let radius = self.corner_radius.get(time).max(0.0);

        let canvas = &mut *ctx.canvas;
        let local = canvas.transform().multiply(&parent_to_this);
        canvas.save();
        canvas.set_transform(local);
        canvas.begin_path();
        canvas.round_rect(0.0, 0.0, size.x, size.y, radius);

        if fill.is_visible() {
            canvas.set_fill_style(fill);
            canvas.fill();
        }

        if stroke.is_visible() {
            canvas.set_stroke_style(stroke);
            canvas.set_line_width(self.line_width.get(time));
            canvas.stroke();
        }

        canvas.restore();
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::POSITIONAL | Capabilities::SIZABLE | Capabilities::ROTATABLE | Capabilities::VIEWPORT_EDITABLE
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

/// Serialized [`Box2D`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Box2DData {
    #[serde(flatten)]
    transform: BoxTransformData,
    fill: SerializableAnimatable<Color>,
    stroke: SerializableAnimatable<Color>,
    line_width: SerializableAnimatable<f64>,
    corner_radius: SerializableAnimatable<f64>,
}

impl BuiltinObject for Box2D {
    type Data = Box2DData;

    fn to_data(&self, _registry: &Registry) -> Result<Self::Data, SerializeError> {
        Ok(Box2DData {
            transform: self.transform.to_data(),
            fill: self.fill.serializable(),
            stroke: self.stroke.serializable(),
            line_width: self.line_width.serializable(),
            corner_radius: self.corner_radius.serializable(),
        })
    }

    fn load_data(&mut self, data: Self::Data, _registry: &Registry) -> Result<(), SerializeError> {
        self.transform.load_data(data.transform);
        self.fill.load_serializable(data.fill);
        self.stroke.load_serializable(data.stroke);
        self.line_width.load_serializable(data.line_width);
        self.corner_radius.load_serializable(data.corner_radius);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, DrawCommand, PathOp, RecordingCanvas, Transform2D};
    use motion_animation::PropertyValue;

    fn draw(object: &Box2D, time: f64) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        let mut ctx = RenderContext::new(&mut canvas, time, Vec2::new(1920.0, 1080.0));
        object.render(&mut ctx);
        canvas
    }

    #[test]
    fn test_default_draws_white_fill_only() {
        let canvas = draw(&Box2D::default(), 0.0);
        assert_eq!(canvas.commands().len(), 1);
        match &canvas.commands()[0] {
            DrawCommand::FillPath { path, color, transform } => {
                assert_eq!(*color, Color::WHITE);
                assert_eq!(*transform, Transform2D::IDENTITY);
                assert_eq!(
                    path[0],
                    PathOp::RoundRect {
                        origin: Vec2::ZERO,
                        size: Vec2::new(100.0, 100.0),
                        radius: 0.0,
                    }
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(canvas.transform(), Transform2D::IDENTITY);
    }

    #[test]
    fn test_stroke_and_negative_radius() {
        let mut object = Box2D::default();
        object.fill.default_value = Color::TRANSPARENT;
        object.stroke.default_value = Color::BLACK;
        object.line_width.default_value = 3.0;
        object.corner_radius.default_value = -5.0;

        let canvas = draw(&object, 0.0);
        assert_eq!(canvas.commands().len(), 1);
        match &canvas.commands()[0] {
            DrawCommand::StrokePath { path, line_width, .. } => {
                assert_eq!(*line_width, 3.0);
                assert!(matches!(path[0], PathOp::RoundRect { radius, .. } if radius == 0.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_properties_write_through() {
        let mut object = Box2D::default();
        {
            let mut props = object.properties();
            assert_eq!(props.len(), 11);
            props[7].set(0.0, PropertyValue::Color(Color::BLACK)).unwrap();
        }
        assert_eq!(object.fill.default_value, Color::BLACK);
    }

    #[test]
    fn test_payload_field_names() {
        let registry = Registry::new();
        let json = serde_json::to_value(Box2D::default().to_data(&registry).unwrap()).unwrap();
        for key in ["anchor", "origin", "x", "rotation", "fill", "stroke", "lineWidth", "cornerRadius"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["width"]["defaultValue"], 100.0);
    }
}
