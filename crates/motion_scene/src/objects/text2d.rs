// SPDX-License-Identifier: MIT OR Apache-2.0
//! Text object.

use super::BuiltinObject;
use crate::anchor::Anchor;
use crate::canvas::Transform2D;
use crate::context::RenderContext;
use crate::object::{
    Capabilities, HandleHint, PositionData, PositionDataMut, SceneObject, ViewportEditHandle, ViewportEditorInfo,
};
use crate::registry::Registry;
use crate::serialize::SerializeError;
use motion_animation::{
    Animatable, AnimatableProperty, BasicProperty, Color, EnumProperty, ObjectProperty, SerializableAnimatable, Vec2,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Text drawn from its top edge, either on one line or one glyph per line
#[derive(Debug, Clone)]
pub struct Text2D {
    /// Point on the parent the text hangs from
    pub anchor: Anchor,
    /// Point on the text placed at the anchor
    pub origin: Anchor,
    /// Horizontal offset
    pub x: Animatable<f64>,
    /// Vertical offset
    pub y: Animatable<f64>,
    /// Horizontal scale
    pub scale_x: Animatable<f64>,
    /// Vertical scale
    pub scale_y: Animatable<f64>,
    /// Drawn string
    pub content: String,
    /// Font family
    pub font: String,
    /// Stack characters top to bottom, for CJK vertical writing
    pub cjk_vertical: bool,
    /// Font size in pixels
    pub size: Animatable<f64>,
    /// Fill color
    pub color: Animatable<Color>,
}

impl Default for Text2D {
    fn default() -> Self {
        Self {
            anchor: Anchor::TOP_LEFT,
            origin: Anchor::TOP_LEFT,
            x: Animatable::scalar("x", 0.0),
            y: Animatable::scalar("y", 0.0),
            scale_x: Animatable::scalar("scaleX", 1.0),
            scale_y: Animatable::scalar("scaleY", 1.0),
            content: "Sample Text".to_owned(),
            font: "Inter".to_owned(),
            cjk_vertical: false,
            size: Animatable::scalar("size", 28.0),
            color: Animatable::color("color", Color::WHITE),
        }
    }
}

impl Text2D {
    /// Number of drawn lines
    pub fn lines(&self) -> usize {
        if self.cjk_vertical {
            self.content.chars().count().max(1)
        } else {
            1
        }
    }
}

impl SceneObject for Text2D {
    fn properties(&mut self) -> Vec<Box<dyn ObjectProperty + '_>> {
        vec![
            Box::new(EnumProperty::new("anchor", &mut self.anchor)),
            Box::new(EnumProperty::new("origin", &mut self.origin)),
            Box::new(AnimatableProperty::new(&mut self.x)),
            Box::new(AnimatableProperty::new(&mut self.y)),
            Box::new(AnimatableProperty::new(&mut self.scale_x)),
            Box::new(AnimatableProperty::new(&mut self.scale_y)),
            Box::new(BasicProperty::new("content", &mut self.content)),
            Box::new(BasicProperty::new("font", &mut self.font)),
            Box::new(BasicProperty::new("cjkVertical", &mut self.cjk_vertical)),
            Box::new(AnimatableProperty::new(&mut self.size)),
            Box::new(AnimatableProperty::new(&mut self.color)),
        ]
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        let time = ctx.time;
        let x = self.x.get(time);
        let y = self.y.get(time);
        let scale_x = self.scale_x.get(time);
        let scale_y = self.scale_y.get(time);
        let size = self.size.get(time);
        let lines = self.lines();

        let canvas = &mut *ctx.canvas;
        canvas.save();
        canvas.set_font(&self.font, size);
        canvas.set_fill_style(self.color.get(time));

        let width = if lines == 1 { canvas.measure_text(&self.content) } else { size };
        let in_parent = self.anchor.resolve(ctx.container_size);
        let in_self = self.origin.resolve(Vec2::new(width, size * lines as f64));

        canvas.translate(in_parent.x, in_parent.y);
        canvas.translate(x - in_self.x, y - in_self.y);
        canvas.scale(scale_x, scale_y);

        if self.cjk_vertical {
            let mut glyph = [0u8; 4];
            for c in self.content.chars() {
                canvas.fill_text(c.encode_utf8(&mut glyph), 0.0, 0.0);
                canvas.translate(0.0, size);
            }
        } else {
            canvas.fill_text(&self.content, 0.0, 0.0);
        }

        canvas.restore();
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::POSITIONAL | Capabilities::VIEWPORT_EDITABLE
    }

    fn position(&self) -> Option<PositionData<'_>> {
        Some(PositionData { x: &self.x, y: &self.y })
    }

    fn position_mut(&mut self) -> Option<PositionDataMut<'_>> {
        Some(PositionDataMut {
            x: &mut self.x,
            y: &mut self.y,
        })
    }

    /// Box of `size` per line, scaled; no font metrics are available here.
    fn viewport_editor_info(&self, time: f64, parent_size: Vec2) -> Option<ViewportEditorInfo> {
        let size = self.size.get(time);
        let clickable = Vec2::new(
            size * self.scale_x.get(time),
            size * self.scale_y.get(time) * self.lines() as f64,
        );
        let in_parent = self.anchor.resolve(parent_size);
        let in_self = self.origin.resolve(clickable);

        Some(ViewportEditorInfo {
            parent_to_this: Transform2D::from_translation(
                in_parent.x - in_self.x + self.x.get(time),
                in_parent.y - in_self.y + self.y.get(time),
            ),
            clickable_size: clickable,
            handles: vec![
                ViewportEditHandle {
                    uid: "resize",
                    hint: HandleHint::ResizeBottomRight,
                    offset: clickable,
                },
                ViewportEditHandle {
                    uid: "scale-x",
                    hint: HandleHint::ResizeRight,
                    offset: Vec2::new(clickable.x, clickable.y / 2.0),
                },
                ViewportEditHandle {
                    uid: "scale-y",
                    hint: HandleHint::ResizeBottom,
                    offset: Vec2::new(clickable.x / 2.0, clickable.y),
                },
            ],
        })
    }

    fn clone_object(&self) -> Box<dyn SceneObject> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Serialized [`Text2D`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text2DData {
    anchor: Anchor,
    origin: Anchor,
    x: SerializableAnimatable<f64>,
    y: SerializableAnimatable<f64>,
    scale_x: SerializableAnimatable<f64>,
    scale_y: SerializableAnimatable<f64>,
    content: String,
    font: String,
    cjk_vertical: bool,
    size: SerializableAnimatable<f64>,
    color: SerializableAnimatable<Color>,
}

impl BuiltinObject for Text2D {
    type Data = Text2DData;

    fn to_data(&self, _registry: &Registry) -> Result<Self::Data, SerializeError> {
        Ok(Text2DData {
            anchor: self.anchor,
            origin: self.origin,
            x: self.x.serializable(),
            y: self.y.serializable(),
            scale_x: self.scale_x.serializable(),
            scale_y: self.scale_y.serializable(),
            content: self.content.clone(),
            font: self.font.clone(),
            cjk_vertical: self.cjk_vertical,
            size: self.size.serializable(),
            color: self.color.serializable(),
        })
    }

    fn load_data(&mut self, data: Self::Data, _registry: &Registry) -> Result<(), SerializeError> {
        self.anchor = data.anchor;
        self.origin = data.origin;
        self.x.load_serializable(data.x);
        self.y.load_serializable(data.y);
        self.scale_x.load_serializable(data.scale_x);
        self.scale_y.load_serializable(data.scale_y);
        self.content = data.content;
        self.font = data.font;
        self.cjk_vertical = data.cjk_vertical;
        self.size.load_serializable(data.size);
        self.color.load_serializable(data.color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, DrawCommand, RecordingCanvas};

    fn texts(canvas: &RecordingCanvas) -> Vec<(String, Transform2D)> {
        canvas
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillText { text, transform, .. } => Some((text.clone(), *transform)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_line_draws_once_with_font() {
        let mut canvas = RecordingCanvas::new();
        let text = Text2D::default();
        text.render(&mut RenderContext::new(&mut canvas, 0.0, Vec2::new(1920.0, 1080.0)));

        match &canvas.commands()[..] {
            [DrawCommand::FillText {
                text,
                font,
                font_size,
                color,
                transform,
                ..
            }] => {
                assert_eq!(text, "Sample Text");
                assert_eq!(font, "Inter");
                assert_eq!(*font_size, 28.0);
                assert_eq!(*color, Color::WHITE);
                assert_eq!(*transform, Transform2D::IDENTITY);
            }
            other => panic!("unexpected commands {other:?}"),
        }
        assert_eq!(canvas.save_depth(), 0);
        assert_eq!(canvas.transform(), Transform2D::IDENTITY);
    }

    #[test]
    fn test_scale_applied_once() {
        let mut canvas = RecordingCanvas::new();
        let mut text = Text2D::default();
        text.scale_x.default_value = 2.0;
        text.render(&mut RenderContext::new(&mut canvas, 0.0, Vec2::new(100.0, 100.0)));

        let drawn = texts(&canvas);
        assert_eq!(drawn[0].1.affine().matrix2.x_axis.x, 2.0);
        assert_eq!(drawn[0].1.affine().matrix2.y_axis.y, 1.0);
    }

    #[test]
    fn test_vertical_advances_per_char() {
        let mut canvas = RecordingCanvas::new();
        let mut text = Text2D::default();
        text.content = "日本語".to_owned();
        text.cjk_vertical = true;
        text.size.default_value = 20.0;
        text.render(&mut RenderContext::new(&mut canvas, 0.0, Vec2::new(100.0, 100.0)));

        let drawn = texts(&canvas);
        let glyphs: Vec<&str> = drawn.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(glyphs, vec!["日", "本", "語"]);
        assert_eq!(drawn[2].1.affine().translation.y, 40.0);
        assert_eq!(canvas.transform(), Transform2D::IDENTITY);
    }

    #[test]
    fn test_origin_uses_measured_width() {
        let mut canvas = RecordingCanvas::new();
        let mut text = Text2D::default();
        text.content = "abcd".to_owned();
        text.size.default_value = 10.0;
        text.origin = Anchor::TOP_RIGHT;
        text.render(&mut RenderContext::new(&mut canvas, 0.0, Vec2::new(100.0, 100.0)));

        // 4 glyphs * 10px * 0.6 advance
        assert_eq!(texts(&canvas)[0].1.affine().translation.x, -24.0);
    }

    #[test]
    fn test_editor_info_lines_and_handles() {
        let mut text = Text2D::default();
        text.content = "ab".to_owned();
        text.cjk_vertical = true;
        text.size.default_value = 10.0;
        text.x.default_value = 5.0;

        let info = text.viewport_editor_info(0.0, Vec2::new(100.0, 100.0)).unwrap();
        assert_eq!(info.clickable_size, Vec2::new(10.0, 20.0));
        assert_eq!(info.parent_to_this, Transform2D::from_translation(5.0, 0.0));
        let ids: Vec<&str> = info.handles.iter().map(|h| h.uid).collect();
        assert_eq!(ids, vec!["resize", "scale-x", "scale-y"]);
        assert_eq!(info.handles[1].offset, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_empty_vertical_counts_one_line() {
        let mut text = Text2D::default();
        text.content.clear();
        text.cjk_vertical = true;
        assert_eq!(text.lines(), 1);
    }

    #[test]
    fn test_payload_round_trip() {
        let registry = Registry::new();
        let mut text = Text2D::default();
        text.content = "Hello".to_owned();
        text.cjk_vertical = true;
        text.size.insert(0.0, 12.0, None);

        let json = serde_json::to_value(text.to_data(&registry).unwrap()).unwrap();
        assert_eq!(json["cjkVertical"], true);
        assert!(json.get("scaleX").is_some());

        let mut loaded = Text2D::default();
        loaded.load_data(serde_json::from_value(json).unwrap(), &registry).unwrap();
        assert_eq!(loaded.content, "Hello");
        assert!(loaded.cjk_vertical);
        assert_eq!(loaded.size.get(0.0), 12.0);
    }
}
