// SPDX-License-Identifier: MIT OR Apache-2.0
//! Drawing surface boundary.
//!
//! Scene objects draw through the [`Canvas`] trait, a small immediate-mode 2D
//! API with a current affine transform and a save/restore state stack.
//! [`RecordingCanvas`] is an in-memory implementation that records every draw
//! call; it backs headless rendering and render assertions.

use glam::{DAffine2, DVec2};
use motion_animation::{Color, Vec2};

/// 2D affine transform on a y-down surface, backed by [`DAffine2`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform2D(DAffine2);

impl From<DAffine2> for Transform2D {
    fn from(affine: DAffine2) -> Self {
        Self(affine)
    }
}

fn dvec(v: Vec2) -> DVec2 {
    DVec2::new(v.x, v.y)
}

impl Transform2D {
    /// Identity transform
    pub const IDENTITY: Self = Self(DAffine2::IDENTITY);

    /// Pure translation
    pub fn from_translation(x: f64, y: f64) -> Self {
        Self(DAffine2::from_translation(DVec2::new(x, y)))
    }

    /// Underlying affine matrix
    pub fn affine(&self) -> DAffine2 {
        self.0
    }

    /// `self · other`: `other` applies first, then `self`
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        Self(self.0 * other.0)
    }

    /// Post-multiply by a translation
    #[must_use]
    pub fn translate(&self, x: f64, y: f64) -> Self {
        Self(self.0 * DAffine2::from_translation(DVec2::new(x, y)))
    }

    /// Post-multiply by a scale
    #[must_use]
    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        Self(self.0 * DAffine2::from_scale(DVec2::new(sx, sy)))
    }

    /// Post-multiply by a rotation in degrees (clockwise on a y-down surface)
    #[must_use]
    pub fn rotate_deg(&self, degrees: f64) -> Self {
        Self(self.0 * DAffine2::from_angle(degrees.to_radians()))
    }

    /// Map a point
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        let p = self.0.transform_point2(dvec(point));
        Vec2::new(p.x, p.y)
    }
}

/// Immediate-mode 2D drawing surface.
///
/// `(0, 0)` is the top-left of the current container. Text is drawn with its
/// top edge at the given y.
pub trait Canvas {
    /// Current transform
    fn transform(&self) -> Transform2D;

    /// Replace the current transform
    fn set_transform(&mut self, transform: Transform2D);

    /// Push transform and style state
    fn save(&mut self);

    /// Pop transform and style state; no-op on an empty stack
    fn restore(&mut self);

    /// Post-multiply the current transform by a translation
    fn translate(&mut self, x: f64, y: f64) {
        let next = self.transform().translate(x, y);
        self.set_transform(next);
    }

    /// Post-multiply the current transform by a scale
    fn scale(&mut self, sx: f64, sy: f64) {
        let next = self.transform().scale(sx, sy);
        self.set_transform(next);
    }

    /// Post-multiply the current transform by a rotation in degrees
    fn rotate_deg(&mut self, degrees: f64) {
        let next = self.transform().rotate_deg(degrees);
        self.set_transform(next);
    }

    /// Fill color for following fills
    fn set_fill_style(&mut self, color: Color);

    /// Stroke color for following strokes
    fn set_stroke_style(&mut self, color: Color);

    /// Stroke width
    fn set_line_width(&mut self, width: f64);

    /// Font for following text calls
    fn set_font(&mut self, family: &str, size: f64);

    /// Start a new path
    fn begin_path(&mut self);

    /// Begin a subpath
    fn move_to(&mut self, x: f64, y: f64);

    /// Line to a point
    fn line_to(&mut self, x: f64, y: f64);

    /// Rectangle subpath
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Rounded rectangle subpath
    fn round_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64);

    /// Fill the current path
    fn fill(&mut self);

    /// Stroke the current path
    fn stroke(&mut self);

    /// Fill a rectangle without touching the current path
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Stroke a rectangle without touching the current path
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Draw text
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Advance width of `text` in the current font
    fn measure_text(&self, text: &str) -> f64;

    /// Fill the whole surface, ignoring the transform
    fn clear(&mut self, color: Color);
}

/// Path building step
#[derive(Debug, Clone, PartialEq)]
pub enum PathOp {
    /// Begin a subpath
    MoveTo(Vec2),
    /// Line to a point
    LineTo(Vec2),
    /// Rectangle
    Rect {
        /// Top-left corner
        origin: Vec2,
        /// Width and height
        size: Vec2,
    },
    /// Rounded rectangle
    RoundRect {
        /// Top-left corner
        origin: Vec2,
        /// Width and height
        size: Vec2,
        /// Corner radius
        radius: f64,
    },
}

/// A draw call captured by [`RecordingCanvas`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Whole-surface clear
    Clear(Color),
    /// Filled rectangle
    FillRect {
        /// Transform at draw time
        transform: Transform2D,
        /// Top-left corner
        origin: Vec2,
        /// Width and height
        size: Vec2,
        /// Fill color
        color: Color,
    },
    /// Stroked rectangle
    StrokeRect {
        /// Transform at draw time
        transform: Transform2D,
        /// Top-left corner
        origin: Vec2,
        /// Width and height
        size: Vec2,
        /// Stroke color
        color: Color,
        /// Stroke width
        line_width: f64,
    },
    /// Filled path
    FillPath {
        /// Transform at draw time
        transform: Transform2D,
        /// Path steps
        path: Vec<PathOp>,
        /// Fill color
        color: Color,
    },
    /// Stroked path
    StrokePath {
        /// Transform at draw time
        transform: Transform2D,
        /// Path steps
        path: Vec<PathOp>,
        /// Stroke color
        color: Color,
        /// Stroke width
        line_width: f64,
    },
    /// Text
    FillText {
        /// Transform at draw time
        transform: Transform2D,
        /// Drawn string
        text: String,
        /// Text position
        position: Vec2,
        /// Font family
        font: String,
        /// Font size in pixels
        font_size: f64,
        /// Fill color
        color: Color,
    },
}

impl DrawCommand {
    /// Transform active when the command was issued
    pub fn transform(&self) -> Option<Transform2D> {
        match self {
            DrawCommand::Clear(_) => None,
            DrawCommand::FillRect { transform, .. }
            | DrawCommand::StrokeRect { transform, .. }
            | DrawCommand::FillPath { transform, .. }
            | DrawCommand::StrokePath { transform, .. }
            | DrawCommand::FillText { transform, .. } => Some(*transform),
        }
    }
}

#[derive(Debug, Clone)]
struct CanvasState {
    transform: Transform2D,
    fill: Color,
    stroke: Color,
    line_width: f64,
    font: String,
    font_size: f64,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            transform: Transform2D::IDENTITY,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
            font: "sans-serif".to_owned(),
            font_size: 10.0,
        }
    }
}

/// Average glyph advance as a fraction of the font size
const GLYPH_ADVANCE: f64 = 0.6;

/// Canvas that records draw calls instead of rasterizing
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    state: CanvasState,
    stack: Vec<CanvasState>,
    path: Vec<PathOp>,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create an empty canvas
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands, in draw order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the state intact
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Depth of the save stack
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }
}

impl Canvas for RecordingCanvas {
    fn transform(&self) -> Transform2D {
        self.state.transform
    }

    fn set_transform(&mut self, transform: Transform2D) {
        self.state.transform = transform;
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_fill_style(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_font(&mut self, family: &str, size: f64) {
        self.state.font = family.to_owned();
        self.state.font_size = size;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(PathOp::MoveTo(Vec2::new(x, y)));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push(PathOp::LineTo(Vec2::new(x, y)));
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.path.push(PathOp::Rect {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        });
    }

    fn round_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        self.path.push(PathOp::RoundRect {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
            radius,
        });
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::FillPath {
            transform: self.state.transform,
            path: self.path.clone(),
            color: self.state.fill,
        });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::StrokePath {
            transform: self.state.transform,
            path: self.path.clone(),
            color: self.state.stroke,
            line_width: self.state.line_width,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::FillRect {
            transform: self.state.transform,
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
            color: self.state.fill,
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::StrokeRect {
            transform: self.state.transform,
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
            color: self.state.stroke,
            line_width: self.state.line_width,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::FillText {
            transform: self.state.transform,
            text: text.to_owned(),
            position: Vec2::new(x, y),
            font: self.state.font.clone(),
            font_size: self.state.font_size,
            color: self.state.fill,
        });
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.state.font_size * GLYPH_ADVANCE
    }

    fn clear(&mut self, color: Color) {
        self.path.clear();
        self.commands.push(DrawCommand::Clear(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_translate_then_rotate() {
        let t = Transform2D::IDENTITY.translate(10.0, 0.0).rotate_deg(90.0);
        // Rotation applies first: (1, 0) -> (0, 1), then the translation.
        assert!(approx(t.transform_point(Vec2::new(1.0, 0.0)), Vec2::new(10.0, 1.0)));
    }

    #[test]
    fn test_multiply_composes_in_order() {
        let parent = Transform2D::from_translation(100.0, 50.0);
        let child = Transform2D::IDENTITY.scale(2.0, 2.0);
        let p = parent.multiply(&child).transform_point(Vec2::new(1.0, 1.0));
        assert_eq!(p, Vec2::new(102.0, 52.0));
    }

    #[test]
    fn test_rotation_is_clockwise_on_y_down() {
        let t = Transform2D::from_translation(5.0, -3.0).rotate_deg(90.0).scale(2.0, 0.5);
        // (1, 0) scales to (2, 0), rotates to (0, 2), then shifts.
        assert!(approx(t.transform_point(Vec2::new(1.0, 0.0)), Vec2::new(5.0, -1.0)));
        assert_eq!(t.affine().translation, DVec2::new(5.0, -3.0));
    }

    #[test]
    fn test_save_restore() {
        let mut canvas = RecordingCanvas::new();
        canvas.save();
        canvas.translate(10.0, 10.0);
        canvas.set_fill_style(Color::WHITE);
        canvas.restore();
        assert_eq!(canvas.transform(), Transform2D::IDENTITY);
        assert_eq!(canvas.save_depth(), 0);

        canvas.restore();
        assert_eq!(canvas.transform(), Transform2D::IDENTITY);
    }

    #[test]
    fn test_records_styles_at_draw_time() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_fill_style(Color::rgb(255.0, 0.0, 0.0));
        canvas.begin_path();
        canvas.round_rect(0.0, 0.0, 10.0, 20.0, 2.0);
        canvas.fill();
        canvas.set_fill_style(Color::WHITE);

        match &canvas.commands()[0] {
            DrawCommand::FillPath { path, color, .. } => {
                assert_eq!(*color, Color::rgb(255.0, 0.0, 0.0));
                assert_eq!(path.len(), 1);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_measure_text_scales_with_font() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_font("Inter", 20.0);
        assert_eq!(canvas.measure_text("abcde"), 60.0);
    }
}
