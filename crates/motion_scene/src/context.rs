// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-frame render context.

use crate::canvas::Canvas;
use motion_animation::Vec2;

/// Everything a scene object needs to draw one frame
pub struct RenderContext<'a> {
    /// Scene time of the frame in milliseconds
    pub time: f64,
    /// Time since the previous frame; negative when seeking or playing backwards
    pub time_delta: f64,
    /// Size of the enclosing container (scene or container object)
    pub container_size: Vec2,
    /// Output surface; `(0, 0)` is the container's top-left corner
    pub canvas: &'a mut dyn Canvas,
}

impl<'a> RenderContext<'a> {
    /// Create a context with zero delta
    pub fn new(canvas: &'a mut dyn Canvas, time: f64, container_size: Vec2) -> Self {
        Self {
            time,
            time_delta: 0.0,
            container_size,
            canvas,
        }
    }

    /// Set the frame delta
    pub fn with_time_delta(mut self, time_delta: f64) -> Self {
        self.time_delta = time_delta;
        self
    }

    /// Context for the children of a container, sharing time and canvas
    pub fn child(&mut self, container_size: Vec2) -> RenderContext<'_> {
        RenderContext {
            time: self.time,
            time_delta: self.time_delta,
            container_size,
            canvas: &mut *self.canvas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;

    #[test]
    fn test_child_context_keeps_time() {
        let mut canvas = RecordingCanvas::new();
        let mut ctx = RenderContext::new(&mut canvas, 120.0, Vec2::new(1920.0, 1080.0)).with_time_delta(-16.0);
        let child = ctx.child(Vec2::new(100.0, 50.0));
        assert_eq!(child.time, 120.0);
        assert_eq!(child.time_delta, -16.0);
        assert_eq!(child.container_size, Vec2::new(100.0, 50.0));
    }
}
