// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame export sampler.
//!
//! Walks a scene frame by frame at the export rate and hands each rendered
//! canvas to a [`FrameSink`]. Encoding lives behind the sink.

use crate::config::ExportConfig;
use motion_animation::{Color, Vec2};
use motion_scene::{Canvas, RenderContext, Scene};
use thiserror::Error;

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Frame rate is zero, negative or not finite
    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(f64),

    /// Output has no pixels
    #[error("Invalid output size: {width}x{height}")]
    InvalidSize {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },

    /// The sink rejected a frame
    #[error("Frame {frame} rejected: {message}")]
    Sink {
        /// Index of the rejected frame
        frame: u64,
        /// Sink's reason
        message: String,
    },

    /// IO error inside a sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Resolved parameters of one export run
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Frames per second
    pub frame_rate: f64,
    /// Exported span in milliseconds
    pub duration_ms: f64,
    /// Color painted under every frame
    pub background: Color,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
}

impl ExportSettings {
    /// Resolve `config` against `scene`, taking the scene duration when the
    /// config leaves it open
    pub fn new(config: &ExportConfig, scene: &Scene) -> Result<Self> {
        if !config.frame_rate.is_finite() || config.frame_rate <= 0.0 {
            return Err(ExportError::InvalidFrameRate(config.frame_rate));
        }
        if config.width == 0 || config.height == 0 {
            return Err(ExportError::InvalidSize {
                width: config.width,
                height: config.height,
            });
        }

        Ok(Self {
            width: config.width,
            height: config.height,
            frame_rate: config.frame_rate,
            duration_ms: config.duration_ms.unwrap_or_else(|| scene.duration()).max(0.0),
            background: config.background,
            max_frames: None,
        })
    }

    /// Cap the number of exported frames
    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Number of frames covering the duration, at least one, capped by
    /// `max_frames`
    pub fn frames(&self) -> u64 {
        let frames = (self.duration_ms * self.frame_rate / 1000.0).ceil();
        let frames = if frames.is_finite() && frames >= 1.0 {
            frames as u64
        } else {
            1
        };
        self.max_frames.map_or(frames, |max| frames.min(max))
    }

    /// Start of frame `frame` in microseconds
    pub fn timestamp_us(&self, frame: u64) -> u64 {
        (frame as f64 * MICROS_PER_SECOND / self.frame_rate).floor() as u64
    }

    /// Length of frame `frame` in microseconds
    pub fn duration_us(&self, frame: u64) -> u64 {
        self.timestamp_us(frame + 1) - self.timestamp_us(frame)
    }

    /// Output size as a container size
    pub fn size(&self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Timing of one exported frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Zero-based frame index
    pub index: u64,
    /// Presentation time in microseconds
    pub timestamp_us: u64,
    /// Frame length in microseconds
    pub duration_us: u64,
}

/// Consumer of rendered frames
pub trait FrameSink<C: Canvas + ?Sized> {
    /// Take the frame drawn on `canvas`; an error aborts the export
    fn consume(&mut self, frame: FrameInfo, canvas: &mut C) -> Result<()>;

    /// Called once after the last frame
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Render every frame of `scene` into `canvas` and feed it to `sink`.
///
/// Returns the number of frames delivered.
pub fn export_frames<C, S>(scene: &Scene, settings: &ExportSettings, canvas: &mut C, sink: &mut S) -> Result<u64>
where
    C: Canvas,
    S: FrameSink<C>,
{
    let frames = settings.frames();
    tracing::info!(
        frames,
        width = settings.width,
        height = settings.height,
        fps = settings.frame_rate,
        "Exporting scene"
    );

    for index in 0..frames {
        let frame = FrameInfo {
            index,
            timestamp_us: settings.timestamp_us(index),
            duration_us: settings.duration_us(index),
        };

        canvas.clear(settings.background);
        {
            let mut ctx = RenderContext::new(&mut *canvas, frame.timestamp_us as f64 / 1000.0, settings.size())
                .with_time_delta(frame.duration_us as f64 / 1000.0);
            scene.render_frame(&mut ctx);
        }
        sink.consume(frame, canvas)?;
    }

    sink.finish()?;
    tracing::debug!(frames, "Export finished");
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use motion_scene::objects::Box2D;
    use motion_scene::{DrawCommand, ObjectContainer, RecordingCanvas, SceneMetadata, SceneObjectInfo};

    #[derive(Default)]
    struct CollectingSink {
        frames: Vec<FrameInfo>,
        commands: Vec<Vec<DrawCommand>>,
        fail_at: Option<u64>,
        finished: bool,
    }

    impl FrameSink<RecordingCanvas> for CollectingSink {
        fn consume(&mut self, frame: FrameInfo, canvas: &mut RecordingCanvas) -> Result<()> {
            if self.fail_at == Some(frame.index) {
                return Err(ExportError::Sink {
                    frame: frame.index,
                    message: "disk full".to_owned(),
                });
            }
            self.frames.push(frame);
            self.commands.push(canvas.take_commands());
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    fn scene_with_box(time_end: f64) -> Scene {
        let mut scene = Scene::new(SceneMetadata::default());
        scene
            .objects_mut()
            .add(SceneObjectInfo::new("box", Box::new(Box2D::default())).with_window(0.0, time_end))
            .unwrap();
        scene
    }

    fn settings(frame_rate: f64, duration_ms: f64) -> ExportSettings {
        ExportSettings {
            width: 640,
            height: 360,
            frame_rate,
            duration_ms,
            background: Color::BLACK,
            max_frames: None,
        }
    }

    #[test]
    fn test_timestamps_never_drift() {
        let settings = settings(30.0, 1000.0);
        assert_eq!(settings.frames(), 30);
        assert_eq!(settings.timestamp_us(1), 33_333);
        assert_eq!(settings.duration_us(0), 33_333);
        assert_eq!(settings.duration_us(2), 33_334);
        assert_eq!(settings.timestamp_us(30), 1_000_000);
    }

    #[test]
    fn test_frame_count_rounds_up() {
        assert_eq!(settings(24.0, 1010.0).frames(), 25);
        assert_eq!(settings(24.0, 0.0).frames(), 1);
        assert_eq!(settings(24.0, 1000.0).with_max_frames(Some(5)).frames(), 5);
        assert_eq!(settings(24.0, 100.0).with_max_frames(Some(50)).frames(), 3);
    }

    #[test]
    fn test_settings_from_config() {
        let scene = scene_with_box(2500.0);
        let mut config = ExportConfig::default();
        let resolved = ExportSettings::new(&config, &scene).unwrap();
        assert_eq!(resolved.duration_ms, 2500.0);

        config.duration_ms = Some(400.0);
        assert_eq!(ExportSettings::new(&config, &scene).unwrap().duration_ms, 400.0);

        config.frame_rate = 0.0;
        assert!(matches!(
            ExportSettings::new(&config, &scene),
            Err(ExportError::InvalidFrameRate(_))
        ));
    }

    #[test]
    fn test_export_renders_each_frame() {
        let scene = scene_with_box(500.0);
        let settings = settings(10.0, 1000.0);
        let mut canvas = RecordingCanvas::new();
        let mut sink = CollectingSink::default();

        let frames = export_frames(&scene, &settings, &mut canvas, &mut sink).unwrap();
        assert_eq!(frames, 10);
        assert!(sink.finished);
        assert_eq!(sink.frames[3].timestamp_us, 300_000);
        assert_eq!(sink.frames[3].duration_us, 100_000);

        for (index, commands) in sink.commands.iter().enumerate() {
            assert_eq!(commands[0], DrawCommand::Clear(Color::BLACK));
            let drawn = commands.len() > 1;
            assert_eq!(drawn, index < 5, "frame {index}");
        }
    }

    #[test]
    fn test_sink_error_aborts() {
        let scene = scene_with_box(1000.0);
        let settings = settings(10.0, 1000.0);
        let mut canvas = RecordingCanvas::new();
        let mut sink = CollectingSink {
            fail_at: Some(2),
            ..Default::default()
        };

        let result = export_frames(&scene, &settings, &mut canvas, &mut sink);
        assert!(matches!(result, Err(ExportError::Sink { frame: 2, .. })));
        assert_eq!(sink.frames.len(), 2);
        assert!(!sink.finished);
    }
}
