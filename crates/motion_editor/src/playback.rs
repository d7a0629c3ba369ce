// SPDX-License-Identifier: MIT OR Apache-2.0
//! Seekhead and interactive playback.

use crate::config::{PlaybackConfig, PlaybackFps};
use motion_animation::Vec2;
use motion_scene::{Canvas, RenderContext};
use serde::{Deserialize, Serialize};

/// Playback direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackState {
    /// Seekhead does not move
    #[default]
    Paused,
    /// Time moves forward
    PlayingNormal,
    /// Time moves backward
    PlayingBackward,
}

impl PlaybackState {
    fn direction(self) -> f64 {
        match self {
            Self::Paused => 0.0,
            Self::PlayingNormal => 1.0,
            Self::PlayingBackward => -1.0,
        }
    }
}

/// Main seekhead of the editor.
///
/// `delta_time` is the signed scene-time change of the last update: zero
/// while paused, negative when playing backward or seeking back.
#[derive(Debug, Clone)]
pub struct PlaybackManager {
    current_time: f64,
    delta_time: f64,
    state: PlaybackState,
    /// Scene milliseconds per real millisecond. Has no effect on export.
    pub rate: f64,
    /// Frame pacing
    pub fps: PlaybackFps,
    /// Wrap over the scene duration when no loop range is set
    pub looping: bool,
    loop_range: Option<(f64, f64)>,
    scene_duration: f64,
}

impl Default for PlaybackManager {
    fn default() -> Self {
        Self::new(&PlaybackConfig::default())
    }
}

impl PlaybackManager {
    /// Paused at zero
    pub fn new(config: &PlaybackConfig) -> Self {
        Self {
            current_time: 0.0,
            delta_time: 0.0,
            state: PlaybackState::Paused,
            rate: config.rate,
            fps: config.fps,
            looping: config.looping,
            loop_range: None,
            scene_duration: 0.0,
        }
    }

    /// Seekhead time in milliseconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Signed change of the last update
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Wrap playback inside `[start, end)`; `None` disables wrapping.
    ///
    /// Empty or inverted ranges disable wrapping too.
    pub fn set_loop_range(&mut self, range: Option<(f64, f64)>) {
        self.loop_range = range.filter(|(start, end)| end > start);
    }

    /// Current loop range
    pub fn loop_range(&self) -> Option<(f64, f64)> {
        self.loop_range
    }

    /// Duration of the played scene, used by `looping`
    pub fn set_scene_duration(&mut self, duration: f64) {
        self.scene_duration = duration.max(0.0);
    }

    /// Range playback currently wraps inside
    fn effective_loop(&self) -> Option<(f64, f64)> {
        self.loop_range
            .or_else(|| (self.looping && self.scene_duration > 0.0).then_some((0.0, self.scene_duration)))
    }

    /// Jump to `time`
    pub fn seek_to(&mut self, time: f64) {
        self.delta_time = time - self.current_time;
        self.current_time = time;
        tracing::trace!(time, "Seek");
    }

    /// Change direction or pause
    pub fn change_state(&mut self, state: PlaybackState) {
        if state != self.state {
            tracing::debug!(?state, time = self.current_time, "Playback state changed");
        }
        self.state = state;
        if state == PlaybackState::Paused {
            self.delta_time = 0.0;
        }
    }

    /// Advance by `real_elapsed_ms` of wall-clock time and return the new time.
    ///
    /// Wraps inside the loop range, or over the scene duration when
    /// `looping` is on. Otherwise playing backward past zero stops at zero
    /// and pauses.
    pub fn tick(&mut self, real_elapsed_ms: f64) -> f64 {
        let step = real_elapsed_ms * self.rate * self.state.direction();
        let previous = self.current_time;
        let mut next = previous + step;

        if let Some((start, end)) = self.effective_loop() {
            if next >= end || next < start {
                next = start + (next - start).rem_euclid(end - start);
            }
        } else if next < 0.0 && self.state == PlaybackState::PlayingBackward {
            next = 0.0;
            self.state = PlaybackState::Paused;
        }

        self.current_time = next;
        self.delta_time = next - previous;
        next
    }

    /// Milliseconds between frames, `None` under vsync
    pub fn frame_interval_ms(&self) -> Option<f64> {
        match self.fps {
            PlaybackFps::Fixed(0) | PlaybackFps::Vsync => None,
            PlaybackFps::Fixed(fps) => Some(1000.0 / f64::from(fps)),
        }
    }

    /// Context for drawing the frame at the seekhead
    pub fn render_context<'a>(&self, canvas: &'a mut dyn Canvas, container_size: Vec2) -> RenderContext<'a> {
        RenderContext::new(canvas, self.current_time, container_size).with_time_delta(self.delta_time)
    }
}
