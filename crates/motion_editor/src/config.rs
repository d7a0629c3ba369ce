// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor configuration.
//!
//! Stored as RON:
//! - Playback rate, frame pacing and looping
//! - Timeline snapping mode
//! - Export dimensions, frame rate, duration and background
//! - Undo history depth

use crate::snapping::TimelineSnapping;
use motion_animation::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current config format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Config file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid RON for this format
    #[error("config parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// Serializing failed
    #[error("config serialize error: {0}")]
    Serialize(#[from] ron::Error),
    /// Written by a newer editor
    #[error("config version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Newest version this build reads
        supported: u32,
    },
}

/// Frame pacing of interactive playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackFps {
    /// Fixed frames per second
    Fixed(u32),
    /// Follow the display refresh
    Vsync,
}

/// Playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Scene milliseconds per real millisecond
    pub rate: f64,
    /// Frame pacing
    pub fps: PlaybackFps,
    /// Wrap around at the end of the scene
    pub looping: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            rate: 1.0,
            fps: PlaybackFps::Vsync,
            looping: false,
        }
    }
}

/// Frame export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Frames per second
    pub frame_rate: f64,
    /// Exported span in milliseconds; the scene duration when absent
    #[serde(default)]
    pub duration_ms: Option<f64>,
    /// Color painted under every frame
    pub background: Color,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            frame_rate: 60.0,
            duration_ms: None,
            background: Color::BLACK,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Format version
    pub version: u32,
    /// Playback
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Timeline snapping
    #[serde(default)]
    pub snapping: TimelineSnapping,
    /// Export
    #[serde(default)]
    pub export: ExportConfig,
    /// Maximum undo steps kept
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
}

fn default_history_depth() -> usize {
    100
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_FORMAT_VERSION,
            playback: PlaybackConfig::default(),
            snapping: TimelineSnapping::default(),
            export: ExportConfig::default(),
            history_depth: default_history_depth(),
        }
    }
}

impl EditorConfig {
    /// Parse from RON text
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(content)?;
        if config.version > CONFIG_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_FORMAT_VERSION,
            });
        }
        Ok(config)
    }

    /// Render as pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Load from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&content)?;
        tracing::debug!(path = %path.display(), "Loaded editor config");
        Ok(config)
    }

    /// Save to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron()?)?;
        tracing::debug!(path = %path.display(), "Saved editor config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.version, CONFIG_FORMAT_VERSION);
        assert_eq!(config.playback.rate, 1.0);
        assert_eq!(config.export.width, 1920);
        assert_eq!(config.history_depth, 100);
    }

    #[test]
    fn test_ron_round_trip() {
        let mut config = EditorConfig::default();
        config.playback.fps = PlaybackFps::Fixed(30);
        config.playback.looping = true;
        config.snapping = TimelineSnapping::Bpm { bpm: 128.0, division: 2.0 };
        config.export.duration_ms = Some(2500.0);

        let text = config.to_ron().unwrap();
        assert_eq!(EditorConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = EditorConfig::from_ron("(version: 1)").unwrap();
        assert_eq!(config.playback, PlaybackConfig::default());
        assert_eq!(config.snapping, TimelineSnapping::default());
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = EditorConfig::from_ron("(version: 99)").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion { found: 99, .. }));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("motion_editor_config_{}.ron", std::process::id()));
        let config = EditorConfig {
            history_depth: 7,
            ..EditorConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = EditorConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.history_depth, 7);
    }
}
