// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor session state for the motion editor.
//!
//! This crate holds the parts of the editor that sit between the user and a
//! scene:
//! - Versioned RON configuration
//! - Seekhead playback with rate, direction and loop range
//! - Object, keyframe and timeline selections
//! - Keyframe drag sessions committed as one modification
//! - A typed clipboard and timeline snapping
//! - Snapshot-based undo/redo
//! - The frame export sampler that feeds an encoder sink
//!
//! The `motion_editor` binary wraps the export sampler in a command-line
//! renderer.

pub mod clipboard;
pub mod config;
pub mod edit_session;
pub mod export;
pub mod history;
pub mod playback;
pub mod selection;
pub mod snapping;

pub use clipboard::{Clipboard, ClipboardSlot, KeyframeClip};
pub use config::{ConfigError, EditorConfig, ExportConfig, PlaybackConfig, PlaybackFps};
pub use edit_session::KeyframeEditSession;
pub use export::{export_frames, ExportError, ExportSettings, FrameInfo, FrameSink};
pub use history::{History, HistoryError, OperationId, SceneSnapshot};
pub use playback::{PlaybackManager, PlaybackState};
pub use selection::{ObjectSelection, Selections, TimelineSelection};
pub use snapping::TimelineSnapping;
