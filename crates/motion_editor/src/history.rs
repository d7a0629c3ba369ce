// SPDX-License-Identifier: MIT OR Apache-2.0
//! Undo/redo history of a scene using whole-scene snapshots.
//!
//! Each entry keeps the scene's JSON snapshot from before and after an edit.
//! Undo and redo rebuild the scene from the matching snapshot through the
//! registry, so any edit the serializer can express is undoable.

use crate::config::EditorConfig;
use motion_scene::{Registry, Scene, SerializeError};
use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Default maximum undo depth
pub const MAX_HISTORY: usize = 100;

/// History errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Nothing to undo
    #[error("Nothing to undo")]
    NothingToUndo,

    /// Nothing to redo
    #[error("Nothing to redo")]
    NothingToRedo,

    /// Snapshotting or restoring failed
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SerializeError),
}

/// Result type for history operations
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Unique operation ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationId(u64);

impl OperationId {
    /// Get the raw ID value
    pub fn value(&self) -> u64 {
        self.0
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Serialized scene state
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSnapshot {
    json: String,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

impl SceneSnapshot {
    /// Capture `scene`
    pub fn capture(scene: &Scene, registry: &Registry) -> Result<Self> {
        Ok(Self {
            json: scene.to_json(registry)?,
            timestamp: now_secs(),
        })
    }

    /// Rebuild the captured scene
    pub fn restore(&self, registry: &Registry) -> Result<Scene> {
        Ok(Scene::from_json(&self.json, registry)?)
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.json.len()
    }
}

/// One undoable edit
#[derive(Debug, Clone)]
pub struct Operation {
    /// Operation ID
    pub id: OperationId,
    /// Human-readable description
    pub description: String,
    /// State before the edit (for undo)
    pub before: SceneSnapshot,
    /// State after the edit (for redo)
    pub after: SceneSnapshot,
}

impl Operation {
    /// Memory held by both snapshots
    pub fn memory_size(&self) -> usize {
        self.before.size() + self.after.size()
    }
}

/// Edit in progress: the scene state captured before it started
#[derive(Debug)]
pub struct PendingEdit {
    description: String,
    before: SceneSnapshot,
}

/// History statistics
#[derive(Debug, Clone, Default)]
pub struct HistoryStats {
    /// Entries in the undo stack
    pub undo_count: usize,
    /// Entries in the redo stack
    pub redo_count: usize,
    /// Snapshot bytes held
    pub memory_used: usize,
    /// Maximum history depth
    pub max_depth: usize,
}

/// Undo/redo history manager
#[derive(Debug)]
pub struct History {
    undo_stack: VecDeque<Operation>,
    redo_stack: VecDeque<Operation>,
    next_id: u64,
    max_depth: usize,
    memory_used: usize,
}

impl History {
    /// Create a history manager with the default depth
    pub fn new() -> Self {
        Self::with_max_depth(MAX_HISTORY)
    }

    /// Create with custom maximum depth
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            next_id: 1,
            max_depth,
            memory_used: 0,
        }
    }

    /// Create with the depth configured in `config`
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::with_max_depth(config.history_depth)
    }

    /// Capture the scene before an edit
    pub fn begin(&self, description: impl Into<String>, scene: &Scene, registry: &Registry) -> Result<PendingEdit> {
        Ok(PendingEdit {
            description: description.into(),
            before: SceneSnapshot::capture(scene, registry)?,
        })
    }

    /// Record a finished edit.
    ///
    /// Returns `None` when the scene did not change. Clears the redo stack
    /// otherwise.
    pub fn commit(&mut self, pending: PendingEdit, scene: &Scene, registry: &Registry) -> Result<Option<OperationId>> {
        let after = SceneSnapshot::capture(scene, registry)?;
        if after.json == pending.before.json {
            return Ok(None);
        }

        let id = OperationId(self.next_id);
        self.next_id += 1;
        let operation = Operation {
            id,
            description: pending.description,
            before: pending.before,
            after,
        };
        tracing::debug!(id = id.value(), description = %operation.description, "Recorded edit");

        self.redo_stack.clear();
        self.memory_used += operation.memory_size();
        self.undo_stack.push_back(operation);

        // Enforce history limit
        while self.undo_stack.len() > self.max_depth {
            if let Some(old) = self.undo_stack.pop_front() {
                self.memory_used = self.memory_used.saturating_sub(old.memory_size());
            }
        }

        Ok(Some(id))
    }

    /// Undo the last edit and return the scene as it was before it
    pub fn undo(&mut self, registry: &Registry) -> Result<Scene> {
        let operation = self.undo_stack.back().ok_or(HistoryError::NothingToUndo)?;
        let scene = operation.before.restore(registry)?;

        if let Some(operation) = self.undo_stack.pop_back() {
            tracing::debug!(description = %operation.description, "Undo");
            self.memory_used = self.memory_used.saturating_sub(operation.memory_size());
            self.redo_stack.push_back(operation);
        }
        Ok(scene)
    }

    /// Redo the last undone edit and return the scene as it was after it
    pub fn redo(&mut self, registry: &Registry) -> Result<Scene> {
        let operation = self.redo_stack.back().ok_or(HistoryError::NothingToRedo)?;
        let scene = operation.after.restore(registry)?;

        if let Some(operation) = self.redo_stack.pop_back() {
            tracing::debug!(description = %operation.description, "Redo");
            self.memory_used += operation.memory_size();
            self.undo_stack.push_back(operation);
        }
        Ok(scene)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.memory_used = 0;
    }

    /// Get history statistics
    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            undo_count: self.undo_stack.len(),
            redo_count: self.redo_stack.len(),
            memory_used: self.memory_used,
            max_depth: self.max_depth,
        }
    }

    /// Get description of next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|op| op.description.as_str())
    }

    /// Get description of next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.back().map(|op| op.description.as_str())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
