// SPDX-License-Identifier: MIT OR Apache-2.0
//! Object, keyframe and timeline selections.

use indexmap::IndexSet;
use motion_animation::Uid;
use motion_scene::ObjectList;
use std::hash::Hash;

/// Multi-selection with a primary item, in selection order
#[derive(Debug, Clone)]
pub struct ObjectSelection<T> {
    multiple: IndexSet<T>,
    primary: Option<T>,
}

impl<T> Default for ObjectSelection<T> {
    fn default() -> Self {
        Self {
            multiple: IndexSet::new(),
            primary: None,
        }
    }
}

impl<T: Clone + Eq + Hash> ObjectSelection<T> {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `target` and make it primary
    pub fn add_to_selection(&mut self, target: T) {
        self.multiple.insert(target.clone());
        self.primary = Some(target);
    }

    /// Remove `target`; the most recently added remaining item becomes primary
    pub fn remove_from_selection(&mut self, target: &T) {
        if !self.multiple.shift_remove(target) {
            return;
        }
        if self.primary.as_ref() == Some(target) {
            self.primary = self.multiple.last().cloned();
        }
    }

    /// Replace the selection with just `target`
    pub fn select_only(&mut self, target: T) {
        self.multiple.clear();
        self.add_to_selection(target);
    }

    /// Deselect everything
    pub fn clear(&mut self) {
        self.multiple.clear();
        self.primary = None;
    }

    /// Primary item
    pub fn primary(&self) -> Option<&T> {
        self.primary.as_ref()
    }

    /// Whether `target` is selected
    pub fn contains(&self, target: &T) -> bool {
        self.multiple.contains(target)
    }

    /// Selected items in selection order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.multiple.iter()
    }

    /// Number of selected items
    pub fn len(&self) -> usize {
        self.multiple.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.multiple.is_empty()
    }

    /// Keep only items accepted by `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.multiple.retain(|item| keep(item));
        if self.primary.as_ref().is_some_and(|p| !self.multiple.contains(p)) {
            self.primary = self.multiple.last().cloned();
        }
    }
}

/// Range on the timeline; equal ends form a point selection
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimelineSelection {
    start_time: f64,
    end_time: f64,
}

impl TimelineSelection {
    /// Select between two times in either order
    pub fn select(&mut self, from: f64, to: f64) {
        self.start_time = from.min(to);
        self.end_time = from.max(to);
    }

    /// Earlier end
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Later end
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Whether the selection is a single point
    pub fn is_point(&self) -> bool {
        self.start_time == self.end_time
    }

    /// Length in milliseconds
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Everything the user has selected in the editor
#[derive(Debug, Clone, Default)]
pub struct Selections {
    /// Scene objects, by record UID
    pub objects: ObjectSelection<Uid>,
    /// Keyframes, by keyframe UID
    pub keyframes: ObjectSelection<Uid>,
    /// Timeline range
    pub timeline: TimelineSelection,
}

impl Selections {
    /// Drop selected objects that no longer exist anywhere in `root`
    pub fn prune_objects(&mut self, root: &ObjectList) {
        let before = self.objects.len();
        self.objects.retain(|uid| root.find(uid).is_some());
        let dropped = before - self.objects.len();
        if dropped > 0 {
            tracing::debug!(dropped, "Pruned stale object selection");
        }
    }
}
