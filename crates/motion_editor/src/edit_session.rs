// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe drag sessions.
//!
//! A session remembers which keyframe is being edited by UID and accumulates
//! the pending change. Nothing touches the timeline until [`commit`], which
//! applies everything with a single `modify` call. Deleting the keyframe
//! mid-drag simply makes the commit a no-op.
//!
//! [`commit`]: KeyframeEditSession::commit

use crate::snapping::TimelineSnapping;
use motion_animation::{Animatable, Easing, Keyframe, KeyframeModification, Uid};
use motion_scene::ObjectList;

/// Pending edit of one keyframe
#[derive(Debug, Clone)]
pub struct KeyframeEditSession<T> {
    uid: Uid,
    initial_time: f64,
    time_offset: f64,
    value: Option<T>,
    easing: Option<Easing>,
}

impl<T: Clone> KeyframeEditSession<T> {
    /// Start editing `keyframe`
    pub fn begin(keyframe: &Keyframe<T>) -> Self {
        Self {
            uid: keyframe.uid.clone(),
            initial_time: keyframe.time,
            time_offset: 0.0,
            value: None,
            easing: None,
        }
    }

    /// UID of the edited keyframe
    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    /// Set the total drag offset from the initial time
    pub fn drag_to(&mut self, time_offset: f64) {
        self.time_offset = time_offset;
    }

    /// Drag by `time_offset`, then snap the resulting time with `snapping`
    /// against the edges of `objects`
    pub fn drag_to_snapped(&mut self, time_offset: f64, snapping: &TimelineSnapping, objects: &ObjectList) {
        let snapped = snapping.snap(self.initial_time + time_offset, objects);
        self.time_offset = snapped - self.initial_time;
    }

    /// Replace the value on commit
    pub fn set_value(&mut self, value: T) {
        self.value = Some(value);
    }

    /// Replace the easing on commit
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = Some(easing);
    }

    /// Time the keyframe will have after commit
    pub fn preview_time(&self) -> f64 {
        self.initial_time + self.time_offset
    }

    /// Whether committing would change anything
    pub fn is_dirty(&self) -> bool {
        self.time_offset != 0.0 || self.value.is_some() || self.easing.is_some()
    }

    /// Apply the pending change.
    ///
    /// Returns the updated keyframe, or `None` when it no longer exists.
    pub fn commit(self, animatable: &mut Animatable<T>) -> Option<&Keyframe<T>> {
        let mut modification = KeyframeModification::new();
        if self.time_offset != 0.0 {
            modification = modification.time(self.preview_time());
        }
        modification.value = self.value;
        modification.easing = self.easing;

        if modification.is_empty() {
            return animatable.keyframe(&self.uid);
        }
        let committed = animatable.modify(&self.uid, modification);
        if committed.is_none() {
            tracing::debug!(uid = %self.uid, "Edited keyframe no longer exists");
        }
        committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline() -> Animatable<f64> {
        let mut a = Animatable::scalar("x", 0.0);
        a.insert(0.0, 0.0, None);
        a.insert(100.0, 10.0, None);
        a.insert(200.0, 20.0, None);
        a
    }

    #[test]
    fn test_commit_applies_everything_once() {
        let mut a = timeline();
        let mut session = KeyframeEditSession::begin(&a.keyframes()[1]);
        session.drag_to(30.0);
        session.drag_to(50.0);
        session.set_value(15.0);
        session.set_easing(Easing::Hold);
        assert_eq!(session.preview_time(), 150.0);

        let committed = session.commit(&mut a).unwrap();
        assert_eq!(committed.time, 150.0);
        assert_eq!(committed.value, 15.0);
        assert_eq!(committed.easing, Easing::Hold);
        assert_eq!(a.len(), 3);
        assert_eq!(a.get(100.0), 0.0);
    }

    #[test]
    fn test_drag_past_neighbor_resorts() {
        let mut a = timeline();
        let uid = a.keyframes()[0].uid.clone();
        let mut session = KeyframeEditSession::begin(&a.keyframes()[0]);
        session.drag_to(150.0);
        session.commit(&mut a).unwrap();

        let times: Vec<f64> = a.iter().map(|k| k.time).collect();
        assert_eq!(times, vec![100.0, 150.0, 200.0]);
        assert_eq!(a.keyframes()[1].uid, uid);
    }

    #[test]
    fn test_deleted_keyframe_commits_nothing() {
        let mut a = timeline();
        let mut session = KeyframeEditSession::begin(&a.keyframes()[2]);
        session.drag_to(-10.0);
        let uid = session.uid().clone();
        assert!(a.delete(&uid));
        assert!(session.commit(&mut a).is_none());
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_snapped_drag_uses_configured_grid() {
        let mut config = crate::config::EditorConfig::default();
        config.snapping = TimelineSnapping::Grid { ms_per_segment: 25.0 };

        let mut a = timeline();
        let mut session = KeyframeEditSession::begin(&a.keyframes()[1]);
        session.drag_to_snapped(30.0, &config.snapping, &ObjectList::new());
        assert_eq!(session.preview_time(), 125.0);

        session.drag_to_snapped(30.0, &TimelineSnapping::Free, &ObjectList::new());
        assert_eq!(session.commit(&mut a).map(|k| k.time), Some(130.0));
    }

    #[test]
    fn test_clean_session() {
        let mut a = timeline();
        let session = KeyframeEditSession::begin(&a.keyframes()[0]);
        assert!(!session.is_dirty());
        assert_eq!(session.commit(&mut a).map(|k| k.time), Some(0.0));
    }
}
