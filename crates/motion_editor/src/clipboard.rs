// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-editor clipboard with typed slots.

use motion_animation::{Animatable, Easing, Keyframe, KeyframeKey, Uid};
use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;

/// Typed clipboard slot, identified by name
pub struct ClipboardSlot<T> {
    name: &'static str,
    marker: PhantomData<fn() -> T>,
}

impl<T> ClipboardSlot<T> {
    /// Declare a slot
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            marker: PhantomData,
        }
    }

    /// Slot name
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Copied easing curve
pub const EASING: ClipboardSlot<Easing> = ClipboardSlot::new("Easing");

/// Copied scalar keyframes
pub const SCALAR_KEYFRAMES: ClipboardSlot<KeyframeClip<f64>> = ClipboardSlot::new("ScalarKeyframes");

/// Keyframes copied from one timeline, with times relative to the earliest
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeClip<T> {
    keyframes: Vec<Keyframe<T>>,
}

impl<T: Clone> KeyframeClip<T> {
    /// Copy the keyframes named by `uids`; unknown UIDs are ignored
    pub fn copy<K: KeyframeKey>(animatable: &Animatable<T>, uids: &[K]) -> Self {
        let mut keyframes: Vec<Keyframe<T>> = animatable
            .iter()
            .filter(|k| uids.iter().any(|uid| uid.keyframe_uid() == k.uid.as_str()))
            .cloned()
            .collect();
        if let Some(first) = keyframes.first().map(|k| k.time) {
            for keyframe in &mut keyframes {
                keyframe.time -= first;
            }
        }
        Self { keyframes }
    }

    /// Number of copied keyframes
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Whether nothing was copied
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Insert the clip starting at `time` and return the resulting UIDs.
    ///
    /// Pasted keyframes get fresh UIDs, except where one lands on an existing
    /// keyframe's time and overwrites it in place.
    pub fn paste(&self, animatable: &mut Animatable<T>, time: f64) -> Vec<Uid> {
        self.keyframes
            .iter()
            .map(|k| animatable.insert(time + k.time, k.value.clone(), Some(k.easing)).uid.clone())
            .collect()
    }
}

/// Clipboard contents by slot
#[derive(Default)]
pub struct Clipboard {
    entries: HashMap<&'static str, Box<dyn Any>>,
}

impl Clipboard {
    /// Empty clipboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the slot's content
    pub fn get<T: Clone + 'static>(&self, slot: &ClipboardSlot<T>) -> Option<T> {
        self.entries
            .get(slot.name)
            .and_then(|content| content.downcast_ref::<T>())
            .cloned()
    }

    /// Replace the slot's content
    pub fn set<T: Clone + 'static>(&mut self, slot: &ClipboardSlot<T>, content: T) {
        tracing::debug!(slot = slot.name, "Copied to clipboard");
        self.entries.insert(slot.name, Box::new(content));
    }

    /// Empty one slot
    pub fn clear<T>(&mut self, slot: &ClipboardSlot<T>) {
        self.entries.remove(slot.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motion_animation::{BezierEasing, Vec2};

    #[test]
    fn test_easing_slot() {
        let mut clipboard = Clipboard::new();
        assert_eq!(clipboard.get(&EASING), None);

        let curve = Easing::Bezier(BezierEasing::new(Vec2::new(0.3, 0.0), Vec2::new(-0.3, 0.0)));
        clipboard.set(&EASING, curve);
        assert_eq!(clipboard.get(&EASING), Some(curve));
        assert_eq!(clipboard.get(&EASING), Some(curve));

        clipboard.clear(&EASING);
        assert_eq!(clipboard.get(&EASING), None);
    }

    #[test]
    fn test_paste_reissues_uids_and_offsets() {
        let mut source = Animatable::scalar("x", 0.0);
        let a = source.insert(100.0, 1.0, None).uid.clone();
        let b = source.insert(250.0, 2.0, Some(Easing::EaseIn)).uid.clone();
        source.insert(400.0, 3.0, None);

        let clip = KeyframeClip::copy(&source, &[a.clone(), b.clone()]);
        let mut clipboard = Clipboard::new();
        clipboard.set(&SCALAR_KEYFRAMES, clip);

        let mut target = Animatable::scalar("y", 0.0);
        let pasted = clipboard.get(&SCALAR_KEYFRAMES).unwrap().paste(&mut target, 1000.0);

        assert_eq!(pasted.len(), 2);
        assert!(!pasted.contains(&a) && !pasted.contains(&b));
        let times: Vec<f64> = target.iter().map(|k| k.time).collect();
        assert_eq!(times, vec![1000.0, 1150.0]);
        assert_eq!(target.keyframes()[1].easing, Easing::EaseIn);
    }

    #[test]
    fn test_paste_twice_into_same_timeline() {
        let mut source = Animatable::scalar("x", 0.0);
        let a = source.insert(0.0, 5.0, None).uid.clone();
        let clip = KeyframeClip::copy(&source, &[a]);

        let first = clip.paste(&mut source, 500.0);
        let second = clip.paste(&mut source, 900.0);
        assert_ne!(first, second);
        assert_eq!(source.len(), 3);
    }
}
