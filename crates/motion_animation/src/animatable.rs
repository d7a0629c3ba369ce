// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animatable property timelines.
//!
//! An [`Animatable`] owns a default value and a time-sorted list of keyframes.
//! Sampling is a pure function of the keyframes and the queried time, so
//! scrubbing, seeking backwards and export resampling all agree.

use crate::easing::Easing;
use crate::keyframe::{Keyframe, KeyframeKey, KeyframeModification};
use crate::uid::Uid;
use crate::value::{Color, Interpolate, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Blend function used between two keyframes
pub type Interpolator<T> = fn(&T, &T, f64) -> T;

/// Time ordering used for every search and sort.
///
/// `-0.0` and `0.0` compare equal; NaN falls back to the IEEE total order so
/// the comparison stays total.
fn compare_time(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Serialized form of an [`Animatable`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializableAnimatable<T> {
    /// Value used when there are no keyframes, or before the first one
    pub default_value: T,
    /// Keyframes; stored order is not trusted on load
    pub keyframes: Vec<Keyframe<T>>,
}

/// Keyframed timeline of a single property
#[derive(Clone)]
pub struct Animatable<T> {
    translation_key: String,
    /// Value used when there are no keyframes, or before the first one
    pub default_value: T,
    keyframes: Vec<Keyframe<T>>,
    interpolator: Interpolator<T>,
}

impl<T: Interpolate> Animatable<T> {
    /// Create an animatable using the value type's own blend
    pub fn new(translation_key: impl Into<String>, default_value: T) -> Self {
        Self::with_interpolator(translation_key, default_value, T::interpolate)
    }

    /// Rebuild an animatable from its serialized form
    pub fn from_serializable(translation_key: impl Into<String>, data: SerializableAnimatable<T>) -> Self {
        let mut out = Self::new(translation_key, data.default_value.clone());
        out.load_serializable(data);
        out
    }
}

impl Animatable<f64> {
    /// Scalar property
    pub fn scalar(translation_key: impl Into<String>, default_value: f64) -> Self {
        Self::new(translation_key, default_value)
    }
}

impl Animatable<Vec2> {
    /// 2D vector property
    pub fn vec2(translation_key: impl Into<String>, default_value: Vec2) -> Self {
        Self::new(translation_key, default_value)
    }
}

impl Animatable<Vec3> {
    /// 3D vector property
    pub fn vec3(translation_key: impl Into<String>, default_value: Vec3) -> Self {
        Self::new(translation_key, default_value)
    }
}

impl Animatable<Vec4> {
    /// 4D vector property
    pub fn vec4(translation_key: impl Into<String>, default_value: Vec4) -> Self {
        Self::new(translation_key, default_value)
    }
}

impl Animatable<Color> {
    /// RGBA color property
    pub fn color(translation_key: impl Into<String>, default_value: Color) -> Self {
        Self::new(translation_key, default_value)
    }
}

impl<T: Clone> Animatable<T> {
    /// Create an animatable with a custom blend function
    pub fn with_interpolator(
        translation_key: impl Into<String>,
        default_value: T,
        interpolator: Interpolator<T>,
    ) -> Self {
        Self {
            translation_key: translation_key.into(),
            default_value,
            keyframes: Vec::new(),
            interpolator,
        }
    }

    /// Display key of this property (`property.<key>.name`)
    pub fn translation_key(&self) -> &str {
        &self.translation_key
    }

    /// Whether at least one keyframe exists
    pub fn animated(&self) -> bool {
        !self.keyframes.is_empty()
    }

    /// Number of keyframes
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Whether there are no keyframes
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// All keyframes in ascending time order
    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    /// Iterate keyframes in ascending time order
    pub fn iter(&self) -> std::slice::Iter<'_, Keyframe<T>> {
        self.keyframes.iter()
    }

    /// Keyframes with `start <= time <= end`, ascending
    pub fn keyframes_in_range(&self, start: f64, end: f64) -> impl Iterator<Item = &Keyframe<T>> + '_ {
        let first = self
            .keyframes
            .partition_point(|k| compare_time(k.time, start) == Ordering::Less);
        self.keyframes[first..]
            .iter()
            .take_while(move |k| compare_time(k.time, end) != Ordering::Greater)
    }

    fn search(&self, time: f64) -> Result<usize, usize> {
        self.keyframes.binary_search_by(|k| compare_time(k.time, time))
    }

    fn position_of(&self, uid: &str) -> Option<usize> {
        self.keyframes.iter().position(|k| k.uid.as_str() == uid)
    }

    /// Sample the property at `time`.
    ///
    /// Before the first keyframe this is the default value, not the first
    /// keyframe's value. After the last keyframe the last value holds.
    pub fn get(&self, time: f64) -> T {
        if self.keyframes.is_empty() {
            return self.default_value.clone();
        }

        let insert_at = match self.search(time) {
            Ok(idx) => return self.keyframes[idx].value.clone(),
            Err(0) => return self.default_value.clone(),
            Err(idx) => idx,
        };

        let prev = &self.keyframes[insert_at - 1];
        let Some(next) = self.keyframes.get(insert_at) else {
            return prev.value.clone();
        };

        let progress = (time - prev.time) / (next.time - prev.time);
        (self.interpolator)(&prev.value, &next.value, next.easing.evaluate(progress))
    }

    /// Write `value` at `time`.
    ///
    /// Overwrites the keyframe at exactly `time` if there is one. Otherwise a
    /// new keyframe is inserted, inheriting the easing of the next keyframe,
    /// else the previous one, else linear.
    pub fn set(&mut self, time: f64, value: T) -> &Keyframe<T> {
        match self.search(time) {
            Ok(idx) => {
                self.keyframes[idx].value = value;
                &self.keyframes[idx]
            }
            Err(idx) => {
                let easing = self
                    .keyframes
                    .get(idx)
                    .or_else(|| idx.checked_sub(1).and_then(|prev| self.keyframes.get(prev)))
                    .map_or(Easing::Linear, |k| k.easing);
                self.insert_at(idx, Keyframe::new(time, value).with_easing(easing))
            }
        }
    }

    /// Insert a keyframe, linear unless an easing is given.
    ///
    /// A keyframe already sitting at exactly `time` is updated in place (value,
    /// and easing when given) instead of gaining a duplicate.
    pub fn insert(&mut self, time: f64, value: T, easing: Option<Easing>) -> &Keyframe<T> {
        match self.search(time) {
            Ok(idx) => {
                let existing = &mut self.keyframes[idx];
                existing.value = value;
                if let Some(easing) = easing {
                    existing.easing = easing;
                }
                tracing::debug!(property = %self.translation_key, uid = %existing.uid, time, "Overwrote keyframe");
                &self.keyframes[idx]
            }
            Err(idx) => {
                let kf = Keyframe::new(time, value).with_easing(easing.unwrap_or_default());
                tracing::debug!(property = %self.translation_key, uid = %kf.uid, time, "Inserted keyframe");
                self.insert_at(idx, kf)
            }
        }
    }

    fn insert_at(&mut self, idx: usize, keyframe: Keyframe<T>) -> &Keyframe<T> {
        self.keyframes.insert(idx, keyframe);
        &self.keyframes[idx]
    }

    /// Apply a partial update to the keyframe with the given UID.
    ///
    /// Returns `None` when no such keyframe exists. A time change re-sorts the
    /// timeline (stable); another keyframe already at the new time is dropped.
    pub fn modify<K>(&mut self, keyframe: &K, modification: KeyframeModification<T>) -> Option<&Keyframe<T>>
    where
        K: KeyframeKey + ?Sized,
    {
        let uid = keyframe.keyframe_uid();
        let idx = self.position_of(uid)?;
        let kf = &mut self.keyframes[idx];

        if let Some(value) = modification.value {
            kf.value = value;
        }
        if let Some(easing) = modification.easing {
            kf.easing = easing;
        }

        let Some(time) = modification.time else {
            return Some(&self.keyframes[idx]);
        };

        kf.time = time;
        let moved = kf.uid.clone();
        let before = self.keyframes.len();
        self.keyframes
            .retain(|k| k.uid == moved || compare_time(k.time, time) != Ordering::Equal);
        self.keyframes.sort_by(|a, b| compare_time(a.time, b.time));
        tracing::debug!(
            property = %self.translation_key,
            uid = %moved,
            time,
            replaced = before - self.keyframes.len(),
            "Moved keyframe"
        );

        let idx = self.position_of(moved.as_str())?;
        Some(&self.keyframes[idx])
    }

    /// Remove the keyframe with the given UID
    pub fn delete<K>(&mut self, keyframe: &K) -> bool
    where
        K: KeyframeKey + ?Sized,
    {
        match self.position_of(keyframe.keyframe_uid()) {
            Some(idx) => {
                let removed = self.keyframes.remove(idx);
                tracing::debug!(property = %self.translation_key, uid = %removed.uid, time = removed.time, "Deleted keyframe");
                true
            }
            None => false,
        }
    }

    /// Keyframe at exactly `time`, no interpolation
    pub fn get_keyframe(&self, time: f64) -> Option<&Keyframe<T>> {
        self.search(time).ok().map(|idx| &self.keyframes[idx])
    }

    /// Keyframe by UID
    pub fn keyframe<K>(&self, keyframe: &K) -> Option<&Keyframe<T>>
    where
        K: KeyframeKey + ?Sized,
    {
        self.position_of(keyframe.keyframe_uid()).map(|idx| &self.keyframes[idx])
    }

    /// Remove every keyframe; the default value applies at all times afterwards
    pub fn clear(&mut self) {
        tracing::debug!(property = %self.translation_key, count = self.keyframes.len(), "Cleared keyframes");
        self.keyframes.clear();
    }

    /// Deep copy of the default value and keyframes
    pub fn serializable(&self) -> SerializableAnimatable<T> {
        SerializableAnimatable {
            default_value: self.default_value.clone(),
            keyframes: self.keyframes.clone(),
        }
    }

    /// Replace the contents with serialized data, re-sorting by time.
    ///
    /// If the data holds several keyframes at the same time, the one stored
    /// last wins.
    pub fn load_serializable(&mut self, data: SerializableAnimatable<T>) -> &mut Self {
        self.default_value = data.default_value;
        let mut keyframes = data.keyframes;
        keyframes.sort_by(|a, b| compare_time(a.time, b.time));

        let before = keyframes.len();
        keyframes.reverse();
        keyframes.dedup_by(|a, b| compare_time(a.time, b.time) == Ordering::Equal);
        keyframes.reverse();
        if keyframes.len() != before {
            tracing::warn!(
                property = %self.translation_key,
                dropped = before - keyframes.len(),
                "Dropped keyframes sharing a time"
            );
        }

        self.keyframes = keyframes;
        self
    }

    /// Keyframe UIDs in time order
    pub fn uids(&self) -> impl Iterator<Item = &Uid> + '_ {
        self.keyframes.iter().map(|k| &k.uid)
    }
}

impl<'a, T> IntoIterator for &'a Animatable<T> {
    type Item = &'a Keyframe<T>;
    type IntoIter = std::slice::Iter<'a, Keyframe<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keyframes.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Animatable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animatable")
            .field("translation_key", &self.translation_key)
            .field("default_value", &self.default_value)
            .field("keyframes", &self.keyframes)
            .finish()
    }
}
