// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions.

use crate::easing::Easing;
use crate::uid::Uid;
use serde::{Deserialize, Serialize};

/// A keyframe on one property's timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    /// Unique ID within the owning timeline
    pub uid: Uid,
    /// Scene-relative time in milliseconds
    pub time: f64,
    /// Value at this keyframe
    pub value: T,
    /// Easing from the previous keyframe into this one
    pub easing: Easing,
}

impl<T> Keyframe<T> {
    /// Create a new keyframe with a fresh ID
    pub fn new(time: f64, value: T) -> Self {
        Self {
            uid: Uid::new(),
            time,
            value,
            easing: Easing::Linear,
        }
    }

    /// Set easing
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// Anything that names a keyframe by its UID.
///
/// Timeline lookups go through this, never through reference identity, so a
/// stale or cloned keyframe still finds the live one.
pub trait KeyframeKey {
    /// The UID being referred to
    fn keyframe_uid(&self) -> &str;
}

impl KeyframeKey for str {
    fn keyframe_uid(&self) -> &str {
        self
    }
}

impl KeyframeKey for String {
    fn keyframe_uid(&self) -> &str {
        self
    }
}

impl KeyframeKey for Uid {
    fn keyframe_uid(&self) -> &str {
        self.as_str()
    }
}

impl<T> KeyframeKey for Keyframe<T> {
    fn keyframe_uid(&self) -> &str {
        self.uid.as_str()
    }
}

/// Partial update applied by `Animatable::modify`
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeModification<T> {
    /// New time
    pub time: Option<f64>,
    /// New value
    pub value: Option<T>,
    /// New easing
    pub easing: Option<Easing>,
}

impl<T> Default for KeyframeModification<T> {
    fn default() -> Self {
        Self {
            time: None,
            value: None,
            easing: None,
        }
    }
}

impl<T> KeyframeModification<T> {
    /// Empty modification
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the keyframe
    pub fn time(mut self, time: f64) -> Self {
        self.time = Some(time);
        self
    }

    /// Replace the value
    pub fn value(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }

    /// Replace the easing
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Whether nothing would change
    pub fn is_empty(&self) -> bool {
        self.time.is_none() && self.value.is_none() && self.easing.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyframe_defaults_to_linear() {
        let kf = Keyframe::new(10.0, 1.5);
        assert_eq!(kf.easing, Easing::Linear);
        assert_eq!(kf.keyframe_uid(), kf.uid.as_str());
    }

    #[test]
    fn test_keyframe_json_field_names() {
        let kf = Keyframe {
            uid: Uid::from("k1"),
            time: 250.0,
            value: 3.0,
            easing: Easing::EaseOut,
        };
        let json = serde_json::to_value(&kf).unwrap();
        assert_eq!(json["uid"], "k1");
        assert_eq!(json["time"], 250.0);
        assert_eq!(json["value"], 3.0);
        assert_eq!(json["easing"], "ease-out");
    }

    #[test]
    fn test_modification_builder() {
        let m = KeyframeModification::new().time(5.0).easing(Easing::Hold);
        assert_eq!(m.time, Some(5.0));
        assert_eq!(m.value, None::<f64>);
        assert!(!m.is_empty());
        assert!(KeyframeModification::<f64>::new().is_empty());
    }
}
