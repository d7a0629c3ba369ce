// SPDX-License-Identifier: MIT OR Apache-2.0
//! Uniform property access for editors.
//!
//! Scene objects expose their fields as [`ObjectProperty`] trait objects so a
//! property panel or timeline can read and write them without knowing the
//! concrete object type. Values cross the boundary as [`PropertyValue`].

use crate::animatable::Animatable;
use crate::easing::Easing;
use crate::keyframe::KeyframeModification;
use crate::uid::Uid;
use crate::value::{Color, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Property errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    /// The written value has the wrong kind for this property
    #[error("property `{property}` expects {expected:?}, got {found:?}")]
    TypeMismatch {
        /// Translation key of the property
        property: String,
        /// Kind the property holds
        expected: PropertyKind,
        /// Kind that was supplied
        found: PropertyKind,
    },
    /// Choice key not among the allowed values
    #[error("property `{property}` has no choice `{key}`")]
    UnknownChoice {
        /// Translation key of the property
        property: String,
        /// Rejected key
        key: String,
    },
}

/// Kind of value a property holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyKind {
    /// Single number
    Scalar,
    /// 2D vector
    Vec2,
    /// 3D vector
    Vec3,
    /// 4D vector
    Vec4,
    /// RGBA color
    Color,
    /// Checkbox
    Bool,
    /// Free text
    Text,
    /// One of a fixed set of keys
    Choice,
}

/// Type-erased property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum PropertyValue {
    /// Single number
    Scalar(f64),
    /// 2D vector
    Vec2(Vec2),
    /// 3D vector
    Vec3(Vec3),
    /// 4D vector
    Vec4(Vec4),
    /// RGBA color
    Color(Color),
    /// Checkbox
    Bool(bool),
    /// Free text
    Text(String),
    /// Choice key
    Choice(String),
}

impl PropertyValue {
    /// Kind of this value
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Scalar(_) => PropertyKind::Scalar,
            PropertyValue::Vec2(_) => PropertyKind::Vec2,
            PropertyValue::Vec3(_) => PropertyKind::Vec3,
            PropertyValue::Vec4(_) => PropertyKind::Vec4,
            PropertyValue::Color(_) => PropertyKind::Color,
            PropertyValue::Bool(_) => PropertyKind::Bool,
            PropertyValue::Text(_) => PropertyKind::Text,
            PropertyValue::Choice(_) => PropertyKind::Choice,
        }
    }
}

/// Rust types that map onto a [`PropertyValue`] variant
pub trait PropertyType: Clone {
    /// Kind produced by this type
    const KIND: PropertyKind;

    /// Wrap into the erased form
    fn into_property_value(self) -> PropertyValue;

    /// Unwrap from the erased form, `None` on kind mismatch
    fn from_property_value(value: PropertyValue) -> Option<Self>;
}

macro_rules! impl_property_type {
    ($ty:ty, $variant:ident) => {
        impl PropertyType for $ty {
            const KIND: PropertyKind = PropertyKind::$variant;

            fn into_property_value(self) -> PropertyValue {
                PropertyValue::$variant(self)
            }

            fn from_property_value(value: PropertyValue) -> Option<Self> {
                match value {
                    PropertyValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_property_type!(f64, Scalar);
impl_property_type!(Vec2, Vec2);
impl_property_type!(Vec3, Vec3);
impl_property_type!(Vec4, Vec4);
impl_property_type!(Color, Color);
impl_property_type!(bool, Bool);
impl_property_type!(String, Text);

/// Closed set of named values, for enum-like properties
pub trait ChoiceValue: Clone + 'static {
    /// Every allowed value, in menu order
    fn choices() -> &'static [Self];

    /// Stable key of this value
    fn key(&self) -> &'static str;

    /// Value for a key
    fn from_key(key: &str) -> Option<Self> {
        Self::choices().iter().find(|c| c.key() == key).cloned()
    }
}

/// Keyframe position as seen through a type-erased property
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeSummary {
    /// Keyframe ID
    pub uid: Uid,
    /// Keyframe time in milliseconds
    pub time: f64,
    /// Easing into the keyframe
    pub easing: Easing,
}

/// A single editable field of a scene object
pub trait ObjectProperty {
    /// Display key (`property.<key>.name`)
    fn translation_key(&self) -> &str;

    /// Kind of value held
    fn kind(&self) -> PropertyKind;

    /// Whether the property can carry keyframes
    fn is_animatable(&self) -> bool {
        false
    }

    /// Value at `time`; static properties ignore the time
    fn get(&self, time: f64) -> PropertyValue;

    /// Write a value at `time`
    fn set(&mut self, time: f64, value: PropertyValue) -> Result<(), PropertyError>;

    /// Allowed keys for choice properties
    fn choices(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Keyframes in time order; empty for static properties
    fn keyframes(&self) -> Vec<KeyframeSummary> {
        Vec::new()
    }

    /// Move or re-ease a keyframe by UID. Returns `false` when not found.
    fn modify_keyframe(&mut self, _uid: &str, _time: Option<f64>, _easing: Option<Easing>) -> bool {
        false
    }

    /// Delete a keyframe by UID. Returns `false` when not found.
    fn delete_keyframe(&mut self, _uid: &str) -> bool {
        false
    }
}

fn mismatch(property: &str, expected: PropertyKind, found: &PropertyValue) -> PropertyError {
    PropertyError::TypeMismatch {
        property: property.to_owned(),
        expected,
        found: found.kind(),
    }
}

/// Facade over an [`Animatable`] timeline
pub struct AnimatableProperty<'a, T> {
    animatable: &'a mut Animatable<T>,
}

impl<'a, T> AnimatableProperty<'a, T> {
    /// Wrap a timeline
    pub fn new(animatable: &'a mut Animatable<T>) -> Self {
        Self { animatable }
    }
}

impl<T: PropertyType> ObjectProperty for AnimatableProperty<'_, T> {
    fn translation_key(&self) -> &str {
        self.animatable.translation_key()
    }

    fn kind(&self) -> PropertyKind {
        T::KIND
    }

    fn is_animatable(&self) -> bool {
        true
    }

    fn get(&self, time: f64) -> PropertyValue {
        self.animatable.get(time).into_property_value()
    }

    /// Writes a keyframe when the timeline is animated, otherwise replaces
    /// the default value.
    fn set(&mut self, time: f64, value: PropertyValue) -> Result<(), PropertyError> {
        let key = self.animatable.translation_key();
        let typed = T::from_property_value(value.clone()).ok_or_else(|| mismatch(key, T::KIND, &value))?;

        if self.animatable.animated() {
            self.animatable.set(time, typed);
        } else {
            self.animatable.default_value = typed;
        }
        Ok(())
    }

    fn keyframes(&self) -> Vec<KeyframeSummary> {
        self.animatable
            .iter()
            .map(|k| KeyframeSummary {
                uid: k.uid.clone(),
                time: k.time,
                easing: k.easing,
            })
            .collect()
    }

    fn modify_keyframe(&mut self, uid: &str, time: Option<f64>, easing: Option<Easing>) -> bool {
        let modification = KeyframeModification {
            time,
            value: None,
            easing,
        };
        self.animatable.modify(uid, modification).is_some()
    }

    fn delete_keyframe(&mut self, uid: &str) -> bool {
        self.animatable.delete(uid)
    }
}

/// Facade over a plain, non-animated field
pub struct BasicProperty<'a, T> {
    translation_key: &'static str,
    field: &'a mut T,
}

impl<'a, T> BasicProperty<'a, T> {
    /// Wrap a field
    pub fn new(translation_key: &'static str, field: &'a mut T) -> Self {
        Self { translation_key, field }
    }
}

impl<T: PropertyType> ObjectProperty for BasicProperty<'_, T> {
    fn translation_key(&self) -> &str {
        self.translation_key
    }

    fn kind(&self) -> PropertyKind {
        T::KIND
    }

    fn get(&self, _time: f64) -> PropertyValue {
        self.field.clone().into_property_value()
    }

    fn set(&mut self, _time: f64, value: PropertyValue) -> Result<(), PropertyError> {
        let typed =
            T::from_property_value(value.clone()).ok_or_else(|| mismatch(self.translation_key, T::KIND, &value))?;
        *self.field = typed;
        Ok(())
    }
}

/// Facade over a field holding one of a closed set of values
pub struct EnumProperty<'a, T> {
    translation_key: &'static str,
    field: &'a mut T,
}

impl<'a, T> EnumProperty<'a, T> {
    /// Wrap a field
    pub fn new(translation_key: &'static str, field: &'a mut T) -> Self {
        Self { translation_key, field }
    }
}

impl<T: ChoiceValue> ObjectProperty for EnumProperty<'_, T> {
    fn translation_key(&self) -> &str {
        self.translation_key
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::Choice
    }

    fn get(&self, _time: f64) -> PropertyValue {
        PropertyValue::Choice(self.field.key().to_owned())
    }

    fn set(&mut self, _time: f64, value: PropertyValue) -> Result<(), PropertyError> {
        let PropertyValue::Choice(key) = value else {
            return Err(mismatch(self.translation_key, PropertyKind::Choice, &value));
        };
        *self.field = T::from_key(&key).ok_or_else(|| PropertyError::UnknownChoice {
            property: self.translation_key.to_owned(),
            key,
        })?;
        Ok(())
    }

    fn choices(&self) -> Vec<&'static str> {
        T::choices().iter().map(ChoiceValue::key).collect()
    }
}
