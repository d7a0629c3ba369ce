// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe animation engine for the motion editor.
//!
//! This crate provides the time-domain half of the editor:
//! - Easing curves, including cubic bezier
//! - Interpolable values (scalars, vectors, RGBA colors)
//! - Keyframed property timelines
//! - Type-erased property facades for editor panels
//!
//! ## Architecture
//!
//! Every animated field of a scene object is an [`Animatable`]. Sampling a
//! timeline is a pure function of its keyframes and the queried time, which
//! is what lets scrubbing, playback and export share one evaluation path.

pub mod animatable;
pub mod easing;
pub mod keyframe;
pub mod property;
pub mod uid;
pub mod value;

pub use animatable::{Animatable, Interpolator, SerializableAnimatable};
pub use easing::{BezierEasing, Easing};
pub use keyframe::{Keyframe, KeyframeKey, KeyframeModification};
pub use property::{
    AnimatableProperty, BasicProperty, ChoiceValue, EnumProperty, KeyframeSummary, ObjectProperty, PropertyError,
    PropertyKind, PropertyType, PropertyValue,
};
pub use uid::Uid;
pub use value::{lerp, Color, Interpolate, Vec2, Vec3, Vec4};
