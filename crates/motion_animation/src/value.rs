// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interpolable value types.
//!
//! Every blend in this module is the component-wise affine combination
//! `a * (1 - p) + b * p`, never `a + (b - a) * p`.

use serde::{Deserialize, Serialize};

/// Linear interpolation between two floats
#[inline]
pub fn lerp(a: f64, b: f64, p: f64) -> f64 {
    a * (1.0 - p) + b * p
}

/// A value that can be blended between two keyframes.
pub trait Interpolate: Clone {
    /// Blend `self` towards `to` by eased progress `p`.
    fn interpolate(&self, to: &Self, p: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, p: f64) -> Self {
        lerp(*self, *to, p)
    }
}

/// 2D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Interpolate for Vec2 {
    fn interpolate(&self, to: &Self, p: f64) -> Self {
        Self {
            x: lerp(self.x, to.x, p),
            y: lerp(self.y, to.y, p),
        }
    }
}

/// 3D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vec3 {
    /// Create a new vector
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Interpolate for Vec3 {
    fn interpolate(&self, to: &Self, p: f64) -> Self {
        Self {
            x: lerp(self.x, to.x, p),
            y: lerp(self.y, to.y, p),
            z: lerp(self.z, to.z, p),
        }
    }
}

/// 4D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec4 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
    /// W component
    pub w: f64,
}

impl Vec4 {
    /// Create a new vector
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }
}

impl Interpolate for Vec4 {
    fn interpolate(&self, to: &Self, p: f64) -> Self {
        Self {
            x: lerp(self.x, to.x, p),
            y: lerp(self.y, to.y, p),
            z: lerp(self.z, to.z, p),
            w: lerp(self.w, to.w, p),
        }
    }
}

/// Fully opaque alpha on the 0-255 channel scale
pub const OPAQUE: f64 = 255.0;

/// RGBA color, every channel on a 0-255 scale.
///
/// Serialized as `{ "model": "rgba", r, g, b, a? }`; a missing alpha reads as
/// fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColorRepr", into = "ColorRepr")]
pub struct Color {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
    /// Alpha channel
    pub a: f64,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255.0, 255.0, 255.0);
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Opaque color
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: OPAQUE }
    }

    /// Color with explicit alpha
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Whether anything would be painted with this color
    pub fn is_visible(&self) -> bool {
        self.a > 0.0
    }

    /// CSS-style `rgba(r, g, b, alpha)` string with alpha normalized to 0-1
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a / OPAQUE)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Interpolate for Color {
    fn interpolate(&self, to: &Self, p: f64) -> Self {
        Self {
            r: lerp(self.r, to.r, p),
            g: lerp(self.g, to.g, p),
            b: lerp(self.b, to.b, p),
            a: lerp(self.a, to.a, p),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ColorModel {
    Rgba,
}

#[derive(Serialize, Deserialize)]
struct ColorRepr {
    model: ColorModel,
    r: f64,
    g: f64,
    b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    a: Option<f64>,
}

impl From<ColorRepr> for Color {
    fn from(repr: ColorRepr) -> Self {
        Self {
            r: repr.r,
            g: repr.g,
            b: repr.b,
            a: repr.a.unwrap_or(OPAQUE),
        }
    }
}

impl From<Color> for ColorRepr {
    fn from(color: Color) -> Self {
        Self {
            model: ColorModel::Rgba,
            r: color.r,
            g: color.g,
            b: color.b,
            a: Some(color.a),
        }
    }
}
