// SPDX-License-Identifier: MIT OR Apache-2.0
//! Anchor and origin placement.
//!
//! The same flag set describes both ends of a placement: the *anchor* is a
//! point on the parent container, the *origin* is a point on the object, and
//! layout lines the two up before applying the object's own offset.

use bitflags::bitflags;
use motion_animation::{ChoiceValue, Vec2};
use serde::{Deserialize, Serialize};

bitflags! {
    /// Reference point inside a rectangle.
    ///
    /// One row flag picks the horizontal position and one column flag the
    /// vertical one. Serialized as its raw bit value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(into = "u8", try_from = "u8")]
    pub struct Anchor: u8 {
        /// x = 0
        const ROW_LEFT = 0b000_001;
        /// x = width / 2
        const ROW_CENTER = 0b000_010;
        /// x = width
        const ROW_RIGHT = 0b000_100;
        /// y = 0
        const COL_TOP = 0b001_000;
        /// y = height / 2
        const COL_MIDDLE = 0b010_000;
        /// y = height
        const COL_BOTTOM = 0b100_000;

        /// Top left corner
        const TOP_LEFT = Self::COL_TOP.bits() | Self::ROW_LEFT.bits();
        /// Middle of the top edge
        const TOP_CENTER = Self::COL_TOP.bits() | Self::ROW_CENTER.bits();
        /// Top right corner
        const TOP_RIGHT = Self::COL_TOP.bits() | Self::ROW_RIGHT.bits();
        /// Middle of the left edge
        const MIDDLE_LEFT = Self::COL_MIDDLE.bits() | Self::ROW_LEFT.bits();
        /// Center
        const MIDDLE_CENTER = Self::COL_MIDDLE.bits() | Self::ROW_CENTER.bits();
        /// Middle of the right edge
        const MIDDLE_RIGHT = Self::COL_MIDDLE.bits() | Self::ROW_RIGHT.bits();
        /// Bottom left corner
        const BOTTOM_LEFT = Self::COL_BOTTOM.bits() | Self::ROW_LEFT.bits();
        /// Middle of the bottom edge
        const BOTTOM_CENTER = Self::COL_BOTTOM.bits() | Self::ROW_CENTER.bits();
        /// Bottom right corner
        const BOTTOM_RIGHT = Self::COL_BOTTOM.bits() | Self::ROW_RIGHT.bits();
    }
}

/// The nine named placements, row by row
const NAMED: [Anchor; 9] = [
    Anchor::TOP_LEFT,
    Anchor::TOP_CENTER,
    Anchor::TOP_RIGHT,
    Anchor::MIDDLE_LEFT,
    Anchor::MIDDLE_CENTER,
    Anchor::MIDDLE_RIGHT,
    Anchor::BOTTOM_LEFT,
    Anchor::BOTTOM_CENTER,
    Anchor::BOTTOM_RIGHT,
];

const NAMED_KEYS: [&str; 9] = [
    "topLeft",
    "topCenter",
    "topRight",
    "middleLeft",
    "middleCenter",
    "middleRight",
    "bottomLeft",
    "bottomCenter",
    "bottomRight",
];

impl Anchor {
    /// Point inside a rectangle of `size`.
    ///
    /// If several row (or column) flags are set, the first in
    /// left/center/right (top/middle/bottom) order wins; with none set the
    /// coordinate is 0.
    pub fn resolve(self, size: Vec2) -> Vec2 {
        let x = if self.contains(Self::ROW_LEFT) {
            0.0
        } else if self.contains(Self::ROW_CENTER) {
            size.x / 2.0
        } else if self.contains(Self::ROW_RIGHT) {
            size.x
        } else {
            0.0
        };

        let y = if self.contains(Self::COL_TOP) {
            0.0
        } else if self.contains(Self::COL_MIDDLE) {
            size.y / 2.0
        } else if self.contains(Self::COL_BOTTOM) {
            size.y
        } else {
            0.0
        };

        Vec2::new(x, y)
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::TOP_LEFT
    }
}

impl From<Anchor> for u8 {
    fn from(anchor: Anchor) -> Self {
        anchor.bits()
    }
}

/// Raw value with bits outside the six anchor flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid anchor bits {0:#08b}")]
pub struct InvalidAnchor(pub u8);

impl TryFrom<u8> for Anchor {
    type Error = InvalidAnchor;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Anchor::from_bits(bits).ok_or(InvalidAnchor(bits))
    }
}

impl ChoiceValue for Anchor {
    fn choices() -> &'static [Self] {
        &NAMED
    }

    fn key(&self) -> &'static str {
        NAMED
            .iter()
            .position(|named| named == self)
            .map_or("custom", |idx| NAMED_KEYS[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_resolution() {
        let size = Vec2::new(200.0, 100.0);
        assert_eq!(Anchor::TOP_LEFT.resolve(size), Vec2::new(0.0, 0.0));
        assert_eq!(Anchor::MIDDLE_CENTER.resolve(size), Vec2::new(100.0, 50.0));
        assert_eq!(Anchor::BOTTOM_RIGHT.resolve(size), Vec2::new(200.0, 100.0));
        assert_eq!(Anchor::TOP_RIGHT.resolve(size), Vec2::new(200.0, 0.0));
        assert_eq!(Anchor::BOTTOM_CENTER.resolve(size), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_partial_flags() {
        let size = Vec2::new(10.0, 10.0);
        assert_eq!(Anchor::ROW_RIGHT.resolve(size), Vec2::new(10.0, 0.0));
        assert_eq!(Anchor::empty().resolve(size), Vec2::ZERO);
        let both = Anchor::ROW_LEFT | Anchor::ROW_RIGHT | Anchor::COL_BOTTOM;
        assert_eq!(both.resolve(size), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_serializes_as_bits() {
        assert_eq!(serde_json::to_string(&Anchor::TOP_LEFT).unwrap(), "9");
        let a: Anchor = serde_json::from_str("36").unwrap();
        assert_eq!(a, Anchor::BOTTOM_RIGHT);
        assert!(serde_json::from_str::<Anchor>("64").is_err());
    }

    #[test]
    fn test_choices() {
        assert_eq!(Anchor::choices().len(), 9);
        assert_eq!(Anchor::from_key("middleRight"), Some(Anchor::MIDDLE_RIGHT));
        assert_eq!(Anchor::ROW_LEFT.key(), "custom");
    }
}
