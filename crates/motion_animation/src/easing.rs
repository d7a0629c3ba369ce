// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing curves.
//!
//! The easing stored on a keyframe shapes the interpolation that *arrives* at
//! that keyframe from its predecessor.

use crate::value::Vec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Bisection stops once the search interval is narrower than this
const BEZIER_TOLERANCE: f64 = 1e-6;

/// Upper bound on bisection steps; 2^-20 is already below the tolerance
const BEZIER_MAX_STEPS: u32 = 20;

/// Easing function between two keyframes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "EasingRepr", into = "EasingRepr")]
pub enum Easing {
    /// Progress unchanged
    #[default]
    Linear,
    /// Step: holds the previous value until the next keyframe time
    Hold,
    /// Sine ease in
    EaseIn,
    /// Sine ease out
    EaseOut,
    /// Sine ease in and out
    EaseInOut,
    /// Cubic bezier with endpoints fixed at (0,0) and (1,1)
    Bezier(BezierEasing),
}

/// Control points of a bezier easing.
///
/// `start_control_point` is an offset from (0,0) and `end_control_point` an
/// offset from (1,1), both in normalized (time, value) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BezierEasing {
    /// First control point, relative to the curve start
    pub start_control_point: Vec2,
    /// Second control point, relative to the curve end
    pub end_control_point: Vec2,
}

impl BezierEasing {
    /// Create a bezier easing from its two control offsets
    pub const fn new(start_control_point: Vec2, end_control_point: Vec2) -> Self {
        Self {
            start_control_point,
            end_control_point,
        }
    }

    /// Evaluate the curve at time fraction `x`.
    ///
    /// Bisects the parametric time axis for the parameter whose x matches the
    /// query and returns the paired y. The step count is bounded, so control
    /// points that fold the time axis back on itself still terminate with some
    /// value; they are not clamped or rejected.
    pub fn evaluate(&self, x: f64) -> f64 {
        let (cx1, cx2) = (self.start_control_point.x, self.end_control_point.x);
        let (cy1, cy2) = (self.start_control_point.y, self.end_control_point.y);
        let mut start = 0.0;
        let mut end = 1.0;

        for _ in 0..BEZIER_MAX_STEPS {
            if end - start <= BEZIER_TOLERANCE {
                break;
            }

            let mid = (start + end) / 2.0;
            let xr = parametric_bezier(cx1, cx2, mid);

            if x > xr {
                start = mid;
            } else if x < xr {
                end = mid;
            } else {
                return parametric_bezier(cy1, cy2, mid);
            }
        }

        parametric_bezier(cy1, cy2, (start + end) / 2.0)
    }
}

/// One axis of the cubic Bernstein form with P0 = 0 and P3 = 1
fn parametric_bezier(cp1: f64, cp2: f64, p: f64) -> f64 {
    let inv = 1.0 - p;
    3.0 * inv * inv * p * cp1 + 3.0 * inv * p * p * (cp2 + 1.0) + p * p * p
}

impl Easing {
    /// All preset easings, in menu order
    pub const PRESETS: [Easing; 5] = [
        Easing::Linear,
        Easing::Hold,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    /// Map normalized progress `x` (0 at the previous keyframe, 1 at this one)
    /// to eased progress.
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            Easing::Linear => x,
            Easing::Hold => 0.0,
            Easing::EaseIn => 1.0 - (x * PI / 2.0).cos(),
            Easing::EaseOut => (x * PI / 2.0).sin(),
            Easing::EaseInOut => -((PI * x).cos() - 1.0) / 2.0,
            Easing::Bezier(curve) => curve.evaluate(x),
        }
    }

    /// The serialized name of this easing
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Hold => "hold",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
            Easing::Bezier(_) => "bezier",
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum PresetEasing {
    Linear,
    Hold,
    EaseIn,
    EaseOut,
    EaseInOut,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum TaggedEasing {
    Bezier(BezierEasing),
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum EasingRepr {
    Preset(PresetEasing),
    Tagged(TaggedEasing),
}

impl From<EasingRepr> for Easing {
    fn from(repr: EasingRepr) -> Self {
        match repr {
            EasingRepr::Preset(PresetEasing::Linear) => Easing::Linear,
            EasingRepr::Preset(PresetEasing::Hold) => Easing::Hold,
            EasingRepr::Preset(PresetEasing::EaseIn) => Easing::EaseIn,
            EasingRepr::Preset(PresetEasing::EaseOut) => Easing::EaseOut,
            EasingRepr::Preset(PresetEasing::EaseInOut) => Easing::EaseInOut,
            EasingRepr::Tagged(TaggedEasing::Bezier(curve)) => Easing::Bezier(curve),
        }
    }
}

impl From<Easing> for EasingRepr {
    fn from(easing: Easing) -> Self {
        match easing {
            Easing::Linear => EasingRepr::Preset(PresetEasing::Linear),
            Easing::Hold => EasingRepr::Preset(PresetEasing::Hold),
            Easing::EaseIn => EasingRepr::Preset(PresetEasing::EaseIn),
            Easing::EaseOut => EasingRepr::Preset(PresetEasing::EaseOut),
            Easing::EaseInOut => EasingRepr::Preset(PresetEasing::EaseInOut),
            Easing::Bezier(curve) => EasingRepr::Tagged(TaggedEasing::Bezier(curve)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_presets() {
        assert_eq!(Easing::Linear.evaluate(0.37), 0.37);
        assert_eq!(Easing::Hold.evaluate(0.99), 0.0);
        assert!(close(Easing::EaseIn.evaluate(1.0), 1.0));
        assert!(close(Easing::EaseOut.evaluate(1.0), 1.0));
        assert!(close(Easing::EaseInOut.evaluate(0.5), 0.5));
        assert!(Easing::EaseIn.evaluate(0.5) < 0.5);
        assert!(Easing::EaseOut.evaluate(0.5) > 0.5);
    }

    #[test]
    fn test_bezier_third_points_is_linear() {
        let curve = BezierEasing::new(Vec2::new(1.0 / 3.0, 1.0 / 3.0), Vec2::new(-1.0 / 3.0, -1.0 / 3.0));
        for x in [0.1, 0.25, 0.5, 0.8] {
            assert!(close(curve.evaluate(x), x), "x = {x}");
        }
    }

    #[test]
    fn test_bezier_ease_out_shape() {
        let curve = BezierEasing::new(Vec2::new(0.0, 0.5), Vec2::new(-0.5, 0.0));
        let y = curve.evaluate(0.25);
        assert!(y > 0.25 && y <= 1.0);
    }

    #[test]
    fn test_bezier_degenerate_control_points_terminate() {
        let folded = BezierEasing::new(Vec2::new(4.0, 0.0), Vec2::new(-5.0, 0.0));
        let flat = BezierEasing::new(Vec2::new(0.0, -1.0), Vec2::new(0.0, -1.0));
        let nan = BezierEasing::new(Vec2::new(f64::NAN, 0.0), Vec2::new(0.0, 0.0));

        // Only termination and determinism are promised here.
        for curve in [folded, flat, nan] {
            let first = curve.evaluate(0.5);
            let second = curve.evaluate(0.5);
            assert!(first.to_bits() == second.to_bits() || (first.is_nan() && second.is_nan()));
        }
    }

    #[test]
    fn test_preset_serialization() {
        assert_eq!(serde_json::to_string(&Easing::EaseInOut).unwrap(), "\"ease-in-out\"");
        let hold: Easing = serde_json::from_str("\"hold\"").unwrap();
        assert_eq!(hold, Easing::Hold);
    }

    #[test]
    fn test_bezier_serialization() {
        let easing = Easing::Bezier(BezierEasing::new(Vec2::new(0.25, 0.0), Vec2::new(-0.25, 0.0)));
        let json = serde_json::to_value(easing).unwrap();
        assert_eq!(json["type"], "bezier");
        assert_eq!(json["startControlPoint"]["x"], 0.25);
        assert_eq!(json["endControlPoint"]["x"], -0.25);

        let back: Easing = serde_json::from_value(json).unwrap();
        assert_eq!(back, easing);
    }
}
