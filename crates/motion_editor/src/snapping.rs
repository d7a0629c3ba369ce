// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline snapping.

use motion_scene::ObjectList;
use serde::{Deserialize, Serialize};

/// How dragged times snap on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimelineSnapping {
    /// No snapping
    Free,
    /// Nearest start or end of another object
    NearestObject,
    /// Beats of a song
    Bpm {
        /// Beats per minute
        bpm: f64,
        /// Subdivisions per beat
        division: f64,
    },
    /// Fixed grid
    #[serde(rename_all = "camelCase")]
    Grid {
        /// Grid spacing in milliseconds
        ms_per_segment: f64,
    },
}

impl Default for TimelineSnapping {
    fn default() -> Self {
        Self::Grid { ms_per_segment: 100.0 }
    }
}

fn grid_snap(time: f64, segment: f64) -> f64 {
    if segment > 0.0 && segment.is_finite() {
        (time / segment).round() * segment
    } else {
        time
    }
}

impl TimelineSnapping {
    /// Snap `time`.
    ///
    /// `objects` supplies the candidates for [`TimelineSnapping::NearestObject`];
    /// with no candidates the time is returned unchanged.
    pub fn snap(&self, time: f64, objects: &ObjectList) -> f64 {
        match *self {
            Self::Free => time,
            Self::NearestObject => objects
                .iter()
                .flat_map(|info| [info.time_start, info.time_end])
                .min_by(|a, b| (a - time).abs().total_cmp(&(b - time).abs()))
                .unwrap_or(time),
            Self::Bpm { bpm, division } => grid_snap(time, 60_000.0 / (bpm * division)),
            Self::Grid { ms_per_segment } => grid_snap(time, ms_per_segment),
        }
    }
}
